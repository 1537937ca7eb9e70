//! Command implementations for the ADIF validator CLI
//!
//! This module contains the main command logic: logging setup, layered
//! configuration loading, opening the report outputs and running one
//! validation pass over the input file.

use crate::app::models::RunSummary;
use crate::app::services::diagnostics::ReportWriter;
use crate::app::services::validator::AdifValidator;
use crate::cli::args::Args;
use crate::config::ValidatorConfig;
use crate::{Error, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Read, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Main entry point for CLI command execution
///
/// Returns the run summary once the whole file has been scanned, however
/// many diagnostics it produced.
pub fn run(args: Args) -> Result<RunSummary> {
    let start_time = Instant::now();

    setup_logging(&args)?;

    info!("Starting ADIF validator v{}", env!("CARGO_PKG_VERSION"));
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let input = args.file.clone().ok_or(Error::MissingInput)?;

    let config = load_configuration(&args)?;
    let validator = AdifValidator::from_config(config)?;

    let mut reporter = open_report_writer(&args, validator.config())?;
    let file = File::open(&input)
        .map_err(|e| Error::io(format!("Failed to open {}", input.display()), e))?;

    let progress_bar = create_progress_bar(&file, validator.config());
    let reader: Box<dyn Read> = match &progress_bar {
        Some(pb) => Box::new(pb.wrap_read(file)),
        None => Box::new(file),
    };

    let result = validator.validate_reader(reader, &input.display().to_string(), &mut reporter);

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }
    let summary = result?;

    if !args.quiet {
        print_completion_summary(&input, &summary, start_time);
    }

    Ok(summary)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adif_validator={}", log_level)));

    if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .map_err(|e| Error::configuration(format!("Failed to initialise logging: {}", e)))?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
fn load_configuration(args: &Args) -> Result<ValidatorConfig> {
    info!("Loading configuration");

    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => match ValidatorConfig::default_path().filter(|path| path.exists()) {
            Some(path) => info!("Using config file: {}", path.display()),
            None => info!("No config file found, using defaults"),
        },
    }

    let config = args.apply_to(ValidatorConfig::load_layered(args.config_file.as_deref())?);
    config.validate()?;

    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Open the compliance and consistency destinations
///
/// Each report goes to its named file, or to stdout when none is given.
/// Informational messages always go to stdout.
fn open_report_writer(args: &Args, config: &ValidatorConfig) -> Result<ReportWriter> {
    let compliance = open_output(args.compliance_output.as_deref())?;
    let consistency = open_output(args.consistency_output.as_deref())?;
    Ok(ReportWriter::new(
        config.report_format,
        compliance,
        consistency,
        Box::new(io::stdout()),
    ))
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = path else {
        return Ok(Box::new(io::stdout()));
    };
    let file = File::create(path)
        .map_err(|e| Error::io(format!("Failed to create report {}", path.display()), e))?;
    debug!("Writing report to {}", path.display());
    Ok(Box::new(BufWriter::new(file)))
}

/// Byte progress bar over the input, only for interactive runs
fn create_progress_bar(file: &File, config: &ValidatorConfig) -> Option<ProgressBar> {
    if !config.show_progress || !io::stderr().is_terminal() {
        return None;
    }
    let length = file.metadata().map(|m| m.len()).unwrap_or(0);

    let pb = ProgressBar::new(length);
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message("Validating");
    Some(pb)
}

/// One-line coloured completion summary on stderr
fn print_completion_summary(input: &Path, summary: &RunSummary, start_time: Instant) {
    let duration = HumanDuration(start_time.elapsed());
    let errors = summary.counts.errors();
    let verdict = if errors == 0 {
        "no problems found".green().bold()
    } else {
        format!("{} problems found", errors).as_str().yellow().bold()
    };

    eprintln!(
        "{} {}: {} lines, {} QSOs, {} compliance and {} consistency ({}) in {}",
        "Validated".bold(),
        input.display(),
        summary.lines,
        summary.records,
        summary.counts.compliance,
        summary.counts.consistency,
        verdict,
        duration
    );
}
