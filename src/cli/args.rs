//! Command-line argument definitions for the ADIF validator
//!
//! This module defines the CLI interface using the clap derive API.

use crate::config::{ReportFormat, ValidatorConfig};
use crate::{Error, Result};
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the ADIF log validator
///
/// Checks an ADIF (`.adi`) amateur radio log for compliance with the ADIF
/// standard and for consistency of each QSO against reference data.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "adif-validator",
    version,
    about = "Check ADIF amateur radio logs for compliance and consistency",
    long_about = "Reads an ADIF (.adi) log file and reports two kinds of findings: \
                  compliance errors, where the file breaks the ADIF standard itself, and \
                  consistency errors, where a QSO is well-formed but its band, entity, \
                  subdivision, county, zone or dates do not agree with reference data."
)]
pub struct Args {
    /// ADIF file to validate
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help = "ADIF file to validate"
    )]
    pub file: Option<PathBuf>,

    /// Destination of the compliance report
    ///
    /// Defaults to standard output.
    #[arg(
        short = 'a',
        long = "compliance-output",
        value_name = "FILE",
        help = "Write compliance errors to this file"
    )]
    pub compliance_output: Option<PathBuf>,

    /// Destination of the consistency report
    ///
    /// Defaults to standard output.
    #[arg(
        short = 'c',
        long = "consistency-output",
        value_name = "FILE",
        help = "Write consistency errors to this file"
    )]
    pub consistency_output: Option<PathBuf>,

    /// Render reports as HTML fragments
    #[arg(short = 'w', long = "html", help = "Write reports as HTML")]
    pub html: bool,

    /// Reference dataset replacing the built-in one
    #[arg(
        long = "reference",
        value_name = "FILE",
        help = "Reference data file (TOML) to use instead of the built-in dataset"
    )]
    pub reference: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/adif-validator/config.toml
    #[arg(
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and hides the progress
    /// bar and the completion summary.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        let Some(file) = &self.file else {
            return Err(Error::MissingInput);
        };

        if file.is_dir() {
            return Err(Error::configuration(format!(
                "Input path is a directory: {}",
                file.display()
            )));
        }

        for output in [&self.compliance_output, &self.consistency_output]
            .into_iter()
            .flatten()
        {
            if output == file {
                return Err(Error::configuration(format!(
                    "Report output would overwrite the input file: {}",
                    output.display()
                )));
            }
        }

        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_to(&self, mut config: ValidatorConfig) -> ValidatorConfig {
        if self.html {
            config = config.with_report_format(ReportFormat::Html);
        }
        if let Some(reference) = &self.reference {
            config = config.with_reference_data(reference.clone());
        }
        if !self.show_progress() {
            config = config.without_progress();
        }
        config
    }
}
