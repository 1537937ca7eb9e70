//! Validation run orchestrator
//!
//! Drives one pass over an input: the tokenizer produces fields, the record
//! assembler places them and runs the compliance and consistency validators,
//! and a run-owned [`DiagnosticCollector`] hands the results to a reporter at
//! each record boundary. Nothing is shared between runs, so validating the
//! same input twice yields the same diagnostics.
//!
//! # Examples
//!
//! ```
//! use adif_validator::app::services::diagnostics::CollectingReporter;
//! use adif_validator::{AdifValidator, ValidatorConfig};
//!
//! let validator = AdifValidator::from_config(ValidatorConfig::default()).unwrap();
//! let mut reporter = CollectingReporter::new();
//! let input = "<CALL:5>W1ABC<QSO_DATE:8>20230501<TIME_ON:4>1200<BAND:3>20M<MODE:3>SSB<EOR>";
//!
//! let summary = validator
//!     .validate_reader(input.as_bytes(), "example", &mut reporter)
//!     .unwrap();
//! assert_eq!(summary.records, 1);
//! assert_eq!(summary.counts.errors(), 0);
//! ```

use crate::app::models::RunSummary;
use crate::app::services::diagnostics::{DiagnosticCollector, DiagnosticReporter, RecordContext};
use crate::app::services::record_assembler::{AssemblyEvent, RecordAssembler};
use crate::app::services::reference_data::{ReferenceData, StaticReferenceData};
use crate::app::services::tokenizer::Tokenizer;
use crate::config::ValidatorConfig;
use crate::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Message emitted when the input starts directly with a field
pub const NO_HEADER_MESSAGE: &str = "This ADIF file has no header";

/// Validates ADI inputs against one reference dataset and configuration
pub struct AdifValidator<D: ReferenceData = StaticReferenceData> {
    reference: D,
    config: ValidatorConfig,
}

impl AdifValidator<StaticReferenceData> {
    /// Create a validator using the dataset the configuration names,
    /// or the built-in one
    ///
    /// # Errors
    /// * Returns `Error::Configuration` if the configuration is invalid
    /// * Returns an error if the reference dataset cannot be loaded
    pub fn from_config(config: ValidatorConfig) -> Result<Self> {
        config.validate()?;
        let reference = match &config.reference_data {
            Some(path) => StaticReferenceData::load_from_file(path)?,
            None => StaticReferenceData::builtin()?,
        };
        info!("Reference data: {}", reference.stats());
        Ok(Self::new(reference, config))
    }
}

impl<D: ReferenceData> AdifValidator<D> {
    pub fn new(reference: D, config: ValidatorConfig) -> Self {
        Self { reference, config }
    }

    pub fn reference(&self) -> &D {
        &self.reference
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate a file on disk
    pub fn validate_file(
        &self,
        path: &Path,
        reporter: &mut dyn DiagnosticReporter,
    ) -> Result<RunSummary> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        self.validate_reader(file, &path.display().to_string(), reporter)
    }

    /// Validate one input stream, reporting every diagnostic
    ///
    /// `source` names the input in errors and logs.
    ///
    /// # Errors
    /// * Returns `Error::EmptyInput` if the stream has no bytes
    /// * Returns `Error::CorruptInput` if too many consecutive length fields
    ///   are not numeric; diagnostics found so far are still reported
    /// * Returns `Error::Io` if reading or reporting fails
    pub fn validate_reader<R: Read>(
        &self,
        reader: R,
        source: &str,
        reporter: &mut dyn DiagnosticReporter,
    ) -> Result<RunSummary> {
        info!("Validating {}", source);

        let mut tokenizer = Tokenizer::new(reader, &self.reference)
            .with_max_bad_lengths(self.config.max_bad_lengths);
        let mut collector = DiagnosticCollector::new(reporter);

        let Some(first) = tokenizer.peek_byte()? else {
            return Err(Error::empty_input(source));
        };
        let has_header = first != b'<';
        if !has_header {
            collector.info(NO_HEADER_MESSAGE)?;
        }

        let mut assembler = RecordAssembler::new(&self.reference, has_header)
            .with_vendor_prefix(&self.config.vendor_prefix);
        let mut diagnostics = Vec::new();

        loop {
            let next = tokenizer.next_field(&mut diagnostics);
            collector.extend(diagnostics.drain(..));

            let field = match next {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(error) => {
                    warn!("Stopped validating {} at line {}", source, tokenizer.line());
                    collector.finish()?;
                    return Err(error);
                }
            };

            match assembler.accept(field, &mut diagnostics) {
                AssemblyEvent::Continue => collector.extend(diagnostics.drain(..)),
                AssemblyEvent::EndOfHeader => {
                    collector.extend(diagnostics.drain(..));
                    collector.flush(None)?;
                }
                AssemblyEvent::EndOfRecord(record) => {
                    collector.extend(diagnostics.drain(..));
                    collector.flush(Some(&RecordContext::from_record(&record)))?;
                }
            }
        }

        if !assembler.current().is_empty() {
            debug!(
                "Input ended with {} fields after the last record",
                assembler.current().len()
            );
        }
        collector.flush(None)?;

        let mut summary = RunSummary {
            lines: tokenizer.line(),
            records: assembler.records(),
            had_header: has_header,
            counts: collector.counts(),
        };
        collector.info(&summary.summary_line())?;
        collector.finish()?;
        summary.counts = collector.counts();

        info!(
            "Finished {}: {} lines, {} QSOs, {} compliance and {} consistency diagnostics",
            source,
            summary.lines,
            summary.records,
            summary.counts.compliance,
            summary.counts.consistency
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::services::diagnostics::CollectingReporter;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GOOD_QSO: &str =
        "<CALL:5>W1ABC<QSO_DATE:8>20230501<TIME_ON:4>1200<BAND:3>20M<MODE:3>SSB<EOR>\n";

    fn validator() -> AdifValidator {
        AdifValidator::from_config(ValidatorConfig::default()).unwrap()
    }

    fn run(input: &str) -> (RunSummary, CollectingReporter) {
        let mut reporter = CollectingReporter::new();
        let summary = validator()
            .validate_reader(input.as_bytes(), "test", &mut reporter)
            .unwrap();
        (summary, reporter)
    }

    #[test]
    fn test_headerless_input() {
        let (summary, reporter) = run(GOOD_QSO);

        assert!(!summary.had_header);
        assert_eq!(summary.records, 1);
        let notices = reporter.info.iter().filter(|m| *m == NO_HEADER_MESSAGE).count();
        assert_eq!(notices, 1);
        assert!(reporter.compliance.is_empty());
        assert!(reporter.consistency.is_empty());
    }

    #[test]
    fn test_header_is_detected() {
        let input = format!("Log export\n<ADIF_VER:5>3.1.4\n<EOH>\n{}", GOOD_QSO);
        let (summary, reporter) = run(&input);

        assert!(summary.had_header);
        assert!(!reporter.info.iter().any(|m| m == NO_HEADER_MESSAGE));
        assert_eq!(summary.lines, 5);
    }

    #[test]
    fn test_summary_line_is_last_info() {
        let (_, reporter) = run(GOOD_QSO);

        assert_eq!(
            reporter.info.last().map(String::as_str),
            Some("Handled 2 lines, 1 QSOs, Errors: 0")
        );
    }

    #[test]
    fn test_context_accompanies_first_diagnostic_of_each_kind() {
        let input = "<CALL:5>W1ABC<SWL:1>X<SWL:1>Z<QSO_DATE:8>20230501<BAND:3>20M<MODE:3>SSB<EOR>";
        let (summary, reporter) = run(input);

        assert_eq!(reporter.compliance.len(), 3);
        assert_eq!(
            reporter.compliance[0].context.as_deref(),
            Some("For the QSO with W1ABC on 2023-05-01 20M SSB:")
        );
        assert_eq!(reporter.compliance[1].context, None);
        assert_eq!(
            reporter.consistency_messages(),
            vec!["QSO does not have a valid time"]
        );
        assert!(reporter.consistency[0].context.is_some());
        assert_eq!(summary.counts.errors(), 4);
    }

    #[test]
    fn test_header_diagnostics_have_no_context() {
        let input = format!("header\n<CALL:4>K1MU<EOH>{}", GOOD_QSO);
        let (_, reporter) = run(&input);

        assert_eq!(
            reporter.compliance_messages(),
            vec!["tag 'CALL' is not a valid tag in the header"]
        );
        assert_eq!(reporter.compliance[0].context, None);
    }

    #[test]
    fn test_empty_input() {
        let mut reporter = CollectingReporter::new();
        let result = validator().validate_reader(&b""[..], "empty.adi", &mut reporter);

        assert!(matches!(result, Err(Error::EmptyInput { ref path }) if path == "empty.adi"));
    }

    #[test]
    fn test_corrupt_input_aborts() {
        let config = ValidatorConfig::default().with_max_bad_lengths(3);
        let validator = AdifValidator::from_config(config).unwrap();
        let mut reporter = CollectingReporter::new();

        let result =
            validator.validate_reader("<A:x><B:y><C:z><D:w><E:v>".as_bytes(), "bad", &mut reporter);

        assert!(matches!(result, Err(Error::CorruptInput { bad_lengths: 4, .. })));
        // Four length diagnostics plus three unknown-tag diagnostics, all flushed
        assert_eq!(reporter.compliance.len(), 7);
    }

    #[test]
    fn test_runs_are_independent() {
        let input = format!("<FOO:3>BAR{}<STATE:2>CA<EOR>", GOOD_QSO);
        let validator = validator();

        let mut first = CollectingReporter::new();
        let mut second = CollectingReporter::new();
        let a = validator.validate_reader(input.as_bytes(), "a", &mut first).unwrap();
        let b = validator.validate_reader(input.as_bytes(), "b", &mut second).unwrap();

        assert_eq!(a, b);
        assert_eq!(first.compliance, second.compliance);
        assert_eq!(first.consistency, second.consistency);
    }

    #[test]
    fn test_validate_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}{}", GOOD_QSO, GOOD_QSO).unwrap();

        let mut reporter = CollectingReporter::new();
        let summary = validator().validate_file(file.path(), &mut reporter).unwrap();
        assert_eq!(summary.records, 2);
    }

    #[test]
    fn test_missing_file() {
        let mut reporter = CollectingReporter::new();
        let result = validator().validate_file(Path::new("/no/such/log.adi"), &mut reporter);

        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
