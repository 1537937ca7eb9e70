//! Run-owned diagnostic context
//!
//! One collector exists per validation run. It owns the diagnostic counts and
//! the buffer of diagnostics raised since the last record boundary, so no
//! state survives from one run to the next.

use super::context::RecordContext;
use super::reporter::DiagnosticReporter;
use crate::Result;
use crate::app::models::{Diagnostic, DiagnosticCounts, DiagnosticKind};

pub struct DiagnosticCollector<'r> {
    reporter: &'r mut dyn DiagnosticReporter,
    pending: Vec<Diagnostic>,
    counts: DiagnosticCounts,
}

impl<'r> DiagnosticCollector<'r> {
    pub fn new(reporter: &'r mut dyn DiagnosticReporter) -> Self {
        Self {
            reporter,
            pending: Vec::new(),
            counts: DiagnosticCounts::default(),
        }
    }

    /// Count and buffer diagnostics until the next flush
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.counts.record(diagnostic.kind);
            self.pending.push(diagnostic);
        }
    }

    /// Emit an informational message immediately
    pub fn info(&mut self, message: &str) -> Result<()> {
        self.counts.info += 1;
        self.reporter.report_info(message)
    }

    /// Hand buffered diagnostics to the reporter
    ///
    /// The context accompanies the first compliance and the first consistency
    /// diagnostic of the flush and is dropped afterwards.
    pub fn flush(&mut self, context: Option<&RecordContext>) -> Result<()> {
        let context = context.filter(|context| !context.is_empty());
        let mut compliance_context = context;
        let mut consistency_context = context;

        for diagnostic in std::mem::take(&mut self.pending) {
            match diagnostic.kind {
                DiagnosticKind::Compliance => self
                    .reporter
                    .report_compliance(&diagnostic, compliance_context.take())?,
                DiagnosticKind::Consistency => self
                    .reporter
                    .report_consistency(&diagnostic, consistency_context.take())?,
            }
        }
        Ok(())
    }

    /// Number of diagnostics waiting for a flush
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn counts(&self) -> DiagnosticCounts {
        self.counts
    }

    /// Flush anything left and let the reporter finish its outputs
    pub fn finish(&mut self) -> Result<()> {
        self.flush(None)?;
        self.reporter.finish()
    }
}
