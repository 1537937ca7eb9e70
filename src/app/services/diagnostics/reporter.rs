//! Diagnostic reporters
//!
//! [`ReportWriter`] renders the two reports in plain text or HTML, each with
//! a one-time explanatory preamble before its first message.
//! [`CollectingReporter`] keeps everything in memory for tests and library
//! callers.

use super::context::RecordContext;
use crate::app::models::Diagnostic;
use crate::config::ReportFormat;
use crate::{Error, Result};
use std::io::{self, Write};

const COMPLIANCE_PREAMBLE: &str = "The following messages represent issues where the submitted ADIF file is not compliant\nwith the ADIF standard.\n";

const CONSISTENCY_PREAMBLE: &str = "The following messages represent issues where the QSOs in the submitted ADIF file are compliant\nwith the ADIF standard, but have inconsistent details such as invalid Country, Zones, etc.\nThese findings do not indicate any structural issues with the submitted ADIF file,\nbut they do indicate potentially incorrect records for the QSO being analyzed.\n";

/// Destination for diagnostics and informational messages
pub trait DiagnosticReporter {
    /// Report a compliance diagnostic, preceded by the record context if given
    fn report_compliance(
        &mut self,
        diagnostic: &Diagnostic,
        context: Option<&RecordContext>,
    ) -> Result<()>;

    /// Report a consistency diagnostic, preceded by the record context if given
    fn report_consistency(
        &mut self,
        diagnostic: &Diagnostic,
        context: Option<&RecordContext>,
    ) -> Result<()>;

    /// Report an informational message
    fn report_info(&mut self, message: &str) -> Result<()>;

    /// Flush any buffered output
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Report renderer writing to arbitrary sinks
pub struct ReportWriter {
    format: ReportFormat,
    compliance: Box<dyn Write>,
    consistency: Box<dyn Write>,
    info: Box<dyn Write>,
    compliance_started: bool,
    consistency_started: bool,
}

impl ReportWriter {
    pub fn new(
        format: ReportFormat,
        compliance: Box<dyn Write>,
        consistency: Box<dyn Write>,
        info: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            compliance,
            consistency,
            info,
            compliance_started: false,
            consistency_started: false,
        }
    }

    /// Writer sending both reports and informational messages to stdout
    pub fn stdout(format: ReportFormat) -> Self {
        Self::new(
            format,
            Box::new(io::stdout()),
            Box::new(io::stdout()),
            Box::new(io::stdout()),
        )
    }

    fn line_break(&self) -> &'static str {
        match self.format {
            ReportFormat::Plain => "",
            ReportFormat::Html => "<br />",
        }
    }

    fn render_preamble(&self, preamble: &str) -> String {
        match self.format {
            ReportFormat::Plain => format!("{}\n", preamble),
            ReportFormat::Html => format!("<h3>{}</h3>\n", preamble.trim_end().replace('\n', " ")),
        }
    }

    fn render_context(&self, context: Option<&RecordContext>) -> Option<String> {
        let summary = context?.summary()?;
        Some(match self.format {
            ReportFormat::Plain => format!("\n{}\n", summary),
            ReportFormat::Html => format!("\n<br /><b>{}</b><br />\n", escape_html(&summary)),
        })
    }

    fn render_message(&self, label: &str, diagnostic: &Diagnostic) -> String {
        let message = match self.format {
            ReportFormat::Plain => diagnostic.message.clone(),
            ReportFormat::Html => escape_html(&diagnostic.message),
        };
        format!(
            "{} on line {}: {}{}\n",
            label,
            diagnostic.line,
            message,
            self.line_break()
        )
    }
}

impl DiagnosticReporter for ReportWriter {
    fn report_compliance(
        &mut self,
        diagnostic: &Diagnostic,
        context: Option<&RecordContext>,
    ) -> Result<()> {
        let mut text = String::new();
        if !self.compliance_started {
            text.push_str(&self.render_preamble(COMPLIANCE_PREAMBLE));
            self.compliance_started = true;
        }
        if let Some(context) = self.render_context(context) {
            text.push_str(&context);
        }
        text.push_str(&self.render_message("ADIF Compliance error", diagnostic));
        write_report(&mut self.compliance, &text, "compliance report")
    }

    fn report_consistency(
        &mut self,
        diagnostic: &Diagnostic,
        context: Option<&RecordContext>,
    ) -> Result<()> {
        let mut text = String::new();
        if !self.consistency_started {
            text.push_str(&self.render_preamble(CONSISTENCY_PREAMBLE));
            self.consistency_started = true;
        }
        if let Some(context) = self.render_context(context) {
            text.push_str(&context);
        }
        text.push_str(&self.render_message("Consistency error", diagnostic));
        write_report(&mut self.consistency, &text, "consistency report")
    }

    fn report_info(&mut self, message: &str) -> Result<()> {
        let text = match self.format {
            ReportFormat::Plain => format!("Informational: {}\n", message),
            ReportFormat::Html => format!("Informational: {}<br />\n", escape_html(message)),
        };
        write_report(&mut self.info, &text, "informational output")
    }

    fn finish(&mut self) -> Result<()> {
        for (sink, name) in [
            (&mut self.compliance, "compliance report"),
            (&mut self.consistency, "consistency report"),
            (&mut self.info, "informational output"),
        ] {
            sink.flush()
                .map_err(|e| Error::io(format!("Failed to flush {}", name), e))?;
        }
        Ok(())
    }
}

fn write_report(sink: &mut Box<dyn Write>, text: &str, name: &str) -> Result<()> {
    sink.write_all(text.as_bytes())
        .map_err(|e| Error::io(format!("Failed to write {}", name), e))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// A diagnostic as seen by a reporter, with the context it was given
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportedDiagnostic {
    pub diagnostic: Diagnostic,
    pub context: Option<String>,
}

/// Reporter that keeps every message in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    pub compliance: Vec<ReportedDiagnostic>,
    pub consistency: Vec<ReportedDiagnostic>,
    pub info: Vec<String>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compliance messages in report order
    pub fn compliance_messages(&self) -> Vec<&str> {
        self.compliance
            .iter()
            .map(|r| r.diagnostic.message.as_str())
            .collect()
    }

    /// Consistency messages in report order
    pub fn consistency_messages(&self) -> Vec<&str> {
        self.consistency
            .iter()
            .map(|r| r.diagnostic.message.as_str())
            .collect()
    }
}

impl DiagnosticReporter for CollectingReporter {
    fn report_compliance(
        &mut self,
        diagnostic: &Diagnostic,
        context: Option<&RecordContext>,
    ) -> Result<()> {
        self.compliance.push(ReportedDiagnostic {
            diagnostic: diagnostic.clone(),
            context: context.and_then(|c| c.summary()),
        });
        Ok(())
    }

    fn report_consistency(
        &mut self,
        diagnostic: &Diagnostic,
        context: Option<&RecordContext>,
    ) -> Result<()> {
        self.consistency.push(ReportedDiagnostic {
            diagnostic: diagnostic.clone(),
            context: context.and_then(|c| c.summary()),
        });
        Ok(())
    }

    fn report_info(&mut self, message: &str) -> Result<()> {
        self.info.push(message.to_string());
        Ok(())
    }
}
