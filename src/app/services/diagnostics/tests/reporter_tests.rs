//! Tests for report rendering

use super::*;
use crate::app::models::Diagnostic;
use crate::app::services::diagnostics::{DiagnosticReporter, RecordContext, ReportWriter};
use crate::config::ReportFormat;

fn writer(format: ReportFormat) -> (ReportWriter, SharedBuffer, SharedBuffer, SharedBuffer) {
    let compliance = SharedBuffer::default();
    let consistency = SharedBuffer::default();
    let info = SharedBuffer::default();
    let writer = ReportWriter::new(
        format,
        Box::new(compliance.clone()),
        Box::new(consistency.clone()),
        Box::new(info.clone()),
    );
    (writer, compliance, consistency, info)
}

#[test]
fn test_plain_compliance_preamble_once() {
    let (mut writer, compliance, consistency, _) = writer(ReportFormat::Plain);

    writer
        .report_compliance(&Diagnostic::compliance("first problem", 2), None)
        .unwrap();
    writer
        .report_compliance(&Diagnostic::compliance("second problem", 5), None)
        .unwrap();

    let text = compliance.contents();
    assert_eq!(text.matches("The following messages").count(), 1);
    assert!(text.contains("ADIF Compliance error on line 2: first problem\n"));
    assert!(text.contains("ADIF Compliance error on line 5: second problem\n"));
    assert!(consistency.contents().is_empty());
}

#[test]
fn test_plain_consistency_with_context() {
    let (mut writer, _, consistency, _) = writer(ReportFormat::Plain);
    let context = RecordContext::from_record(&record_with(&[("CALL", "W1ABC"), ("BAND", "20M")]));

    writer
        .report_consistency(&Diagnostic::consistency("bad zone", 7), Some(&context))
        .unwrap();

    let text = consistency.contents();
    assert!(text.starts_with("The following messages represent issues where the QSOs"));
    assert!(text.contains("\nFor the QSO with W1ABC 20M:\nConsistency error on line 7: bad zone\n"));
}

#[test]
fn test_html_rendering() {
    let (mut writer, compliance, _, info) = writer(ReportFormat::Html);
    let context = RecordContext::from_record(&record_with(&[("CALL", "W1ABC")]));

    writer
        .report_compliance(
            &Diagnostic::compliance("tag 'A<B' is odd", 1),
            Some(&context),
        )
        .unwrap();
    writer.report_info("done").unwrap();

    let text = compliance.contents();
    assert!(text.starts_with("<h3>The following messages"));
    assert!(text.contains("<b>For the QSO with W1ABC:</b>"));
    assert!(text.contains("ADIF Compliance error on line 1: tag 'A&lt;B' is odd<br />\n"));
    assert_eq!(info.contents(), "Informational: done<br />\n");
}

#[test]
fn test_plain_info() {
    let (mut writer, _, _, info) = writer(ReportFormat::Plain);

    writer.report_info("This ADIF file has no header").unwrap();
    writer.finish().unwrap();

    assert_eq!(info.contents(), "Informational: This ADIF file has no header\n");
}
