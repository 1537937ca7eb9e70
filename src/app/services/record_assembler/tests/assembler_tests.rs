//! Tests for header and record placement rules

use super::*;
use crate::app::models::{DiagnosticKind, RecordKind};
use crate::app::services::record_assembler::RecordAssembler;

#[test]
fn test_header_then_record() {
    let mut fields = vec![("ADIF_VER", "3.1.4"), ("PROGRAMID", "test"), ("EOH", "")];
    fields.extend_from_slice(GOOD_QSO);
    let assembled = assemble(true, &fields);

    assert!(assembled.diagnostics.is_empty(), "{:?}", assembled.messages());
    assert_eq!(assembled.headers_ended, 1);
    assert_eq!(assembled.records.len(), 1);

    let record = &assembled.records[0];
    assert_eq!(record.kind(), RecordKind::Qso);
    assert_eq!(record.get("CALL").unwrap().value, "W1ABC");
    assert!(!record.contains("EOR"));
    assert_eq!(record.end_line(), 9);
}

#[test]
fn test_headerless_input() {
    let assembled = assemble(false, GOOD_QSO);

    assert!(assembled.diagnostics.is_empty());
    assert_eq!(assembled.headers_ended, 0);
    assert_eq!(assembled.records.len(), 1);
}

#[test]
fn test_record_tag_in_header() {
    let assembled = assemble(true, &[("CALL", "W1ABC"), ("EOH", "")]);

    assert_eq!(
        assembled.messages(),
        vec!["tag 'CALL' is not a valid tag in the header"]
    );
}

#[test]
fn test_end_of_record_in_header() {
    let assembled = assemble(true, &[("ADIF_VER", "3.1.4"), ("EOR", "")]);

    assert!(
        assembled
            .messages()
            .contains(&"Got <EOR> tag while processing header".to_string())
    );
    assert!(assembled.records.is_empty());
}

#[test]
fn test_unknown_record_tag_named_once() {
    let mut fields = vec![("FOO", "BAR")];
    fields.extend_from_slice(GOOD_QSO);
    let assembled = assemble(false, &fields);

    assert_eq!(
        assembled.messages(),
        vec!["tag 'FOO' (BAR) is not a valid tag in a QSO record"]
    );
    assert_eq!(assembled.diagnostics[0].kind, DiagnosticKind::Compliance);
    assert_eq!(assembled.diagnostics[0].line, 1);
}

#[test]
fn test_end_of_header_in_record() {
    let mut fields = vec![("EOH", "")];
    fields.extend_from_slice(GOOD_QSO);
    let assembled = assemble(false, &fields);

    assert!(
        assembled
            .messages()
            .contains(&"Got EOH tag while not in the header".to_string())
    );
}

#[test]
fn test_duplicate_field_last_wins() {
    let assembled = assemble(
        false,
        &[
            ("CALL", "W1ABC"),
            ("QSO_DATE", "20230501"),
            ("TIME_ON", "1200"),
            ("BAND", "20M"),
            ("MODE", "SSB"),
            ("MODE", "CW"),
            ("EOR", ""),
        ],
    );

    assert_eq!(
        assembled.messages(),
        vec!["tag 'MODE' appears more than once in a record, replacing old value SSB with new value CW"]
    );
    assert_eq!(assembled.records[0].get("MODE").unwrap().value, "CW");
}

#[test]
fn test_field_without_length_keeps_stored_value() {
    let mut fields: Vec<TagField> = GOOD_QSO[..5]
        .iter()
        .enumerate()
        .map(|(index, (name, value))| TagField::new(*name, *value, index + 1))
        .collect();
    fields.push(TagField::new("CALL", "", 6).with_length(None));
    fields.push(TagField::new("EOR", "", 7).with_length(None));

    let assembled = assemble_fields(false, fields);

    assert!(
        !assembled
            .messages()
            .iter()
            .any(|m| m.contains("appears more than once")),
        "{:?}",
        assembled.messages()
    );
    let call = assembled.records[0].get("CALL").unwrap();
    assert_eq!(call.value, "W1ABC");
    assert_eq!(call.line, 1);
}

#[test]
fn test_field_without_length_is_stored_when_new() {
    let fields = vec![
        TagField::new("CALL", "W1ABC", 1),
        TagField::new("COMMENT", "", 2).with_length(None),
        TagField::new("EOR", "", 3).with_length(None),
    ];

    let assembled = assemble_fields(false, fields);

    assert!(assembled.records[0].contains("COMMENT"));
}

#[test]
fn test_duplicate_header_field() {
    let assembled = assemble(true, &[("PROGRAMID", "a"), ("PROGRAMID", "b"), ("EOH", "")]);

    assert_eq!(
        assembled.messages(),
        vec!["tag 'PROGRAMID' appears more than once in the header, replacing old value a with new value b"]
    );
}

#[test]
fn test_records_do_not_share_fields() {
    let mut fields = GOOD_QSO.to_vec();
    fields.extend_from_slice(&[("CALL", "K1MU"), ("EOR", "")]);
    let assembled = assemble(false, &fields);

    assert_eq!(assembled.records.len(), 2);
    assert!(!assembled.records[1].contains("MODE"));
    assert!(
        assembled
            .messages()
            .contains(&"QSO does not have a valid mode".to_string())
    );
}

#[test]
fn test_compliance_runs_on_each_field() {
    let mut fields = vec![("SWL", "maybe")];
    fields.extend_from_slice(GOOD_QSO);
    let assembled = assemble(false, &fields);

    assert_eq!(
        assembled.messages(),
        vec!["tag 'SWL' should be 'Y' or 'N' but is 'MAYBE'"]
    );
}

#[test]
fn test_vendor_fields_are_skipped() {
    let reference = reference();
    let mut assembler = RecordAssembler::new(&reference, false).with_vendor_prefix("app_");
    let mut diagnostics = Vec::new();

    assembler.accept(TagField::new("APP_LOGGER_ID", "42", 1), &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert!(assembler.current().is_empty());
}

#[test]
fn test_user_field_declared_in_header() {
    let mut fields = vec![("USERDEF1", "EPC"), ("EOH", ""), ("EPC", "1234")];
    fields.extend_from_slice(GOOD_QSO);
    let assembled = assemble(true, &fields);

    assert!(assembled.diagnostics.is_empty(), "{:?}", assembled.messages());
    assert_eq!(assembled.records[0].get("EPC").unwrap().value, "1234");
}

#[test]
fn test_counts_and_state() {
    let reference = reference();
    let mut assembler = RecordAssembler::new(&reference, true);
    let mut diagnostics = Vec::new();

    assert!(assembler.in_header());
    assembler.accept(TagField::new("USERDEF1", "EPC", 1), &mut diagnostics);
    assembler.accept(TagField::new("EOH", "", 1), &mut diagnostics);
    assert!(!assembler.in_header());
    assert_eq!(assembler.user_fields().len(), 1);

    for (name, value) in GOOD_QSO {
        assembler.accept(TagField::new(*name, *value, 2), &mut diagnostics);
    }
    assert_eq!(assembler.records(), 1);
    assert!(assembler.current().is_empty());
}
