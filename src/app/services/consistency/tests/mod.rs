//! Shared test utilities for consistency tests

use crate::app::models::{Diagnostic, DiagnosticKind, Record, RecordKind};
use crate::app::services::consistency::ConsistencyValidator;
use crate::app::services::reference_data::StaticReferenceData;

pub mod grid_tests;

/// Line the end-of-record marker sits on in every test record
pub const END_LINE: usize = 9;

/// Fields that make a record complete on their own
pub const BASELINE: &[(&str, &str)] = &[
    ("CALL", "W1ABC"),
    ("QSO_DATE", "20230501"),
    ("TIME_ON", "1200"),
    ("BAND", "20M"),
    ("MODE", "SSB"),
];

pub fn reference() -> StaticReferenceData {
    StaticReferenceData::builtin().unwrap()
}

/// Finished record holding exactly the given fields, each on line 1
pub fn record(fields: &[(&str, &str)]) -> Record {
    let mut record = Record::new(RecordKind::Qso);
    for (name, value) in fields {
        record.insert(name, *value, 1);
    }
    record.finish(END_LINE);
    record
}

/// Baseline record with extra fields added or replaced
pub fn qso(extra: &[(&str, &str)]) -> Record {
    qso_without(&[], extra)
}

/// Baseline record minus some fields, plus extra ones
pub fn qso_without(missing: &[&str], extra: &[(&str, &str)]) -> Record {
    let fields: Vec<(&str, &str)> = BASELINE
        .iter()
        .filter(|(name, _)| !missing.contains(name))
        .chain(extra.iter())
        .copied()
        .collect();
    record(&fields)
}

pub fn validate(record: &Record) -> Vec<Diagnostic> {
    let reference = reference();
    ConsistencyValidator::new(&reference).validate(record)
}

/// Messages of the diagnostics of one kind
pub fn messages_of(diagnostics: &[Diagnostic], kind: DiagnosticKind) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.kind == kind)
        .map(|d| d.message.clone())
        .collect()
}

pub fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}

#[test]
fn test_baseline_is_clean() {
    assert!(validate(&qso(&[])).is_empty());
}
