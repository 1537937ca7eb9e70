//! Shared test utilities for record assembler tests

use crate::app::models::{Diagnostic, Record, TagField};
use crate::app::services::record_assembler::{AssemblyEvent, RecordAssembler};
use crate::app::services::reference_data::StaticReferenceData;

pub mod assembler_tests;
pub mod user_fields_tests;

pub fn reference() -> StaticReferenceData {
    StaticReferenceData::builtin().unwrap()
}

/// Outcome of feeding a list of fields through an assembler
#[derive(Debug, Default)]
pub struct Assembled {
    pub records: Vec<Record>,
    pub headers_ended: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembled {
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }
}

/// Feed `(name, value)` pairs, one per line, through a fresh assembler
pub fn assemble(has_header: bool, fields: &[(&str, &str)]) -> Assembled {
    let fields = fields
        .iter()
        .enumerate()
        .map(|(index, (name, value))| TagField::new(*name, *value, index + 1))
        .collect();
    assemble_fields(has_header, fields)
}

/// Feed prepared fields through a fresh assembler
pub fn assemble_fields(has_header: bool, fields: Vec<TagField>) -> Assembled {
    let reference = reference();
    let mut assembler = RecordAssembler::new(&reference, has_header);
    let mut assembled = Assembled::default();

    for field in fields {
        match assembler.accept(field, &mut assembled.diagnostics) {
            AssemblyEvent::Continue => {}
            AssemblyEvent::EndOfHeader => assembled.headers_ended += 1,
            AssemblyEvent::EndOfRecord(record) => assembled.records.push(record),
        }
    }
    assembled
}

/// Fields of a record that passes every check
pub const GOOD_QSO: &[(&str, &str)] = &[
    ("CALL", "W1ABC"),
    ("QSO_DATE", "20230501"),
    ("TIME_ON", "1200"),
    ("BAND", "20M"),
    ("MODE", "SSB"),
    ("EOR", ""),
];
