//! Shared test utilities for tokenizer tests

use crate::app::models::{Diagnostic, TagField};
use crate::app::services::reference_data::StaticReferenceData;
use crate::app::services::tokenizer::Tokenizer;


pub fn reference() -> StaticReferenceData {
    StaticReferenceData::builtin().unwrap()
}

/// Tokenize a whole input, returning every field and diagnostic
pub fn tokenize(input: &[u8]) -> (Vec<TagField>, Vec<Diagnostic>) {
    let reference = reference();
    let mut tokenizer = Tokenizer::new(input, &reference);
    let mut fields = Vec::new();
    let mut diagnostics = Vec::new();
    while let Some(field) = tokenizer.next_field(&mut diagnostics).unwrap() {
        fields.push(field);
    }
    (fields, diagnostics)
}
