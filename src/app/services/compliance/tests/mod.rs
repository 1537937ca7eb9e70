//! Shared test utilities for compliance tests

use crate::app::models::{Diagnostic, TagField};
use crate::app::services::compliance::ComplianceValidator;
use crate::app::services::record_assembler::UserFieldRegistry;
use crate::app::services::reference_data::StaticReferenceData;


pub fn reference() -> StaticReferenceData {
    StaticReferenceData::builtin().unwrap()
}

/// Check one field against the built-in reference with no user fields
pub fn check(name: &str, value: &str) -> Vec<Diagnostic> {
    check_field(&TagField::new(name, value, 1))
}

pub fn check_field(field: &TagField) -> Vec<Diagnostic> {
    let reference = reference();
    ComplianceValidator::new(&reference).validate(field, &UserFieldRegistry::new())
}

/// Message text of each diagnostic
pub fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message.clone()).collect()
}
