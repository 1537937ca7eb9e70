//! Compliance validator: per-field checks against the ADIF type system
//!
//! Each field is checked on its own, with no record-level context. Tags
//! missing from the reference type table are accepted unchecked so newer
//! ADIF versions do not produce noise; user-defined fields are checked
//! against the type and constraint their declaration gave them.
//!
//! # Architecture
//!
//! - [`ComplianceValidator`]: type lookup, declared-type agreement, dispatch
//! - `checks`: one function per [`DataType`] variant
//! - `callsign`: the amateur callsign shape check

use crate::app::models::{DataType, Diagnostic, TagField};
use crate::app::services::record_assembler::UserFieldRegistry;
use crate::app::services::reference_data::ReferenceData;
use std::collections::BTreeSet;

pub mod callsign;
pub mod checks;

#[cfg(test)]
pub mod tests;

pub use callsign::{CallsignProblem, check_callsign};

/// Range and value set applying to one field
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldRules<'r> {
    pub range: Option<(f64, f64)>,
    pub enumeration: Option<&'r BTreeSet<String>>,
    /// User-defined fields have no reference enumeration to fall back on
    pub user_defined: bool,
}

pub struct ComplianceValidator<'a> {
    reference: &'a dyn ReferenceData,
}

impl<'a> ComplianceValidator<'a> {
    pub fn new(reference: &'a dyn ReferenceData) -> Self {
        Self { reference }
    }

    /// Check one field, returning every problem found
    pub fn validate(&self, field: &TagField, user_fields: &UserFieldRegistry) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if let Some(data_type) = self.reference.type_of(&field.name) {
            let rules = FieldRules {
                range: self.reference.range_of(&field.name),
                enumeration: self.reference.enumeration_of(&field.name),
                user_defined: false,
            };
            self.check_declared_type(field, &data_type, &mut diagnostics);
            checks::check_value(field, &data_type, &rules, &mut diagnostics);
        } else if let Some(user_field) = user_fields.get(&field.name) {
            let rules = FieldRules {
                range: user_field.range(),
                enumeration: user_field.values(),
                user_defined: true,
            };
            self.check_declared_type(field, &user_field.data_type, &mut diagnostics);
            checks::check_value(field, &user_field.data_type, &rules, &mut diagnostics);
        }

        diagnostics
    }

    /// A valid indicator that cannot describe the tag's type is a defect
    fn check_declared_type(
        &self,
        field: &TagField,
        expected: &DataType,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(declared) = field.declared_type.as_deref() else {
            return;
        };
        if matches!(expected, DataType::Unknown(_)) || !self.reference.is_valid_type_code(declared)
        {
            return;
        }
        if !expected.compatible_indicators().contains(&declared) {
            diagnostics.push(Diagnostic::compliance(
                format!(
                    "tag '{}' specifies type '{}' but is expected to be {}",
                    field.name,
                    declared,
                    expected.description()
                ),
                field.line,
            ));
        }
    }
}
