//! Record assembler: header and QSO record structure
//!
//! Consumes tokenized fields, separates the optional header from the QSO
//! records that follow it, accumulates each record's fields into a
//! [`Record`] and flags fields that are unknown, duplicated or out of place.
//! Every field is passed to the compliance validator as it arrives; every
//! completed record is passed to the consistency validator at its
//! end-of-record marker.
//!
//! # Architecture
//!
//! - [`RecordAssembler`]: header/record state and field placement rules
//! - `user_fields`: the `USERDEFn` declaration registry
//!
//! The current record is owned by the assembler until its end-of-record
//! marker, then handed to the caller and replaced by a fresh one.

use crate::app::models::{Diagnostic, Record, RecordKind, TagField};
use crate::app::services::compliance::ComplianceValidator;
use crate::app::services::consistency::ConsistencyValidator;
use crate::app::services::reference_data::ReferenceData;
use crate::constants::{DEFAULT_VENDOR_PREFIX, TAG_EOH, TAG_EOR, TAG_USERDEF};
use std::mem;
use tracing::debug;

pub mod user_fields;

#[cfg(test)]
pub mod tests;

pub use user_fields::{UserField, UserFieldConstraint, UserFieldRegistry, is_declaration};

/// What accepting a field did to the record structure
#[derive(Debug)]
pub enum AssemblyEvent {
    /// The field was added to the current header or record
    Continue,
    /// The header ended; QSO records follow
    EndOfHeader,
    /// A QSO record was completed and checked
    EndOfRecord(Record),
}

pub struct RecordAssembler<'a> {
    reference: &'a dyn ReferenceData,
    compliance: ComplianceValidator<'a>,
    consistency: ConsistencyValidator<'a>,
    user_fields: UserFieldRegistry,
    vendor_prefix: String,
    in_header: bool,
    current: Record,
    records: usize,
}

impl<'a> RecordAssembler<'a> {
    /// Create an assembler, starting in the header if the input has one
    pub fn new(reference: &'a dyn ReferenceData, has_header: bool) -> Self {
        let kind = if has_header {
            RecordKind::Header
        } else {
            RecordKind::Qso
        };
        Self {
            reference,
            compliance: ComplianceValidator::new(reference),
            consistency: ConsistencyValidator::new(reference),
            user_fields: UserFieldRegistry::new(),
            vendor_prefix: DEFAULT_VENDOR_PREFIX.to_string(),
            in_header: has_header,
            current: Record::new(kind),
            records: 0,
        }
    }

    /// Set the prefix of application-defined fields to skip
    pub fn with_vendor_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.vendor_prefix = prefix.into().to_uppercase();
        self
    }

    /// Place one field, appending any diagnostics it raises
    pub fn accept(&mut self, field: TagField, diagnostics: &mut Vec<Diagnostic>) -> AssemblyEvent {
        if field.name.starts_with(&self.vendor_prefix) {
            return AssemblyEvent::Continue;
        }

        let name = if is_declaration(&field.name) {
            self.user_fields.register(&field, diagnostics);
            TAG_USERDEF.to_string()
        } else {
            field.name.clone()
        };

        if name != TAG_EOH {
            diagnostics.extend(self.compliance.validate(&field, &self.user_fields));
        }

        // A field without a length never overwrites a stored value
        let keeps_stored = field.declared_length.is_none() && self.current.contains(&field.name);
        if !field.is_marker() && !keeps_stored {
            if let Some(previous) = self.current.insert(&field.name, field.value.clone(), field.line)
            {
                diagnostics.push(Diagnostic::compliance(
                    format!(
                        "tag '{}' appears more than once in {}, replacing old value {} with new value {}",
                        field.name,
                        self.current.kind().location(),
                        previous.value,
                        field.value
                    ),
                    field.line,
                ));
            }
        }

        if self.in_header {
            self.place_in_header(&name, &field, diagnostics)
        } else {
            self.place_in_record(&name, &field, diagnostics)
        }
    }

    fn place_in_header(
        &mut self,
        name: &str,
        field: &TagField,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> AssemblyEvent {
        if name == TAG_EOH {
            debug!(
                "Header ended on line {} with {} fields",
                field.line,
                self.current.len()
            );
            self.in_header = false;
            self.current = Record::new(RecordKind::Qso);
            return AssemblyEvent::EndOfHeader;
        }

        if !self.reference.is_valid_header_tag(name) {
            diagnostics.push(Diagnostic::compliance(
                format!("tag '{}' is not a valid tag in the header", name),
                field.line,
            ));
        }
        if name == TAG_EOR {
            diagnostics.push(Diagnostic::compliance(
                "Got <EOR> tag while processing header",
                field.line,
            ));
        }
        AssemblyEvent::Continue
    }

    fn place_in_record(
        &mut self,
        name: &str,
        field: &TagField,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> AssemblyEvent {
        if !self.reference.is_valid_record_tag(name) && !self.user_fields.contains(name) {
            diagnostics.push(Diagnostic::compliance(
                format!(
                    "tag '{}' ({}) is not a valid tag in a QSO record",
                    name, field.value
                ),
                field.line,
            ));
        }
        if name == TAG_EOH {
            diagnostics.push(Diagnostic::compliance(
                "Got EOH tag while not in the header",
                field.line,
            ));
        }

        if name != TAG_EOR {
            return AssemblyEvent::Continue;
        }

        let mut record = mem::replace(&mut self.current, Record::new(RecordKind::Qso));
        record.finish(field.line);
        diagnostics.extend(self.consistency.validate(&record));
        self.records += 1;
        debug!(
            "Record {} ended on line {} with {} fields",
            self.records,
            field.line,
            record.len()
        );
        AssemblyEvent::EndOfRecord(record)
    }

    /// QSO records completed so far
    pub fn records(&self) -> usize {
        self.records
    }

    pub fn in_header(&self) -> bool {
        self.in_header
    }

    pub fn user_fields(&self) -> &UserFieldRegistry {
        &self.user_fields
    }

    /// Fields accumulated since the last boundary
    pub fn current(&self) -> &Record {
        &self.current
    }
}
