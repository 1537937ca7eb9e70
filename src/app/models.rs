//! Core data structures for ADIF validation
//!
//! Defines the tokenized field, the record map the assembler builds, the
//! closed set of ADIF data types, diagnostics, and the reference data shapes
//! shared by the validators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One `<TAG:LEN:TYPE>VALUE` unit read from the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagField {
    /// Tag name, normalized to uppercase, never empty once dispatched
    pub name: String,
    /// Declared value length; `None` when the tag carried no length
    ///
    /// A non-numeric length is reported by the tokenizer and recorded here
    /// as `Some(0)`.
    pub declared_length: Option<usize>,
    /// Declared type indicator, uppercase, if one was given
    pub declared_type: Option<String>,
    /// Raw value exactly as read (length-prefixed, so may contain `<`, `>`, `:`)
    pub value: String,
    /// Line the field finished on
    pub line: usize,
}

impl TagField {
    /// Create a field with no declared type
    pub fn new(name: impl Into<String>, value: impl Into<String>, line: usize) -> Self {
        let value = value.into();
        Self {
            name: name.into().to_uppercase(),
            declared_length: Some(value.len()),
            declared_type: None,
            value,
            line,
        }
    }

    /// Attach an explicit type indicator
    pub fn with_type(mut self, declared_type: impl Into<String>) -> Self {
        self.declared_type = Some(declared_type.into().to_uppercase());
        self
    }

    /// Override the declared length
    pub fn with_length(mut self, declared_length: Option<usize>) -> Self {
        self.declared_length = declared_length;
        self
    }

    /// Declared length, treating a missing length as zero
    pub fn length(&self) -> usize {
        self.declared_length.unwrap_or(0)
    }

    /// True for structural markers (`EOH`, `EOR`) that never carry data
    pub fn is_marker(&self) -> bool {
        self.name == crate::constants::TAG_EOH || self.name == crate::constants::TAG_EOR
    }
}

/// ADIF data types known to the compliance validator
///
/// `Unknown` carries a type code the validator has no rule for, which is
/// reported as an internal defect rather than silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Number,
    PositiveNumber,
    Date,
    Time,
    String,
    MultilineString,
    Location,
    Enumeration,
    IotaRef,
    Callsign,
    Unknown(String),
}

impl DataType {
    /// Map a one-letter type code to its data type
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_uppercase().as_str() {
            "B" => DataType::Boolean,
            "N" => DataType::Number,
            "P" => DataType::PositiveNumber,
            "D" => DataType::Date,
            "T" => DataType::Time,
            "S" | "I" => DataType::String,
            "M" | "G" => DataType::MultilineString,
            "L" => DataType::Location,
            "E" => DataType::Enumeration,
            "R" => DataType::IotaRef,
            "C" => DataType::Callsign,
            other => DataType::Unknown(other.to_string()),
        }
    }

    /// Standard ADIF type indicators a field of this type may declare
    pub fn compatible_indicators(&self) -> &'static [&'static str] {
        match self {
            DataType::Boolean => &["B"],
            DataType::Number | DataType::PositiveNumber => &["N"],
            DataType::Date => &["D"],
            DataType::Time => &["T"],
            DataType::String => &["S", "I"],
            DataType::MultilineString => &["M", "G", "S", "I"],
            DataType::Location => &["L"],
            DataType::Enumeration => &["E", "S"],
            DataType::IotaRef | DataType::Callsign => &["S"],
            DataType::Unknown(_) => &[],
        }
    }

    /// Human-readable type name used in messages
    pub fn description(&self) -> &str {
        match self {
            DataType::Boolean => "Boolean",
            DataType::Number => "Number",
            DataType::PositiveNumber => "PositiveInteger",
            DataType::Date => "Date",
            DataType::Time => "Time",
            DataType::String => "String",
            DataType::MultilineString => "MultilineString",
            DataType::Location => "Location",
            DataType::Enumeration => "Enumeration",
            DataType::IotaRef => "IOTARefNo",
            DataType::Callsign => "Callsign",
            DataType::Unknown(code) => code.as_str(),
        }
    }
}

/// Value and source line of one field stored in a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub value: String,
    pub line: usize,
}

/// Which part of the file a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Header,
    Qso,
}

impl RecordKind {
    /// Word used in duplicate-field messages
    pub fn location(&self) -> &'static str {
        match self {
            RecordKind::Header => "the header",
            RecordKind::Qso => "a record",
        }
    }
}

/// Field name to value map for one header or QSO record
///
/// Field names are stored uppercase so lookups are case-insensitive.
#[derive(Debug, Clone)]
pub struct Record {
    kind: RecordKind,
    fields: HashMap<String, FieldEntry>,
    /// Line of the end-of-record marker once the record is complete
    end_line: Option<usize>,
}

impl Record {
    /// Create an empty record
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            fields: HashMap::new(),
            end_line: None,
        }
    }

    /// Record kind
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Store a field, returning the previous entry if the name was already present
    pub fn insert(&mut self, name: &str, value: impl Into<String>, line: usize) -> Option<FieldEntry> {
        self.fields.insert(
            name.to_uppercase(),
            FieldEntry {
                value: value.into(),
                line,
            },
        )
    }

    /// True if a field of this name has been stored
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_uppercase())
    }

    /// Raw entry exactly as stored
    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.get(&name.to_uppercase())
    }

    /// Trimmed, uppercased value of a present, non-blank field
    pub fn lookup(&self, name: &str) -> Option<FieldEntry> {
        let entry = self.get(name)?;
        let value = entry.value.trim().to_uppercase();
        if value.is_empty() {
            return None;
        }
        Some(FieldEntry {
            value,
            line: entry.line,
        })
    }

    /// Number of distinct fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field has been stored
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Mark the record complete at the given line
    pub fn finish(&mut self, line: usize) {
        self.end_line = Some(line);
    }

    /// Line a missing field is reported against
    pub fn end_line(&self) -> usize {
        self.end_line.unwrap_or(crate::constants::FIRST_LINE)
    }
}

/// The two diagnostic categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// The file breaks the format's own rules
    Compliance,
    /// The record is legal but implausible against reference data
    Consistency,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Compliance => write!(f, "compliance"),
            DiagnosticKind::Consistency => write!(f, "consistency"),
        }
    }
}

/// A single finding with the line it refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
}

impl Diagnostic {
    pub fn compliance(message: impl Into<String>, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::Compliance,
            message: message.into(),
            line,
        }
    }

    pub fn consistency(message: impl Into<String>, line: usize) -> Self {
        Self {
            kind: DiagnosticKind::Consistency,
            message: message.into(),
            line,
        }
    }
}

/// Running totals for one validation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticCounts {
    pub compliance: usize,
    pub consistency: usize,
    pub info: usize,
}

impl DiagnosticCounts {
    /// Count one reported diagnostic
    pub fn record(&mut self, kind: DiagnosticKind) {
        match kind {
            DiagnosticKind::Compliance => self.compliance += 1,
            DiagnosticKind::Consistency => self.consistency += 1,
        }
    }

    /// Compliance plus consistency diagnostics
    pub fn errors(&self) -> usize {
        self.compliance + self.consistency
    }
}

/// End-of-run totals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Lines scanned
    pub lines: usize,
    /// QSO records terminated by an end-of-record marker
    pub records: usize,
    /// Whether a header block was present
    pub had_header: bool,
    pub counts: DiagnosticCounts,
}

impl RunSummary {
    /// One-line summary reported at the end of a run
    pub fn summary_line(&self) -> String {
        format!(
            "Handled {} lines, {} QSOs, Errors: {}",
            self.lines,
            self.records,
            self.counts.errors()
        )
    }
}

/// One `ITU:CQ` zone pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ZonePair {
    pub itu: u32,
    pub cq: u32,
}

impl ZonePair {
    /// Parse the `ITU:CQ` notation used by the reference dataset
    pub fn parse(text: &str) -> Option<Self> {
        let (itu, cq) = text.trim().split_once(':')?;
        Some(Self {
            itu: itu.trim().parse().ok()?,
            cq: cq.trim().parse().ok()?,
        })
    }
}

impl fmt::Display for ZonePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.itu, self.cq)
    }
}

/// Ordered set of zone pairs valid for an entity or subdivision
pub type ZoneMap = Vec<ZonePair>;

/// Reference information about one DXCC entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    pub code: u32,
    pub name: String,
    pub zones: ZoneMap,
    /// First date contacts count for this entity
    pub valid_from: Option<NaiveDate>,
    /// Last date contacts count for this entity
    pub valid_until: Option<NaiveDate>,
}

impl EntityInfo {
    /// True if the entity has a validity window on either side
    pub fn has_validity_window(&self) -> bool {
        self.valid_from.is_some() || self.valid_until.is_some()
    }
}
