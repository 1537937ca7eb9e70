//! ADIF Validator Library
//!
//! A Rust library for checking amateur radio log files written in the ADIF
//! tag/value interchange format (`.adi`).
//!
//! This library provides tools for:
//! - Tokenizing an ADI byte stream into typed tag fields with line tracking
//! - Assembling fields into a header and a sequence of QSO records
//! - Compliance checks of every field against the ADIF type system
//! - Consistency checks of every completed record against reference data
//!   (bands, modes, DXCC entities, subdivisions, counties and zones)
//! - Plain text and HTML diagnostic reports with per-QSO context

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod compliance;
        pub mod consistency;
        pub mod diagnostics;
        pub mod record_assembler;
        pub mod reference_data;
        pub mod tokenizer;
        pub mod validator;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Diagnostic, DiagnosticKind, Record, RunSummary, TagField};
pub use app::services::reference_data::{ReferenceData, StaticReferenceData};
pub use app::services::validator::AdifValidator;
pub use config::ValidatorConfig;

/// Result type alias for the ADIF validator
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for conditions that stop a validation run
///
/// Problems found in the log itself are diagnostics, not errors. Only the
/// conditions below end a run early.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// No input file was named on the command line
    #[error("you must specify an input file with -f")]
    MissingInput,

    /// The input file contained no bytes at all
    #[error("empty file? '{path}' contains no data")]
    EmptyInput { path: String },

    /// Too many consecutive fields carried a non-numeric length
    #[error(
        "input looks corrupt or binary: {bad_lengths} consecutive non-numeric length fields (line {line})"
    )]
    CorruptInput { line: usize, bad_lengths: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Reference dataset is malformed
    #[error("Reference data error: {message}")]
    ReferenceData { message: String },

    /// TOML document could not be parsed
    #[error("TOML parsing error in '{origin}': {source}")]
    TomlParsing {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    /// Date parsing error inside reference data
    #[error("Date parsing error: {message}")]
    InvalidDate {
        message: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an empty input error
    pub fn empty_input(path: impl Into<String>) -> Self {
        Self::EmptyInput { path: path.into() }
    }

    /// Create a corrupt input error
    pub fn corrupt_input(line: usize, bad_lengths: usize) -> Self {
        Self::CorruptInput { line, bad_lengths }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a reference data error
    pub fn reference_data(message: impl Into<String>) -> Self {
        Self::ReferenceData {
            message: message.into(),
        }
    }

    /// Create a TOML parsing error naming the document it came from
    pub fn toml_parsing(origin: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlParsing {
            origin: origin.into(),
            source,
        }
    }

    /// Create a date parsing error
    pub fn invalid_date(message: impl Into<String>, source: chrono::ParseError) -> Self {
        Self::InvalidDate {
            message: message.into(),
            source,
        }
    }

    /// True for errors caused by how the tool was invoked or what it was given,
    /// rather than by the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput | Self::EmptyInput { .. } | Self::CorruptInput { .. }
        )
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::TomlParsing {
            origin: "unknown".to_string(),
            source: error,
        }
    }
}

impl From<chrono::ParseError> for Error {
    fn from(error: chrono::ParseError) -> Self {
        Self::InvalidDate {
            message: "Date parsing failed".to_string(),
            source: error,
        }
    }
}
