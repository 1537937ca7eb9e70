//! Application constants for the ADIF validator
//!
//! This module contains well-known tag names, format limits, and the small
//! fixed tables the validators rely on in addition to the reference dataset.

// =============================================================================
// Structural Tags
// =============================================================================

/// End-of-header marker
pub const TAG_EOH: &str = "EOH";

/// End-of-record marker
pub const TAG_EOR: &str = "EOR";

/// Canonical name a `USERDEFn` declaration is folded into
pub const TAG_USERDEF: &str = "USERDEF";

/// Prefix of application-specific (vendor extension) fields
pub const DEFAULT_VENDOR_PREFIX: &str = "APP_";

// =============================================================================
// QSO Field Names
// =============================================================================

/// Field names the consistency validator reads from a record
pub mod fields {
    pub const CALL: &str = "CALL";
    pub const QSO_DATE: &str = "QSO_DATE";
    pub const QSO_DATE_OFF: &str = "QSO_DATE_OFF";
    pub const TIME_ON: &str = "TIME_ON";
    pub const TIME_OFF: &str = "TIME_OFF";
    pub const BAND: &str = "BAND";
    pub const BAND_RX: &str = "BAND_RX";
    pub const FREQ: &str = "FREQ";
    pub const FREQ_RX: &str = "FREQ_RX";
    pub const MODE: &str = "MODE";
    pub const SUBMODE: &str = "SUBMODE";
    pub const DXCC: &str = "DXCC";
    pub const COUNTRY: &str = "COUNTRY";
    pub const STATE: &str = "STATE";
    pub const CNTY: &str = "CNTY";
    pub const USACA_COUNTIES: &str = "USACA_COUNTIES";
    pub const CQZ: &str = "CQZ";
    pub const ITUZ: &str = "ITUZ";
    pub const GRIDSQUARE: &str = "GRIDSQUARE";
    pub const VUCC_GRIDS: &str = "VUCC_GRIDS";
    pub const MY_DXCC: &str = "MY_DXCC";
    pub const MY_COUNTRY: &str = "MY_COUNTRY";
    pub const MY_STATE: &str = "MY_STATE";
    pub const MY_CNTY: &str = "MY_CNTY";
    pub const MY_USACA_COUNTIES: &str = "MY_USACA_COUNTIES";
    pub const MY_CQ_ZONE: &str = "MY_CQ_ZONE";
    pub const MY_ITU_ZONE: &str = "MY_ITU_ZONE";
    pub const MY_GRIDSQUARE: &str = "MY_GRIDSQUARE";
    pub const MY_VUCC_GRIDS: &str = "MY_VUCC_GRIDS";
}

// =============================================================================
// Tokenizer Limits
// =============================================================================

/// Consecutive non-numeric length fields tolerated before the run is aborted
pub const DEFAULT_MAX_BAD_LENGTHS: usize = 500;

/// First line number of an input file
pub const FIRST_LINE: usize = 1;

// =============================================================================
// Field Format Constants
// =============================================================================

/// Continent codes accepted in IOTA-style reference values
pub const CONTINENTS: &[&str] = &["NA", "SA", "EU", "AF", "OC", "AS", "AN"];

/// Exact length of an IOTA-style reference value (`EU-005`)
pub const IOTA_REF_LENGTH: usize = 6;

/// Exact length of an ADIF location value (`N042 21.500`)
pub const LOCATION_LENGTH: usize = 11;

/// Exact length of an ADIF date value (`YYYYMMDD`)
pub const DATE_LENGTH: usize = 8;

/// Accepted lengths of an ADIF time value (`HHMM` or `HHMMSS`)
pub const TIME_LENGTHS: &[usize] = &[4, 6];

/// Lexical bounds applied to the year part of a date
pub const DATE_YEAR_RANGE: (&str, &str) = ("1900", "2100");

/// Minimum plausible callsign length
pub const MIN_CALLSIGN_LENGTH: usize = 3;

/// Characters allowed after a leading `1` in a callsign
pub const CALLSIGN_ONE_PREFIX_FOLLOWERS: &[char] = &['A', 'M', 'S'];

// =============================================================================
// Subdivision Inference
// =============================================================================

/// Subdivision codes that imply an entity when the record carries none
///
/// Each entry is `(subdivision, entity code, entity name used in the message)`.
pub const SUBDIVISION_ENTITY_INFERENCE: &[(&str, u32, &str)] =
    &[("HI", 110, "HAWAII"), ("AK", 6, "ALASKA")];

// =============================================================================
// County Normalisation
// =============================================================================

/// Spelled-out replacements applied after spaces and hyphens are removed
pub const COUNTY_ABBREVIATIONS: &[(&str, &str)] = &[("STE.", "SAINTE"), ("ST.", "SAINT")];

/// Administrative suffix words stripped from county names, longest first
pub const COUNTY_SUFFIXES: &[&str] = &[
    "CITYANDBOROUGH",
    "MUNICIPALITY",
    "CENSUSAREA",
    "BOROUGH",
];

// =============================================================================
// Configuration Defaults
// =============================================================================

/// Directory name under the user config dir holding `config.toml`
pub const CONFIG_DIR_NAME: &str = "adif-validator";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";
