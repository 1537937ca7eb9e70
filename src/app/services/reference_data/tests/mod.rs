//! Shared fixtures for reference data tests

use crate::app::services::reference_data::StaticReferenceData;

pub mod query_tests;

/// Small dataset exercising every table
pub const SAMPLE_REFERENCE: &str = r#"
type_codes = ["B", "N", "D", "T", "S", "E"]
header_tags = ["ADIF_VER", "PROGRAMID", "USERDEF"]

[entity_aliases]
"UNITED STATES" = 291

[tags]
CALL = "C"
BAND = "E"
MODE = "E"
CQZ = "P"
QSO_DATE = "D"
ODD = "Z"

[ranges]
CQZ = [1, 40]

[enumerations]
QSL_RCVD = ["y", "n"]

[bands]
20m = [14.0, 14.35]
40M = [7.0, 7.3]

[modes]
SSB = ["usb", "LSB"]
CW = []

[entities.291]
name = "United States of America"
zones = ["6:3", "8:5"]

[entities.81]
name = "Germany"
valid_until = "1973-09-16"

[entities.230]
name = "Federal Republic of Germany"
zones = ["28:14"]
valid_from = "1973-09-17"

[subdivisions.291]
MA = ["8:5"]
TX = []

[counties.291]
MA = ["Middlesex", "Saint Helena Borough"]
"#;

/// Load the sample dataset
pub fn sample_reference() -> StaticReferenceData {
    StaticReferenceData::from_toml_str(SAMPLE_REFERENCE, "sample").unwrap()
}
