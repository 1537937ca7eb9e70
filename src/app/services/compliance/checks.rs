//! Value checks for each ADIF data type
//!
//! Values are compared uppercased. Length rules use the declared length,
//! which for a well-formed file equals the value's byte length.

use super::FieldRules;
use super::callsign::check_callsign;
use crate::app::models::{DataType, Diagnostic, TagField};
use crate::constants::{
    CONTINENTS, DATE_LENGTH, DATE_YEAR_RANGE, IOTA_REF_LENGTH, LOCATION_LENGTH, TIME_LENGTHS,
};
use regex::Regex;
use std::sync::OnceLock;

fn number_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^-?(\d+\.?\d*|\.\d+)$").ok())
        .as_ref()
}

/// Parse an ADIF number: optional minus, digits, optional decimal point
pub fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if !number_pattern().is_some_and(|pattern| pattern.is_match(value)) {
        return None;
    }
    value.parse().ok()
}

/// Characters `start..end` of a value, shorter if the value is shorter
fn slice(value: &str, start: usize, end: usize) -> String {
    value.chars().skip(start).take(end.saturating_sub(start)).collect()
}

fn is_numeric(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Dispatch a field to the check for its type
pub fn check_value(
    field: &TagField,
    data_type: &DataType,
    rules: &FieldRules<'_>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let value = field.value.to_uppercase();
    let mut report = |message: String| diagnostics.push(Diagnostic::compliance(message, field.line));
    let tag = field.name.as_str();
    let length = field.length();

    match data_type {
        DataType::Boolean => {
            if value != "Y" && value != "N" {
                report(format!("tag '{}' should be 'Y' or 'N' but is '{}'", tag, value));
            }
        }
        DataType::Number | DataType::PositiveNumber => {
            let Some(number) = parse_number(&value) else {
                report(format!("tag '{}' should be a number but is '{}'", tag, value));
                return;
            };
            if let Some((low, high)) = rules.range {
                if number < low || number > high {
                    report(format!(
                        "tag '{}' should be in the range {} to {} but is {}",
                        tag, low, high, value
                    ));
                    return;
                }
            }
            if *data_type == DataType::PositiveNumber && number <= 0.0 {
                report(format!(
                    "tag '{}' should be a positive number but has '{}'",
                    tag, value
                ));
            }
        }
        DataType::Date => {
            if length != DATE_LENGTH {
                report(format!(
                    "'{}' should be a date but is {} characters long, not {}",
                    tag, length, DATE_LENGTH
                ));
            }
            let year = slice(&value, 0, 4);
            if year.as_str() < DATE_YEAR_RANGE.0 || year.as_str() > DATE_YEAR_RANGE.1 {
                report(format!(
                    "tag '{}' should be a date but '{}' has an invalid year",
                    tag, value
                ));
            }
            let month = slice(&value, 4, 6);
            if month.as_str() < "01" || month.as_str() > "12" {
                report(format!(
                    "tag '{}' value '{}' should be a date but has an invalid month '{}'",
                    tag, value, month
                ));
            }
            let day = slice(&value, 6, 8);
            if day.as_str() < "01" || day.as_str() > "31" {
                report(format!(
                    "tag '{}' value '{}' should be a date but has an invalid day",
                    tag, value
                ));
            }
        }
        DataType::Time => {
            if !is_numeric(&value) {
                report(format!(
                    "tag '{}' should be a time but '{}' is not numeric",
                    tag, value
                ));
            }
            if !TIME_LENGTHS.contains(&length) {
                report(format!(
                    "tag '{}' should be a time but it is {} characters long not 4 or 6",
                    tag, length
                ));
            }
        }
        DataType::String | DataType::MultilineString => {}
        DataType::Location => check_location(tag, &value, length, &mut report),
        DataType::Enumeration => match rules.enumeration {
            Some(values) => {
                if length > 0 && !values.contains(&value) {
                    report(format!(
                        "The tag '{}' has an invalid value '{}' - not in the enumerations",
                        tag, value
                    ));
                }
            }
            // Declarations without values are reported when registered
            None if rules.user_defined => {}
            None => report(format!(
                "tag '{}' does not have any enumerations - internal error!",
                tag
            )),
        },
        DataType::IotaRef => {
            if length > 0 {
                check_iota_reference(tag, &value, length, &mut report);
            }
        }
        DataType::Callsign => {
            if let Some(problem) = check_callsign(&value) {
                report(problem.message(&value));
            }
        }
        DataType::Unknown(code) => report(format!(
            "Internal failure to handle tag '{}' type '{}'",
            tag, code
        )),
    }
}

/// `XDDD MM.MMM` with X one of N, S, E, W
fn check_location(tag: &str, value: &str, length: usize, report: &mut impl FnMut(String)) {
    if length != LOCATION_LENGTH {
        report(format!(
            "tag '{}' should be {} characters long but is {}",
            tag, LOCATION_LENGTH, length
        ));
    }

    if !matches!(value.chars().next(), Some('N' | 'S' | 'E' | 'W')) {
        report(format!(
            "Location '{}' value '{}' does not start with N,S,E, or W.",
            tag, value
        ));
    }

    let parts = [
        ("degrees", slice(value, 1, 4), 180),
        ("minutes", slice(value, 5, 7), 59),
        ("seconds", slice(value, 8, 11), 999),
    ];
    for (part, text, max) in parts {
        if !is_numeric(&text) {
            report(format!(
                "Location '{}' value '{}' {} is not numeric",
                tag, value, part
            ));
            continue;
        }
        let number: u32 = text.parse().unwrap_or(u32::MAX);
        if number > max {
            report(format!(
                "Location '{}' value '{}' {} is not in range 0 through {}",
                tag, value, part, max
            ));
        }
    }
}

/// `CC-NNN` with CC a continent code
fn check_iota_reference(tag: &str, value: &str, length: usize, report: &mut impl FnMut(String)) {
    if length != IOTA_REF_LENGTH {
        report(format!(
            "'{}' value '{}' is not {} characters",
            tag, value, IOTA_REF_LENGTH
        ));
    }
    if !CONTINENTS.contains(&slice(value, 0, 2).as_str()) {
        report(format!("'{}' value '{}' isn't a valid continent", tag, value));
    }
    if slice(value, 2, 3) != "-" {
        report(format!("'{}' value '{}' does not have a hyphen", tag, value));
    }
    if !is_numeric(&slice(value, 3, IOTA_REF_LENGTH + 1)) {
        report(format!(
            "'{}' value '{}' does not have a number after the hyphen",
            tag, value
        ));
    }
}
