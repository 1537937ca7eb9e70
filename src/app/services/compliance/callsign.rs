//! Amateur callsign shape check

use crate::constants::{CALLSIGN_ONE_PREFIX_FOLLOWERS, MIN_CALLSIGN_LENGTH};
use std::fmt;

/// Why a value is not a plausible callsign
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallsignProblem {
    /// Bad characters, missing letter or digit, or an impossible prefix
    UnexpectedCharacters,
    TooShort,
    /// Leading or trailing `/`
    Implausible,
}

impl CallsignProblem {
    /// Diagnostic text for the given callsign
    pub fn message(&self, call: &str) -> String {
        match self {
            CallsignProblem::UnexpectedCharacters => format!(
                "'{}' is not an amateur callsign as it has unexpected characters",
                call
            ),
            CallsignProblem::TooShort => {
                format!("'{}' is not an amateur callsign - it's too short", call)
            }
            CallsignProblem::Implausible => {
                format!("'{}' is not a plausible amateur callsign", call)
            }
        }
    }
}

impl fmt::Display for CallsignProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            CallsignProblem::UnexpectedCharacters => "unexpected characters",
            CallsignProblem::TooShort => "too short",
            CallsignProblem::Implausible => "implausible",
        };
        write!(f, "{}", text)
    }
}

fn has_valid_shape(call: &str) -> bool {
    let mut letters = 0;
    let mut digits = 0;
    for ch in call.chars() {
        if ch.is_ascii_alphabetic() {
            letters += 1;
        } else if ch.is_ascii_digit() {
            digits += 1;
        } else if ch != '/' {
            return false;
        }
    }
    if letters == 0 || digits == 0 {
        return false;
    }

    let mut chars = call.chars();
    match (chars.next(), chars.next()) {
        (Some('0' | 'Q'), _) => false,
        (Some('1'), second) => second.is_some_and(|c| CALLSIGN_ONE_PREFIX_FOLLOWERS.contains(&c)),
        _ => true,
    }
}

/// Check an uppercase callsign, returning the first problem found
pub fn check_callsign(call: &str) -> Option<CallsignProblem> {
    if !has_valid_shape(call) {
        return Some(CallsignProblem::UnexpectedCharacters);
    }
    if call.chars().count() < MIN_CALLSIGN_LENGTH {
        return Some(CallsignProblem::TooShort);
    }
    if call.starts_with('/') || call.ends_with('/') {
        return Some(CallsignProblem::Implausible);
    }
    None
}
