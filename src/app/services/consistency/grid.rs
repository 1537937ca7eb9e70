//! Maidenhead grid locator checks
//!
//! A locator is accepted when it has at least four characters, the second
//! is a field letter `A`-`R`, the third and fourth are square digits, and
//! any sub-square letters in positions five and six are `A`-`X`. Length 5
//! is never valid. The first character is not checked.

use super::{ConsistencyValidator, StationTags};
use crate::app::models::{Diagnostic, Record};

/// Why a locator was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridProblem {
    Malformed,
    Subsquare,
}

impl GridProblem {
    pub fn message(&self, grid: &str) -> String {
        match self {
            GridProblem::Malformed => format!("'{}' is an invalid gridsquare", grid),
            GridProblem::Subsquare => format!("'{}' is an invalid gridsquare (subsquare)", grid),
        }
    }
}

/// Check one locator, already uppercased
pub fn check_grid(grid: &str) -> Option<GridProblem> {
    let chars: Vec<char> = grid.chars().collect();
    if chars.len() < 4 {
        return Some(GridProblem::Malformed);
    }
    if !('A'..='R').contains(&chars[1])
        || !chars[2].is_ascii_digit()
        || !chars[3].is_ascii_digit()
    {
        return Some(GridProblem::Malformed);
    }
    if chars[4..].iter().take(2).any(|c| !('A'..='X').contains(c)) {
        return Some(GridProblem::Subsquare);
    }
    if chars.len() == 5 {
        return Some(GridProblem::Malformed);
    }
    None
}

impl ConsistencyValidator<'_> {
    pub(super) fn check_grids(
        &self,
        record: &Record,
        station: &StationTags,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        if let Some(entry) = record.lookup(station.grid) {
            if let Some(problem) = check_grid(&entry.value) {
                diagnostics.push(Diagnostic::compliance(problem.message(&entry.value), entry.line));
            }
        }

        if let Some(entry) = record.lookup(station.grid_list) {
            for grid in entry
                .value
                .split([',', ':'])
                .map(str::trim)
                .filter(|grid| !grid.is_empty())
            {
                if let Some(problem) = check_grid(grid) {
                    diagnostics.push(Diagnostic::compliance(problem.message(grid), entry.line));
                }
            }
        }
    }
}
