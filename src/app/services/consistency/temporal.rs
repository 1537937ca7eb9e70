//! QSO start and end timestamps, and entity validity windows
//!
//! Timestamps are compared lexically as `YYYYMMDD` followed by `HHMMSS`;
//! four-digit times are padded with zero seconds first.

use super::ConsistencyValidator;
use crate::app::models::{Diagnostic, FieldEntry, Record};
use crate::constants::{DATE_LENGTH, fields};
use chrono::NaiveDate;
use tracing::debug;

/// Sortable `HHMMSS` form of a time value
fn padded_time(time: &str) -> String {
    if time.len() == 4 {
        format!("{}00", time)
    } else {
        time.to_string()
    }
}

impl ConsistencyValidator<'_> {
    /// Check the start date, start time and end ordering
    ///
    /// Returns the start date when it is well-formed.
    pub(super) fn check_timestamps(
        &self,
        record: &Record,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<FieldEntry> {
        let date = record.lookup(fields::QSO_DATE).filter(|entry| {
            entry.value.len() == DATE_LENGTH && entry.value.bytes().all(|b| b.is_ascii_digit())
        });
        if date.is_none() {
            let line = record
                .get(fields::QSO_DATE)
                .map(|entry| entry.line)
                .unwrap_or_else(|| record.end_line());
            diagnostics.push(Diagnostic::consistency("QSO does not have a valid date", line));
        }

        let time_on = record.lookup(fields::TIME_ON);
        if time_on.is_none() {
            diagnostics.push(Diagnostic::consistency(
                "QSO does not have a valid time",
                record.end_line(),
            ));
        }

        let Some(time_off) = record.lookup(fields::TIME_OFF) else {
            return date;
        };
        let Some(time_on) = time_on else {
            diagnostics.push(Diagnostic::consistency(
                "QSO has a TIME_OFF but no TIME_ON",
                time_off.line,
            ));
            return date;
        };
        let Some(start_date) = date.as_ref() else {
            return date;
        };

        let end_date = record
            .lookup(fields::QSO_DATE_OFF)
            .map(|entry| entry.value)
            .unwrap_or_else(|| start_date.value.clone());
        let start = format!("{}{}", start_date.value, padded_time(&time_on.value));
        let end = format!("{}{}", end_date, padded_time(&time_off.value));
        if start > end {
            diagnostics.push(Diagnostic::consistency(
                format!(
                    "QSO TIME_OFF is {}/{}, which is before the QSO TIME_ON of {}/{}",
                    end_date, time_off.value, start_date.value, time_on.value
                ),
                time_off.line,
            ));
        }

        date
    }

    /// The QSO date must fall inside each station's entity validity window
    pub(super) fn check_validity_windows(
        &self,
        date: &FieldEntry,
        worked: Option<u32>,
        mine: Option<u32>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Ok(qso_date) = NaiveDate::parse_from_str(&date.value, "%Y%m%d") else {
            debug!("QSO date '{}' is not a calendar date", date.value);
            return;
        };

        let mine = mine.filter(|mine| Some(*mine) != worked);
        for entity in [worked, mine].into_iter().flatten() {
            let Some(info) = self.reference.entity_info(entity) else {
                continue;
            };
            if info.valid_from.is_some_and(|from| qso_date < from) {
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "QSO Date of '{}' is before the valid dates for DXCC {} ({})",
                        date.value, entity, info.name
                    ),
                    date.line,
                ));
            }
            if info.valid_until.is_some_and(|until| qso_date > until) {
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "QSO Date of '{}' is after the valid dates for DXCC {} ({})",
                        date.value, entity, info.name
                    ),
                    date.line,
                ));
            }
        }
    }
}
