//! Human-readable summary of the record a diagnostic belongs to

use crate::app::models::Record;
use crate::constants::fields;

/// Callsign, date, band (or frequency) and mode of one QSO
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordContext {
    pub call: Option<String>,
    /// Date as `YYYY-MM-DD` when the record date has eight characters
    pub date: Option<String>,
    pub band_or_frequency: Option<String>,
    pub mode: Option<String>,
}

impl RecordContext {
    /// Build the context for a completed record
    pub fn from_record(record: &Record) -> Self {
        let value = |tag: &str| record.lookup(tag).map(|entry| entry.value);

        let date = value(fields::QSO_DATE).map(|date| {
            if date.len() == 8 && date.is_ascii() {
                format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
            } else {
                date
            }
        });

        Self {
            call: value(fields::CALL),
            date,
            band_or_frequency: value(fields::BAND).or_else(|| value(fields::FREQ)),
            mode: value(fields::MODE),
        }
    }

    /// True if the record carried none of the summarized fields
    pub fn is_empty(&self) -> bool {
        self.call.is_none()
            && self.date.is_none()
            && self.band_or_frequency.is_none()
            && self.mode.is_none()
    }

    /// One-line summary such as `For the QSO with W1ABC on 2023-05-01 20M SSB:`
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }

        let mut text = match (&self.call, &self.date) {
            (Some(call), Some(date)) => format!("For the QSO with {} on {}", call, date),
            (Some(call), None) => format!("For the QSO with {}", call),
            (None, Some(date)) => format!("For the QSO on {}", date),
            (None, None) => "For the QSO".to_string(),
        };
        for part in [&self.band_or_frequency, &self.mode].into_iter().flatten() {
            text.push(' ');
            text.push_str(part);
        }
        text.push(':');
        Some(text)
    }
}
