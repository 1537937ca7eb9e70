//! Band and frequency agreement

use super::ConsistencyValidator;
use crate::app::models::{Diagnostic, FieldEntry, Record};
use crate::app::services::compliance::checks::parse_number;
use crate::constants::fields;

impl ConsistencyValidator<'_> {
    pub(super) fn check_bands(&self, record: &Record, diagnostics: &mut Vec<Diagnostic>) {
        let band = record.lookup(fields::BAND);
        let frequency = record.lookup(fields::FREQ);
        let (has_band, has_frequency) =
            self.check_band_pair(band.as_ref(), frequency.as_ref(), "Frequency", diagnostics);
        if !has_band && !has_frequency {
            diagnostics.push(Diagnostic::consistency(
                "QSO does not have a band or a frequency specified",
                record.end_line(),
            ));
        }

        let band_rx = record.lookup(fields::BAND_RX);
        let frequency_rx = record.lookup(fields::FREQ_RX);
        self.check_band_pair(
            band_rx.as_ref(),
            frequency_rx.as_ref(),
            "RX Frequency",
            diagnostics,
        );
    }

    /// Compare a frequency with its band's edges
    ///
    /// Returns whether a known band and a numeric frequency were present.
    fn check_band_pair(
        &self,
        band: Option<&FieldEntry>,
        frequency: Option<&FieldEntry>,
        label: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> (bool, bool) {
        let edges = band.and_then(|entry| self.reference.band_range(&entry.value));
        let megahertz = frequency.and_then(|entry| parse_number(&entry.value));

        if let (Some(band), Some(frequency), Some((low, high)), Some(mhz)) =
            (band, frequency, edges, megahertz)
        {
            if mhz < low || mhz > high {
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "{} '{}' is out of range for band '{}'",
                        label, frequency.value, band.value
                    ),
                    frequency.line,
                ));
            }
        }

        (edges.is_some(), megahertz.is_some())
    }
}
