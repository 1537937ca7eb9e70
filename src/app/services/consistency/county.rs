//! County membership within a primary subdivision
//!
//! County values are compared in a normalized form: uppercase, with spaces
//! and hyphens removed, `ST.`/`STE.` spelled out and administrative suffix
//! words dropped. Reference county names are stored in the same form.

use super::{ConsistencyValidator, StationLocation, StationTags};
use crate::app::models::{Diagnostic, FieldEntry, Record};
use crate::constants::{COUNTY_ABBREVIATIONS, COUNTY_SUFFIXES};
use tracing::debug;

/// Reduce a county name to its comparison form
pub fn normalize_county(county: &str) -> String {
    let mut normalized: String = county
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .collect();

    for (abbreviation, spelled) in COUNTY_ABBREVIATIONS {
        normalized = normalized.replace(abbreviation, spelled);
    }

    for suffix in COUNTY_SUFFIXES {
        if let Some(stripped) = normalized.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    normalized
}

impl ConsistencyValidator<'_> {
    pub(super) fn check_counties(
        &self,
        record: &Record,
        station: &StationTags,
        location: &StationLocation,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let (Some(entity), Some(state)) = (location.entity, location.subdivision.as_deref()) else {
            return;
        };

        if let Some(entry) = record.lookup(station.county) {
            self.check_county(station, station.county, &entry, &entry.value, entity, state, diagnostics);
        }
        if let Some(entry) = record.lookup(station.county_list) {
            for county in entry.value.split(':').filter(|c| !c.trim().is_empty()) {
                self.check_county(station, station.county_list, &entry, county, entity, state, diagnostics);
            }
        }
    }

    /// Check one county, optionally written `STATE,COUNTY`
    #[allow(clippy::too_many_arguments)]
    fn check_county(
        &self,
        station: &StationTags,
        tag: &str,
        entry: &FieldEntry,
        county: &str,
        entity: u32,
        state: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let normalized = normalize_county(county);
        let name = match normalized.split_once(',') {
            Some((prefix, name)) => {
                if !prefix.is_empty() && prefix != state {
                    diagnostics.push(Diagnostic::consistency(
                        format!(
                            "{} value of '{}' specifies state '{}' but the {} is set to '{}'",
                            tag, county, prefix, station.state, state
                        ),
                        entry.line,
                    ));
                }
                name
            }
            None => normalized.as_str(),
        };

        let Some(counties) = self.reference.counties_of(entity, state) else {
            debug!("No county table for DXCC {} subdivision {}", entity, state);
            return;
        };
        if !counties.contains(name) {
            diagnostics.push(Diagnostic::consistency(
                format!(
                    "{} value of '{}' is not valid for DXCC {} ({}) and {} '{}'",
                    tag,
                    name,
                    entity,
                    self.entity_name(entity),
                    station.state,
                    state
                ),
                entry.line,
            ));
        }
    }
}
