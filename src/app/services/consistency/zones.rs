//! CQ and ITU zones against the applicable zone map
//!
//! A subdivision's own zone map takes precedence over its entity's.

use super::{ConsistencyValidator, StationLocation, StationTags};
use crate::app::models::{Diagnostic, Record, ZoneMap, ZonePair};
use tracing::debug;

impl ConsistencyValidator<'_> {
    pub(super) fn check_zones(
        &self,
        record: &Record,
        station: &StationTags,
        location: &StationLocation,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(entity) = location.entity.filter(|entity| *entity > 0) else {
            return;
        };
        let Some(info) = self.reference.entity_info(entity) else {
            return;
        };

        let (zones, source, key): (&ZoneMap, &str, &str) = match location
            .subdivision
            .as_deref()
            .and_then(|state| {
                self.reference
                    .subdivision_zone_override(entity, state)
                    .map(|zones| (zones, state))
            }) {
            Some((zones, state)) => (zones, "STATE", state),
            None => (&info.zones, "DXCC entity", info.name.as_str()),
        };
        if zones.is_empty() {
            debug!("No zones registered for the {} '{}'", source, key);
            return;
        }

        let checks: [(&str, &str, fn(&ZonePair) -> u32); 2] = [
            (station.itu_zone, station.itu_label, |pair| pair.itu),
            (station.cq_zone, station.cq_label, |pair| pair.cq),
        ];
        for (tag, label, component) in checks {
            let Some(entry) = record.lookup(tag) else {
                continue;
            };
            let Ok(zone) = entry.value.parse::<u32>() else {
                continue;
            };
            if !zones.iter().any(|pair| component(pair) == zone) {
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "{} '{}' is not correct for the {} '{}'",
                        label, zone, source, key
                    ),
                    entry.line,
                ));
            }
        }
    }
}
