//! DXCC entity code and country name agreement

use super::{ConsistencyValidator, StationLocation, StationTags};
use crate::app::models::{Diagnostic, Record};
use tracing::debug;

impl ConsistencyValidator<'_> {
    /// Work out a station's entity from its code and country name
    ///
    /// A known code wins. Without one, the entity named by the country field
    /// is used. A code that disagrees with the country name is reported.
    pub(super) fn resolve_entity(
        &self,
        record: &Record,
        station: &StationTags,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> StationLocation {
        let code = record
            .lookup(station.dxcc)
            .and_then(|entry| entry.value.parse::<u32>().ok());

        let named = record.lookup(station.country).and_then(|entry| {
            let found = self.reference.entity_code_for_name(&entry.value);
            if found.is_none() {
                debug!("No entity is named '{}'", entry.value);
            }
            found.map(|named| (named, entry.line))
        });

        if let (Some(code), Some((named, line))) = (code, named) {
            if code != named {
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "The {} is for DXCC entity {} ({}) but the {} tag has {} ({})",
                        station.country,
                        named,
                        self.entity_name(named),
                        station.dxcc,
                        code,
                        self.entity_name(code)
                    ),
                    line,
                ));
            }
        }

        let known = code.filter(|code| self.reference.entity_info(*code).is_some());
        StationLocation {
            entity: known.or(named.map(|(named, _)| named)),
            subdivision: None,
        }
    }
}
