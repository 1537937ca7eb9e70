//! Primary subdivision (state, province) membership

use super::{ConsistencyValidator, StationLocation, StationTags};
use crate::app::models::{Diagnostic, Record};
use crate::constants::SUBDIVISION_ENTITY_INFERENCE;

impl ConsistencyValidator<'_> {
    /// Confirm the station's subdivision belongs to its entity
    ///
    /// Without an entity, a few subdivision codes identify the entity on
    /// their own; that inference is reported and then relied on.
    pub(super) fn resolve_subdivision(
        &self,
        record: &Record,
        station: &StationTags,
        location: &mut StationLocation,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let Some(state) = record.lookup(station.state) else {
            return;
        };

        let entity = match location.entity {
            Some(entity) => entity,
            None => {
                let inferred = SUBDIVISION_ENTITY_INFERENCE
                    .iter()
                    .find(|(code, _, _)| *code == state.value);
                let Some((_, entity, name)) = inferred else {
                    diagnostics.push(Diagnostic::consistency(
                        format!(
                            "The QSO contains {} '{}' but the QSO record has no valid DXCC entity",
                            station.state, state.value
                        ),
                        state.line,
                    ));
                    return;
                };
                diagnostics.push(Diagnostic::consistency(
                    format!(
                        "The QSO contains {} '{}' but the QSO record has no valid DXCC entity - assuming {}",
                        station.state, state.value, name
                    ),
                    state.line,
                ));
                location.entity = Some(*entity);
                *entity
            }
        };

        let Some(subdivisions) = self.reference.subdivisions_of(entity) else {
            diagnostics.push(Diagnostic::consistency(
                format!(
                    "DXCC Entity {} ({}) does not have a primary administrative subdivision but the QSO contains {} '{}'",
                    entity,
                    self.entity_name(entity),
                    station.state,
                    state.value
                ),
                state.line,
            ));
            return;
        };

        if subdivisions.contains_key(&state.value) {
            location.subdivision = Some(state.value);
        } else {
            diagnostics.push(Diagnostic::consistency(
                format!(
                    "{} '{}' is not valid for DXCC {} ({})",
                    station.state,
                    state.value,
                    entity,
                    self.entity_name(entity)
                ),
                state.line,
            ));
        }
    }
}
