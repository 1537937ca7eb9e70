//! Consistency validator: record-level plausibility against reference data
//!
//! Runs once per completed QSO record, after every field has passed through
//! the compliance validator. Each rule family reads the fields it needs with
//! [`Record::lookup`] and skips itself when they are absent, so a missing
//! field only silences the checks that depend on it.
//!
//! # Architecture
//!
//! - [`ConsistencyValidator`]: rule ordering and per-station resolution
//! - `grid`: Maidenhead locator shape
//! - `band`: band edges against the stated frequency
//! - `entity`: DXCC code and country name agreement
//! - `subdivision`: primary subdivision membership and entity inference
//! - `county`: county normalization and membership
//! - `zones`: CQ and ITU zones against the applicable zone map
//! - `mode`: mode and submode pairing
//! - `temporal`: start/end timestamps and entity validity windows
//!
//! The worked station and the logging station (`MY_*` fields) are checked
//! by the same code, parameterized by [`StationTags`].

use crate::app::models::{Diagnostic, Record};
use crate::app::services::reference_data::ReferenceData;
use crate::constants::fields;

pub mod band;
pub mod county;
pub mod entity;
pub mod grid;
pub mod mode;
pub mod subdivision;
pub mod temporal;
pub mod zones;

#[cfg(test)]
pub mod tests;

pub use county::normalize_county;
pub use grid::{GridProblem, check_grid};

/// Name used when an entity code has no reference entry
const UNKNOWN_ENTITY_NAME: &str = "INVALID ENTITY NUMBER";

/// Field names describing one end of the contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationTags {
    pub dxcc: &'static str,
    pub country: &'static str,
    pub state: &'static str,
    pub county: &'static str,
    pub county_list: &'static str,
    pub cq_zone: &'static str,
    pub itu_zone: &'static str,
    /// Wording used for zone messages
    pub cq_label: &'static str,
    pub itu_label: &'static str,
    pub grid: &'static str,
    pub grid_list: &'static str,
}

impl StationTags {
    /// The station that was contacted
    pub const WORKED: StationTags = StationTags {
        dxcc: fields::DXCC,
        country: fields::COUNTRY,
        state: fields::STATE,
        county: fields::CNTY,
        county_list: fields::USACA_COUNTIES,
        cq_zone: fields::CQZ,
        itu_zone: fields::ITUZ,
        cq_label: "CQ Zone",
        itu_label: "ITU Zone",
        grid: fields::GRIDSQUARE,
        grid_list: fields::VUCC_GRIDS,
    };

    /// The station that made the log
    pub const MY_STATION: StationTags = StationTags {
        dxcc: fields::MY_DXCC,
        country: fields::MY_COUNTRY,
        state: fields::MY_STATE,
        county: fields::MY_CNTY,
        county_list: fields::MY_USACA_COUNTIES,
        cq_zone: fields::MY_CQ_ZONE,
        itu_zone: fields::MY_ITU_ZONE,
        cq_label: fields::MY_CQ_ZONE,
        itu_label: fields::MY_ITU_ZONE,
        grid: fields::MY_GRIDSQUARE,
        grid_list: fields::MY_VUCC_GRIDS,
    };
}

/// Where one station is, as far as the record lets us tell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationLocation {
    /// Known entity code, given directly or inferred
    pub entity: Option<u32>,
    /// Subdivision code confirmed to belong to `entity`
    pub subdivision: Option<String>,
}

pub struct ConsistencyValidator<'a> {
    reference: &'a dyn ReferenceData,
}

impl<'a> ConsistencyValidator<'a> {
    pub fn new(reference: &'a dyn ReferenceData) -> Self {
        Self { reference }
    }

    /// Check one completed record, returning every problem found
    pub fn validate(&self, record: &Record) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for station in [StationTags::WORKED, StationTags::MY_STATION] {
            self.check_grids(record, &station, &mut diagnostics);
        }
        self.check_bands(record, &mut diagnostics);

        let mut worked = self.resolve_entity(record, &StationTags::WORKED, &mut diagnostics);
        let mut mine = self.resolve_entity(record, &StationTags::MY_STATION, &mut diagnostics);
        self.resolve_subdivision(record, &StationTags::WORKED, &mut worked, &mut diagnostics);
        self.resolve_subdivision(record, &StationTags::MY_STATION, &mut mine, &mut diagnostics);

        self.check_mode(record, &mut diagnostics);

        for (station, location) in [
            (StationTags::WORKED, &worked),
            (StationTags::MY_STATION, &mine),
        ] {
            self.check_counties(record, &station, location, &mut diagnostics);
        }
        for (station, location) in [
            (StationTags::WORKED, &worked),
            (StationTags::MY_STATION, &mine),
        ] {
            self.check_zones(record, &station, location, &mut diagnostics);
        }

        let date = self.check_timestamps(record, &mut diagnostics);
        if let Some(date) = date {
            self.check_validity_windows(&date, worked.entity, mine.entity, &mut diagnostics);
        }

        diagnostics
    }

    /// Display name of an entity for messages
    fn entity_name(&self, code: u32) -> &str {
        self.reference
            .entity_info(code)
            .map(|info| info.name.as_str())
            .unwrap_or(UNKNOWN_ENTITY_NAME)
    }
}
