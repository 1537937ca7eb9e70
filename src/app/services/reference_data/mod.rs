//! Reference data service for tag types, bands, modes and geography
//!
//! The validators never embed ADIF tables of their own. Everything they know
//! about tag types, numeric ranges, enumerations, DXCC entities, primary
//! subdivisions, counties and zones comes through the [`ReferenceData`] trait.
//!
//! # Architecture
//!
//! - [`ReferenceData`]: read-only query interface used by every validator
//! - [`StaticReferenceData`]: in-memory implementation loaded from TOML
//! - `loader`: TOML parsing, validation and derived enumerations
//! - `query`: the trait implementation over the loaded maps
//!
//! # Usage
//!
//! ```
//! use adif_validator::app::services::reference_data::{ReferenceData, StaticReferenceData};
//!
//! let reference = StaticReferenceData::builtin().unwrap();
//! assert!(reference.is_valid_record_tag("CALL"));
//! assert_eq!(reference.entity_code_for_name("UNITED STATES"), Some(291));
//! ```

use crate::app::models::{DataType, EntityInfo, ZoneMap};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub mod loader;
pub mod metadata;
pub mod query;

#[cfg(test)]
pub mod tests;

pub use metadata::ReferenceStats;

/// Default dataset compiled into the binary
pub const BUILTIN_REFERENCE: &str = include_str!("../../../../data/reference.toml");

/// Primary subdivision code to its optional zone override
///
/// `None` means the subdivision uses its entity's zones.
pub type Subdivisions = BTreeMap<String, Option<ZoneMap>>;

/// Read-only queries the validators make against reference data
pub trait ReferenceData {
    /// Declared ADIF type of a QSO tag
    fn type_of(&self, tag: &str) -> Option<DataType>;

    /// Inclusive numeric range for a tag, if it has one
    fn range_of(&self, tag: &str) -> Option<(f64, f64)>;

    /// Permitted values of an enumerated tag
    fn enumeration_of(&self, tag: &str) -> Option<&BTreeSet<String>>;

    /// Information about a DXCC entity
    fn entity_info(&self, code: u32) -> Option<&EntityInfo>;

    /// Primary subdivisions of an entity, if the entity has any
    fn subdivisions_of(&self, entity: u32) -> Option<&Subdivisions>;

    /// Normalized county names for one primary subdivision
    fn counties_of(&self, entity: u32, subdivision: &str) -> Option<&BTreeSet<String>>;

    /// True if the tag may appear in the header
    fn is_valid_header_tag(&self, tag: &str) -> bool;

    /// True if the tag may appear in a QSO record
    fn is_valid_record_tag(&self, tag: &str) -> bool;

    /// True if the type indicator is one the format defines
    fn is_valid_type_code(&self, code: &str) -> bool;

    /// Frequency edges of a band in MHz
    fn band_range(&self, band: &str) -> Option<(f64, f64)>;

    /// Submodes belonging to a mode; `None` if the mode is unknown
    fn submodes_of(&self, mode: &str) -> Option<&BTreeSet<String>>;

    /// Entity code for a country name, including aliases
    fn entity_code_for_name(&self, name: &str) -> Option<u32>;

    /// Zone override for a subdivision, if it declares one
    fn subdivision_zone_override(&self, entity: u32, subdivision: &str) -> Option<&ZoneMap> {
        self.subdivisions_of(entity)?
            .get(subdivision)
            .and_then(|zones| zones.as_ref())
    }
}

/// Reference data held entirely in memory
///
/// Keys are stored uppercase. County names are stored in their normalized
/// form so they compare directly with normalized record values.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceData {
    pub(crate) tag_types: HashMap<String, DataType>,
    pub(crate) ranges: HashMap<String, (f64, f64)>,
    pub(crate) enumerations: HashMap<String, BTreeSet<String>>,
    pub(crate) bands: BTreeMap<String, (f64, f64)>,
    pub(crate) modes: BTreeMap<String, BTreeSet<String>>,
    pub(crate) entities: BTreeMap<u32, EntityInfo>,
    pub(crate) entity_names: HashMap<String, u32>,
    pub(crate) subdivisions: HashMap<u32, Subdivisions>,
    pub(crate) counties: HashMap<(u32, String), BTreeSet<String>>,
    pub(crate) header_tags: HashSet<String>,
    pub(crate) type_codes: HashSet<String>,
}

impl StaticReferenceData {
    /// Number of QSO tags with a declared type
    pub fn tag_count(&self) -> usize {
        self.tag_types.len()
    }

    /// Number of DXCC entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Summary of what was loaded
    pub fn stats(&self) -> ReferenceStats {
        ReferenceStats {
            tags: self.tag_types.len(),
            enumerations: self.enumerations.len(),
            bands: self.bands.len(),
            modes: self.modes.len(),
            entities: self.entities.len(),
            subdivisions: self.subdivisions.values().map(|s| s.len()).sum(),
            county_tables: self.counties.len(),
        }
    }
}
