//! Query implementation over the in-memory reference tables

use super::{ReferenceData, StaticReferenceData, Subdivisions};
use crate::app::models::{DataType, EntityInfo};
use std::collections::BTreeSet;

impl ReferenceData for StaticReferenceData {
    fn type_of(&self, tag: &str) -> Option<DataType> {
        self.tag_types.get(&tag.to_uppercase()).cloned()
    }

    fn range_of(&self, tag: &str) -> Option<(f64, f64)> {
        self.ranges.get(&tag.to_uppercase()).copied()
    }

    fn enumeration_of(&self, tag: &str) -> Option<&BTreeSet<String>> {
        self.enumerations.get(&tag.to_uppercase())
    }

    fn entity_info(&self, code: u32) -> Option<&EntityInfo> {
        self.entities.get(&code)
    }

    fn subdivisions_of(&self, entity: u32) -> Option<&Subdivisions> {
        self.subdivisions.get(&entity)
    }

    fn counties_of(&self, entity: u32, subdivision: &str) -> Option<&BTreeSet<String>> {
        self.counties.get(&(entity, subdivision.to_uppercase()))
    }

    fn is_valid_header_tag(&self, tag: &str) -> bool {
        self.header_tags.contains(&tag.to_uppercase())
    }

    fn is_valid_record_tag(&self, tag: &str) -> bool {
        self.knows_record_tag(&tag.to_uppercase())
    }

    fn is_valid_type_code(&self, code: &str) -> bool {
        self.type_codes.contains(&code.to_uppercase())
    }

    fn band_range(&self, band: &str) -> Option<(f64, f64)> {
        self.bands.get(&band.trim().to_uppercase()).copied()
    }

    fn submodes_of(&self, mode: &str) -> Option<&BTreeSet<String>> {
        self.modes.get(&mode.trim().to_uppercase())
    }

    fn entity_code_for_name(&self, name: &str) -> Option<u32> {
        self.entity_names.get(&name.trim().to_uppercase()).copied()
    }
}
