//! Reference dataset loading and validation
//!
//! The dataset is a TOML document (see `data/reference.toml`). Loading parses
//! it into raw serde structures, validates every entry, normalizes keys and
//! then derives the enumerations that follow from other tables:
//! `BAND`/`BAND_RX` from the band table, `MODE` and `SUBMODE` from the mode
//! table and `DXCC`/`MY_DXCC` from the entity table.

use super::{BUILTIN_REFERENCE, StaticReferenceData, Subdivisions};
use crate::app::models::{DataType, EntityInfo, ZoneMap, ZonePair};
use crate::app::services::consistency::county::normalize_county;
use crate::constants::{TAG_EOH, TAG_EOR};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Date format of entity validity bounds in the dataset
const DATASET_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawReference {
    #[serde(default)]
    type_codes: Vec<String>,
    #[serde(default)]
    header_tags: Vec<String>,
    #[serde(default)]
    entity_aliases: BTreeMap<String, u32>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    #[serde(default)]
    ranges: BTreeMap<String, [f64; 2]>,
    #[serde(default)]
    enumerations: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    bands: BTreeMap<String, [f64; 2]>,
    #[serde(default)]
    modes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    entities: BTreeMap<String, RawEntity>,
    #[serde(default)]
    subdivisions: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    #[serde(default)]
    counties: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEntity {
    name: String,
    #[serde(default)]
    zones: Vec<String>,
    valid_from: Option<String>,
    valid_until: Option<String>,
}

impl StaticReferenceData {
    /// Load the dataset compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_REFERENCE, "built-in reference data")
    }

    /// Load a dataset from a TOML file
    ///
    /// # Errors
    /// * Returns `Error::Io` if the file cannot be read
    /// * Returns `Error::TomlParsing` for malformed TOML
    /// * Returns `Error::ReferenceData` for entries that fail validation
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading reference data from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| {
            Error::io(
                format!("Failed to read reference data {}", path.display()),
                e,
            )
        })?;
        Self::from_toml_str(&text, path.display().to_string())
    }

    /// Parse and validate a dataset held in a string
    pub fn from_toml_str(text: &str, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();
        let raw: RawReference =
            toml::from_str(text).map_err(|e| Error::toml_parsing(origin.clone(), e))?;

        let reference = Self::from_raw(raw)?;
        debug!("Loaded {} from {}", reference.stats(), origin);
        Ok(reference)
    }

    fn from_raw(raw: RawReference) -> Result<Self> {
        let mut reference = Self::default();

        reference.type_codes = raw.type_codes.iter().map(|c| c.trim().to_uppercase()).collect();

        reference.header_tags = raw.header_tags.iter().map(|t| t.trim().to_uppercase()).collect();
        reference.header_tags.insert(TAG_EOH.to_string());

        for (tag, code) in &raw.tags {
            let data_type = DataType::from_code(code);
            if let DataType::Unknown(code) = &data_type {
                warn!("Tag '{}' has unrecognized type code '{}'", tag, code);
            }
            reference.tag_types.insert(tag.to_uppercase(), data_type);
        }

        for (tag, [low, high]) in &raw.ranges {
            check_bounds("range", tag, *low, *high)?;
            reference.ranges.insert(tag.to_uppercase(), (*low, *high));
        }

        for (tag, values) in &raw.enumerations {
            reference
                .enumerations
                .insert(tag.to_uppercase(), uppercase_set(values));
        }

        for (band, [low, high]) in &raw.bands {
            check_bounds("band", band, *low, *high)?;
            reference.bands.insert(band.to_uppercase(), (*low, *high));
        }

        for (mode, submodes) in &raw.modes {
            reference.modes.insert(mode.to_uppercase(), uppercase_set(submodes));
        }

        for (code, entity) in &raw.entities {
            let info = parse_entity(code, entity)?;
            reference.entity_names.insert(info.name.clone(), info.code);
            reference.entities.insert(info.code, info);
        }

        // Aliases win over entity names so a deleted entity never shadows its successor
        for (name, code) in &raw.entity_aliases {
            if !reference.entities.contains_key(code) {
                return Err(Error::reference_data(format!(
                    "alias '{}' refers to unknown entity {}",
                    name, code
                )));
            }
            reference.entity_names.insert(name.trim().to_uppercase(), *code);
        }

        for (code, table) in &raw.subdivisions {
            let entity = parse_entity_code(code)?;
            let mut subdivisions = Subdivisions::new();
            for (subdivision, zones) in table {
                let zones = parse_zones(zones, &format!("subdivision {}/{}", code, subdivision))?;
                let zones = if zones.is_empty() { None } else { Some(zones) };
                subdivisions.insert(subdivision.to_uppercase(), zones);
            }
            reference.subdivisions.insert(entity, subdivisions);
        }

        for (code, table) in &raw.counties {
            let entity = parse_entity_code(code)?;
            for (subdivision, names) in table {
                let normalized = names.iter().map(|name| normalize_county(name)).collect();
                reference
                    .counties
                    .insert((entity, subdivision.to_uppercase()), normalized);
            }
        }

        reference.derive_enumerations();
        Ok(reference)
    }

    /// Fill enumerations that follow from the band, mode and entity tables
    fn derive_enumerations(&mut self) {
        let bands: BTreeSet<String> = self.bands.keys().cloned().collect();
        let modes: BTreeSet<String> = self.modes.keys().cloned().collect();
        let submodes: BTreeSet<String> = self.modes.values().flatten().cloned().collect();
        let entities: BTreeSet<String> = self.entities.keys().map(|c| c.to_string()).collect();

        let derived = [
            ("BAND", bands.clone()),
            ("BAND_RX", bands),
            ("MODE", modes),
            ("SUBMODE", submodes),
            ("DXCC", entities.clone()),
            ("MY_DXCC", entities),
        ];

        for (tag, values) in derived {
            if values.is_empty() {
                continue;
            }
            self.enumerations.entry(tag.to_string()).or_insert(values);
        }
    }

    /// True if the tag is a QSO record tag or the end-of-record marker
    pub(crate) fn knows_record_tag(&self, tag: &str) -> bool {
        tag == TAG_EOR || self.tag_types.contains_key(tag)
    }
}

fn uppercase_set(values: &[String]) -> BTreeSet<String> {
    values.iter().map(|v| v.trim().to_uppercase()).collect()
}

fn check_bounds(what: &str, key: &str, low: f64, high: f64) -> Result<()> {
    if low > high {
        return Err(Error::reference_data(format!(
            "{} '{}' has lower bound {} above upper bound {}",
            what, key, low, high
        )));
    }
    Ok(())
}

fn parse_entity_code(code: &str) -> Result<u32> {
    code.trim()
        .parse()
        .map_err(|_| Error::reference_data(format!("'{}' is not a DXCC entity code", code)))
}

fn parse_zones(zones: &[String], owner: &str) -> Result<ZoneMap> {
    zones
        .iter()
        .map(|text| {
            ZonePair::parse(text).ok_or_else(|| {
                Error::reference_data(format!(
                    "{} has zone pair '{}', expected ITU:CQ",
                    owner, text
                ))
            })
        })
        .collect()
}

fn parse_date(text: &str, owner: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATASET_DATE_FORMAT).map_err(|e| {
        Error::invalid_date(format!("{} has invalid date '{}'", owner, text), e)
    })
}

fn parse_entity(code: &str, raw: &RawEntity) -> Result<EntityInfo> {
    let owner = format!("entity {}", code);
    let code = parse_entity_code(code)?;
    let name = raw.name.trim().to_uppercase();
    if name.is_empty() {
        return Err(Error::reference_data(format!("{} has an empty name", owner)));
    }

    let valid_from = raw
        .valid_from
        .as_deref()
        .map(|text| parse_date(text, &owner))
        .transpose()?;
    let valid_until = raw
        .valid_until
        .as_deref()
        .map(|text| parse_date(text, &owner))
        .transpose()?;

    if let (Some(from), Some(until)) = (valid_from, valid_until) {
        if from > until {
            return Err(Error::reference_data(format!(
                "{} is valid from {} but ends {}",
                owner, from, until
            )));
        }
    }

    Ok(EntityInfo {
        code,
        name,
        zones: parse_zones(&raw.zones, &owner)?,
        valid_from,
        valid_until,
    })
}
