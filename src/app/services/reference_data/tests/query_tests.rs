//! Tests for reference data queries

use super::*;
use crate::app::models::ZonePair;
use crate::app::services::reference_data::ReferenceData;

#[test]
fn test_record_tags_include_end_of_record() {
    let reference = sample_reference();

    assert!(reference.is_valid_record_tag("call"));
    assert!(reference.is_valid_record_tag("EOR"));
    assert!(!reference.is_valid_record_tag("FOO"));
    assert!(!reference.is_valid_record_tag("EOH"));
}

#[test]
fn test_header_tags_always_include_end_of_header() {
    let reference = sample_reference();

    assert!(reference.is_valid_header_tag("EOH"));
    assert!(reference.is_valid_header_tag("programid"));
    assert!(!reference.is_valid_header_tag("CALL"));
}

#[test]
fn test_type_codes() {
    let reference = sample_reference();

    assert!(reference.is_valid_type_code("n"));
    assert!(!reference.is_valid_type_code("X"));
}

#[test]
fn test_ranges() {
    let reference = sample_reference();

    assert_eq!(reference.range_of("CQZ"), Some((1.0, 40.0)));
    assert_eq!(reference.range_of("CALL"), None);
}

#[test]
fn test_subdivision_zone_override() {
    let reference = sample_reference();

    assert_eq!(
        reference.subdivision_zone_override(291, "MA"),
        Some(&vec![ZonePair { itu: 8, cq: 5 }])
    );
    assert_eq!(reference.subdivision_zone_override(291, "TX"), None);
    assert_eq!(reference.subdivision_zone_override(291, "ZZ"), None);
    assert_eq!(reference.subdivision_zone_override(230, "BY"), None);
}

#[test]
fn test_subdivisions_and_counties_lookup() {
    let reference = sample_reference();

    let states = reference.subdivisions_of(291).unwrap();
    assert!(states.contains_key("MA") && states.contains_key("TX"));
    assert!(reference.subdivisions_of(81).is_none());

    assert!(reference.counties_of(291, "ma").is_some());
    assert!(reference.counties_of(291, "TX").is_none());
}

#[test]
fn test_unknown_mode_has_no_submodes() {
    let reference = sample_reference();

    assert!(reference.submodes_of("CW").unwrap().is_empty());
    assert!(reference.submodes_of("SLOWSCAN").is_none());
}

#[test]
fn test_stats_count_tables() {
    let stats = sample_reference().stats();

    assert_eq!(stats.bands, 2);
    assert_eq!(stats.modes, 2);
    assert_eq!(stats.entities, 3);
    assert_eq!(stats.subdivisions, 2);
    assert_eq!(stats.county_tables, 1);
}
