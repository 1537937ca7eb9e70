//! Tests for user-defined field declarations

use crate::app::models::{DataType, TagField};
use crate::app::services::record_assembler::{UserFieldConstraint, UserFieldRegistry, is_declaration};
use std::collections::BTreeSet;

fn register(value: &str, data_type: Option<&str>) -> (UserFieldRegistry, Vec<String>) {
    let mut registry = UserFieldRegistry::new();
    let mut diagnostics = Vec::new();
    let mut field = TagField::new("USERDEF1", value, 3);
    if let Some(data_type) = data_type {
        field = field.with_type(data_type);
    }
    registry.register(&field, &mut diagnostics);
    (registry, diagnostics.into_iter().map(|d| d.message).collect())
}

#[test]
fn test_is_declaration() {
    assert!(is_declaration("USERDEF1"));
    assert!(is_declaration("USERDEF12"));
    assert!(!is_declaration("USERDEF"));
    assert!(!is_declaration("USERDEFX"));
    assert!(!is_declaration("MY_USERDEF1"));
}

#[test]
fn test_plain_declaration_defaults_to_string() {
    let (registry, messages) = register("epc", None);

    assert!(messages.is_empty());
    let field = registry.get("EPC").unwrap();
    assert_eq!(field.data_type, DataType::String);
    assert_eq!(field.constraint, None);
}

#[test]
fn test_enumeration_declaration() {
    let (registry, messages) = register("SweaterSize,{S, m ,L}", Some("E"));

    assert!(messages.is_empty());
    let expected: BTreeSet<String> = ["S", "M", "L"].iter().map(|s| s.to_string()).collect();
    assert_eq!(
        registry.get("sweatersize").unwrap().constraint,
        Some(UserFieldConstraint::Values(expected))
    );
}

#[test]
fn test_range_declaration() {
    let (registry, _) = register("ShoeSize,{5:20}", Some("N"));

    let field = registry.get("SHOESIZE").unwrap();
    assert_eq!(field.data_type, DataType::Number);
    assert_eq!(field.range(), Some((5.0, 20.0)));
    assert!(field.values().is_none());
}

#[test]
fn test_unreadable_constraint() {
    let (registry, messages) = register("ShoeSize,{20:5}", Some("N"));

    assert_eq!(
        messages,
        vec!["USERDEF1 has an unreadable constraint '{20:5}' for field 'SHOESIZE'"]
    );
    assert!(registry.contains("SHOESIZE"));
}

#[test]
fn test_enumeration_without_values() {
    let (_, messages) = register("Colour", Some("E"));

    assert_eq!(
        messages,
        vec!["USERDEF1 declares enumeration 'COLOUR' without any values"]
    );
}

#[test]
fn test_empty_declaration() {
    let (registry, messages) = register(" ", None);

    assert_eq!(messages, vec!["USERDEF1 does not name a field"]);
    assert!(registry.is_empty());
}
