//! Registry of user-defined fields declared in the header
//!
//! A declaration is a `USERDEFn` field whose value names the new field and
//! optionally constrains it: `EPC`, `SWEATERSIZE,{S,M,L}` or
//! `SHOESIZE,{5:20}`. Names are matched case-insensitively.

use crate::app::models::{DataType, Diagnostic, TagField};
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;
use tracing::debug;

fn declaration_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^USERDEF\d+$").ok())
        .as_ref()
}

/// True for `USERDEF` followed by a numeric suffix
pub fn is_declaration(name: &str) -> bool {
    declaration_pattern().is_some_and(|pattern| pattern.is_match(name))
}

/// Optional restriction carried by a declaration
#[derive(Debug, Clone, PartialEq)]
pub enum UserFieldConstraint {
    /// Permitted values, uppercase
    Values(BTreeSet<String>),
    /// Inclusive numeric range
    Range(f64, f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserField {
    pub name: String,
    pub data_type: DataType,
    pub constraint: Option<UserFieldConstraint>,
}

impl UserField {
    pub fn range(&self) -> Option<(f64, f64)> {
        match self.constraint {
            Some(UserFieldConstraint::Range(low, high)) => Some((low, high)),
            _ => None,
        }
    }

    pub fn values(&self) -> Option<&BTreeSet<String>> {
        match &self.constraint {
            Some(UserFieldConstraint::Values(values)) => Some(values),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserFieldRegistry {
    fields: HashMap<String, UserField>,
}

impl UserFieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the field a `USERDEFn` declaration names
    ///
    /// Malformed constraints are reported and the field is registered
    /// without one.
    pub fn register(&mut self, declaration: &TagField, diagnostics: &mut Vec<Diagnostic>) {
        let text = declaration.value.trim();
        let (name, constraint_text) = match text.split_once(',') {
            Some((name, rest)) => (name.trim(), Some(rest.trim())),
            None => (text, None),
        };

        if name.is_empty() {
            diagnostics.push(Diagnostic::compliance(
                format!("{} does not name a field", declaration.name),
                declaration.line,
            ));
            return;
        }

        let data_type = declaration
            .declared_type
            .as_deref()
            .map(DataType::from_code)
            .unwrap_or(DataType::String);

        let constraint = constraint_text.and_then(|text| {
            let parsed = parse_constraint(text);
            if parsed.is_none() {
                diagnostics.push(Diagnostic::compliance(
                    format!(
                        "{} has an unreadable constraint '{}' for field '{}'",
                        declaration.name,
                        text,
                        name.to_uppercase()
                    ),
                    declaration.line,
                ));
            }
            parsed
        });

        if data_type == DataType::Enumeration && constraint.is_none() {
            diagnostics.push(Diagnostic::compliance(
                format!(
                    "{} declares enumeration '{}' without any values",
                    declaration.name,
                    name.to_uppercase()
                ),
                declaration.line,
            ));
        }

        let field = UserField {
            name: name.to_uppercase(),
            data_type,
            constraint,
        };
        debug!("Registered user field {:?}", field);
        self.fields.insert(field.name.clone(), field);
    }

    pub fn get(&self, name: &str) -> Option<&UserField> {
        self.fields.get(&name.to_uppercase())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&name.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse `{A,B,C}` or `{low:high}`
fn parse_constraint(text: &str) -> Option<UserFieldConstraint> {
    let inner = text.strip_prefix('{')?.strip_suffix('}')?.trim();

    if let Some((low, high)) = inner.split_once(':') {
        let low: f64 = low.trim().parse().ok()?;
        let high: f64 = high.trim().parse().ok()?;
        return (low <= high).then_some(UserFieldConstraint::Range(low, high));
    }

    let values: BTreeSet<String> = inner
        .split(',')
        .map(|value| value.trim().to_uppercase())
        .filter(|value| !value.is_empty())
        .collect();
    (!values.is_empty()).then_some(UserFieldConstraint::Values(values))
}
