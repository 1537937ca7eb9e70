//! Reference dataset statistics

use std::fmt;

/// Counts of what a reference dataset provides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceStats {
    /// QSO tags with a declared type
    pub tags: usize,

    /// Enumerated tags, including derived ones
    pub enumerations: usize,

    pub bands: usize,
    pub modes: usize,

    /// DXCC entities
    pub entities: usize,

    /// Primary subdivisions across all entities
    pub subdivisions: usize,

    /// Subdivisions with a county table
    pub county_tables: usize,
}

impl fmt::Display for ReferenceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tags, {} enumerations, {} bands, {} modes, {} entities, {} subdivisions, {} county tables",
            self.tags,
            self.enumerations,
            self.bands,
            self.modes,
            self.entities,
            self.subdivisions,
            self.county_tables
        )
    }
}
