//! Metadata accessor
//!
//! Everything in a record that is not body becomes metadata. The accessor is
//! compiled from the registry's pattern strings, separately from the body
//! accessors, so that body extraction and metadata exclusion can be checked
//! on their own.
//!
//! Top-level keys are always partitioned between body and metadata. Nested
//! patterns are excluded as far as [`KeyExclusion`] follows them; see its
//! module docs for the exact rules.

use crate::body_key::BodyKeyRegistry;
use crate::error::OutputError;
use otelsink_accessor::{Excluded, KeyExclusion, RecordMap};
use serde_json::Value;
use tracing::error;

/// Composite accessor yielding the non-body part of a record
#[derive(Debug, Clone)]
pub struct MetadataAccessor {
    exclusion: KeyExclusion,
}

impl MetadataAccessor {
    /// Build the accessor from every pattern in the registry, in order
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Build`] for an empty registry, or the compile
    /// error of a pattern that fails to recompile.
    pub fn build(registry: &BodyKeyRegistry) -> Result<Self, OutputError> {
        let patterns: Vec<&str> = registry.patterns().collect();

        let exclusion = KeyExclusion::new(&patterns).map_err(|e| {
            error!(error = %e, "could not create metadata accessor");
            OutputError::from(e)
        })?;

        Ok(Self { exclusion })
    }

    /// Fields of the record not consumed by any body key
    pub fn metadata(&self, record: &Value) -> RecordMap {
        self.exclusion.apply(record).remainder
    }

    /// Metadata together with the number of fields left out
    pub fn apply(&self, record: &Value) -> Excluded {
        self.exclusion.apply(record)
    }

    /// Patterns the accessor excludes
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.exclusion.patterns()
    }
}
