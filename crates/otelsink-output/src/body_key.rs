//! Body key registry
//!
//! Ordered list of compiled patterns that locate the log body inside a
//! record. The first pattern (in registry order) that matches a record
//! supplies its body.

use crate::error::OutputError;
use otelsink_accessor::RecordAccessor;
use serde_json::Value;
use tracing::{debug, error};

/// Patterns used when none are configured: the `log` key, then `message`
pub const DEFAULT_BODY_KEYS: [&str; 2] = ["$log", "$message"];

/// A compiled body key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyKeyEntry {
    accessor: RecordAccessor,
}

impl BodyKeyEntry {
    /// Source pattern
    pub fn pattern(&self) -> &str {
        self.accessor.pattern()
    }

    /// Compiled accessor
    pub fn accessor(&self) -> &RecordAccessor {
        &self.accessor
    }
}

/// Ordered collection of body keys
///
/// Duplicate patterns are kept as separate entries. With first-match
/// resolution a later duplicate never supplies the body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyKeyRegistry {
    entries: Vec<BodyKeyEntry>,
}

impl BodyKeyRegistry {
    /// Build the registry from configured patterns
    ///
    /// An empty list selects [`DEFAULT_BODY_KEYS`]. Otherwise every pattern
    /// is compiled in order and the first failure aborts the build.
    pub fn build<S: AsRef<str>>(patterns: &[S]) -> Result<Self, OutputError> {
        if patterns.is_empty() {
            debug!(defaults = ?DEFAULT_BODY_KEYS, "no body keys configured, using defaults");
            return Self::compile_all(&DEFAULT_BODY_KEYS);
        }
        Self::compile_all(patterns)
    }

    fn compile_all<S: AsRef<str>>(patterns: &[S]) -> Result<Self, OutputError> {
        let mut entries = Vec::new();
        entries
            .try_reserve_exact(patterns.len())
            .map_err(|e| OutputError::AllocationFailure(format!("body key registry: {}", e)))?;

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let accessor = RecordAccessor::compile(pattern).map_err(|e| {
                error!(pattern, "could not process body key pattern");
                OutputError::from(e)
            })?;
            entries.push(BodyKeyEntry { accessor });
        }

        Ok(Self { entries })
    }

    /// First entry that matches the record, with the matched value
    pub fn resolve_body<'r>(&self, record: &'r Value) -> Option<(&BodyKeyEntry, &'r Value)> {
        self.entries
            .iter()
            .find_map(|entry| entry.accessor.get(record).map(|value| (entry, value)))
    }

    /// Entries in registry order
    pub fn entries(&self) -> &[BodyKeyEntry] {
        &self.entries
    }

    /// Iterate entries in registry order
    pub fn iter(&self) -> std::slice::Iter<'_, BodyKeyEntry> {
        self.entries.iter()
    }

    /// Source patterns in registry order
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(BodyKeyEntry::pattern)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries (only after [`destroy`](Self::destroy))
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Release every entry
    pub fn destroy(&mut self) {
        self.entries.clear();
    }
}
