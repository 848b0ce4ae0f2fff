//! Composite key exclusion
//!
//! Builds a prefix tree out of several compiled accessors and produces, for
//! any record, a copy with every matched field left out. Map and array order
//! of the surviving fields is preserved.
//!
//! Exclusion follows both map-key and array-index steps. Containers that end
//! up empty after exclusion are kept. A pattern whose path does not exist in
//! a record (wrong container type, index out of range, missing key) excludes
//! nothing from it.

use crate::error::AccessorError;
use crate::pattern::{PathStep, RecordAccessor};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
struct ExclusionNode {
    excluded: bool,
    keys: HashMap<String, ExclusionNode>,
    indices: HashMap<usize, ExclusionNode>,
}

impl ExclusionNode {
    fn insert(&mut self, accessor: &RecordAccessor) {
        let mut node = self.keys.entry(accessor.key().to_string()).or_default();
        for step in accessor.steps() {
            node = match step {
                PathStep::Key(name) => node.keys.entry(name.clone()).or_default(),
                PathStep::Index(index) => node.indices.entry(*index).or_default(),
            };
        }
        node.excluded = true;
    }

    fn filter_map(&self, map: &Map<String, Value>, removed: &mut usize) -> Map<String, Value> {
        let mut out = Map::new();
        for (key, value) in map {
            match self.keys.get(key) {
                Some(child) if child.excluded => *removed += 1,
                Some(child) => {
                    out.insert(key.clone(), child.filter_value(value, removed));
                }
                None => {
                    out.insert(key.clone(), value.clone());
                }
            }
        }
        out
    }

    fn filter_array(&self, items: &[Value], removed: &mut usize) -> Vec<Value> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match self.indices.get(&index) {
                Some(child) if child.excluded => *removed += 1,
                Some(child) => out.push(child.filter_value(item, removed)),
                None => out.push(item.clone()),
            }
        }
        out
    }

    fn filter_value(&self, value: &Value, removed: &mut usize) -> Value {
        match value {
            Value::Object(map) if !self.keys.is_empty() => {
                Value::Object(self.filter_map(map, removed))
            }
            Value::Array(items) if !self.indices.is_empty() => {
                Value::Array(self.filter_array(items, removed))
            }
            other => other.clone(),
        }
    }
}

/// Result of applying a [`KeyExclusion`] to a record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Excluded {
    /// Top-level fields left after exclusion, in record order
    pub remainder: Map<String, Value>,

    /// Number of fields (at any depth) that were left out
    pub removed: usize,
}

impl Excluded {
    /// Whether any field was left out
    pub fn changed(&self) -> bool {
        self.removed > 0
    }
}

/// Composite accessor that leaves out every field matched by its patterns
#[derive(Debug, Clone)]
pub struct KeyExclusion {
    accessors: Vec<RecordAccessor>,
    root: ExclusionNode,
}

impl KeyExclusion {
    /// Compile a set of patterns into a single exclusion
    ///
    /// # Errors
    ///
    /// Returns [`AccessorError::Build`] for an empty pattern set and
    /// [`AccessorError::InvalidPattern`] for the first pattern that fails to
    /// compile.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, AccessorError> {
        let accessors = patterns
            .iter()
            .map(|pattern| RecordAccessor::compile(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_accessors(accessors)
    }

    /// Build an exclusion from already compiled accessors
    ///
    /// # Errors
    ///
    /// Returns [`AccessorError::Build`] for an empty accessor set.
    pub fn from_accessors(accessors: Vec<RecordAccessor>) -> Result<Self, AccessorError> {
        if accessors.is_empty() {
            return Err(AccessorError::Build(
                "key exclusion requires at least one pattern".to_string(),
            ));
        }

        let mut root = ExclusionNode::default();
        for accessor in &accessors {
            root.insert(accessor);
        }

        Ok(Self { accessors, root })
    }

    /// Copy of the record with every matched field left out
    ///
    /// A record that is not a map yields an empty remainder.
    pub fn apply(&self, record: &Value) -> Excluded {
        let mut removed = 0;
        let remainder = match record.as_object() {
            Some(map) => self.root.filter_map(map, &mut removed),
            None => Map::new(),
        };

        Excluded { remainder, removed }
    }

    /// Patterns this exclusion was built from, in order
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.accessors.iter().map(RecordAccessor::pattern)
    }

    /// Number of patterns
    pub fn len(&self) -> usize {
        self.accessors.len()
    }

    /// Always false for a successfully built exclusion
    pub fn is_empty(&self) -> bool {
        self.accessors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn remainder(exclusion: &KeyExclusion, record: &Value) -> Value {
        Value::Object(exclusion.apply(record).remainder)
    }

    #[test]
    fn test_empty_pattern_set_is_build_error() {
        let patterns: [&str; 0] = [];
        match KeyExclusion::new(&patterns) {
            Err(AccessorError::Build(msg)) => assert!(msg.contains("at least one")),
            other => panic!("Expected Build error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_accessors_requires_one() {
        assert!(matches!(
            KeyExclusion::from_accessors(Vec::new()),
            Err(AccessorError::Build(_))
        ));

        let accessor = RecordAccessor::compile("$log").unwrap();
        let exclusion = KeyExclusion::from_accessors(vec![accessor]).unwrap();
        assert_eq!(exclusion.len(), 1);
    }

    #[test]
    fn test_invalid_pattern_propagates() {
        let result = KeyExclusion::new(&["$log", "message"]);
        match result {
            Err(AccessorError::InvalidPattern { pattern, .. }) => assert_eq!(pattern, "message"),
            other => panic!("Expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_exclusion_preserves_order() {
        let exclusion = KeyExclusion::new(&["$log", "$message"]).unwrap();
        let record = json!({"z": 1, "log": "x", "a": 2, "message": "y", "m": 3});

        let excluded = exclusion.apply(&record);
        assert_eq!(excluded.removed, 2);
        assert!(excluded.changed());

        let keys: Vec<&str> = excluded.remainder.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_absent_keys_remove_nothing() {
        let exclusion = KeyExclusion::new(&["$log"]).unwrap();
        let record = json!({"level": "info"});

        let excluded = exclusion.apply(&record);
        assert_eq!(excluded.removed, 0);
        assert!(!excluded.changed());
        assert_eq!(Value::Object(excluded.remainder), record);
    }

    #[test]
    fn test_nested_map_exclusion() {
        let exclusion = KeyExclusion::new(&["$kubernetes['labels']['app']"]).unwrap();
        let record = json!({
            "kubernetes": {"labels": {"app": "web", "tier": "front"}, "pod": "p1"},
            "level": "info"
        });

        assert_eq!(
            remainder(&exclusion, &record),
            json!({
                "kubernetes": {"labels": {"tier": "front"}, "pod": "p1"},
                "level": "info"
            })
        );
    }

    #[test]
    fn test_emptied_containers_are_kept() {
        let exclusion = KeyExclusion::new(&["$data['only']"]).unwrap();
        let record = json!({"data": {"only": 1}, "x": true});

        assert_eq!(remainder(&exclusion, &record), json!({"data": {}, "x": true}));
    }

    #[test]
    fn test_array_index_exclusion() {
        let exclusion = KeyExclusion::new(&["$items[0]", "$items[2]['msg']"]).unwrap();
        let record = json!({
            "items": ["drop", "keep", {"msg": "gone", "id": 3}],
        });

        let excluded = exclusion.apply(&record);
        assert_eq!(excluded.removed, 2);
        assert_eq!(
            Value::Object(excluded.remainder),
            json!({"items": ["keep", {"id": 3}]})
        );
    }

    #[test]
    fn test_mismatched_path_excludes_nothing() {
        let exclusion = KeyExclusion::new(&["$log['inner']", "$items[5]"]).unwrap();
        let record = json!({"log": "scalar", "items": [1, 2]});

        let excluded = exclusion.apply(&record);
        assert_eq!(excluded.removed, 0);
        assert_eq!(Value::Object(excluded.remainder), record);
    }

    #[test]
    fn test_parent_exclusion_wins_over_child() {
        let exclusion = KeyExclusion::new(&["$log['a']", "$log"]).unwrap();
        let record = json!({"log": {"a": 1, "b": 2}, "keep": 0});

        let excluded = exclusion.apply(&record);
        assert_eq!(excluded.removed, 1);
        assert_eq!(Value::Object(excluded.remainder), json!({"keep": 0}));
    }

    #[test]
    fn test_duplicate_patterns_remove_once() {
        let exclusion = KeyExclusion::new(&["$log", "$log"]).unwrap();
        assert_eq!(exclusion.len(), 2);

        let excluded = exclusion.apply(&json!({"log": 1, "x": 2}));
        assert_eq!(excluded.removed, 1);
        assert_eq!(Value::Object(excluded.remainder), json!({"x": 2}));
    }

    #[test]
    fn test_non_map_record_yields_empty_remainder() {
        let exclusion = KeyExclusion::new(&["$log"]).unwrap();
        let excluded = exclusion.apply(&json!(["log", "x"]));
        assert!(excluded.remainder.is_empty());
        assert_eq!(excluded.removed, 0);
    }

    #[test]
    fn test_patterns_in_order() {
        let exclusion = KeyExclusion::new(&["$b", "$a", "$c['d']"]).unwrap();
        let patterns: Vec<&str> = exclusion.patterns().collect();
        assert_eq!(patterns, vec!["$b", "$a", "$c['d']"]);
        assert!(!exclusion.is_empty());
    }

    #[test]
    fn test_source_record_is_untouched() {
        let exclusion = KeyExclusion::new(&["$log"]).unwrap();
        let record = json!({"log": "x", "y": 1});
        let before = record.clone();

        let _ = exclusion.apply(&record);
        assert_eq!(record, before);
    }
}
