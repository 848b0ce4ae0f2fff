//! Static labels attached to every exported payload

use crate::error::OutputError;
use serde::Serialize;
use tracing::error;

/// A single label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    /// Label key
    pub key: String,
    /// Label value
    pub value: String,
}

/// Ordered label store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    /// Build labels from `add_label` entries
    ///
    /// Each entry must split on whitespace into exactly a key and a value,
    /// e.g. `"version 1.8.0"`.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Configuration`] naming the first malformed
    /// entry; no labels are kept in that case.
    pub fn from_config<S: AsRef<str>>(entries: &[S]) -> Result<Self, OutputError> {
        let mut labels = Vec::new();
        labels
            .try_reserve_exact(entries.len())
            .map_err(|e| OutputError::AllocationFailure(format!("label set: {}", e)))?;

        for entry in entries {
            let entry = entry.as_ref();
            let parts: Vec<&str> = entry.split_whitespace().collect();
            if parts.len() != 2 {
                error!(
                    entry,
                    "'add_label' expects a key and a value, e.g: 'add_label version 1.8.0'"
                );
                return Err(OutputError::Configuration(format!(
                    "'add_label' expects a key and a value, got {} value(s) in '{}'",
                    parts.len(),
                    entry
                )));
            }

            labels.push(Label {
                key: parts[0].to_string(),
                value: parts[1].to_string(),
            });
        }

        Ok(Self { labels })
    }

    /// Value of the first label with this key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|label| label.key == key)
            .map(|label| label.value.as_str())
    }

    /// Labels in configuration order
    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels are configured
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Drop every label
    pub fn release(&mut self) {
        self.labels.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_from_config() {
        let labels = LabelSet::from_config(&["version 1.8.0", "env   prod"]).unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get("version"), Some("1.8.0"));
        assert_eq!(labels.get("env"), Some("prod"));
        assert_eq!(labels.get("missing"), None);

        let keys: Vec<&str> = labels.iter().map(|l| l.key.as_str()).collect();
        assert_eq!(keys, vec!["version", "env"]);
    }

    #[test]
    fn test_no_labels() {
        let entries: Vec<String> = Vec::new();
        let labels = LabelSet::from_config(&entries).unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn test_single_value_rejected() {
        match LabelSet::from_config(&["version 1.8.0", "lonely"]) {
            Err(OutputError::Configuration(msg)) => {
                assert!(msg.contains("'lonely'"));
                assert!(msg.contains("1 value(s)"));
            }
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_three_values_rejected() {
        let result = LabelSet::from_config(&["a b c"]);
        assert!(matches!(result, Err(OutputError::Configuration(_))));
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut labels = LabelSet::from_config(&["a b"]).unwrap();
        labels.release();
        labels.release();
        assert!(labels.is_empty());
    }
}
