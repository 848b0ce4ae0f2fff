//! Pattern compilation and evaluation
//!
//! A pattern always starts with `$` followed by a top-level key, then zero or
//! more bracketed steps. Syntax is checked once at compile time; evaluation
//! never fails, it either finds a value or it does not.

use crate::error::AccessorError;
use serde_json::Value;
use std::fmt;

/// A single step below the top-level key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathStep {
    /// Map member access (`['name']`)
    Key(String),
    /// Array element access (`[n]`)
    Index(usize),
}

/// A compiled record accessor
///
/// Immutable once compiled, so a single accessor can be shared across
/// threads and evaluated against any number of records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordAccessor {
    pattern: String,
    key: String,
    steps: Vec<PathStep>,
}

impl RecordAccessor {
    /// Compile a pattern into an accessor
    ///
    /// # Errors
    ///
    /// Returns [`AccessorError::InvalidPattern`] if the pattern is empty, does
    /// not start with `$`, or is otherwise malformed.
    pub fn compile(pattern: &str) -> Result<Self, AccessorError> {
        let invalid = |reason: String| AccessorError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        };

        if pattern.is_empty() {
            return Err(invalid("pattern is empty".to_string()));
        }

        let chars: Vec<char> = pattern.chars().collect();
        if chars[0] != '$' {
            return Err(invalid(format!(
                "pattern must start with '$', got '{}'",
                chars[0]
            )));
        }

        let mut pos = 1;
        let key = match chars.get(pos) {
            None => return Err(invalid("missing key after '$'".to_string())),
            Some(&quote) if is_quote(quote) => {
                let (name, next) = read_quoted(&chars, pos).map_err(invalid)?;
                pos = next;
                name
            }
            Some(_) => {
                let start = pos;
                while pos < chars.len() && !is_delimiter(chars[pos]) {
                    pos += 1;
                }
                if pos == start {
                    return Err(invalid(format!(
                        "unexpected character '{}' at position {}",
                        chars[pos], pos
                    )));
                }
                chars[start..pos].iter().collect()
            }
        };

        let mut steps = Vec::new();
        while pos < chars.len() {
            if chars[pos] != '[' {
                return Err(invalid(format!(
                    "unexpected character '{}' at position {}",
                    chars[pos], pos
                )));
            }
            pos += 1;

            match chars.get(pos) {
                None => return Err(invalid("unclosed bracket".to_string())),
                Some(&quote) if is_quote(quote) => {
                    let (name, next) = read_quoted(&chars, pos).map_err(invalid)?;
                    steps.push(PathStep::Key(name));
                    pos = next;
                }
                Some(c) if c.is_ascii_digit() => {
                    let start = pos;
                    while pos < chars.len() && chars[pos].is_ascii_digit() {
                        pos += 1;
                    }
                    let digits: String = chars[start..pos].iter().collect();
                    let index = digits
                        .parse::<usize>()
                        .map_err(|_| invalid(format!("array index '{}' is out of range", digits)))?;
                    steps.push(PathStep::Index(index));
                }
                Some(c) => {
                    return Err(invalid(format!(
                        "expected quoted key or array index at position {}, got '{}'",
                        pos, c
                    )));
                }
            }

            if chars.get(pos) != Some(&']') {
                return Err(invalid(format!("expected ']' at position {}", pos)));
            }
            pos += 1;
        }

        Ok(Self {
            pattern: pattern.to_string(),
            key,
            steps,
        })
    }

    /// Evaluate against a record
    ///
    /// Returns `None` when the field is absent, including when the record is
    /// not a map or a step meets the wrong kind of container.
    pub fn get<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        let mut current = record.as_object()?.get(&self.key)?;
        for step in &self.steps {
            current = match step {
                PathStep::Key(name) => current.as_object()?.get(name)?,
                PathStep::Index(index) => current.as_array()?.get(*index)?,
            };
        }
        Some(current)
    }

    /// Whether the record has a value at this location
    pub fn matches(&self, record: &Value) -> bool {
        self.get(record).is_some()
    }

    /// Source pattern as supplied to [`RecordAccessor::compile`]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Top-level key this accessor descends from
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Steps below the top-level key
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Whether the pattern names a top-level key only
    pub fn is_top_level(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for RecordAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

fn is_quote(c: char) -> bool {
    c == '"' || c == '\''
}

fn is_delimiter(c: char) -> bool {
    matches!(c, '$' | '[' | ']') || is_quote(c) || c.is_whitespace()
}

/// Read a quoted name starting at the opening quote; returns the name and the
/// position just past the closing quote.
fn read_quoted(chars: &[char], pos: usize) -> Result<(String, usize), String> {
    let quote = chars[pos];
    let start = pos + 1;
    let end = chars[start..]
        .iter()
        .position(|&c| c == quote)
        .map(|offset| start + offset)
        .ok_or_else(|| format!("unclosed quoted key at position {}", pos))?;

    if end == start {
        return Err(format!("empty quoted key at position {}", pos));
    }

    Ok((chars[start..end].iter().collect(), end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reason(pattern: &str) -> String {
        match RecordAccessor::compile(pattern) {
            Err(AccessorError::InvalidPattern { reason, .. }) => reason,
            other => panic!("Expected InvalidPattern for {:?}, got {:?}", pattern, other),
        }
    }

    #[test]
    fn test_compile_top_level_key() {
        let accessor = RecordAccessor::compile("$log").unwrap();
        assert_eq!(accessor.key(), "log");
        assert!(accessor.is_top_level());
        assert_eq!(accessor.pattern(), "$log");
        assert_eq!(accessor.to_string(), "$log");
    }

    #[test]
    fn test_compile_nested_steps() {
        let accessor = RecordAccessor::compile("$kubernetes['labels'][2][\"app\"]").unwrap();
        assert_eq!(accessor.key(), "kubernetes");
        assert_eq!(
            accessor.steps(),
            &[
                PathStep::Key("labels".to_string()),
                PathStep::Index(2),
                PathStep::Key("app".to_string()),
            ]
        );
    }

    #[test]
    fn test_compile_quoted_top_level_key() {
        let accessor = RecordAccessor::compile("$'key with spaces'").unwrap();
        assert_eq!(accessor.key(), "key with spaces");

        let accessor = RecordAccessor::compile("$\"a.b\"['c']").unwrap();
        assert_eq!(accessor.key(), "a.b");
        assert_eq!(accessor.steps().len(), 1);
    }

    #[test]
    fn test_dotted_bare_key_is_one_key() {
        let accessor = RecordAccessor::compile("$log.message").unwrap();
        assert_eq!(accessor.key(), "log.message");
        assert!(accessor.is_top_level());
    }

    #[test]
    fn test_reject_empty_pattern() {
        assert_eq!(reason(""), "pattern is empty");
    }

    #[test]
    fn test_reject_missing_sigil() {
        assert!(reason("log").contains("must start with '$'"));
    }

    #[test]
    fn test_reject_missing_key() {
        assert_eq!(reason("$"), "missing key after '$'");
        assert!(reason("$['a']").contains("unexpected character '['"));
    }

    #[test]
    fn test_reject_malformed_brackets() {
        assert_eq!(reason("$log["), "unclosed bracket");
        assert!(reason("$log['a'").contains("expected ']'"));
        assert!(reason("$log['a").contains("unclosed quoted key"));
        assert!(reason("$log['']").contains("empty quoted key"));
        assert!(reason("$log[a]").contains("expected quoted key or array index"));
        assert!(reason("$log[-1]").contains("expected quoted key or array index"));
    }

    #[test]
    fn test_reject_trailing_characters() {
        assert!(reason("$log ").contains("unexpected character ' '"));
        assert!(reason("$log]").contains("unexpected character ']'"));
        assert!(reason("$log['a']x").contains("unexpected character 'x'"));
    }

    #[test]
    fn test_reject_index_overflow() {
        assert!(reason("$log[99999999999999999999999999]").contains("out of range"));
    }

    #[test]
    fn test_get_top_level() {
        let record = json!({"log": "hello", "level": "info"});
        let accessor = RecordAccessor::compile("$log").unwrap();
        assert_eq!(accessor.get(&record), Some(&json!("hello")));
    }

    #[test]
    fn test_get_nested() {
        let record = json!({
            "kubernetes": {"labels": {"app": "web"}},
            "items": [{"msg": "first"}, {"msg": "second"}]
        });

        let app = RecordAccessor::compile("$kubernetes['labels']['app']").unwrap();
        assert_eq!(app.get(&record), Some(&json!("web")));

        let second = RecordAccessor::compile("$items[1]['msg']").unwrap();
        assert_eq!(second.get(&record), Some(&json!("second")));
    }

    #[test]
    fn test_absent_field_is_not_an_error() {
        let record = json!({"message": "hi"});
        let accessor = RecordAccessor::compile("$log").unwrap();
        assert_eq!(accessor.get(&record), None);
        assert!(!accessor.matches(&record));
    }

    #[test]
    fn test_type_mismatch_is_no_match() {
        let record = json!({"log": "plain", "items": {"0": "map not array"}});

        let into_string = RecordAccessor::compile("$log['inner']").unwrap();
        assert_eq!(into_string.get(&record), None);

        let index_into_map = RecordAccessor::compile("$items[0]").unwrap();
        assert_eq!(index_into_map.get(&record), None);

        let out_of_range = RecordAccessor::compile("$log[3]").unwrap();
        assert_eq!(out_of_range.get(&json!({"log": [1, 2]})), None);
    }

    #[test]
    fn test_non_map_record_is_no_match() {
        let accessor = RecordAccessor::compile("$log").unwrap();
        assert_eq!(accessor.get(&json!(["log"])), None);
        assert_eq!(accessor.get(&json!("log")), None);
        assert_eq!(accessor.get(&json!(null)), None);
    }

    #[test]
    fn test_null_value_is_a_match() {
        let accessor = RecordAccessor::compile("$log").unwrap();
        assert_eq!(accessor.get(&json!({"log": null})), Some(&json!(null)));
    }
}
