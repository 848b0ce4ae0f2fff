//! otelsink Record Accessors
//!
//! Generic field-path facility over telemetry records. A record is a nested,
//! dynamically typed value (maps, arrays and scalars) represented as a
//! [`serde_json::Value`] with insertion-ordered maps.
//!
//! ## Key Concepts
//!
//! - **Pattern**: a string such as `$log` or `$kubernetes['labels'][0]`
//!   naming a location inside a record
//! - **RecordAccessor**: a pattern compiled once and evaluated many times
//! - **KeyExclusion**: a composite built from several patterns that yields a
//!   copy of a record with every matched field left out
//!
//! ## Pattern syntax
//!
//! ```text
//! $key                  top-level key
//! $"key with spaces"    quoted top-level key
//! $key['sub']['leaf']   nested map members
//! $key[0]['msg']        array element, then map member
//! ```
//!
//! # Examples
//!
//! ```
//! use otelsink_accessor::{KeyExclusion, RecordAccessor};
//! use serde_json::json;
//!
//! let record = json!({"log": "hello", "level": "info"});
//!
//! let body = RecordAccessor::compile("$log").unwrap();
//! assert_eq!(body.get(&record), Some(&json!("hello")));
//!
//! let exclusion = KeyExclusion::new(&["$log"]).unwrap();
//! let rest = exclusion.apply(&record);
//! assert_eq!(serde_json::Value::Object(rest.remainder), json!({"level": "info"}));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
pub mod exclusion;
pub mod pattern;

pub use error::AccessorError;
pub use exclusion::{Excluded, KeyExclusion};
pub use pattern::{PathStep, RecordAccessor};

/// A telemetry record
pub type Record = serde_json::Value;

/// Ordered key/value map at any level of a record
pub type RecordMap = serde_json::Map<String, serde_json::Value>;
