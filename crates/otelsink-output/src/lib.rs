//! otelsink Output
//!
//! Configuration and per-instance context for exporting log records to an
//! OpenTelemetry collector.
//!
//! # Overview
//!
//! Before a record is exported its body has to be picked out and everything
//! else has to become metadata, without a field ending up in both. This
//! crate builds the pieces that make that split:
//!
//! - **Body key registry**: ordered, compiled body key patterns (defaults to
//!   `$log` then `$message`)
//! - **Metadata accessor**: one composite accessor that leaves out every body
//!   key field
//! - **Plugin context**: owns both, plus labels, proxy settings, the upstream
//!   handle and normalized endpoint paths
//!
//! # Architecture
//!
//! ```text
//! OutputConfig → patterns → BodyKeyRegistry → MetadataAccessor → PluginContext
//! ```
//!
//! # Example Usage
//!
//! ```
//! use otelsink_output::{OutputConfig, PluginContext};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OutputConfig::from_toml(r#"logs_body_key = ["$log"]"#)?;
//! let ctx = PluginContext::create(config)?;
//!
//! let split = ctx.split(&json!({"log": "hello", "level": "info"}))?;
//! assert_eq!(split.body, Some(json!("hello")));
//! assert_eq!(split.metadata.get("level"), Some(&json!("info")));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod body_key;
pub mod config;
pub mod context;
pub mod endpoint;
mod error;
pub mod labels;
pub mod metadata;
pub mod proxy;
pub mod upstream;

pub use body_key::{BodyKeyEntry, BodyKeyRegistry, DEFAULT_BODY_KEYS};
pub use config::{Compression, ConfigError, OutputConfig};
pub use context::{ContextState, PluginContext, SplitRecord};
pub use endpoint::{normalize, EndpointPaths};
pub use error::OutputError;
pub use labels::{Label, LabelSet};
pub use metadata::MetadataAccessor;
pub use proxy::ProxySettings;
pub use upstream::{DescriptorFactory, IoFlags, IoMode, Upstream, UpstreamFactory, UpstreamTarget};
