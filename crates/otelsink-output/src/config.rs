//! Configuration for the output
//!
//! Loaded from TOML. Every option maps to one key; lists default to empty
//! and endpoint paths default to the standard OTLP/HTTP paths.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Option has an unusable value
    #[error("Invalid value for '{option}': {reason}")]
    InvalidValue {
        /// Option name
        option: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Payload compression applied downstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Send payloads as-is
    #[default]
    None,
    /// Gzip payloads
    Gzip,
}

impl Compression {
    /// Select compression from the raw `compress` option
    ///
    /// Only `gzip` (any case) enables compression; anything else leaves it off.
    pub fn from_option(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("gzip") => Compression::Gzip,
            _ => Compression::None,
        }
    }

    /// Name used in logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Gzip => "gzip",
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Collector host used when no proxy is set
    #[serde(default = "default_host")]
    pub host: String,

    /// Collector port used when no proxy is set
    #[serde(default = "default_port")]
    pub port: u16,

    /// Use TLS for the upstream connection
    #[serde(default)]
    pub tls: bool,

    /// Prefer IPv6 for the upstream connection
    #[serde(default)]
    pub ipv6: bool,

    /// Patterns that locate the log body, tried in order
    #[serde(default)]
    pub logs_body_key: Vec<String>,

    /// Static labels, each written as `"key value"`
    #[serde(default)]
    pub add_label: Vec<String>,

    /// HTTP proxy URL (e.g., "http://proxy.local:3128")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,

    /// Payload compression (`gzip` or unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<String>,

    /// Endpoint path for logs
    #[serde(default = "default_logs_uri", skip_serializing_if = "Option::is_none")]
    pub logs_uri: Option<String>,

    /// Endpoint path for traces
    #[serde(default = "default_traces_uri", skip_serializing_if = "Option::is_none")]
    pub traces_uri: Option<String>,

    /// Endpoint path for metrics
    #[serde(default = "default_metrics_uri", skip_serializing_if = "Option::is_none")]
    pub metrics_uri: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_logs_uri() -> Option<String> {
    Some("/v1/logs".to_string())
}

fn default_traces_uri() -> Option<String> {
    Some("/v1/traces".to_string())
}

fn default_metrics_uri() -> Option<String> {
    Some("/v1/metrics".to_string())
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tls: false,
            ipv6: false,
            logs_body_key: Vec::new(),
            add_label: Vec::new(),
            proxy: None,
            compress: None,
            logs_uri: default_logs_uri(),
            traces_uri: default_traces_uri(),
            metrics_uri: default_metrics_uri(),
        }
    }
}

impl OutputConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: OutputConfig = toml::from_str(toml_str)?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate options that do not depend on other construction steps
    ///
    /// Labels and the proxy URL are checked while the context is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.proxy.is_none() {
            if self.host.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    option: "host".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
            if self.port == 0 {
                return Err(ConfigError::InvalidValue {
                    option: "port".to_string(),
                    reason: "must be greater than 0".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Compression selected by the `compress` option
    pub fn compression(&self) -> Compression {
        Compression::from_option(self.compress.as_deref())
    }
}
