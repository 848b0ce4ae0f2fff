//! Endpoint path normalization

use crate::config::OutputConfig;
use crate::error::OutputError;

/// Path used when none is configured
pub const ROOT_PATH: &str = "/";

/// Normalize an endpoint path so it always starts with `/`
///
/// Absent input becomes `/`, a path without a leading slash gets one, and a
/// path that already has one is returned unchanged.
///
/// # Errors
///
/// Returns [`OutputError::NormalizationFailure`] if the prefixed path cannot
/// be allocated.
pub fn normalize(path: Option<&str>) -> Result<String, OutputError> {
    match path {
        None => Ok(ROOT_PATH.to_string()),
        Some(p) if p.starts_with('/') => Ok(p.to_string()),
        Some(p) => {
            let mut uri = String::new();
            uri.try_reserve_exact(p.len() + 1).map_err(|e| {
                OutputError::NormalizationFailure(format!(
                    "could not allocate endpoint path for '{}': {}",
                    p, e
                ))
            })?;
            uri.push('/');
            uri.push_str(p);
            Ok(uri)
        }
    }
}

/// Normalized endpoint paths per signal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPaths {
    /// Logs endpoint path
    pub logs: String,
    /// Traces endpoint path
    pub traces: String,
    /// Metrics endpoint path
    pub metrics: String,
}

impl EndpointPaths {
    /// Normalize every per-signal path in the configuration
    pub fn resolve(config: &OutputConfig) -> Result<Self, OutputError> {
        Ok(Self {
            logs: normalize(config.logs_uri.as_deref())?,
            traces: normalize(config.traces_uri.as_deref())?,
            metrics: normalize(config.metrics_uri.as_deref())?,
        })
    }
}
