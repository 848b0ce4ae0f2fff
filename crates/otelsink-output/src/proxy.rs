//! HTTP proxy settings
//!
//! When a proxy is configured the upstream connects to the proxy instead of
//! the collector and the HTTP client addresses requests through it.

use crate::error::OutputError;
use tracing::error;
use url::Url;

/// Default port for `http` proxies without an explicit port
pub const DEFAULT_PROXY_PORT: u16 = 80;

/// Schemes a proxy URL may use
const PROXY_SCHEMES: [&str; 2] = ["http", "https"];

/// Proxy endpoint split into its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Proxy URL as configured
    pub url: String,
    /// URL scheme (`http` or `https`)
    pub protocol: String,
    /// Proxy host
    pub host: String,
    /// Proxy port
    pub port: u16,
    /// Path component of the proxy URL
    pub path: String,
}

impl ProxySettings {
    /// Parse a proxy URL such as `http://proxy.local:3128`
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Configuration`] if the URL cannot be parsed,
    /// uses a scheme other than `http` or `https`, or has no host.
    pub fn parse(raw: &str) -> Result<Self, OutputError> {
        let fail = |reason: String| {
            error!(proxy = raw, "could not parse proxy parameter");
            OutputError::Configuration(format!(
                "could not parse proxy parameter '{}': {}",
                raw, reason
            ))
        };

        let url = Url::parse(raw).map_err(|e| fail(e.to_string()))?;

        if !PROXY_SCHEMES.contains(&url.scheme()) {
            return Err(fail(format!("unsupported scheme '{}'", url.scheme())));
        }

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(fail("missing host".to_string())),
        };

        Ok(Self {
            url: raw.to_string(),
            protocol: url.scheme().to_string(),
            host,
            port: url.port_or_known_default().unwrap_or(DEFAULT_PROXY_PORT),
            path: url.path().to_string(),
        })
    }

    /// `host:port` of the proxy
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
