//! Upstream connection setup
//!
//! The transport itself lives outside this crate. Here the target is resolved
//! from configuration (collector or proxy) and handed to an
//! [`UpstreamFactory`] that produces the connection handle.

use crate::config::OutputConfig;
use crate::error::OutputError;
use crate::proxy::ProxySettings;

/// Transport used for the upstream connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoMode {
    /// Plain TCP
    Tcp,
    /// TLS over TCP
    Tls,
}

/// Connection flags derived from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IoFlags {
    /// Transport mode
    pub mode: IoMode,
    /// Prefer IPv6
    pub ipv6: bool,
}

impl IoFlags {
    /// Flags for the given configuration
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            mode: if config.tls { IoMode::Tls } else { IoMode::Tcp },
            ipv6: config.ipv6,
        }
    }

    /// Short form used in logs and summaries (e.g., "tls+ipv6")
    pub fn describe(&self) -> String {
        let mode = match self.mode {
            IoMode::Tcp => "tcp",
            IoMode::Tls => "tls",
        };
        if self.ipv6 {
            format!("{}+ipv6", mode)
        } else {
            mode.to_string()
        }
    }
}

/// Where the upstream connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTarget {
    /// Host to connect to
    pub host: String,
    /// Port to connect to
    pub port: u16,
    /// Connection flags
    pub io: IoFlags,
    /// Whether host/port belong to a proxy
    pub via_proxy: bool,
}

impl UpstreamTarget {
    /// Resolve the target: the proxy when one is set, the collector otherwise
    pub fn resolve(config: &OutputConfig, proxy: Option<&ProxySettings>) -> Self {
        let io = IoFlags::from_config(config);
        match proxy {
            Some(proxy) => Self {
                host: proxy.host.clone(),
                port: proxy.port,
                io,
                via_proxy: true,
            },
            None => Self {
                host: config.host.clone(),
                port: config.port,
                io,
                via_proxy: false,
            },
        }
    }

    /// `host:port` of the target
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Handle to an upstream connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    target: UpstreamTarget,
}

impl Upstream {
    /// Create a handle for a target
    pub fn new(target: UpstreamTarget) -> Self {
        Self { target }
    }

    /// Target this handle connects to
    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }
}

/// Creates upstream handles during context construction
pub trait UpstreamFactory {
    /// Create a handle for the target
    fn create(&self, target: &UpstreamTarget) -> Result<Upstream, OutputError>;
}

/// Factory that records the target without opening any connection
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorFactory;

impl UpstreamFactory for DescriptorFactory {
    fn create(&self, target: &UpstreamTarget) -> Result<Upstream, OutputError> {
        if target.host.is_empty() {
            return Err(OutputError::Upstream("upstream host is empty".to_string()));
        }
        if target.port == 0 {
            return Err(OutputError::Upstream(format!(
                "upstream port for '{}' is 0",
                target.host
            )));
        }
        Ok(Upstream::new(target.clone()))
    }
}
