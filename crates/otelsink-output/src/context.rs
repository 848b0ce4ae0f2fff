//! Output context lifecycle
//!
//! The context owns everything built from configuration: labels, proxy
//! settings, the upstream handle, the body key registry, the metadata
//! accessor and the normalized endpoint paths.
//!
//! ```text
//! Uninitialized → Configuring → Ready → Destroyed
//!                      │                    ▲
//!                      └──── any failure ───┘
//! ```
//!
//! Construction is all-or-nothing: a failing step tears down whatever was
//! already built and no context is returned.

use crate::body_key::{BodyKeyEntry, BodyKeyRegistry};
use crate::config::{Compression, OutputConfig};
use crate::endpoint::EndpointPaths;
use crate::error::OutputError;
use crate::labels::LabelSet;
use crate::metadata::MetadataAccessor;
use crate::proxy::ProxySettings;
use crate::upstream::{DescriptorFactory, Upstream, UpstreamFactory, UpstreamTarget};
use otelsink_accessor::RecordMap;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, error, info, trace};

/// Lifecycle state of a [`PluginContext`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Allocated, nothing bound yet
    Uninitialized,
    /// Construction steps in progress
    Configuring,
    /// Every step succeeded; ready for records
    Ready,
    /// Torn down; terminal
    Destroyed,
}

impl fmt::Display for ContextState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextState::Uninitialized => "uninitialized",
            ContextState::Configuring => "configuring",
            ContextState::Ready => "ready",
            ContextState::Destroyed => "destroyed",
        };
        f.write_str(name)
    }
}

/// A record split into body and metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitRecord {
    /// Value found by the first matching body key
    pub body: Option<Value>,

    /// Pattern of the body key that matched
    pub body_key: Option<String>,

    /// Fields not consumed by any body key, in record order
    pub metadata: RecordMap,
}

/// Output context built from configuration
pub struct PluginContext {
    state: ContextState,
    config: OutputConfig,
    labels: Option<LabelSet>,
    proxy: Option<ProxySettings>,
    upstream: Option<Upstream>,
    body_keys: Option<BodyKeyRegistry>,
    metadata: Option<MetadataAccessor>,
    endpoints: Option<EndpointPaths>,
    compression: Compression,
}

impl PluginContext {
    /// Build a context with the default upstream factory
    pub fn create(config: OutputConfig) -> Result<Self, OutputError> {
        Self::create_with(config, &DescriptorFactory)
    }

    /// Build a context, creating the upstream through `factory`
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step. Everything built before
    /// it is released first.
    pub fn create_with<F>(config: OutputConfig, factory: &F) -> Result<Self, OutputError>
    where
        F: UpstreamFactory + ?Sized,
    {
        let mut ctx = Self {
            state: ContextState::Uninitialized,
            config,
            labels: None,
            proxy: None,
            upstream: None,
            body_keys: None,
            metadata: None,
            endpoints: None,
            compression: Compression::None,
        };

        ctx.state = ContextState::Configuring;
        if let Err(e) = ctx.configure(factory) {
            error!(error = %e, "could not create output context");
            ctx.destroy();
            return Err(e);
        }
        ctx.state = ContextState::Ready;

        info!(
            target_addr = %ctx.upstream.as_ref().map(|u| u.target().addr()).unwrap_or_default(),
            body_keys = ctx.body_keys.as_ref().map_or(0, BodyKeyRegistry::len),
            labels = ctx.labels.as_ref().map_or(0, LabelSet::len),
            compression = ctx.compression.as_str(),
            "output context ready"
        );

        Ok(ctx)
    }

    fn configure<F>(&mut self, factory: &F) -> Result<(), OutputError>
    where
        F: UpstreamFactory + ?Sized,
    {
        self.config.validate()?;

        self.labels = Some(LabelSet::from_config(&self.config.add_label)?);

        self.proxy = self
            .config
            .proxy
            .as_deref()
            .map(ProxySettings::parse)
            .transpose()?;

        let target = UpstreamTarget::resolve(&self.config, self.proxy.as_ref());
        if target.via_proxy {
            trace!(proxy = %target.addr(), "upstream proxy");
        }
        self.upstream = Some(factory.create(&target)?);

        let registry = BodyKeyRegistry::build(&self.config.logs_body_key)?;
        self.metadata = Some(MetadataAccessor::build(&registry)?);
        self.body_keys = Some(registry);

        self.endpoints = Some(EndpointPaths::resolve(&self.config)?);
        self.compression = self.config.compression();

        Ok(())
    }

    /// Release every sub-resource and enter the Destroyed state
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.state == ContextState::Destroyed {
            return;
        }

        if let Some(mut labels) = self.labels.take() {
            labels.release();
        }
        if let Some(mut registry) = self.body_keys.take() {
            registry.destroy();
        }
        self.upstream = None;
        self.metadata = None;
        self.proxy = None;
        self.endpoints = None;

        debug!(from = %self.state, "output context destroyed");
        self.state = ContextState::Destroyed;
    }

    /// Split a record into body and metadata
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::NotReady`] unless the context is Ready.
    pub fn split(&self, record: &Value) -> Result<SplitRecord, OutputError> {
        let (body_keys, metadata) = match (self.state, &self.body_keys, &self.metadata) {
            (ContextState::Ready, Some(body_keys), Some(metadata)) => (body_keys, metadata),
            _ => {
                return Err(OutputError::NotReady(format!(
                    "cannot split records in state '{}'",
                    self.state
                )))
            }
        };

        let body = body_keys.resolve_body(record);

        Ok(SplitRecord {
            body: body.map(|(_, value)| value.clone()),
            body_key: body.map(|(entry, _)| entry.pattern().to_string()),
            metadata: metadata.metadata(record),
        })
    }

    /// Current lifecycle state
    pub fn state(&self) -> ContextState {
        self.state
    }

    /// Whether the context is Ready
    pub fn is_ready(&self) -> bool {
        self.state == ContextState::Ready
    }

    /// Configuration the context was built from
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Static labels
    pub fn labels(&self) -> Option<&LabelSet> {
        self.labels.as_ref()
    }

    /// Proxy settings, if a proxy is configured
    pub fn proxy(&self) -> Option<&ProxySettings> {
        self.proxy.as_ref()
    }

    /// Upstream handle
    pub fn upstream(&self) -> Option<&Upstream> {
        self.upstream.as_ref()
    }

    /// Body key registry
    pub fn body_keys(&self) -> Option<&BodyKeyRegistry> {
        self.body_keys.as_ref()
    }

    /// Body key entries, empty once destroyed
    pub fn body_key_entries(&self) -> &[BodyKeyEntry] {
        self.body_keys
            .as_ref()
            .map(BodyKeyRegistry::entries)
            .unwrap_or(&[])
    }

    /// Metadata accessor
    pub fn metadata_accessor(&self) -> Option<&MetadataAccessor> {
        self.metadata.as_ref()
    }

    /// Normalized endpoint paths
    pub fn endpoints(&self) -> Option<&EndpointPaths> {
        self.endpoints.as_ref()
    }

    /// Selected payload compression
    pub fn compression(&self) -> Compression {
        self.compression
    }
}

impl fmt::Debug for PluginContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginContext")
            .field("state", &self.state)
            .field("upstream", &self.upstream)
            .field("body_keys", &self.body_keys.as_ref().map(BodyKeyRegistry::len))
            .field("labels", &self.labels.as_ref().map(LabelSet::len))
            .field("endpoints", &self.endpoints)
            .field("compression", &self.compression)
            .finish()
    }
}

impl Drop for PluginContext {
    fn drop(&mut self) {
        self.destroy();
    }
}
