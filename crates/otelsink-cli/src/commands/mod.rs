//! Command implementations.

pub mod check;
pub mod split;

pub use self::check::execute_check;
pub use self::split::execute_split;

use crate::error::Result;
use otelsink_output::{OutputConfig, PluginContext};
use std::path::Path;

/// Load the configuration file and build a context from it.
pub fn load_context(path: &Path) -> Result<PluginContext> {
    let config = OutputConfig::from_file(path)?;
    Ok(PluginContext::create(config)?)
}
