//! otelsink CLI library.
//!
//! Operator commands for checking an output configuration and for running
//! records through the body/metadata split offline.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
