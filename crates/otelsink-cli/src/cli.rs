//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// otelsink - Inspect OpenTelemetry output configuration.
#[derive(Debug, Parser)]
#[command(name = "otelsink")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log filter (overrides RUST_LOG), e.g. "debug" or "otelsink_output=trace"
    #[arg(short, long, global = true, env = "OTELSINK_LOG")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build the output context and print a summary
    Check(CheckArgs),

    /// Split newline-delimited JSON records into body and metadata
    Split(SplitArgs),
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    /// Output configuration file (TOML)
    #[arg(short, long)]
    pub config: PathBuf,
}

/// Arguments for the split command.
#[derive(Debug, Parser)]
pub struct SplitArgs {
    /// Output configuration file (TOML)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Read records from a file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from(["otelsink", "check", "--config", "out.toml"]).unwrap();
        match cli.command {
            Command::Check(args) => assert_eq!(args.config, PathBuf::from("out.toml")),
            other => panic!("Expected check, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_split_with_input() {
        let cli = Cli::try_parse_from([
            "otelsink", "split", "-c", "out.toml", "-i", "records.ndjson", "--log", "debug",
        ])
        .unwrap();
        assert_eq!(cli.log.as_deref(), Some("debug"));
        match cli.command {
            Command::Split(args) => {
                assert_eq!(args.input, Some(PathBuf::from("records.ndjson")));
            }
            other => panic!("Expected split, got {:?}", other),
        }
    }

    #[test]
    fn test_config_required() {
        assert!(Cli::try_parse_from(["otelsink", "check"]).is_err());
    }
}
