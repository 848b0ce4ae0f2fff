//! otelsink CLI - Command-line interface for the otelsink output.

use clap::Parser;
use otelsink_cli::commands;
use otelsink_cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    // Log to stderr so split output stays clean on stdout
    let filter = match &cli.log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> otelsink_cli::Result<()> {
    match cli.command {
        Command::Check(args) => commands::execute_check(args),
        Command::Split(args) => commands::execute_split(args),
    }
}
