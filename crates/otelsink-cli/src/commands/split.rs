//! Split command implementation.

use crate::cli::SplitArgs;
use crate::commands::load_context;
use crate::error::{CliError, Result};
use otelsink_output::PluginContext;
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use tracing::{debug, info};

/// Execute the split command.
pub fn execute_split(args: SplitArgs) -> Result<()> {
    let ctx = load_context(&args.config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let count = match &args.input {
        Some(path) => split_records(&ctx, BufReader::new(File::open(path)?), &mut out)?,
        None => split_records(&ctx, io::stdin().lock(), &mut out)?,
    };

    out.flush()?;
    info!(records = count, "split complete");
    Ok(())
}

/// Split every newline-delimited JSON record from `input` into `output`.
///
/// Blank lines are skipped. Returns the number of records written.
pub fn split_records<R: BufRead, W: Write>(
    ctx: &PluginContext,
    input: R,
    mut output: W,
) -> Result<usize> {
    let mut count = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: Value = serde_json::from_str(&line).map_err(|e| CliError::InvalidRecord {
            line: index + 1,
            reason: e.to_string(),
        })?;

        let split = ctx.split(&record)?;
        if split.body.is_none() {
            debug!(line = index + 1, "no body key matched");
        }

        serde_json::to_writer(&mut output, &split)?;
        output.write_all(b"\n")?;
        count += 1;
    }

    Ok(count)
}
