//! Script runner
//!
//! Executes commands in order against a store and appends one log entry
//! per command.

use std::io::{BufRead, Write};

use crate::engine::Store;
use crate::error::Result;
use crate::record::Record;

use super::{format_outcome, parse_line, Command};

/// Counters for a script run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lookups: usize,
    pub deletes: usize,
    pub inserts: usize,
    /// Commands answered with `NotFound` or `DuplicateKey`
    pub rejected: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.lookups + self.deletes + self.inserts
    }
}

/// Replay `script` against `store`, writing the log to `log`
///
/// Lines are parsed as they are read, so commands before a syntax error
/// have already been applied when the error is returned.
pub fn run_script<R: Record>(
    store: &mut Store<R>,
    script: impl BufRead,
    mut log: impl Write,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    for (i, line) in script.lines().enumerate() {
        let line = line?;
        let Some(command) = parse_line::<R>(&line, i + 1)? else {
            continue;
        };

        match command {
            Command::Lookup { .. } => summary.lookups += 1,
            Command::Delete { .. } => summary.deletes += 1,
            Command::Insert { .. } => summary.inserts += 1,
        }

        let outcome = store.execute(&command)?;
        if outcome.is_rejection() {
            summary.rejected += 1;
        }

        log.write_all(format_outcome(&command, &outcome).as_bytes())?;
        log.write_all(b"\n")?;
    }

    log.flush()?;
    tracing::info!(
        lookups = summary.lookups,
        deletes = summary.deletes,
        inserts = summary.inserts,
        rejected = summary.rejected,
        "operations script finished"
    );
    Ok(summary)
}
