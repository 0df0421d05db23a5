//! Command definitions
//!
//! Parses operations script lines into commands.

use std::io::BufRead;

use crate::error::{Result, SlotDbError};
use crate::record::{self, parse_key, Decoded, Key, Record, SEPARATOR};

/// A parsed script operation
#[derive(Debug, Clone, PartialEq)]
pub enum Command<R> {
    /// `b <key>`
    Lookup { key: Key },

    /// `r <key>`
    Delete { key: Key },

    /// `i <key> <fields>`
    Insert { record: R },
}

/// Parse one script line; blank lines yield `None`
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_line<R: Record>(line: &str, line_no: usize) -> Result<Option<Command<R>>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let script_err = |message: String| SlotDbError::Script {
        line: line_no,
        message,
    };

    let (op, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim_start();

    match op {
        "b" | "r" => {
            if rest.is_empty() {
                return Err(script_err(format!("operation '{}' needs a key", op)));
            }
            let key = parse_key(rest).map_err(|e| script_err(e.to_string()))?;
            Ok(Some(if op == "b" {
                Command::Lookup { key }
            } else {
                Command::Delete { key }
            }))
        }
        "i" => {
            let (key_field, fields) = rest.split_once(' ').unwrap_or((rest, ""));
            if key_field.is_empty() {
                return Err(script_err("insert needs a key".to_string()));
            }
            let key = parse_key(key_field).map_err(|e| script_err(e.to_string()))?;

            let encoded = format!("{}{}{}", key, SEPARATOR, fields.trim());
            match record::decode::<R>(encoded.as_bytes()) {
                Ok(Decoded::Live(record)) => Ok(Some(Command::Insert { record })),
                Ok(Decoded::Tombstone) => Err(script_err("insert payload is a tombstone".to_string())),
                Err(e) => Err(script_err(e.to_string())),
            }
        }
        other => Err(script_err(format!("unknown operation '{}'", other))),
    }
}

/// Parse a whole script, stopping at the first bad line
pub fn parse_script<R: Record>(reader: impl BufRead) -> Result<Vec<Command<R>>> {
    let mut commands = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        if let Some(command) = parse_line(&line?, i + 1)? {
            commands.push(command);
        }
    }
    Ok(commands)
}
