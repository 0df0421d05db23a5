//! Operations Module
//!
//! Batch driver that replays an operations script against a store and
//! writes a text log of outcomes.
//!
//! ## Script Format
//! One operation per line, blank lines ignored:
//! ```text
//! b 42                              lookup key 42
//! r 42                              delete key 42
//! i 99 Title|Director|2001|Drama|120|Cast A,Cast B
//! ```
//! For inserts, everything after the key is the remaining fields joined
//! with `|`.

mod command;
mod log;
mod outcome;
mod runner;

pub use command::{parse_line, parse_script, Command};
pub use log::{format_free_list, format_outcome};
pub use outcome::Outcome;
pub use runner::{run_script, RunSummary};
