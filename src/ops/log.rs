//! Log formatting
//!
//! Human-readable text for command outcomes and the free list.

use crate::record::{Record, SEPARATOR};
use crate::storage::{FreeNode, Offset, Placement, EMPTY_LIST};

use super::{Command, Outcome};

/// Render one log entry: a header line naming the operation, then the
/// result lines. Entries carry no trailing blank line.
pub fn format_outcome<R: Record>(command: &Command<R>, outcome: &Outcome<R>) -> String {
    let mut lines = vec![match command {
        Command::Lookup { key } => format!("Search for record with key \"{}\"", key),
        Command::Delete { key } => format!("Removal of record with key \"{}\"", key),
        Command::Insert { record } => format!(
            "Insertion of record with key \"{}\" ({} bytes)",
            record.key(),
            record_text(record).len()
        ),
    }];

    match outcome {
        Outcome::Found(found) => {
            lines.push(format!("{} ({} bytes)", record_text(&found.record), found.capacity));
        }
        Outcome::Deleted(deleted) => {
            lines.push(format!("Record removed! ({} bytes)", deleted.capacity));
            lines.push(format!("Location: offset = {}", describe_offset(deleted.offset)));
        }
        Outcome::Inserted(inserted) => match inserted.placement {
            Placement::Reused => {
                lines.push(format!("Reused space size: {} bytes", inserted.capacity));
                lines.push(format!("Location: offset = {}", describe_offset(inserted.offset)));
            }
            Placement::Appended => lines.push("Location: end of file".to_string()),
        },
        Outcome::NotFound(_) => lines.push("Error: record not found!".to_string()),
        Outcome::DuplicateKey(key) => {
            lines.push(format!("Error: key \"{}\" already exists!", key));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Render the free list as a chain, ending with the sentinel and a count
pub fn format_free_list(nodes: &[FreeNode]) -> String {
    let mut out = String::from("LED -> ");
    for node in nodes {
        out.push_str(&format!("[offset: {}, size: {}] -> ", node.offset, node.capacity));
    }
    out.push_str(&format!("[offset: {}]\n", EMPTY_LIST));
    out.push_str(&format!("Total: {} free slots\n", nodes.len()));
    out
}

fn record_text<R: Record>(record: &R) -> String {
    record.fields().join(SEPARATOR.to_string().as_str())
}

fn describe_offset(offset: Offset) -> String {
    format!("{} bytes ({:#x})", offset, offset.get())
}
