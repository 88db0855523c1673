//! Report rendering.
//!
//! The text format mirrors the classic lab report: a starred banner naming
//! the event, an `Error:` line when it was rejected, then both lists with
//! one `Block N: START: .. END: ..` line per block.

use std::fmt::Write;

use serde::Serialize;

use partsim_core::{Allocator, Block, BlockList, Event};

/// Banner rule printed around each event heading.
pub const RULE: &str = "************************";

/// Render one list under its title.
pub fn list(title: &str, blocks: &BlockList) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}:");
    for (index, block) in blocks.iter().enumerate() {
        let _ = write!(
            out,
            "Block {index}: START: {} END: {}",
            block.start(),
            block.end()
        );
        if let Some(pid) = block.owner() {
            let _ = writeln!(out, " PID: {pid}");
        } else {
            out.push('\n');
        }
    }
    out
}

/// Render the free and allocated lists as one report body.
pub fn state(allocator: &Allocator) -> String {
    format!(
        "{}{}",
        list("Free Memory", allocator.free_list()),
        list("Allocated Memory", allocator.allocated_list())
    )
}

/// One event's outcome and the resulting state, for `--json` mode.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub event: &'a Event,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
    pub free: &'a [Block],
    pub allocated: &'a [Block],
}
