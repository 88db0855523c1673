//! Decoded trace events.

use std::fmt;

use crate::block::Pid;

/// One record of a simulation trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Event {
    /// Give `size` units to process `pid`.
    Allocate { pid: Pid, size: usize },
    /// Return the block owned by `pid` to the free list.
    Deallocate { pid: Pid },
    /// Fuse adjacent free blocks.
    Coalesce,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocate { pid, size } => write!(f, "ALLOCATE: {size} FROM PID: {pid}"),
            Self::Deallocate { pid } => write!(f, "DEALLOCATE MEM: PID {pid}"),
            Self::Coalesce => f.write_str("COALESCE/COMPACT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u32) -> Pid {
        Pid::new(raw).expect("nonzero pid")
    }

    #[test]
    fn display_matches_report_banners() {
        let allocate = Event::Allocate {
            pid: pid(3),
            size: 25,
        };
        assert_eq!(allocate.to_string(), "ALLOCATE: 25 FROM PID: 3");
        assert_eq!(
            Event::Deallocate { pid: pid(3) }.to_string(),
            "DEALLOCATE MEM: PID 3"
        );
        assert_eq!(Event::Coalesce.to_string(), "COALESCE/COMPACT");
    }
}
