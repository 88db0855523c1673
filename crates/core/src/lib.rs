//! # partsim-core
//!
//! Engine for simulating contiguous-memory allocation with dynamic
//! partitioning. One fixed-size partition is divided into inclusive-range
//! [`Block`]s, split between a free list and an allocated list, and driven
//! by a trace of allocate, deallocate and coalesce [`Event`]s.
//!
//! ## Key components
//!
//! - [`Block`] and [`Pid`]: an inclusive `[start, end]` region and the
//!   process that may own it
//! - [`BlockList`]: ordered container with the insertion modes and scans
//!   the policies are built from
//! - [`PlacementPolicy`]: first fit, best fit and worst fit, expressed as
//!   free-list ordering
//! - [`Allocator`]: the engine holding both lists and applying events
//! - [`coalesce()`]: address-ordered rebuild that fuses adjacent free blocks
//!
//! This crate is the pure engine: it never reads files, prints reports or
//! terminates the process. Script decoding and rendering live in the
//! `partsim` binary.
//!
//! ## Usage
//!
//! ```rust
//! use partsim_core::{Allocator, Pid, PlacementPolicy};
//!
//! # fn main() -> partsim_core::AllocResult<()> {
//! let mut allocator = Allocator::new(100, PlacementPolicy::BestFit)?;
//! let pid = Pid::new(1).expect("nonzero");
//!
//! allocator.allocate(pid, 30)?;
//! assert_eq!(allocator.free_capacity(), 70);
//!
//! allocator.deallocate(pid)?;
//! allocator.coalesce();
//! assert_eq!(allocator.free_list().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod allocator;
pub mod block;
pub mod coalesce;
pub mod error;
pub mod event;
pub mod list;
pub mod policy;

pub use allocator::Allocator;
pub use block::{Block, Pid};
pub use coalesce::coalesce;
pub use error::{AllocError, AllocResult};
pub use event::Event;
pub use list::BlockList;
pub use policy::PlacementPolicy;

/// Common prelude for consumers of the engine.
pub mod prelude {
    pub use super::{
        AllocError, AllocResult, Allocator, Block, BlockList, Event, Pid, PlacementPolicy,
        coalesce,
    };
}
