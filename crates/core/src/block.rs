//! Blocks and process identifiers.
//!
//! A [`Block`] is one contiguous run of memory units, addressed by an
//! inclusive `[start, end]` range. Every block is either free or owned by
//! exactly one process, and the engine moves whole blocks between the free
//! and allocated lists rather than mutating ranges in place. The only range
//! edits are [`Block::split`] when an allocation leaves a tail fragment and
//! [`Block::merge`] when coalescing fuses neighbors.

use std::fmt;
use std::num::NonZeroU32;

/// Identifier of the process owning a block. Always positive; scripts use
/// negative numbers for release records, so zero and below never name a
/// process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Pid(NonZeroU32);

impl Pid {
    /// Build a pid from a raw integer, `None` if it is zero.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// The raw numeric value.
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU32> for Pid {
    fn from(raw: NonZeroU32) -> Self {
        Self(raw)
    }
}

/// One contiguous region of the partition, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    start: usize,
    end: usize,
    owner: Option<Pid>,
}

impl Block {
    /// A free block spanning `start..=end`.
    ///
    /// `start <= end` must hold; every block covers at least one unit.
    pub fn free(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "block range is inclusive, start <= end");
        Self {
            start,
            end,
            owner: None,
        }
    }

    /// A block spanning `start..=end`, owned by `pid`.
    pub fn owned(pid: Pid, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "block range is inclusive, start <= end");
        Self {
            start,
            end,
            owner: Some(pid),
        }
    }

    /// First unit covered by the block.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last unit covered by the block.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Owning process, `None` for a free block.
    pub fn owner(&self) -> Option<Pid> {
        self.owner
    }

    /// Number of units covered. Never zero.
    pub fn size(&self) -> usize {
        self.end - self.start + 1
    }

    /// Whether the block is unowned.
    pub fn is_free(&self) -> bool {
        self.owner.is_none()
    }

    /// Whether `self` ends exactly one unit before `other` begins.
    pub fn abuts(&self, other: &Self) -> bool {
        self.end + 1 == other.start
    }

    /// Hand the block to `pid`.
    pub(crate) fn claim(&mut self, pid: Pid) {
        self.owner = Some(pid);
    }

    /// Drop ownership, returning the block to the free state.
    pub(crate) fn release(&mut self) {
        self.owner = None;
    }

    /// Shrink the block to its first `size` units and return the leftover
    /// tail as a free block, `None` on an exact fit.
    ///
    /// `size` must be between 1 and the current size.
    pub(crate) fn split(&mut self, size: usize) -> Option<Self> {
        debug_assert!(size >= 1 && size <= self.size(), "split size out of range");
        let tail_end = self.end;
        self.end = self.start + size - 1;
        (self.end < tail_end).then(|| Self::free(self.end + 1, tail_end))
    }

    /// Fuse with the free block immediately to the right.
    ///
    /// Both blocks must be free and `next` must start where `self` ends.
    pub(crate) fn merge(self, next: Self) -> Self {
        debug_assert!(self.is_free() && next.is_free(), "only free blocks merge");
        debug_assert!(self.abuts(&next), "merge requires adjacent blocks");
        Self::free(self.start, next.end)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.owner {
            Some(pid) => write!(f, "[{}, {}] pid {}", self.start, self.end, pid),
            None => write!(f, "[{}, {}] free", self.start, self.end),
        }
    }
}
