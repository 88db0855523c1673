//! Placement policies.

use std::fmt;

use crate::block::Block;
use crate::list::BlockList;

/// How allocation requests pick a free block.
///
/// The policy is expressed entirely through free-list ordering: allocation
/// always takes the first block that fits, and [`PlacementPolicy::reinsert`]
/// keeps the list in the order that makes that scan do the right thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PlacementPolicy {
    /// Take the first block that fits, in release order. Freed blocks
    /// append to the back, so the free list behaves as a FIFO queue.
    FirstFit,
    /// Take the smallest block that fits. The free list is kept ascending
    /// by size.
    BestFit,
    /// Take the largest block that fits. The free list is kept descending
    /// by size.
    WorstFit,
}

impl PlacementPolicy {
    /// All policies, in flag order.
    pub const ALL: [Self; 3] = [Self::FirstFit, Self::BestFit, Self::WorstFit];

    /// Return a freed block or leftover fragment to the free list, keeping
    /// the ordering this policy relies on.
    ///
    /// This is the single point where the policies differ.
    pub fn reinsert(self, free: &mut BlockList, block: Block) {
        match self {
            Self::FirstFit => free.push_back(block),
            Self::BestFit => free.insert_by_size_ascending(block),
            Self::WorstFit => free.insert_by_size_descending(block),
        }
    }

    /// Short name used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstFit => "first-fit",
            Self::BestFit => "best-fit",
            Self::WorstFit => "worst-fit",
        }
    }
}

impl fmt::Display for PlacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn free_list(ranges: &[(usize, usize)]) -> BlockList {
        ranges
            .iter()
            .map(|&(start, end)| Block::free(start, end))
            .collect()
    }

    fn sizes(list: &BlockList) -> Vec<usize> {
        list.iter().map(Block::size).collect()
    }

    #[test]
    fn first_fit_appends() {
        let mut free = free_list(&[(0, 9), (50, 99)]);
        PlacementPolicy::FirstFit.reinsert(&mut free, Block::free(20, 24));
        assert_eq!(sizes(&free), vec![10, 50, 5]);
    }

    #[test]
    fn best_fit_keeps_sizes_ascending() {
        let mut free = free_list(&[(0, 9), (50, 99)]);
        PlacementPolicy::BestFit.reinsert(&mut free, Block::free(20, 39));
        assert_eq!(sizes(&free), vec![10, 20, 50]);
    }

    #[test]
    fn worst_fit_keeps_sizes_descending() {
        let mut free = free_list(&[(50, 99), (0, 9)]);
        PlacementPolicy::WorstFit.reinsert(&mut free, Block::free(20, 39));
        assert_eq!(sizes(&free), vec![50, 20, 10]);
    }

    #[test]
    fn display_matches_flag_names() {
        let names: Vec<&str> = PlacementPolicy::ALL.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["first-fit", "best-fit", "worst-fit"]);
        assert_eq!(PlacementPolicy::BestFit.to_string(), "best-fit");
    }
}
