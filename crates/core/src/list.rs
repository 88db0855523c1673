//! Ordered block container.
//!
//! [`BlockList`] backs both the free list and the allocated list. The
//! container itself is order-agnostic: callers pick an ordering by choosing
//! which insertion operation they use, and the scans
//! ([`BlockList::first_fit`], [`BlockList::position_of_owner`]) simply walk
//! the list front to back. That is what lets one first-fit scan realize
//! every placement policy, since the policy lives in the list order.

use crate::block::{Block, Pid};

/// A sequence of blocks with position-aware insertion and removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// An empty list.
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Number of blocks in the list.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the list holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The block at `index`, `None` past the end.
    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    /// Front-to-back iterator over the blocks.
    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    /// The blocks as a slice, in list order.
    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    /// Sum of the sizes of all blocks.
    pub fn total_size(&self) -> usize {
        self.blocks.iter().map(Block::size).sum()
    }

    /// Insert at the front.
    pub fn push_front(&mut self, block: Block) {
        self.blocks.insert(0, block);
    }

    /// Insert at the back.
    pub fn push_back(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Insert keeping the list ascending by start address.
    ///
    /// The engine never holds two blocks with the same start, so ties are
    /// not a concern here.
    pub fn insert_by_address(&mut self, block: Block) {
        let at = self
            .blocks
            .iter()
            .position(|resident| resident.start() >= block.start())
            .unwrap_or(self.blocks.len());
        self.blocks.insert(at, block);
    }

    /// Insert keeping the list ascending by size.
    ///
    /// An incoming block lands before the first resident block of equal
    /// size, so among equals the newest sits first.
    pub fn insert_by_size_ascending(&mut self, block: Block) {
        let at = self
            .blocks
            .iter()
            .position(|resident| resident.size() >= block.size())
            .unwrap_or(self.blocks.len());
        self.blocks.insert(at, block);
    }

    /// Insert keeping the list descending by size.
    ///
    /// Ties resolve as in [`BlockList::insert_by_size_ascending`]: the
    /// incoming block precedes residents of equal size.
    pub fn insert_by_size_descending(&mut self, block: Block) {
        let at = self
            .blocks
            .iter()
            .position(|resident| resident.size() <= block.size())
            .unwrap_or(self.blocks.len());
        self.blocks.insert(at, block);
    }

    /// Index of the first block, in list order, holding at least `min_size`
    /// units. `None` when nothing fits.
    pub fn first_fit(&self, min_size: usize) -> Option<usize> {
        self.blocks.iter().position(|block| block.size() >= min_size)
    }

    /// Index of the first block owned by `pid`. Free blocks never match.
    pub fn position_of_owner(&self, pid: Pid) -> Option<usize> {
        self.blocks.iter().position(|block| block.owner() == Some(pid))
    }

    /// Detach and return the block at `index`, `None` past the end.
    pub fn remove_at(&mut self, index: usize) -> Option<Block> {
        (index < self.blocks.len()).then(|| self.blocks.remove(index))
    }

    /// Detach and return the front block, `None` on an empty list.
    ///
    /// Used when draining a list to rebuild it in another order.
    pub fn pop_front(&mut self) -> Option<Block> {
        (!self.blocks.is_empty()).then(|| self.blocks.remove(0))
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Block> for BlockList {
    fn from_iter<I: IntoIterator<Item = Block>>(iter: I) -> Self {
        Self {
            blocks: iter.into_iter().collect(),
        }
    }
}
