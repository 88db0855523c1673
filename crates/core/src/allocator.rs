//! The partition allocator engine.

use std::mem;

use tracing::debug;

use crate::block::{Block, Pid};
use crate::coalesce::coalesce;
use crate::error::{AllocError, AllocResult};
use crate::event::Event;
use crate::list::BlockList;
use crate::policy::PlacementPolicy;

/// Simulated allocator over one fixed-size partition.
///
/// Every unit of the partition belongs to exactly one block, and every block
/// sits in exactly one of two lists: the free list, kept in whatever order
/// the [`PlacementPolicy`] dictates, and the allocated list, kept ascending
/// by address. Together the lists always cover `0..partition_size` with no
/// gaps and no overlaps. Operations that fail leave both lists untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocator {
    partition_size: usize,
    policy: PlacementPolicy,
    free: BlockList,
    allocated: BlockList,
}

impl Allocator {
    /// Create an allocator whose partition spans addresses
    /// `0..partition_size`, starting from a single free block covering the
    /// whole range.
    pub fn new(partition_size: usize, policy: PlacementPolicy) -> AllocResult<Self> {
        if partition_size == 0 {
            return Err(AllocError::invalid_config(
                "partition size must be at least 1",
            ));
        }
        let mut free = BlockList::new();
        free.push_front(Block::free(0, partition_size - 1));
        debug!(partition_size, %policy, "allocator initialized");
        Ok(Self {
            partition_size,
            policy,
            free,
            allocated: BlockList::new(),
        })
    }

    /// Size of the partition, in units.
    pub fn partition_size(&self) -> usize {
        self.partition_size
    }

    /// The placement policy this allocator was built with.
    pub fn policy(&self) -> PlacementPolicy {
        self.policy
    }

    /// The free list, in its current policy-driven order.
    pub fn free_list(&self) -> &BlockList {
        &self.free
    }

    /// The allocated list, ascending by address.
    pub fn allocated_list(&self) -> &BlockList {
        &self.allocated
    }

    /// Total free capacity, in units.
    pub fn free_capacity(&self) -> usize {
        self.free.total_size()
    }

    /// Total capacity currently owned by processes, in units.
    pub fn allocated_capacity(&self) -> usize {
        self.allocated.total_size()
    }

    /// Size of the largest free block, zero when nothing is free.
    pub fn largest_free_block(&self) -> usize {
        self.free.iter().map(Block::size).max().unwrap_or(0)
    }

    /// Carve `size` units out of the free list for `pid`.
    ///
    /// The free list order already encodes the policy, so the first block
    /// that fits is the right one for first, best and worst fit alike. The
    /// claimed range moves to the allocated list; a leftover tail fragment
    /// re-enters the free list through [`PlacementPolicy::reinsert`].
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidRequest`] for a zero-size request,
    /// [`AllocError::InsufficientMemory`] when no free block is large
    /// enough. Neither changes any list.
    pub fn allocate(&mut self, pid: Pid, size: usize) -> AllocResult<()> {
        if size == 0 {
            return Err(AllocError::invalid_request(
                "allocation size must be at least 1",
            ));
        }
        let index = self
            .free
            .first_fit(size)
            .ok_or_else(|| AllocError::insufficient_memory(size, self.largest_free_block()))?;
        let mut block = self
            .free
            .remove_at(index)
            .expect("first_fit returns an in-range index");

        block.claim(pid);
        let fragment = block.split(size);
        debug!(
            %pid,
            size,
            start = block.start(),
            end = block.end(),
            fragment = fragment.as_ref().map(Block::size),
            "allocated block"
        );
        self.allocated.insert_by_address(block);
        if let Some(fragment) = fragment {
            self.policy.reinsert(&mut self.free, fragment);
        }
        Ok(())
    }

    /// Return the block owned by `pid` to the free list.
    ///
    /// The block re-enters the free list in policy order. Neighboring free
    /// blocks are not fused here; that takes an explicit [`Allocator::coalesce`].
    /// When several blocks share an owner, the one earliest in the allocated
    /// list (lowest address) is released.
    ///
    /// # Errors
    ///
    /// [`AllocError::NotFound`] when no allocated block is owned by `pid`;
    /// the lists are unchanged.
    pub fn deallocate(&mut self, pid: Pid) -> AllocResult<()> {
        let index = self
            .allocated
            .position_of_owner(pid)
            .ok_or_else(|| AllocError::not_found(pid))?;
        let mut block = self
            .allocated
            .remove_at(index)
            .expect("position_of_owner returns an in-range index");

        block.release();
        debug!(%pid, start = block.start(), end = block.end(), "released block");
        self.policy.reinsert(&mut self.free, block);
        Ok(())
    }

    /// Fuse all adjacent free blocks.
    ///
    /// Afterwards the free list is ascending by address, whatever the
    /// policy. Later reinsertions treat that order as the resident order and
    /// place themselves relative to it.
    pub fn coalesce(&mut self) {
        self.free = coalesce(mem::take(&mut self.free));
    }

    /// Fold one trace event into the allocator.
    ///
    /// # Errors
    ///
    /// Forwards the error of the underlying operation; coalescing cannot
    /// fail.
    pub fn apply(&mut self, event: Event) -> AllocResult<()> {
        match event {
            Event::Allocate { pid, size } => self.allocate(pid, size),
            Event::Deallocate { pid } => self.deallocate(pid),
            Event::Coalesce => {
                self.coalesce();
                Ok(())
            }
        }
    }
}
