//! Free-list coalescing.

use tracing::trace;

use crate::block::Block;
use crate::list::BlockList;

/// Rebuild a free list in ascending address order, fusing every run of
/// adjacent blocks into one.
///
/// Total free capacity and the covered ranges are unchanged; only the block
/// count can shrink. The result is address-ordered regardless of the order
/// the input arrived in, and a second pass over an already coalesced list is
/// a no-op.
pub fn coalesce(mut free: BlockList) -> BlockList {
    let before = free.len();

    // Drain into an address-ordered intermediate list.
    let mut ordered = BlockList::new();
    while let Some(block) = free.pop_front() {
        ordered.insert_by_address(block);
    }

    // Left-to-right pass. A growing block keeps absorbing its right
    // neighbor until the next gap, then moves to the output.
    let mut merged = BlockList::new();
    let mut current: Option<Block> = None;
    while let Some(next) = ordered.pop_front() {
        current = Some(match current.take() {
            Some(grown) if grown.abuts(&next) => grown.merge(next),
            Some(grown) => {
                merged.push_back(grown);
                next
            }
            None => next,
        });
    }
    if let Some(last) = current {
        merged.push_back(last);
    }

    trace!(
        blocks_before = before,
        blocks_after = merged.len(),
        "coalesced free list"
    );
    merged
}
