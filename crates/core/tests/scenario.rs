//! End-to-end traces against a 100-unit partition, checked state by state.

use pretty_assertions::assert_eq;

use partsim_core::{AllocError, Allocator, Block, BlockList, Event, Pid, PlacementPolicy};

fn pid(raw: u32) -> Pid {
    Pid::new(raw).expect("nonzero pid")
}

fn snapshot(list: &BlockList) -> Vec<(usize, usize, Option<u32>)> {
    list.iter()
        .map(|b| (b.start(), b.end(), b.owner().map(Pid::get)))
        .collect()
}

#[test]
fn first_fit_trace_splits_releases_and_coalesces() {
    let mut alloc = Allocator::new(100, PlacementPolicy::FirstFit).expect("valid partition");
    assert_eq!(snapshot(alloc.free_list()), vec![(0, 99, None)]);
    assert_eq!(snapshot(alloc.allocated_list()), vec![]);

    alloc.allocate(pid(1), 30).expect("fits");
    assert_eq!(snapshot(alloc.allocated_list()), vec![(0, 29, Some(1))]);
    assert_eq!(snapshot(alloc.free_list()), vec![(30, 99, None)]);

    alloc.allocate(pid(2), 20).expect("fits");
    assert_eq!(
        snapshot(alloc.allocated_list()),
        vec![(0, 29, Some(1)), (30, 49, Some(2))]
    );
    assert_eq!(snapshot(alloc.free_list()), vec![(50, 99, None)]);

    // Release pid 1. First fit appends, so the freed head lands after the
    // tail fragment.
    alloc.deallocate(pid(1)).expect("allocated");
    assert_eq!(
        snapshot(alloc.free_list()),
        vec![(50, 99, None), (0, 29, None)]
    );

    // Nothing adjacent yet, so coalescing only reorders by address.
    alloc.coalesce();
    assert_eq!(
        snapshot(alloc.free_list()),
        vec![(0, 29, None), (50, 99, None)]
    );

    alloc.deallocate(pid(2)).expect("allocated");
    assert_eq!(
        snapshot(alloc.free_list()),
        vec![(0, 29, None), (50, 99, None), (30, 49, None)]
    );

    // Now the whole partition is free and contiguous again.
    alloc.coalesce();
    assert_eq!(snapshot(alloc.free_list()), vec![(0, 99, None)]);
    assert_eq!(snapshot(alloc.allocated_list()), vec![]);
    assert_eq!(alloc.free_capacity(), 100);
}

#[test]
fn best_fit_prefers_the_snuggest_hole() {
    let mut alloc = Allocator::new(100, PlacementPolicy::BestFit).expect("valid partition");
    for (owner, size) in [(1, 10), (2, 50), (3, 20), (4, 20)] {
        alloc.allocate(pid(owner), size).expect("fits");
    }
    alloc.deallocate(pid(1)).expect("allocated");
    alloc.deallocate(pid(2)).expect("allocated");
    alloc.deallocate(pid(3)).expect("allocated");

    // Free holes of 10, 20 and 50 units; 15 goes into the 20-unit hole.
    alloc.allocate(pid(9), 15).expect("fits");
    assert_eq!(
        snapshot(alloc.allocated_list()),
        vec![(60, 74, Some(9)), (80, 99, Some(4))]
    );
    assert_eq!(
        snapshot(alloc.free_list()),
        vec![(75, 79, None), (0, 9, None), (10, 59, None)]
    );
}

#[test]
fn worst_fit_carves_the_largest_hole() {
    let mut alloc = Allocator::new(100, PlacementPolicy::WorstFit).expect("valid partition");
    for (owner, size) in [(1, 10), (2, 50), (3, 20), (4, 20)] {
        alloc.allocate(pid(owner), size).expect("fits");
    }
    alloc.deallocate(pid(1)).expect("allocated");
    alloc.deallocate(pid(2)).expect("allocated");
    alloc.deallocate(pid(3)).expect("allocated");

    // Free holes of 10, 20 and 50 units; 15 comes out of the 50.
    alloc.allocate(pid(9), 15).expect("fits");
    assert_eq!(
        snapshot(alloc.allocated_list()),
        vec![(10, 24, Some(9)), (80, 99, Some(4))]
    );
    assert_eq!(
        snapshot(alloc.free_list()),
        vec![(25, 59, None), (60, 79, None), (0, 9, None)]
    );
}

#[test]
fn recoverable_failures_leave_the_trace_resumable() {
    let mut alloc = Allocator::new(100, PlacementPolicy::FirstFit).expect("valid partition");
    let events = [
        Event::Allocate { pid: pid(1), size: 60 },
        Event::Allocate { pid: pid(2), size: 60 }, // too big, skipped
        Event::Deallocate { pid: pid(7) },         // never allocated, skipped
        Event::Allocate { pid: pid(2), size: 40 },
        Event::Deallocate { pid: pid(1) },
        Event::Coalesce,
    ];

    let mut failures = Vec::new();
    for event in events {
        if let Err(err) = alloc.apply(event) {
            assert!(err.is_recoverable(), "trace must continue after {err}");
            failures.push(err);
        }
    }

    assert_eq!(
        failures,
        vec![
            AllocError::insufficient_memory(60, 40),
            AllocError::not_found(pid(7)),
        ]
    );
    assert_eq!(snapshot(alloc.free_list()), vec![(0, 59, None)]);
    assert_eq!(snapshot(alloc.allocated_list()), vec![(60, 99, Some(2))]);
}

#[test]
fn fragmentation_then_coalesce_recovers_a_large_hole() {
    let mut alloc = Allocator::new(100, PlacementPolicy::FirstFit).expect("valid partition");
    for owner in 1..=10 {
        alloc.allocate(pid(owner), 10).expect("fits");
    }
    for owner in [2, 3, 4, 7, 8] {
        alloc.deallocate(pid(owner)).expect("allocated");
    }

    // Five free 10-unit holes, but nothing can hold 30 units yet.
    assert_eq!(alloc.free_capacity(), 50);
    let err = alloc.allocate(pid(11), 30).expect_err("fragmented");
    assert_eq!(err, AllocError::insufficient_memory(30, 10));

    // Coalescing fuses 10-39 and 60-79; the 30-unit request now fits.
    alloc.coalesce();
    assert_eq!(
        snapshot(alloc.free_list()),
        vec![(10, 39, None), (60, 79, None)]
    );
    alloc.allocate(pid(11), 30).expect("fits after coalesce");
    assert_eq!(
        alloc
            .allocated_list()
            .iter()
            .find(|b| b.owner() == Some(pid(11)))
            .map(Block::start),
        Some(10)
    );
}
