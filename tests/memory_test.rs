/*!
 * Memory Tests
 * First-fit allocation, split threshold, and coalescing behavior
 */

use memsched::{BlockSnapshot, FirstFitAllocator, MemoryError, RegionConfig};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Blocks must tile `[0, total)` in address order with no gaps, no zero
/// sizes, and no two adjacent free blocks left uncoalesced.
fn assert_tiling(snapshot: &[BlockSnapshot], total: usize) {
    let mut cursor = 0;
    let mut prev_free = false;
    for block in snapshot {
        assert_eq!(block.start, cursor, "gap or overlap at {}", block.start);
        assert!(block.size > 0, "zero-sized block at {}", block.start);
        assert!(
            !(prev_free && block.free),
            "adjacent free blocks at {}",
            block.start
        );
        prev_free = block.free;
        cursor += block.size;
    }
    assert_eq!(cursor, total, "blocks do not cover the region");
}

#[test]
fn test_fresh_region_is_one_free_block() {
    let allocator = FirstFitAllocator::new(1000).unwrap();
    assert_eq!(
        allocator.snapshot(),
        vec![BlockSnapshot {
            start: 0,
            size: 1000,
            free: true
        }]
    );
}

#[test]
fn test_zero_region_rejected() {
    assert_eq!(
        FirstFitAllocator::new(0).err(),
        Some(MemoryError::InvalidSize { size: 0 })
    );
}

#[test]
fn test_first_fit_prefers_lowest_address() {
    let allocator = FirstFitAllocator::new(100).unwrap();
    let a = allocator.allocate(50).unwrap().unwrap();
    let _b = allocator.allocate(30).unwrap().unwrap();
    let c = allocator.allocate(20).unwrap().unwrap();

    allocator.deallocate(a).unwrap();
    allocator.deallocate(c).unwrap();

    // Free blocks at 0 (size 50) and 80 (size 20); both fit, the
    // allocator must take the one at address 0.
    allocator.allocate(10).unwrap().unwrap();
    let snapshot = allocator.snapshot();
    assert_eq!(
        snapshot[0],
        BlockSnapshot {
            start: 0,
            size: 10,
            free: false
        }
    );
    assert_eq!(
        snapshot[1],
        BlockSnapshot {
            start: 10,
            size: 40,
            free: true
        }
    );
}

#[test]
fn test_split_threshold_over_provisions_small_remainder() {
    let allocator = FirstFitAllocator::new(100).unwrap();

    // Remainder 10 < 16: the request gets the whole block.
    let handle = allocator.allocate(90).unwrap().unwrap();
    assert_eq!(
        allocator.snapshot(),
        vec![BlockSnapshot {
            start: 0,
            size: 100,
            free: false
        }]
    );
    allocator.deallocate(handle).unwrap();

    // Remainder 50 >= 16: split into prefix and free remainder.
    allocator.allocate(50).unwrap().unwrap();
    assert_eq!(
        allocator.snapshot(),
        vec![
            BlockSnapshot {
                start: 0,
                size: 50,
                free: false
            },
            BlockSnapshot {
                start: 50,
                size: 50,
                free: true
            },
        ]
    );
}

#[test]
fn test_allocate_deallocate_round_trip_restores_layout() {
    let allocator = FirstFitAllocator::new(500).unwrap();
    let _a = allocator.allocate(120).unwrap().unwrap();
    let b = allocator.allocate(64).unwrap().unwrap();
    allocator.deallocate(b).unwrap();

    let before = allocator.snapshot();
    let handle = allocator.allocate(50).unwrap().unwrap();
    allocator.deallocate(handle).unwrap();

    assert_eq!(allocator.snapshot(), before);
}

#[test]
fn test_failed_allocation_is_idempotent() {
    let config = RegionConfig::default().with_min_split_remainder(1);
    let allocator = FirstFitAllocator::with_config(100, config).unwrap();
    let a = allocator.allocate(40).unwrap().unwrap();
    let _b = allocator.allocate(30).unwrap().unwrap();
    let c = allocator.allocate(30).unwrap().unwrap();
    allocator.deallocate(a).unwrap();
    allocator.deallocate(c).unwrap();

    // 70 units are free in total but the largest hole is 40.
    assert_eq!(allocator.allocate(50).unwrap(), None);
    let after_first = allocator.snapshot();
    assert_eq!(allocator.allocate(50).unwrap(), None);
    assert_eq!(allocator.snapshot(), after_first);
}

#[test]
fn test_double_free_fails_loudly() {
    let allocator = FirstFitAllocator::new(100).unwrap();
    let handle = allocator.allocate(40).unwrap().unwrap();
    allocator.deallocate(handle).unwrap();

    assert!(matches!(
        allocator.deallocate(handle),
        Err(MemoryError::InvalidHandle { .. })
    ));
}

#[test]
fn test_stale_handle_after_coalescing_rejected() {
    let allocator = FirstFitAllocator::new(200).unwrap();
    let a = allocator.allocate(100).unwrap().unwrap();
    allocator.deallocate(a).unwrap();

    // The region coalesced back to one block; a later allocation may
    // recycle the same storage, but the old capability must stay dead.
    let _b = allocator.allocate(100).unwrap().unwrap();
    assert!(matches!(
        allocator.deallocate(a),
        Err(MemoryError::InvalidHandle { .. })
    ));
}

#[test]
fn test_stats_track_usage_and_fragmentation() {
    let allocator = FirstFitAllocator::new(1000).unwrap();
    let a = allocator.allocate(400).unwrap().unwrap();
    let _b = allocator.allocate(300).unwrap().unwrap();
    allocator.deallocate(a).unwrap();

    let stats = allocator.stats();
    assert_eq!(stats.total, 1000);
    assert_eq!(stats.used, 300);
    assert_eq!(stats.free, 700);
    assert_eq!(stats.allocated_blocks, 1);
    assert_eq!(stats.free_blocks, 2);
    assert_eq!(stats.largest_free_block, 400);
    assert!((stats.utilization() - 0.3).abs() < 1e-9);
}

#[test]
fn test_shared_allocator_across_threads() {
    let _ = env_logger::builder().is_test(true).try_init();
    let allocator = FirstFitAllocator::new(1024).unwrap();

    let workers: Vec<_> = [100usize, 200, 300]
        .into_iter()
        .map(|size| {
            let allocator = allocator.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    if let Some(handle) = allocator.allocate(size).unwrap() {
                        allocator.deallocate(handle).unwrap();
                    }
                }
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    // Everything was released, so the region coalesces back to one block.
    assert_eq!(
        allocator.snapshot(),
        vec![BlockSnapshot {
            start: 0,
            size: 1024,
            free: true
        }]
    );
}

proptest! {
    /// The tiling invariant holds after every operation of a random
    /// allocate/deallocate interleaving.
    #[test]
    fn test_tiling_invariant_under_random_ops(
        ops in proptest::collection::vec((1usize..200, any::<bool>()), 1..80)
    ) {
        let allocator = FirstFitAllocator::new(1024).unwrap();
        let mut held = Vec::new();

        for (size, release_oldest) in ops {
            if release_oldest && !held.is_empty() {
                let handle = held.remove(0);
                allocator.deallocate(handle).unwrap();
            } else if let Some(handle) = allocator.allocate(size).unwrap() {
                held.push(handle);
            }
            assert_tiling(&allocator.snapshot(), 1024);
        }

        for handle in held {
            allocator.deallocate(handle).unwrap();
        }
        assert_tiling(&allocator.snapshot(), 1024);
        prop_assert_eq!(allocator.stats().used, 0);
    }
}
