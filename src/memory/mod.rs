/*!
 * Memory Management
 *
 * Bounded linear region with first-fit allocation, split-on-allocate,
 * and coalesce-on-free.
 *
 * ## Algorithm
 *
 * - **First-fit**: allocation scans blocks in ascending address order and
 *   takes the first free block large enough.
 * - **Split threshold**: a free block larger than the request is split
 *   into an allocated prefix and a free remainder, unless the remainder
 *   would fall below [`RegionConfig::min_split_remainder`], then the
 *   whole block is granted (bounded internal fragmentation instead of
 *   tiny unusable fragments).
 * - **Coalescing**: releasing a block merges it with its address-adjacent
 *   free neighbors immediately, at most two local merges.
 *
 * ## Handles
 *
 * Callers never hold references into the block storage. [`allocate`]
 * returns an opaque [`BlockHandle`] (slot index + generation) that stays
 * valid across splits and merges of other blocks and is invalidated the
 * moment its own block is released.
 *
 * [`allocate`]: FirstFitAllocator::allocate
 */

mod allocator;
mod region;
mod types;

pub use allocator::FirstFitAllocator;
pub use types::{
    BlockHandle, BlockSnapshot, MemoryError, MemoryResult, RegionConfig, RegionStats,
};
