/*!
 * Memory Types
 * Common types for region and allocator management
 */

use crate::core::types::{Address, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Allocation exhaustion is deliberately absent: a region with no free
/// block large enough is a normal outcome, reported as `Ok(None)` by
/// [`FirstFitAllocator::allocate`](super::FirstFitAllocator::allocate),
/// and every caller must check it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Invalid size: {size} (regions and requests must be positive)")]
    InvalidSize { size: usize },

    #[error("Invalid handle: slot {slot} generation {generation} does not name an allocated block")]
    InvalidHandle { slot: u32, generation: u32 },
}

/// Opaque capability naming exactly one live allocation in a region.
///
/// The slot index stays stable while blocks split and merge underneath;
/// the generation advances on every allocate/release transition, so a
/// stale handle (double free, use after coalescing) is rejected instead
/// of silently touching whatever block recycled the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHandle {
    pub(super) slot: u32,
    pub(super) generation: u32,
}

/// Read-only view of one block for diagnostics and visualization callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSnapshot {
    pub start: Address,
    pub size: Size,
    pub free: bool,
}

/// Region configuration
///
/// `min_split_remainder` is the split threshold: if the remainder after a
/// prospective split would be smaller than this, the whole block is
/// allocated instead, over-provisioning by up to `min_split_remainder - 1`
/// units. This trades bounded internal fragmentation for not littering
/// the region with unusable free fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionConfig {
    pub min_split_remainder: Size,
}

impl RegionConfig {
    pub fn with_min_split_remainder(mut self, min_split_remainder: Size) -> Self {
        self.min_split_remainder = min_split_remainder;
        self
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_split_remainder: 16,
        }
    }
}

/// Region statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStats {
    pub total: Size,
    pub used: Size,
    pub free: Size,
    pub allocated_blocks: usize,
    pub free_blocks: usize,
    pub largest_free_block: Size,
}

impl RegionStats {
    /// Fraction of the region currently allocated, in `[0.0, 1.0]`
    pub fn utilization(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.used as f64 / self.total as f64
        }
    }
}
