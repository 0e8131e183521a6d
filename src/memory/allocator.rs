/*!
 * First-Fit Allocator
 * Public allocation contract over one memory region
 */

use super::region::MemoryRegion;
use super::types::{BlockHandle, BlockSnapshot, MemoryError, MemoryResult, RegionConfig, RegionStats};
use crate::core::types::Size;
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// First-fit allocator backed by one bounded memory region.
///
/// The whole allocate/deallocate/coalesce sequence runs as a single
/// critical section under one mutex per region, so no caller can observe
/// a block mid-split. Cloning shares the region; clones are safe to hand
/// to producer threads.
pub struct FirstFitAllocator {
    region: Arc<Mutex<MemoryRegion>>,
}

impl FirstFitAllocator {
    /// Create an allocator over a fresh region of `total_size` units
    pub fn new(total_size: Size) -> MemoryResult<Self> {
        Self::with_config(total_size, RegionConfig::default())
    }

    /// Create an allocator with an explicit split-threshold configuration
    pub fn with_config(total_size: Size, config: RegionConfig) -> MemoryResult<Self> {
        let region = MemoryRegion::new(total_size, config)?;
        info!(
            "First-fit allocator initialized: {} units, split threshold {}",
            total_size, config.min_split_remainder
        );
        Ok(Self {
            region: Arc::new(Mutex::new(region)),
        })
    }

    /// Allocate the first free block large enough for `size` units.
    ///
    /// Returns `Ok(None)` when no free block fits: out-of-memory is an
    /// expected, recoverable outcome, and the region is left untouched.
    /// There is no internal retry and no fallback strategy.
    pub fn allocate(&self, size: Size) -> MemoryResult<Option<BlockHandle>> {
        if size == 0 {
            return Err(MemoryError::InvalidSize { size });
        }

        let mut region = self.region.lock();
        let Some(slot) = region.find_first_free_fitting(size) else {
            warn!("Allocation of {} units failed: no free block large enough", size);
            return Ok(None);
        };

        let handle = region.claim(slot, size)?;
        debug!("Allocated {} units", size);
        Ok(Some(handle))
    }

    /// Release the block named by `handle` and coalesce free neighbors.
    ///
    /// A handle that is unknown, stale, or already free is caller misuse
    /// and fails with [`MemoryError::InvalidHandle`] rather than being
    /// silently ignored.
    pub fn deallocate(&self, handle: BlockHandle) -> MemoryResult<()> {
        let mut region = self.region.lock();
        let (start, size) = region.release(handle)?;
        debug!("Freed {} units at {}", size, start);
        Ok(())
    }

    /// Point-in-time copy of the block layout in address order.
    ///
    /// The region lock is held only while the copy is taken; callers
    /// iterate an owned snapshot.
    pub fn snapshot(&self) -> Vec<BlockSnapshot> {
        self.region.lock().snapshot()
    }

    /// Aggregate usage and fragmentation statistics
    pub fn stats(&self) -> RegionStats {
        self.region.lock().stats()
    }

    /// Total region size in units
    pub fn total_size(&self) -> Size {
        self.region.lock().total_size()
    }
}

impl Clone for FirstFitAllocator {
    fn clone(&self) -> Self {
        Self {
            region: Arc::clone(&self.region),
        }
    }
}
