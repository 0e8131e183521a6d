/*!
 * Memory Region
 * Address-ordered block arena with split and coalesce primitives
 *
 * Owns the blocks tiling `[0, total_size)` and the primitives to locate,
 * split, and merge them. No allocation policy lives here; the first-fit
 * decision belongs to the allocator one layer up.
 */

use super::types::{
    BlockHandle, BlockSnapshot, MemoryError, MemoryResult, RegionConfig, RegionStats,
};
use crate::core::types::{Address, Size};

/// One contiguous block record covering `[start, start + size)`
#[derive(Debug, Clone, Copy)]
struct MemoryBlock {
    start: Address,
    size: Size,
    free: bool,
}

/// Arena slot. The generation advances on every allocate/release
/// transition and on retirement, so recycled slots never resurrect a
/// handle issued for an earlier occupant.
#[derive(Debug)]
struct Slot {
    generation: u32,
    occupied: bool,
    block: MemoryBlock,
}

/// Bounded linear region of logical memory.
///
/// Invariant: the blocks referenced by `order`, taken in sequence, are
/// non-overlapping and exactly tile `[0, total_size)`; the sum of their
/// sizes equals `total_size`. Every mutating primitive restores this
/// before returning, on failure paths included.
#[derive(Debug)]
pub(super) struct MemoryRegion {
    total_size: Size,
    config: RegionConfig,
    slots: Vec<Slot>,
    /// Retired slot indices available for reuse
    vacant: Vec<u32>,
    /// Live slot indices in ascending `start` order
    order: Vec<u32>,
}

impl MemoryRegion {
    /// Create a region covered by a single free block
    pub fn new(total_size: Size, config: RegionConfig) -> MemoryResult<Self> {
        if total_size == 0 {
            return Err(MemoryError::InvalidSize { size: total_size });
        }

        let mut region = Self {
            total_size,
            config,
            slots: Vec::new(),
            vacant: Vec::new(),
            order: Vec::new(),
        };
        let slot = region.insert_slot(MemoryBlock {
            start: 0,
            size: total_size,
            free: true,
        });
        region.order.push(slot);
        Ok(region)
    }

    pub fn total_size(&self) -> Size {
        self.total_size
    }

    /// First free block, in ascending address order, with `size >= min_size`.
    ///
    /// O(live blocks); typical workloads keep the block count small enough
    /// that an auxiliary index is not worth its upkeep.
    pub fn find_first_free_fitting(&self, min_size: Size) -> Option<u32> {
        self.order.iter().copied().find(|&slot| {
            let block = &self.slots[slot as usize].block;
            block.free && block.size >= min_size
        })
    }

    /// Allocate `requested` units out of the free block in `slot`,
    /// applying the split-threshold policy.
    ///
    /// If the remainder after a split would fall below
    /// `min_split_remainder`, the whole block is granted; otherwise the
    /// block shrinks to `requested` and a free remainder block is
    /// inserted immediately after it. Returns a fresh handle for the now
    /// allocated block.
    pub fn claim(&mut self, slot: u32, requested: Size) -> MemoryResult<BlockHandle> {
        let invalid = |slot: u32, generation: u32| MemoryError::InvalidHandle { slot, generation };

        let entry = self
            .slots
            .get(slot as usize)
            .ok_or_else(|| invalid(slot, 0))?;
        if !entry.occupied || !entry.block.free || entry.block.size < requested {
            return Err(invalid(slot, entry.generation));
        }

        let block = entry.block;
        let remainder = block.size - requested;
        let split = remainder >= self.config.min_split_remainder;

        {
            let entry = &mut self.slots[slot as usize];
            if split {
                entry.block.size = requested;
            }
            entry.block.free = false;
            entry.generation = entry.generation.wrapping_add(1);
        }

        if split {
            let rest = self.insert_slot(MemoryBlock {
                start: block.start + requested,
                size: remainder,
                free: true,
            });
            let pos = self
                .position(slot)
                .ok_or_else(|| invalid(slot, self.slots[slot as usize].generation))?;
            self.order.insert(pos + 1, rest);
        }

        Ok(BlockHandle {
            slot,
            generation: self.slots[slot as usize].generation,
        })
    }

    /// Mark the block free and coalesce with its address-adjacent free
    /// neighbors: predecessor first, then the (possibly new) successor.
    /// At most two local merges; the tiling invariant holds throughout.
    /// Returns the `(start, size)` of the block as it was released, for
    /// the caller's logging.
    pub fn release(&mut self, handle: BlockHandle) -> MemoryResult<(Address, Size)> {
        let idx = self
            .resolve(handle)
            .ok_or(MemoryError::InvalidHandle {
                slot: handle.slot,
                generation: handle.generation,
            })?;

        let released = {
            let entry = &mut self.slots[idx];
            entry.block.free = true;
            entry.generation = entry.generation.wrapping_add(1);
            (entry.block.start, entry.block.size)
        };

        let mut pos = self
            .position(handle.slot)
            .ok_or(MemoryError::InvalidHandle {
                slot: handle.slot,
                generation: handle.generation,
            })?;

        // Merge with predecessor: the predecessor absorbs this block.
        if pos > 0 {
            let prev = self.order[pos - 1];
            if self.slots[prev as usize].block.free {
                let absorbed = self.slots[self.order[pos] as usize].block.size;
                self.slots[prev as usize].block.size += absorbed;
                let retired = self.order.remove(pos);
                self.retire_slot(retired);
                pos -= 1;
            }
        }

        // Merge with successor: this (possibly merged) block absorbs it.
        if pos + 1 < self.order.len() {
            let next = self.order[pos + 1];
            if self.slots[next as usize].block.free {
                let absorbed = self.slots[next as usize].block.size;
                let cur = self.order[pos];
                self.slots[cur as usize].block.size += absorbed;
                self.order.remove(pos + 1);
                self.retire_slot(next);
            }
        }

        Ok(released)
    }

    /// Point-in-time copy of all blocks in address order
    pub fn snapshot(&self) -> Vec<BlockSnapshot> {
        self.order
            .iter()
            .map(|&slot| {
                let block = &self.slots[slot as usize].block;
                BlockSnapshot {
                    start: block.start,
                    size: block.size,
                    free: block.free,
                }
            })
            .collect()
    }

    pub fn stats(&self) -> RegionStats {
        let mut used = 0;
        let mut allocated_blocks = 0;
        let mut free_blocks = 0;
        let mut largest_free_block = 0;

        for &slot in &self.order {
            let block = &self.slots[slot as usize].block;
            if block.free {
                free_blocks += 1;
                largest_free_block = largest_free_block.max(block.size);
            } else {
                allocated_blocks += 1;
                used += block.size;
            }
        }

        RegionStats {
            total: self.total_size,
            used,
            free: self.total_size - used,
            allocated_blocks,
            free_blocks,
            largest_free_block,
        }
    }

    /// Slot index for a handle that names a live allocated block
    fn resolve(&self, handle: BlockHandle) -> Option<usize> {
        let idx = handle.slot as usize;
        let entry = self.slots.get(idx)?;
        (entry.occupied && entry.generation == handle.generation && !entry.block.free)
            .then_some(idx)
    }

    /// Position of a live slot in the address-ordered list
    fn position(&self, slot: u32) -> Option<usize> {
        self.order.iter().position(|&s| s == slot)
    }

    fn insert_slot(&mut self, block: MemoryBlock) -> u32 {
        if let Some(slot) = self.vacant.pop() {
            let entry = &mut self.slots[slot as usize];
            entry.occupied = true;
            entry.block = block;
            slot
        } else {
            self.slots.push(Slot {
                generation: 0,
                occupied: true,
                block,
            });
            (self.slots.len() - 1) as u32
        }
    }

    fn retire_slot(&mut self, slot: u32) {
        let entry = &mut self.slots[slot as usize];
        entry.occupied = false;
        entry.generation = entry.generation.wrapping_add(1);
        self.vacant.push(slot);
    }
}
