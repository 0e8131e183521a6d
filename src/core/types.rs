/*!
 * Core Types
 * Common aliases used across the crate
 */

/// Task identifier, unique within one simulation run
pub type TaskId = u32;

/// Address type for region offsets
pub type Address = usize;

/// Size type for block and request sizes
pub type Size = usize;

/// Logical execution units (not wall-clock time)
pub type Units = u64;
