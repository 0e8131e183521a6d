/*!
 * Core Module
 * Shared primitives used by the memory and scheduler subsystems
 */

pub mod types;

pub use types::{Address, Size, TaskId, Units};
