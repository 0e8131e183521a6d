/*!
 * memsched Library
 * Bounded-region first-fit allocator with contending task schedulers
 */

pub mod core;
pub mod memory;
pub mod scheduler;

// Re-exports
pub use memory::{
    BlockHandle, BlockSnapshot, FirstFitAllocator, MemoryError, MemoryResult, RegionConfig,
    RegionStats,
};
pub use scheduler::{
    RealTimeTask, RoundRobinScheduler, SchedulerStats, ShortestJobFirstScheduler, TaskOutcome,
    TaskPriority, TaskSimulator, TaskStatus,
};
