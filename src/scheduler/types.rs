/*!
 * Scheduler Types
 * Tasks, per-task outcomes, and per-run statistics
 */

use crate::core::types::{Size, TaskId, Units};
use serde::{Deserialize, Serialize};

/// Task priority class; decides which scheduling policy drives the task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    Low,
}

/// A task competing for memory and logical execution time.
///
/// `execution_units` is the remaining burst; schedulers decrement it as
/// the task runs. `memory_required` must be positive: a zero request
/// surfaces as `MemoryError::InvalidSize` when the task first runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealTimeTask {
    pub id: TaskId,
    pub memory_required: Size,
    pub execution_units: Units,
    pub priority: TaskPriority,
}

impl RealTimeTask {
    pub fn new(id: TaskId, memory_required: Size, execution_units: Units, priority: TaskPriority) -> Self {
        Self {
            id,
            memory_required,
            execution_units,
            priority,
        }
    }
}

/// Terminal state of a task after a scheduler run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Completed,
    Failed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Per-task outcome reported by `run_all`, in retirement order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    pub id: TaskId,
    pub status: TaskStatus,
    pub units_consumed: Units,
}

/// Statistics for the most recent `run_all` on a scheduler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    /// Scheduling turns taken (allocation attempts)
    pub turns: u64,
    pub completed: usize,
    pub failed: usize,
    pub units_executed: Units,
}
