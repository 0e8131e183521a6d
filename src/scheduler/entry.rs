/*!
 * Scheduler Entry Types
 * Internal bookkeeping for queued tasks
 */

use super::types::{RealTimeTask, TaskOutcome, TaskStatus};
use crate::core::types::Units;

/// A queued task plus the units it has consumed so far
#[derive(Debug, Clone)]
pub(super) struct Entry {
    pub task: RealTimeTask,
    pub consumed: Units,
}

impl Entry {
    pub fn new(task: RealTimeTask) -> Self {
        Self { task, consumed: 0 }
    }

    /// Run the task for at most `limit` units; returns the slice consumed
    pub fn run_slice(&mut self, limit: Units) -> Units {
        let slice = self.task.execution_units.min(limit);
        self.task.execution_units -= slice;
        self.consumed += slice;
        slice
    }

    pub fn is_done(&self) -> bool {
        self.task.execution_units == 0
    }

    pub fn outcome(&self, status: TaskStatus) -> TaskOutcome {
        TaskOutcome {
            id: self.task.id,
            status,
            units_consumed: self.consumed,
        }
    }
}
