/*!
 * Task Simulator
 * FIFO baseline driver with no priority distinction
 */

use super::entry::Entry;
use super::types::{RealTimeTask, SchedulerStats, TaskOutcome, TaskStatus};
use crate::core::types::Units;
use crate::memory::{FirstFitAllocator, MemoryResult};
use log::{debug, info, warn};
use std::collections::VecDeque;

/// Sequential FIFO driver: pop, allocate, run the full burst, deallocate.
///
/// Serves as the control case when comparing the round-robin and SJF
/// policies over the same task set.
pub struct TaskSimulator {
    queue: VecDeque<Entry>,
    stats: SchedulerStats,
}

impl TaskSimulator {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            stats: SchedulerStats::default(),
        }
    }

    pub fn enqueue(&mut self, task: RealTimeTask) {
        debug!(
            "Task {} enqueued (FIFO): {} units memory, {} units burst",
            task.id, task.memory_required, task.execution_units
        );
        self.queue.push_back(Entry::new(task));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Run every queued task to a terminal state in arrival order
    pub fn run_all(&mut self, allocator: &FirstFitAllocator) -> MemoryResult<Vec<TaskOutcome>> {
        self.stats = SchedulerStats::default();
        let mut outcomes = Vec::with_capacity(self.queue.len());

        while let Some(mut entry) = self.queue.pop_front() {
            self.stats.turns += 1;

            let Some(handle) = allocator.allocate(entry.task.memory_required)? else {
                warn!(
                    "Task {} failed: no block of {} units available",
                    entry.task.id, entry.task.memory_required
                );
                self.stats.failed += 1;
                outcomes.push(entry.outcome(TaskStatus::Failed));
                continue;
            };

            let slice = entry.run_slice(Units::MAX);
            self.stats.units_executed += slice;
            allocator.deallocate(handle)?;

            info!("Task {} completed after {} units", entry.task.id, slice);
            self.stats.completed += 1;
            outcomes.push(entry.outcome(TaskStatus::Completed));
        }

        Ok(outcomes)
    }
}

impl Default for TaskSimulator {
    fn default() -> Self {
        Self::new()
    }
}
