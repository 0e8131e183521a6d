/*!
 * Shortest-Job-First Scheduler
 * Non-preemptive burst-ordered execution, for low-priority tasks
 */

use super::entry::Entry;
use super::types::{RealTimeTask, SchedulerStats, TaskOutcome, TaskStatus};
use crate::core::types::Units;
use crate::memory::{FirstFitAllocator, MemoryResult};
use log::{debug, info, warn};

/// Shortest-job-first scheduler for low-priority tasks.
///
/// The run order is computed once when [`run_all`](Self::run_all) starts:
/// ascending burst, ties broken by ascending id for determinism. Tasks
/// enqueued after a run begins wait for the next run; the policy is not
/// work-conserving against arrivals.
pub struct ShortestJobFirstScheduler {
    tasks: Vec<Entry>,
    stats: SchedulerStats,
}

impl ShortestJobFirstScheduler {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            stats: SchedulerStats::default(),
        }
    }

    /// Add a task to the collection
    pub fn enqueue(&mut self, task: RealTimeTask) {
        debug!(
            "Task {} enqueued (SJF): {} units memory, {} units burst",
            task.id, task.memory_required, task.execution_units
        );
        self.tasks.push(Entry::new(task));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Statistics for the most recent [`run_all`](Self::run_all)
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Run every task to completion in shortest-burst-first order.
    ///
    /// Each task gets its whole burst in one non-preemptive slice:
    /// allocate, consume all units, deallocate. A failed allocation
    /// reports the task `Failed` and the run continues with the next one.
    pub fn run_all(&mut self, allocator: &FirstFitAllocator) -> MemoryResult<Vec<TaskOutcome>> {
        self.stats = SchedulerStats::default();

        let mut batch = std::mem::take(&mut self.tasks);
        batch.sort_by_key(|entry| (entry.task.execution_units, entry.task.id));

        let mut outcomes = Vec::with_capacity(batch.len());
        for mut entry in batch {
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

impl Default for ShortestJobFirstScheduler {
    fn default() -> Self {
        Self::new()
    }
}
