/*!
 * Round-Robin Scheduler
 * FIFO rotation with a fixed quantum, for high-priority tasks
 */

use super::entry::Entry;
use super::types::{RealTimeTask, SchedulerStats, TaskOutcome, TaskStatus};
use crate::core::types::Units;
use crate::memory::{FirstFitAllocator, MemoryResult};
use log::{debug, info, warn};
use std::collections::VecDeque;

/// Round-robin scheduler for high-priority tasks.
///
/// Memory is contended per turn, not held across a task's lifetime: each
/// turn allocates the task's block, runs at most one quantum, and always
/// deallocates before the turn ends; a paused task holds nothing while
/// it waits at the tail of the queue.
pub struct RoundRobinScheduler {
    queue: VecDeque<Entry>,
    quantum: Units,
    stats: SchedulerStats,
}

impl RoundRobinScheduler {
    /// Create a scheduler granting `quantum` execution units per turn.
    /// `quantum` must be positive; a zero quantum makes no progress.
    pub fn new(quantum: Units) -> Self {
        debug_assert!(quantum > 0, "quantum must be positive");
        Self {
            queue: VecDeque::new(),
            quantum,
            stats: SchedulerStats::default(),
        }
    }

    /// Append a task at the tail of the queue
    pub fn enqueue(&mut self, task: RealTimeTask) {
        debug!(
            "Task {} enqueued (round robin): {} units memory, {} units burst",
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

    pub fn quantum(&self) -> Units {
        self.quantum
    }

    /// Statistics for the most recent [`run_all`](Self::run_all)
    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    /// Drive every queued task to a terminal state.
    ///
    /// Each turn: pop the head task, request its block, run one quantum,
    /// deallocate, then re-enqueue at the tail if burst remains. A task
    /// whose allocation fails is reported `Failed` and is NOT re-queued;
    /// a task that cannot even start is not charged more turns. Outcomes
    /// are returned in retirement order.
    pub fn run_all(&mut self, allocator: &FirstFitAllocator) -> MemoryResult<Vec<TaskOutcome>> {
        self.stats = SchedulerStats::default();
        let mut outcomes = Vec::new();

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

            let slice = entry.run_slice(self.quantum);
            self.stats.units_executed += slice;

            // The block is held only for the active slice, never across turns.
            allocator.deallocate(handle)?;

            if entry.is_done() {
                info!(
                    "Task {} completed after {} units",
                    entry.task.id, entry.consumed
                );
                self.stats.completed += 1;
                outcomes.push(entry.outcome(TaskStatus::Completed));
            } else {
                debug!(
                    "Task {} preempted, {} units remaining, re-queueing",
                    entry.task.id, entry.task.execution_units
                );
                self.queue.push_back(entry);
            }
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::types::TaskPriority;

    #[test]
    fn test_quantum_interleaving_trace() {
        let allocator = FirstFitAllocator::new(1000).unwrap();
        let mut scheduler = RoundRobinScheduler::new(150);

        scheduler.enqueue(RealTimeTask::new(1, 200, 300, TaskPriority::High));
        scheduler.enqueue(RealTimeTask::new(2, 250, 400, TaskPriority::High));

        let outcomes = scheduler.run_all(&allocator).unwrap();

        // T1: 300 -> 150 -> 0 (2 turns); T2: 400 -> 250 -> 100 -> 0 (3 turns).
        assert_eq!(
            outcomes,
            vec![
                TaskOutcome {
                    id: 1,
                    status: TaskStatus::Completed,
                    units_consumed: 300
                },
                TaskOutcome {
                    id: 2,
                    status: TaskStatus::Completed,
                    units_consumed: 400
                },
            ]
        );
        assert_eq!(scheduler.stats().turns, 5);
        assert_eq!(scheduler.stats().units_executed, 700);
    }

    #[test]
    fn test_failed_task_not_requeued() {
        let allocator = FirstFitAllocator::new(100).unwrap();
        let mut scheduler = RoundRobinScheduler::new(50);

        scheduler.enqueue(RealTimeTask::new(1, 150, 100, TaskPriority::High));
        scheduler.enqueue(RealTimeTask::new(2, 80, 100, TaskPriority::High));

        let outcomes = scheduler.run_all(&allocator).unwrap();

        assert_eq!(outcomes[0].id, 1);
        assert_eq!(outcomes[0].status, TaskStatus::Failed);
        assert_eq!(outcomes[0].units_consumed, 0);
        assert_eq!(outcomes[1].id, 2);
        assert_eq!(outcomes[1].status, TaskStatus::Completed);
        // Task 1 took exactly one turn; task 2 took two.
        assert_eq!(scheduler.stats().turns, 3);
    }
}
