/*!
 * Task Scheduling
 *
 * Two policies drive the first-fit allocator under contention, plus a
 * FIFO baseline:
 *
 * - [`RoundRobinScheduler`]: high-priority tasks, FIFO rotation with a
 *   fixed quantum; memory is requested and released every turn.
 * - [`ShortestJobFirstScheduler`]: low-priority tasks, non-preemptive,
 *   burst-ordered, computed once up front.
 * - [`TaskSimulator`]: single FIFO queue, no priorities; the comparison
 *   control case.
 *
 * Running a task is a logical unit-count decrement, never a sleep; any
 * pacing for visualization belongs to the caller. Each `run_all` returns
 * structured per-task outcomes for the caller to display or log.
 */

mod entry;
mod round_robin;
mod simulator;
mod sjf;
mod types;

pub use round_robin::RoundRobinScheduler;
pub use simulator::TaskSimulator;
pub use sjf::ShortestJobFirstScheduler;
pub use types::{RealTimeTask, SchedulerStats, TaskOutcome, TaskPriority, TaskStatus};
