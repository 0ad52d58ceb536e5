//! The worker loop each pool thread runs.

use super::panic::describe_panic;
use super::queue::TaskQueue;
use super::task::Task;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::error;

/// Index of a worker within its pool.
pub type WorkerId = usize;

/// Counters for each worker, shared with the pool.
#[derive(Debug)]
pub struct WorkerState {
    /// Tasks run to completion, panicked ones included.
    pub tasks_executed: AtomicU64,
    /// Tasks that panicked mid-run.
    pub tasks_panicked: AtomicU64,
}

impl WorkerState {
    fn new() -> Self {
        Self {
            tasks_executed: AtomicU64::new(0),
            tasks_panicked: AtomicU64::new(0),
        }
    }
}

pub(crate) struct Worker {
    pub id: WorkerId,
    pub state: Arc<WorkerState>,
}

impl Worker {
    pub fn new(id: WorkerId) -> Self {
        Self {
            id,
            state: Arc::new(WorkerState::new()),
        }
    }

    // main loop: Idle (blocked on the queue) -> Running -> Idle, until the
    // queue reports closed-and-drained
    pub fn run(&self, queue: Arc<TaskQueue>) {
        while let Some(task) = queue.pop_blocking() {
            self.execute_task(task);
        }
    }

    /// Runs one task to completion. Panics are caught and logged here so a
    /// misbehaving task can never take the worker down with it.
    fn execute_task(&self, task: Task) {
        let tid = task.id;

        let result = catch_unwind(AssertUnwindSafe(|| {
            task.execute();
        }));

        if let Err(payload) = result {
            self.state.tasks_panicked.fetch_add(1, Ordering::Relaxed);
            error!(
                target: "thread_pool",
                worker = self.id,
                task = ?tid,
                "task panicked: {}",
                describe_panic(payload.as_ref())
            );
        }

        self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panicking_task_does_not_kill_worker() {
        let queue = Arc::new(TaskQueue::new());
        let worker = Worker::new(0);
        let state = worker.state.clone();

        queue.push(Task::new(|| panic!("boom")));
        queue.push(Task::new(|| {}));
        queue.close();

        let queue_clone = queue.clone();
        let handle = std::thread::spawn(move || worker.run(queue_clone));
        handle.join().unwrap();

        assert_eq!(state.tasks_executed.load(Ordering::Relaxed), 2);
        assert_eq!(state.tasks_panicked.load(Ordering::Relaxed), 1);
    }
}
