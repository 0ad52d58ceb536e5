//! The fixed-size worker thread pool.

use super::queue::TaskQueue;
use super::task::Task;
use super::worker::{Worker, WorkerState};
use crate::config::Config;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Fixed-size pool of long-lived worker threads fed by one shared FIFO
/// queue. Submission never waits on task execution; `shutdown` drains the
/// queue and joins every worker.
#[derive(Debug)]
pub struct ThreadPool {
    queue: Arc<TaskQueue>,
    handles: Mutex<Vec<JoinHandle<()>>>,
    states: Vec<Arc<WorkerState>>,
    num_threads: usize,
}

impl ThreadPool {
    /// Spawns `config.worker_threads()` named workers. A spawn failure is
    /// fatal: workers already running are shut down and joined before the
    /// error is returned, so a pool is either fully up or fully absent.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let num_threads = config.worker_threads();

        let queue = Arc::new(TaskQueue::new());
        let mut handles = Vec::with_capacity(num_threads);
        let mut states = Vec::with_capacity(num_threads);

        for id in 0..num_threads {
            let worker = Worker::new(id);
            states.push(worker.state.clone());

            let queue_clone = queue.clone();
            let name = format!("{}-{}", config.thread_name_prefix, id);

            let mut builder = thread::Builder::new().name(name);
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            match builder.spawn(move || worker.run(queue_clone)) {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    queue.close();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(Error::Spawn(e));
                }
            }
        }

        debug!(target: "thread_pool", workers = num_threads, "worker threads spawned");

        Ok(Self {
            queue,
            handles: Mutex::new(handles),
            states,
            num_threads,
        })
    }

    /// Submits a closure for execution on some worker. Returns as soon as
    /// the task is queued; never waits for it to run.
    pub fn execute<F>(&self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.enqueue(Task::new(f));
    }

    pub(crate) fn enqueue(&self, task: Task) {
        self.queue.push(task);
    }

    /// Number of workers this pool was constructed with.
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    /// Tasks queued but not yet picked up by a worker.
    pub fn pending_tasks(&self) -> usize {
        self.queue.len()
    }

    /// Total tasks run to completion across all workers, panicked ones
    /// included.
    pub fn tasks_executed(&self) -> u64 {
        self.states
            .iter()
            .map(|s| s.tasks_executed.load(Ordering::Relaxed))
            .sum()
    }

    /// Closes the queue (one-shot cancellation, wakes every worker) and
    /// joins all workers. Tasks already queued still run to completion
    /// before this returns. Safe to call more than once; the join-handle
    /// list is drained on the first call.
    ///
    /// Calling this from inside a task running on the pool deadlocks on the
    /// join of the calling worker.
    pub fn shutdown(&self) {
        self.queue.close();

        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            let _ = handle.join();
        }
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    fn small_pool(n: usize) -> ThreadPool {
        let config = Config::builder().num_threads(n).build().unwrap();
        ThreadPool::new(&config).unwrap()
    }

    #[test]
    fn executes_submitted_tasks() {
        let pool = small_pool(2);
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..20 {
            let count = count.clone();
            pool.execute(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        pool.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 20);
        assert_eq!(pool.tasks_executed(), 20);
    }

    #[test]
    fn shutdown_drains_queued_tasks() {
        let pool = small_pool(1);
        let count = Arc::new(AtomicUsize::new(0));

        // First task holds the single worker while the rest queue up.
        {
            let count = count.clone();
            pool.execute(move || {
                std::thread::sleep(Duration::from_millis(100));
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        for _ in 0..10 {
            let count = count.clone();
            pool.execute(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        pool.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 11);
    }

    #[test]
    fn shutdown_twice_is_safe() {
        let pool = small_pool(2);
        pool.execute(|| {});
        pool.shutdown();
        pool.shutdown();
    }

    #[test]
    fn worker_survives_panicking_task() {
        let pool = small_pool(1);
        let count = Arc::new(AtomicUsize::new(0));

        pool.execute(|| panic!("intentional"));
        {
            let count = count.clone();
            pool.execute(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }

        pool.shutdown();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(pool.tasks_executed(), 2);
    }

    #[test]
    fn zero_threads_falls_back_to_default() {
        let config = Config::builder().num_threads(0).build().unwrap();
        let pool = ThreadPool::new(&config).unwrap();
        assert!(pool.num_threads() >= crate::config::MIN_WORKERS);
        pool.shutdown();
    }
}
