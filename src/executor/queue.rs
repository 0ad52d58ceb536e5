use super::task::Task;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Unbounded multi-producer/multi-consumer FIFO shared by all callers and
/// all workers. A single mutex guards the deque; the close flag is an atomic
/// readable without it.
#[derive(Debug)]
pub(crate) struct TaskQueue {
    tasks: Mutex<VecDeque<Task>>,
    available: Condvar,
    closed: AtomicBool,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            closed: AtomicBool::new(false),
        }
    }

    /// Appends a task and wakes at most one waiting worker. Tasks pushed
    /// after `close` are dropped: there may be no worker left to run them.
    pub fn push(&self, task: Task) {
        let mut tasks = self.tasks.lock();
        if self.closed.load(Ordering::Relaxed) {
            debug!(target: "thread_pool", task = ?task.id, "queue closed, dropping task");
            return;
        }
        tasks.push_back(task);
        drop(tasks);
        self.available.notify_one();
    }

    /// Blocks until a task is available and returns it, or returns `None`
    /// once the queue is closed AND drained. A closed but non-empty queue
    /// still hands out tasks: nothing accepted before close is lost.
    pub fn pop_blocking(&self) -> Option<Task> {
        let mut tasks = self.tasks.lock();
        loop {
            if let Some(task) = tasks.pop_front() {
                return Some(task);
            }
            if self.closed.load(Ordering::Acquire) {
                return None;
            }
            self.available.wait(&mut tasks);
        }
    }

    /// One-shot, irreversible. Taking the queue lock here closes the window
    /// where a worker has seen `closed == false` but not yet parked on the
    /// condvar, which would miss the wakeup.
    pub fn close(&self) {
        let _guard = self.tasks.lock();
        self.closed.store(true, Ordering::Release);
        self.available.notify_all();
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    #[test]
    fn pop_is_fifo() {
        let queue = TaskQueue::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..5 {
            let order = order.clone();
            queue.push(Task::new(move || order.lock().push(i)));
        }
        queue.close();
        while let Some(task) = queue.pop_blocking() {
            task.execute();
        }
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn closed_empty_queue_returns_none() {
        let queue = TaskQueue::new();
        queue.close();
        assert!(queue.pop_blocking().is_none());
        assert!(queue.closed.load(Ordering::SeqCst));
    }

    #[test]
    fn close_drains_before_none() {
        let queue = TaskQueue::new();
        let count = Arc::new(AtomicUsize::new(0));
        for _ in 0..3 {
            let count = count.clone();
            queue.push(Task::new(move || {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }
        queue.close();
        let mut popped = 0;
        while let Some(task) = queue.pop_blocking() {
            task.execute();
            popped += 1;
        }
        assert_eq!(popped, 3);
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn push_after_close_is_dropped() {
        let queue = TaskQueue::new();
        queue.close();
        queue.push(Task::new(|| {}));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn close_wakes_blocked_consumer() {
        let queue = Arc::new(TaskQueue::new());
        let queue_clone = queue.clone();
        let consumer = std::thread::spawn(move || queue_clone.pop_blocking().is_none());
        std::thread::sleep(std::time::Duration::from_millis(50));
        queue.close();
        assert!(consumer.join().unwrap());
    }
}
