//! Fire-and-forget task dispatch.

use crate::executor::panic::describe_panic;
use crate::runtime::current_pool;
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, info};

/// Submits `task` to the process-wide pool for asynchronous execution and
/// returns immediately.
///
/// `name` is a human-readable label used only for logging; it may be empty
/// and need not be unique. The task is wrapped so that its start, finish,
/// and any panic are logged, and a panic never propagates past the task:
/// neither the caller nor the worker running it can be taken down.
///
/// If no pool is live (before [`crate::init`] or after [`crate::shutdown`])
/// the submission is dropped with a single error-level log line; no error
/// reaches the caller.
pub fn dispatch<F>(name: &str, task: F)
where
    F: FnOnce() + Send + 'static,
{
    let pool = match current_pool() {
        Some(pool) => pool,
        None => {
            error!(
                target: "task_runner",
                task = %name,
                "dispatch called but thread pool is not available"
            );
            return;
        }
    };

    let name = name.to_owned();
    pool.execute(move || {
        info!(target: "task_runner", task = %name, "starting task");
        match catch_unwind(AssertUnwindSafe(task)) {
            Ok(()) => {
                info!(target: "task_runner", task = %name, "finished task");
            }
            Err(payload) => {
                error!(
                    target: "task_runner",
                    task = %name,
                    "task failed: {}",
                    describe_panic(payload.as_ref())
                );
            }
        }
    });
}
