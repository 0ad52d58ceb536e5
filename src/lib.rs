//! Fire-and-forget task dispatch on a fixed-size worker thread pool.
//!
//! A caller hands [`dispatch`] a name and a closure; the closure is queued
//! on a process-wide pool of OS threads and runs to completion on one of
//! them. Submission never blocks on execution, results never come back, and
//! a panicking task is caught and logged rather than allowed to crash its
//! worker or the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! fireforget::init().unwrap();
//!
//! fireforget::dispatch("update user cache", || {
//!     // runs on a worker thread
//! });
//!
//! // drains queued tasks and joins all workers
//! fireforget::shutdown().unwrap();
//! ```
//!
//! # Guarantees
//!
//! - Tasks from a single producer start in submission order (FIFO).
//! - Every accepted task runs exactly once; shutdown drains the queue
//!   before the workers exit, so nothing accepted is silently dropped.
//! - A task panic is logged at error level with the task's name and never
//!   escapes the task boundary.
//! - Dispatching with no live pool logs one error and drops the task; no
//!   error crosses the [`dispatch`] boundary under any circumstance.
//!
//! Shutting the pool down from inside a dispatched task deadlocks on the
//! worker joining itself; callers must not do that.
//!
//! Observability goes through the [`tracing`] facade under the
//! `task_runner` and `thread_pool` targets; the crate never installs a
//! subscriber.

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod runtime;

pub use config::{Config, ConfigBuilder};
pub use dispatch::dispatch;
pub use error::{Error, Result};
pub use executor::ThreadPool;
pub use runtime::{init, init_with_config, shutdown};
