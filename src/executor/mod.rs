//! Task execution infrastructure.
//!
//! This module provides the core execution primitives: the shared FIFO task
//! queue, the worker loop, and the fixed-size thread pool they make up.

pub(crate) mod panic;
pub(crate) mod queue;
pub mod task;
pub mod thread_pool;
pub mod worker;

pub use task::TaskId;
pub use thread_pool::ThreadPool;
pub use worker::{WorkerId, WorkerState};
