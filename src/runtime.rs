//! Process-wide pool lifecycle.
//!
//! The process owns at most one [`ThreadPool`] at a time, held behind a
//! single controlled accessor. [`init`] constructs it before first use and
//! [`shutdown`] tears it down exactly once, joining every worker before
//! returning, so startup/teardown ordering is explicit rather than hidden
//! in static initialization.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::executor::ThreadPool;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

// Global pool for the fire-and-forget API
static GLOBAL_POOL: RwLock<Option<Arc<ThreadPool>>> = RwLock::new(None);

/// Constructs the process-wide pool with the default configuration (worker
/// count from hardware concurrency).
pub fn init() -> Result<()> {
    init_with_config(Config::default())
}

/// Constructs the process-wide pool. Errors if one is already live or if a
/// worker thread cannot be spawned; in the latter case no pool is left
/// behind.
pub fn init_with_config(config: Config) -> Result<()> {
    let mut pool = GLOBAL_POOL.write();

    if pool.is_some() {
        return Err(Error::AlreadyInitialized);
    }

    let new_pool = ThreadPool::new(&config)?;
    info!(
        target: "thread_pool",
        workers = new_pool.num_threads(),
        "thread pool initialized"
    );
    *pool = Some(Arc::new(new_pool));

    Ok(())
}

/// The single accessor the dispatch layer goes through. `None` between
/// teardown and any re-initialization, or before the first [`init`].
pub(crate) fn current_pool() -> Option<Arc<ThreadPool>> {
    GLOBAL_POOL.read().clone()
}

/// Tears the pool down: cancels the workers, drains tasks already queued,
/// and joins every worker before returning. Errors if no pool is live.
pub fn shutdown() -> Result<()> {
    let pool = GLOBAL_POOL.write().take().ok_or(Error::NotInitialized)?;

    info!(target: "thread_pool", "thread pool shutting down");
    pool.shutdown();
    info!(target: "thread_pool", "thread pool shut down");

    Ok(())
}
