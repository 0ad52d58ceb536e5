//! Error types for pool construction and lifecycle.
//!
//! Nothing here ever crosses the [`crate::dispatch`] boundary; task
//! failures are logged inside the worker, not surfaced as errors.

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pool construction and lifecycle management.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid pool configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Worker thread creation failed during pool construction. Fatal: the
    /// pool is left fully absent.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// `init` called while a pool is already live.
    #[error("pool already initialized")]
    AlreadyInitialized,

    /// `shutdown` called with no live pool.
    #[error("pool not initialized")]
    NotInitialized,
}

impl Error {
    /// Shorthand for a [`Error::Config`] with a formatted message.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }
}
