//! Pool configuration.

use crate::error::{Error, Result};

/// Lower bound used when hardware concurrency cannot be determined or a
/// caller asks for zero workers.
pub const MIN_WORKERS: usize = 2;

/// Construction parameters for a [`crate::ThreadPool`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed worker count. `None` (or `Some(0)`) resolves from hardware
    /// concurrency at pool construction.
    pub num_threads: Option<usize>,
    /// Worker threads are named `{prefix}-{index}`.
    pub thread_name_prefix: String,
    /// Stack size per worker thread, if set.
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "fireforget-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
        }
    }
}

impl Config {
    /// Starts a builder from the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Rejects configurations the pool cannot honor.
    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_threads {
            if n > 1024 {
                return Err(Error::config("num_threads too large (max 1024)"));
            }
        }
        if self.thread_name_prefix.is_empty() {
            return Err(Error::config("thread_name_prefix must not be empty"));
        }
        Ok(())
    }

    /// Resolved worker count: an explicit non-zero request wins, otherwise
    /// hardware concurrency with a floor of [`MIN_WORKERS`].
    pub fn worker_threads(&self) -> usize {
        match self.num_threads {
            Some(n) if n > 0 => n,
            _ => num_cpus::get().max(MIN_WORKERS),
        }
    }
}

/// Builder for [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Builder starting from [`Config::default`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Fixed worker count; `0` falls back to the default at construction.
    pub fn num_threads(mut self, n: usize) -> Self {
        self.config.num_threads = Some(n);
        self
    }

    /// Prefix for worker thread names.
    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Stack size per worker thread.
    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
