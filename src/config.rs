//! Queue configuration.

use crate::error::{Error, Result};

/// Largest heap capacity that may be reserved up front.
pub const MAX_INITIAL_CAPACITY: usize = 1 << 20;

/// Order among tasks that share a priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Earlier enqueue runs first.
    #[default]
    Fifo,
    /// Later enqueue runs first.
    ///
    /// Gives up the guarantee that of two tasks with equal priority the one
    /// enqueued first pops first.
    Lifo,
}

/// Settings for an `ExecutionQueue`.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Order among equal priorities.
    pub tie_break: TieBreak,
    /// Heap slots reserved up front.
    pub initial_capacity: usize,

    /// Significant figures kept by the execution-time histogram.
    pub latency_sigfigs: u8,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::default(),
            initial_capacity: 0,
            latency_sigfigs: 3,
        }
    }
}

impl QueueConfig {
    /// Start building a config from the defaults.
    pub fn builder() -> QueueConfigBuilder {
        QueueConfigBuilder::new()
    }

    /// Check every field is in range.
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(Error::config(format!(
                "initial_capacity too large (max {})",
                MAX_INITIAL_CAPACITY
            )));
        }

        if self.latency_sigfigs > 5 {
            return Err(Error::config("latency_sigfigs must be in 0..=5"));
        }

        Ok(())
    }
}

/// Builder for `QueueConfig`.
#[derive(Debug, Default)]
pub struct QueueConfigBuilder {
    config: QueueConfig,
}

impl QueueConfigBuilder {
    /// Builder starting from `QueueConfig::default()`.
    pub fn new() -> Self {
        Self {
            config: QueueConfig::default(),
        }
    }

    /// Set the tie-break order.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.config.tie_break = tie_break;
        self
    }

    /// Set the reserved heap capacity.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = capacity;
        self
    }

    /// Set the histogram precision.
    pub fn latency_sigfigs(mut self, sigfigs: u8) -> Self {
        self.config.latency_sigfigs = sigfigs;
        self
    }

    /// Validate and return the config.
    pub fn build(self) -> Result<QueueConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
