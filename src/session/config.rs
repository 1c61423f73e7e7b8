//! Configuration for a parse session.

use std::thread;

/// Default capacity of the line and diagnostic queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Configuration for the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Number of worker threads parsing lines.
    pub workers: usize,
    /// Capacity of the bounded queue feeding lines to workers.
    pub line_queue_capacity: usize,
    /// Capacity of the bounded queue feeding the diagnostic collector.
    pub error_queue_capacity: usize,
    /// Reorder the output by source line before returning it.
    pub sort_output: bool,
    /// Report model parameters dropped for a bad value as warnings.
    pub warn_on_dropped_params: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            workers: available_workers(),
            line_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            error_queue_capacity: DEFAULT_QUEUE_CAPACITY,
            sort_output: false,
            warn_on_dropped_params: true,
        }
    }
}

impl ParserConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads (at least one is always used).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the capacity of the line queue.
    pub fn with_line_queue_capacity(mut self, capacity: usize) -> Self {
        self.line_queue_capacity = capacity;
        self
    }

    /// Set the capacity of the diagnostic queue.
    pub fn with_error_queue_capacity(mut self, capacity: usize) -> Self {
        self.error_queue_capacity = capacity;
        self
    }

    /// Return components, commands and diagnostics in source-line order.
    ///
    /// Without this, order reflects worker scheduling.
    pub fn with_sorted_output(mut self, sort_output: bool) -> Self {
        self.sort_output = sort_output;
        self
    }

    /// Toggle warnings for model parameters dropped over a bad value.
    pub fn with_dropped_param_warnings(mut self, warn: bool) -> Self {
        self.warn_on_dropped_params = warn;
        self
    }

    /// Effective worker count.
    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }
}

fn available_workers() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
