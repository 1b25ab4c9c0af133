//! Configuration for a solve run.

use crate::pool::PoolConfig;

/// Default node pool size for the dictionary trie.
pub const DEFAULT_NODE_POOL_CAPACITY: u32 = 20_000;

/// Default worker count.
pub const DEFAULT_WORKER_THREADS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Upper bound on trie nodes (one per distinct prefix letter, plus the root).
    pub node_pool_capacity: u32,
    /// Number of worker threads that run per-cell searches.
    pub worker_threads: usize,
    /// Pin each worker to a CPU core.
    pub pin_workers: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            node_pool_capacity: DEFAULT_NODE_POOL_CAPACITY,
            worker_threads: DEFAULT_WORKER_THREADS,
            pin_workers: false,
        }
    }
}

impl SolverConfig {
    pub fn with_node_pool_capacity(mut self, capacity: u32) -> Self {
        self.node_pool_capacity = capacity;
        self
    }

    /// Set the worker count (clamped to at least one).
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads.max(1);
        self
    }

    pub fn with_pinned_workers(mut self, pin: bool) -> Self {
        self.pin_workers = pin;
        self
    }

    /// Worker pool settings derived from this config.
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            threads: self.worker_threads,
            pin_to_cores: self.pin_workers,
        }
    }
}
