//! Explicit per-thread pool registry.
//!
//! There is no ambient thread-local state here: a caller creates a registry
//! on the thread that will own its pools and passes handles (or the registry
//! itself) into whatever builds containers. Slots returned from other
//! threads never go through a registry; they travel home via their own
//! pool back-reference.

use std::collections::HashMap;
use std::marker::PhantomData;

use crate::class::SlotClass;
use crate::pool::PoolHandle;
use crate::stats::PoolStats;

/// Caller-owned set of pools for one thread, keyed by size class.
///
/// Each class's pool is created lazily on first request. The registry is
/// `!Send`, so every pool it creates is owned by the thread that created
/// the registry.
pub struct PoolRegistry {
    pools: HashMap<SlotClass, PoolHandle>,
    _affinity: PhantomData<*mut ()>,
}

impl PoolRegistry {
    /// Create an empty registry for the current thread.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pools: HashMap::new(),
            _affinity: PhantomData,
        }
    }

    /// Handle to this thread's pool for `class`, created on first use.
    pub fn pool(&mut self, class: SlotClass) -> PoolHandle {
        self.pools
            .entry(class)
            .or_insert_with(|| PoolHandle::new(class))
            .clone()
    }

    /// Pre-allocate `count` slots for `class` on this thread.
    pub fn prewarm(&mut self, class: SlotClass, count: usize) {
        self.pool(class).prewarm(count);
    }

    /// Number of distinct size classes seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// True if no pool has been requested yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Counter snapshots for every pool, for diagnostics.
    #[must_use]
    pub fn stats(&self) -> Vec<(SlotClass, PoolStats)> {
        let mut all: Vec<_> = self
            .pools
            .iter()
            .map(|(class, pool)| (*class, pool.stats()))
            .collect();
        all.sort_by_key(|(class, _)| (class.bytes(), class.elem_align()));
        all
    }
}

impl Default for PoolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
