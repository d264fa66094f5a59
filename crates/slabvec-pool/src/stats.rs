//! Atomic pool statistics for lock-free usage tracking.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Snapshot of pool usage counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PoolStats {
    /// Slots reused from the ready list.
    pub hits: u64,
    /// Slots freshly allocated because nothing was pooled.
    pub misses: u64,
    /// Slots allocated ahead of time by `prewarm`.
    pub prewarmed: u64,
    /// Slots returned from a thread other than the pool's owner.
    pub foreign_returns: u64,
}

impl PoolStats {
    /// Total slots this pool has ever allocated from the system allocator.
    #[must_use]
    pub fn created(&self) -> u64 {
        self.misses + self.prewarmed
    }
}

/// Atomic pool statistics for lock-free updates.
pub(crate) struct AtomicPoolStats {
    hits: AtomicU64,
    misses: AtomicU64,
    prewarmed: AtomicU64,
    foreign_returns: AtomicU64,
}

impl AtomicPoolStats {
    pub(crate) fn new() -> Self {
        Self {
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            prewarmed: AtomicU64::new(0),
            foreign_returns: AtomicU64::new(0),
        }
    }

    pub(crate) fn snapshot(&self) -> PoolStats {
        PoolStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            prewarmed: self.prewarmed.load(Ordering::Relaxed),
            foreign_returns: self.foreign_returns.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_prewarmed(&self) {
        self.prewarmed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_foreign_return(&self) {
        self.foreign_returns.fetch_add(1, Ordering::Relaxed);
    }
}
