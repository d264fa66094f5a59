//! Per-thread, per-size-class slot pools with a two-tier free list.
//!
//! The "ready" list is touched only by the owning thread and is completely
//! unlocked; the "incoming" list is the single mutex-guarded path by which
//! foreign threads hand slots back. The owning thread drains incoming into
//! ready lazily, only when ready would otherwise come up empty.

use std::cell::UnsafeCell;
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::class::SlotClass;
use crate::slot::{RawSlot, Slot};
use crate::stats::{AtomicPoolStats, PoolStats};

/// Shared pool state, reachable from issued slots on any thread.
pub(crate) struct PoolCore {
    class: SlotClass,
    owner: ThreadId,
    /// Unlocked free list. Invariant: touched only by the owning thread
    /// (enforced by `PoolHandle` being `!Send`), or under the exclusive
    /// access `Drop` provides.
    ready: UnsafeCell<Vec<RawSlot>>,
    /// The only cross-thread entry point: foreign returns land here.
    incoming: Mutex<Vec<RawSlot>>,
    stats: AtomicPoolStats,
}

// SAFETY: `incoming` and `stats` are synchronized; `ready` is confined to
// the owning thread per the invariant above.
unsafe impl Send for PoolCore {}
unsafe impl Sync for PoolCore {}

impl PoolCore {
    fn new(class: SlotClass) -> Self {
        Self {
            class,
            owner: thread::current().id(),
            ready: UnsafeCell::new(Vec::new()),
            incoming: Mutex::new(Vec::new()),
            stats: AtomicPoolStats::new(),
        }
    }

    pub(crate) fn class(&self) -> SlotClass {
        self.class
    }

    /// Return a slot to this pool from whatever thread is running.
    pub(crate) fn release(&self, raw: RawSlot) {
        if thread::current().id() == self.owner {
            // SAFETY: same-thread path; only the owning thread reaches this
            // branch, and no other borrow of `ready` is live here.
            let ready = unsafe { &mut *self.ready.get() };
            ready.push(raw);
        } else {
            self.stats.record_foreign_return();
            self.incoming.lock().push(raw);
        }
    }
}

impl Drop for PoolCore {
    fn drop(&mut self) {
        // Runs only once every issued slot has been returned (each holds an
        // Arc to this core), so both lists contain everything ever created.
        let layout = self.class.layout();
        let ready = self.ready.get_mut();
        let incoming = self.incoming.get_mut();
        let freed = ready.len() + incoming.len();
        for raw in ready.drain(..).chain(incoming.drain(..)) {
            // SAFETY: free-list slots hold no live elements and were
            // allocated with this pool's layout.
            unsafe { raw.dealloc(layout) };
        }
        let created = self.stats.snapshot().created();
        tracing::debug!(class = ?self.class, created, freed, "slot pool torn down");
    }
}

/// Owning-thread handle to one pool.
///
/// A handle is deliberately `!Send`: acquisition and prewarming are
/// same-thread operations by construction, so the ready list needs no lock.
/// Slots themselves may travel; a [`Slot`] dropped elsewhere finds its way
/// home through the pool's incoming list.
pub struct PoolHandle {
    core: Arc<PoolCore>,
    /// Pins the handle to its creating thread.
    _affinity: PhantomData<*mut ()>,
}

impl PoolHandle {
    pub(crate) fn new(class: SlotClass) -> Self {
        Self {
            core: Arc::new(PoolCore::new(class)),
            _affinity: PhantomData,
        }
    }

    /// The size class this pool serves.
    #[must_use]
    pub fn class(&self) -> SlotClass {
        self.core.class()
    }

    /// Acquire a slot, reusing a pooled buffer when one is available.
    ///
    /// Ready-list reuse is LIFO: the most recently released slot comes back
    /// first. When ready is empty, any foreign returns are drained in under
    /// the incoming mutex before falling back to a fresh allocation. A fresh
    /// allocation that the system allocator cannot satisfy is fatal.
    #[must_use]
    pub fn acquire(&self) -> Slot {
        debug_assert_eq!(thread::current().id(), self.core.owner);
        let reused = {
            // SAFETY: `!Send` pins us to the owning thread, and the borrow
            // ends before any user-visible code runs.
            let ready = unsafe { &mut *self.core.ready.get() };
            if ready.is_empty() {
                let mut incoming = self.core.incoming.lock();
                if !incoming.is_empty() {
                    tracing::trace!(class = ?self.core.class, count = incoming.len(), "drained foreign returns");
                }
                ready.append(&mut incoming);
            }
            ready.pop()
        };
        let raw = match reused {
            Some(raw) => {
                self.core.stats.record_hit();
                raw
            }
            None => {
                self.core.stats.record_miss();
                RawSlot::alloc(self.core.class.layout())
            }
        };
        Slot::issue(raw, Arc::clone(&self.core))
    }

    /// Eagerly allocate `count` fresh slots onto the ready list.
    ///
    /// Meant for construction-time warm-up before a latency-sensitive phase;
    /// the next `count` acquisitions will not call the system allocator.
    pub fn prewarm(&self, count: usize) {
        let layout = self.core.class.layout();
        // SAFETY: same-thread borrow, see `acquire`.
        let ready = unsafe { &mut *self.core.ready.get() };
        ready.reserve(count);
        for _ in 0..count {
            ready.push(RawSlot::alloc(layout));
            self.core.stats.record_prewarmed();
        }
        tracing::trace!(class = ?self.core.class, count, "prewarmed slot pool");
    }

    /// Number of slots currently sitting on either free list.
    #[must_use]
    pub fn pooled(&self) -> usize {
        // SAFETY: same-thread read, see `acquire`.
        let ready_len = unsafe { (*self.core.ready.get()).len() };
        ready_len + self.core.incoming.lock().len()
    }

    /// Snapshot of this pool's counters.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        self.core.stats.snapshot()
    }
}

impl Clone for PoolHandle {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            _affinity: PhantomData,
        }
    }
}

impl std::fmt::Debug for PoolHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolHandle")
            .field("class", &self.core.class)
            .field("pooled", &self.pooled())
            .finish()
    }
}
