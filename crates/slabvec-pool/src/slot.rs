//! Slots: fixed-size raw buffers issued and recycled by a pool.

use std::alloc::{self, Layout};
use std::ptr::NonNull;
use std::sync::Arc;

use crate::class::SlotClass;
use crate::pool::PoolCore;

/// An owned raw buffer with no attached pool bookkeeping.
///
/// This is the form a slot takes while sitting on a free list. Issued slots
/// are wrapped in [`Slot`], which adds the back-reference to the pool.
pub(crate) struct RawSlot {
    ptr: NonNull<u8>,
}

// SAFETY: a RawSlot is an exclusively-owned byte buffer with no interior
// references; moving it between threads moves plain bytes.
unsafe impl Send for RawSlot {}

impl RawSlot {
    /// Allocate a fresh buffer for `layout`.
    ///
    /// Allocator exhaustion is fatal (`handle_alloc_error`); there is no
    /// retry and no fallback. Zero-size layouts get a dangling, well-aligned
    /// pointer and never touch the allocator.
    pub(crate) fn alloc(layout: Layout) -> Self {
        if layout.size() == 0 {
            // SAFETY: align is non-zero, so the pointer is non-null.
            let ptr = unsafe { NonNull::new_unchecked(layout.align() as *mut u8) };
            return Self { ptr };
        }
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc::alloc(layout) };
        match NonNull::new(ptr) {
            Some(ptr) => Self { ptr },
            None => alloc::handle_alloc_error(layout),
        }
    }

    /// Return the buffer to the system allocator.
    ///
    /// # Safety
    /// `layout` must be the layout this slot was allocated with, and the
    /// buffer must contain no live elements.
    pub(crate) unsafe fn dealloc(self, layout: Layout) {
        if layout.size() != 0 {
            // SAFETY: per caller contract, ptr came from `alloc` with `layout`.
            unsafe { alloc::dealloc(self.ptr.as_ptr(), layout) };
        }
    }

    pub(crate) fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }
}

/// A slot currently issued to a container.
///
/// While issued, the slot carries an `Arc` back-reference to the exact pool
/// that produced it; dropping the slot routes the buffer back through that
/// pool, taking the unlocked same-thread path or the locked cross-thread
/// path as appropriate. The back-reference also keeps the pool's storage
/// alive until every issued slot has been returned.
pub struct Slot {
    ptr: NonNull<u8>,
    pool: Arc<PoolCore>,
}

// SAFETY: the buffer is exclusively owned and the pool back-reference is
// Sync; returning the slot from a foreign thread goes through the pool's
// mutex-guarded incoming list.
unsafe impl Send for Slot {}
// SAFETY: &Slot only exposes the raw pointer value and the class; no shared
// mutation.
unsafe impl Sync for Slot {}

impl Slot {
    pub(crate) fn issue(raw: RawSlot, pool: Arc<PoolCore>) -> Self {
        Self { ptr: raw.ptr, pool }
    }

    /// Base pointer of the buffer. Valid for `class().bytes()` bytes and
    /// aligned to `class().elem_align()`.
    #[must_use]
    pub fn as_ptr(&self) -> *mut u8 {
        self.ptr.as_ptr()
    }

    /// The size class this slot was issued under.
    #[must_use]
    pub fn class(&self) -> SlotClass {
        self.pool.class()
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.pool.release(RawSlot { ptr: self.ptr });
    }
}

impl std::fmt::Debug for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot")
            .field("ptr", &self.ptr)
            .field("class", &self.class())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_dealloc_roundtrip() {
        let layout = Layout::from_size_align(64, 8).unwrap();
        let raw = RawSlot::alloc(layout);
        assert!(!raw.as_ptr().is_null());
        assert_eq!(raw.as_ptr() as usize % 8, 0);
        unsafe { raw.dealloc(layout) };
    }

    #[test]
    fn zero_size_layout_gets_aligned_dangling_pointer() {
        let layout = Layout::from_size_align(0, 16).unwrap();
        let raw = RawSlot::alloc(layout);
        assert_eq!(raw.as_ptr() as usize, 16);
        unsafe { raw.dealloc(layout) };
    }

    #[test]
    fn buffer_is_writable() {
        let layout = Layout::from_size_align(16, 8).unwrap();
        let raw = RawSlot::alloc(layout);
        unsafe {
            raw.as_ptr().cast::<u64>().write(0xdead_beef);
            assert_eq!(raw.as_ptr().cast::<u64>().read(), 0xdead_beef);
        }
        unsafe { raw.dealloc(layout) };
    }
}
