//! Move-style combinators over [`BoundedSeq`].
//!
//! Every combinator consumes its sequence and returns the transformed one,
//! so a pipeline reads as a chain of moves and the underlying slots cycle
//! through the pools instead of the system allocator. Combinators that
//! produce a *new* sequence (map, group, assort, flatten) take the target
//! pool(s) explicitly; everything else reworks the sequence in place.

use std::ptr;

use rand::Rng;

use crate::seq::{BoundedSeq, SeqPool};

impl<T, const C: usize> BoundedSeq<T, C> {
    /// Transform every element into a fresh sequence drawn from `pool`.
    ///
    /// Capacity carries over: the result holds the same number of elements
    /// under the same bound `C`.
    #[must_use]
    pub fn map<U>(self, pool: &SeqPool<U, C>, mut f: impl FnMut(T) -> U) -> BoundedSeq<U, C> {
        let mut out = BoundedSeq::new(pool);
        for value in self {
            out.push(f(value));
        }
        out
    }

    /// Keep only elements satisfying `keep`, preserving their order.
    ///
    /// Compaction happens in place; nothing is allocated and the rejected
    /// elements are dropped.
    #[must_use]
    pub fn filter(mut self, mut keep: impl FnMut(&T) -> bool) -> Self {
        let mut kept = 0;
        for i in 0..self.len() {
            if keep(&self[i]) {
                self.swap(kept, i);
                kept += 1;
            }
        }
        self.truncate(kept);
        self
    }

    /// Reverse the element order.
    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.as_mut_slice().reverse();
        self
    }

    /// Sort by a strict "comes before" predicate.
    ///
    /// Recursive partition sort: each level moves the non-pivot elements out
    /// into a scratch slot acquired from `pool` (released when the sort
    /// finishes), then writes them back around the pivot. The scratch is
    /// threaded down the recursion explicitly; nothing hides in thread-local
    /// storage. Equal elements keep no particular order.
    ///
    /// A panicking predicate leaks the sequence's elements rather than
    /// risking a double drop.
    #[must_use]
    pub fn sort_by(mut self, pool: &SeqPool<T, C>, mut less: impl FnMut(&T, &T) -> bool) -> Self {
        if self.len() < 2 {
            return self;
        }
        let scratch = pool.acquire();
        let len = self.len();
        // Elements are untracked while they shuttle through the scratch.
        self.set_len(0);
        // SAFETY: [0, len) are live in our slot; the scratch slot provides
        // aligned storage for C >= len elements.
        unsafe {
            partition_sort(self.base(), scratch.as_ptr().cast::<T>(), 0, len, &mut less);
        }
        self.set_len(len);
        self
    }

    /// Shuffle with the caller's RNG (Fisher–Yates over the live slice).
    #[must_use]
    pub fn shuffle<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        use rand::seq::SliceRandom;
        self.as_mut_slice().shuffle(rng);
        self
    }

    /// Append one element, move-style. The sequence must have headroom.
    #[must_use]
    pub fn append(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Append every element of `other`. The combined length must fit in `C`.
    #[must_use]
    pub fn concat(mut self, other: Self) -> Self {
        for value in other {
            self.push(value);
        }
        self
    }

    /// Keep the first `n` elements, dropping the rest. `n` must not exceed
    /// the current length.
    #[must_use]
    pub fn take(mut self, n: usize) -> Self {
        assert!(n <= self.len(), "take({n}) from a length-{} sequence", self.len());
        self.truncate(n);
        self
    }

    /// Drop the first `n` elements and shift the rest down. `n` must not
    /// exceed the current length.
    #[must_use]
    pub fn drop_front(mut self, n: usize) -> Self {
        let len = self.len();
        assert!(n <= len, "drop_front({n}) from a length-{len} sequence");
        if n == 0 {
            return self;
        }
        let base = self.base();
        self.set_len(0);
        // SAFETY: [0, len) were live; the first n are dropped, the tail is
        // memmoved down, and the length is re-tracked afterwards.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(base, n));
            ptr::copy(base.add(n), base, len - n);
        }
        self.set_len(len - n);
        self
    }

    /// Keep the longest prefix satisfying `pred`.
    #[must_use]
    pub fn take_while(self, mut pred: impl FnMut(&T) -> bool) -> Self {
        let cut = self.iter().position(|x| !pred(x)).unwrap_or(self.len());
        self.take(cut)
    }

    /// Drop the longest prefix satisfying `pred`.
    #[must_use]
    pub fn drop_while(self, mut pred: impl FnMut(&T) -> bool) -> Self {
        let cut = self.iter().position(|x| !pred(x)).unwrap_or(self.len());
        self.drop_front(cut)
    }

    /// Split into chunks of `chunk` elements (the last may be shorter).
    ///
    /// Inner sequences come from `inner`, the outer sequence from `outer`;
    /// `chunk` must be non-zero and fit an inner sequence.
    #[must_use]
    pub fn group<const C2: usize>(
        self,
        outer: &SeqPool<BoundedSeq<T, C>, C2>,
        inner: &SeqPool<T, C>,
        chunk: usize,
    ) -> BoundedSeq<BoundedSeq<T, C>, C2> {
        assert!(chunk > 0, "group chunk must be non-zero");
        assert!(chunk <= C, "group chunk {chunk} exceeds inner capacity {C}");
        let mut out = BoundedSeq::new(outer);
        let mut current = BoundedSeq::new(inner);
        for value in self {
            current.push(value);
            if current.len() == chunk {
                out.push(std::mem::replace(&mut current, BoundedSeq::new(inner)));
            }
        }
        if !current.is_empty() {
            out.push(current);
        }
        out
    }

    /// Distribute elements into `RC` buckets chosen by `bucket`, keeping
    /// relative order within each bucket. `bucket` must return an index
    /// below `RC`.
    #[must_use]
    pub fn assort<const RC: usize>(
        self,
        outer: &SeqPool<BoundedSeq<T, C>, RC>,
        inner: &SeqPool<T, C>,
        mut bucket: impl FnMut(&T) -> usize,
    ) -> BoundedSeq<BoundedSeq<T, C>, RC> {
        let mut out = BoundedSeq::from_fn(outer, RC, |_| BoundedSeq::new(inner));
        for value in self {
            let b = bucket(&value);
            assert!(b < RC, "assort bucket {b} out of range 0..{RC}");
            out[b].push(value);
        }
        out
    }
}

impl<T, const C: usize, const C2: usize> BoundedSeq<BoundedSeq<T, C>, C2> {
    /// Concatenate the inner sequences into one, drawn from `pool`.
    /// The total length must fit in `C`.
    #[must_use]
    pub fn flatten(self, pool: &SeqPool<T, C>) -> BoundedSeq<T, C> {
        let mut out = BoundedSeq::new(pool);
        for seq in self {
            for value in seq {
                out.push(value);
            }
        }
        out
    }
}

/// Partition `data[pos .. pos + len]` around its first element.
///
/// Elements for which `less(elem, pivot)` holds land left of the pivot, the
/// rest to its right, using `scratch` as the staging area (the original
/// ordering trick: lefts fill the scratch from the front, rights from the
/// back).
///
/// # Safety
/// `data[pos .. pos + len]` must be live elements exclusively owned by the
/// caller, `scratch` must provide storage for at least `len` elements (the
/// back-fill writes at index `len - 1`), and the two regions must not
/// overlap. On return every element is back in
/// `data` exactly once; if `less` unwinds, elements are stranded (leaked,
/// never doubled).
unsafe fn partition_sort<T>(
    data: *mut T,
    scratch: *mut T,
    pos: usize,
    len: usize,
    less: &mut impl FnMut(&T, &T) -> bool,
) {
    if len < 2 {
        return;
    }
    // SAFETY: pos is in bounds per caller contract.
    let pivot = unsafe { data.add(pos).read() };
    let mut left = 0;
    let mut right = 0;
    for i in 1..len {
        // SAFETY: pos + i is in bounds; each element is read out once.
        let elem = unsafe { data.add(pos + i).read() };
        if less(&elem, &pivot) {
            // SAFETY: left < len - 1 slots are reserved at the scratch front.
            unsafe { scratch.add(left).write(elem) };
            left += 1;
        } else {
            right += 1;
            // SAFETY: rights fill the scratch back; no overlap with lefts.
            unsafe { scratch.add(len - right).write(elem) };
        }
    }
    // SAFETY: writes target the region just vacated by the reads above.
    unsafe {
        for i in 0..left {
            data.add(pos + i).write(scratch.add(i).read());
        }
        data.add(pos + left).write(pivot);
        let right_pos = pos + left + 1;
        for i in 0..right {
            data.add(right_pos + i).write(scratch.add(len - (i + 1)).read());
        }
        partition_sort(data, scratch, pos, left, &mut *less);
        partition_sort(data, scratch, right_pos, right, &mut *less);
    }
}
