//! # slabvec-core
//!
//! Fixed-capacity sequences over recycled pool slots.
//!
//! [`BoundedSeq`] owns exactly one slot from a thread-affine pool for its
//! whole lifetime; elements are placement-constructed into the slot as the
//! sequence grows and destroyed as it shrinks. Dropping a sequence — on any
//! thread — returns its slot to the pool that issued it. The combinator
//! layer consumes sequences move-style, so a pipeline like
//!
//! ```
//! use slabvec_pool::PoolRegistry;
//! use slabvec_core::{BoundedSeq, SeqPool};
//!
//! let mut registry = PoolRegistry::new();
//! let ints = SeqPool::<i64, 100>::new(&mut registry);
//!
//! let sum: i64 = BoundedSeq::iterate(&ints, 10, 1, |p| p + 1)
//!     .map(&ints, |x| x * 3)
//!     .filter(|x| x % 2 == 0)
//!     .into_iter()
//!     .sum();
//! assert_eq!(sum, 90);
//! ```
//!
//! cycles a handful of buffers through the pool instead of hitting the
//! system allocator per stage.

mod iter;
mod ops;
mod seq;

pub use iter::IntoIter;
pub use seq::{BoundedSeq, SeqPool};

// Re-export the pool surface so most callers need only this crate.
pub use slabvec_pool::{PoolHandle, PoolRegistry, PoolStats, SlotClass};
