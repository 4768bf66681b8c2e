#![cfg_attr(not(test), no_std)]
#![warn(unsafe_op_in_unsafe_fn)]

//! `GrowVec`: a growable contiguous array with explicit storage management.
//!
//! `GrowVec<T>` keeps raw capacity and live elements apart: slots `[0, len)`
//! hold constructed elements, slots `[len, capacity)` are uninitialized
//! memory that is never read and never dropped. Every operation funnels
//! through two primitives, allocate-raw and construct/destroy-at-slot, so
//! the two can never disagree.
//!
//! This crate is `no_std` compatible (it needs `alloc`).
//!
//! # Failure Guarantees
//!
//! Storage failures are reported as [`GrowVecError`] instead of aborting:
//!
//! - Strong (the vector is unchanged on failure): `with_capacity`, `reserve`,
//!   `shrink_to_fit`, `push`, `push_with`, copy construction (`try_clone`,
//!   `from_slice`, `from_elem`), copy assignment (`clone_from`, `assign_*`)
//!   and the whole positional `insert` family.
//! - Basic (the vector stays valid, elements built before the failure
//!   remain): `resize`, `try_resize_with`.
//! - Never fails: `pop`, `clear`, `truncate`, `erase`, `swap_with`, moves.
//!
//! A panicking `Clone` is treated like a failing constructor: partially built
//! regions are destroyed and released while unwinding. The `try_*_with`
//! family takes closures returning `Result` and gives the same rollback
//! without unwinding.
//!
//! ```
//! # use growvec::{GrowVec, GrowVecError};
//! # fn main() -> Result<(), GrowVecError> {
//! let mut vec = GrowVec::new();
//! assert_eq!(vec.capacity(), 0);
//!
//! vec.push(1)?;
//! vec.push(2)?;
//! vec.push(3)?;
//! assert_eq!(vec.capacity(), 4); // 1 -> 2 -> 4
//!
//! assert!(vec.reserve(usize::MAX).is_err());
//! assert_eq!(vec, [1, 2, 3]); // untouched
//! # Ok(())
//! # }
//! ```
//!
//! # Growth
//!
//! Appending doubles the capacity (`max(1, 2 * capacity)`), so `N` pushes
//! from empty cost `O(log N)` reallocations. Explicit requests (`reserve`,
//! `resize`, `with_capacity`) allocate exactly what is asked for.
//! Reallocations are reported as `tracing` events at `TRACE` level under the
//! `growvec` target.
//!
//! # Element Access
//!
//! `GrowVec<T>` dereferences to `[T]`. Indexing panics when out of bounds;
//! [`GrowVec::try_get`] returns `GrowVecError::IndexOutOfBounds` instead:
//!
//! ```
//! # use growvec::{GrowVec, GrowVecError};
//! let vec = GrowVec::try_from([10, 20, 30]).unwrap();
//! assert_eq!(vec[1], 20);
//! assert_eq!(vec.try_get(2), Ok(&30));
//! assert_eq!(
//!     vec.try_get(3),
//!     Err(GrowVecError::IndexOutOfBounds { index: 3, length: 3 })
//! );
//! ```
//!
//! # Positional Editing
//!
//! Positions are plain indices. `insert*` and `erase*` return the index of
//! the first touched element:
//!
//! ```
//! # use growvec::GrowVec;
//! let mut vec = GrowVec::try_from([1, 2, 3, 4, 5]).unwrap();
//! assert_eq!(vec.erase_range(0..2), Ok(0));
//! assert_eq!(vec, [3, 4, 5]);
//!
//! let at = vec.insert(1, 9).unwrap();
//! assert_eq!(vec[at], 9);
//! assert_eq!(vec, [3, 9, 4, 5]);
//! ```
//!
//! # Cursors
//!
//! [`Cursor`] and [`CursorMut`] are random-access positions with offset
//! arithmetic, distance and ordering. [`Rev`] adapts any of them to walk
//! backwards:
//!
//! ```
//! # use growvec::GrowVec;
//! let vec = GrowVec::try_from(['a', 'b', 'c', 'd']).unwrap();
//!
//! let begin = vec.cursor();
//! let third = begin + 2;
//! assert_eq!(third.get(), Some(&'c'));
//! assert_eq!(third - begin, 2);
//! assert!(begin < third);
//!
//! let backwards: String = vec.iter_rev().collect();
//! assert_eq!(backwards, "dcba");
//! ```
//!
//! # Text Form
//!
//! ```
//! # use growvec::GrowVec;
//! let vec: GrowVec<i32> = "4 8 15".parse().unwrap();
//! assert_eq!(vec.to_string(), "[4, 8, 15]");
//! ```

extern crate alloc;

mod core;
mod cursor;
mod error;
mod iter;
mod raw;
mod slots;
mod text;

// Re-export public types and traits
pub use crate::core::GrowVec;
pub use crate::cursor::{Cursor, CursorMut, RandomAccess, RandomAccessMut, Rev};
pub use crate::error::{ConstructError, GrowVecError, ReadTokensError};
pub use crate::iter::IntoIter;
