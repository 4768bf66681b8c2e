use core::cmp::Ordering;
use core::convert::Infallible;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::mem::{self, ManuallyDrop};
use core::ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds};
use core::ptr;
use core::slice::{self, SliceIndex};

use tracing::trace;

use crate::cursor::{Cursor, CursorMut, Rev};
use crate::error::{ConstructError, GrowVecError};
use crate::raw::RawStorage;
use crate::slots::{self, LenGuard, Partial};

/// A growable contiguous array.
///
/// Slots `[0, len)` hold live elements, slots `[len, capacity)` are raw
/// memory. No storage is held while `capacity() == 0`.
pub struct GrowVec<T> {
    buf: RawStorage<T>,
    len: usize,
}

impl<T> GrowVec<T> {
    /// Creates an empty `GrowVec` without allocating.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: RawStorage::empty(),
            len: 0,
        }
    }

    /// Creates an empty `GrowVec` with room for exactly `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::CapacityOverflow` or `GrowVecError::AllocationFailed`
    /// if the storage cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self, GrowVecError> {
        Ok(Self {
            buf: RawStorage::allocate(capacity)?,
            len: 0,
        })
    }

    /// Creates a `GrowVec` of `count` elements produced by `make`.
    ///
    /// If `make` fails, the elements built so far are destroyed, the storage
    /// is released and the closure's error is returned.
    ///
    /// # Errors
    ///
    /// - `ConstructError::Storage` if the storage cannot be obtained
    /// - `ConstructError::Element` with the first error returned by `make`
    pub fn try_from_fn<E>(
        count: usize,
        make: impl FnMut() -> Result<T, E>,
    ) -> Result<Self, ConstructError<E>> {
        let buf = RawStorage::allocate(count)?;
        // SAFETY: the fresh region has `count` unoccupied slots.
        unsafe { slots::try_fill_with(buf.as_ptr(), count, make) }
            .map_err(ConstructError::Element)?;
        Ok(Self { buf, len: count })
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Largest element count this element type can ever reach.
    #[must_use]
    pub fn max_len(&self) -> usize {
        RawStorage::<T>::max_len()
    }

    /// Moves the live elements into a fresh region of exactly `new_capacity` slots.
    ///
    /// Relocation is a bitwise move and cannot fail, so the only failure point
    /// is the allocation itself, which happens before anything is touched.
    fn relocate(&mut self, new_capacity: usize) -> Result<(), GrowVecError> {
        debug_assert!(new_capacity >= self.len);
        let fresh = RawStorage::allocate(new_capacity)?;
        // SAFETY: `[0, len)` is live in the old region, `fresh` has room for
        // `len` slots, and the two regions are distinct allocations.
        unsafe { slots::move_range(self.buf.as_ptr(), fresh.as_ptr(), self.len) };
        let old = mem::replace(&mut self.buf, fresh);
        trace!(
            target: "growvec",
            old_capacity = old.capacity(),
            new_capacity,
            len = self.len,
            elem_size = mem::size_of::<T>(),
            "relocated storage"
        );
        // `old` now holds raw memory only
        drop(old);
        Ok(())
    }

    /// Grows to exactly `new_capacity` slots. No-op when already large enough.
    fn grow(&mut self, new_capacity: usize) -> Result<(), GrowVecError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }
        self.relocate(new_capacity)
    }

    /// Makes room for `additional` more elements, doubling the capacity at least.
    fn grow_amortized(&mut self, additional: usize) -> Result<(), GrowVecError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(GrowVecError::CapacityOverflow {
                requested: usize::MAX,
                max: self.max_len(),
            })?;
        if required <= self.capacity() {
            return Ok(());
        }
        let doubled = self.capacity().saturating_mul(2).max(1);
        let target = doubled.min(self.max_len()).max(required);
        self.relocate(target)
    }

    /// Ensures `capacity() >= capacity`.
    ///
    /// Reallocates to exactly `capacity` slots when growth is needed.
    ///
    /// # Errors
    ///
    /// Returns the allocation error and leaves `self` unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), GrowVecError> {
        self.grow(capacity)
    }

    /// Ensures room for `additional` more elements beyond `len()`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error and leaves `self` unchanged.
    pub fn reserve_additional(&mut self, additional: usize) -> Result<(), GrowVecError> {
        let required = self
            .len
            .checked_add(additional)
            .ok_or(GrowVecError::CapacityOverflow {
                requested: usize::MAX,
                max: self.max_len(),
            })?;
        self.grow(required)
    }

    /// Reallocates to exactly `len()` slots. An empty vector releases its storage.
    ///
    /// # Errors
    ///
    /// Returns the allocation error and leaves `self` unchanged.
    pub fn shrink_to_fit(&mut self) -> Result<(), GrowVecError> {
        if self.capacity() > self.len {
            self.relocate(self.len)?;
        }
        Ok(())
    }

    /// Appends an element, growing by doubling when full.
    ///
    /// # Errors
    ///
    /// Returns the allocation error; `self` is unchanged and `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<(), GrowVecError> {
        if self.len == self.capacity() {
            self.grow_amortized(1)?;
        }
        // SAFETY: `len < capacity` and slot `len` is raw memory.
        unsafe { slots::construct_at(self.buf.slot(self.len), value) };
        self.len += 1;
        Ok(())
    }

    /// Appends the element returned by `make`, constructed after capacity is secured.
    ///
    /// If `make` panics the elements are untouched.
    ///
    /// # Errors
    ///
    /// Returns the allocation error without calling `make`.
    pub fn push_with(&mut self, make: impl FnOnce() -> T) -> Result<&mut T, GrowVecError> {
        if self.len == self.capacity() {
            self.grow_amortized(1)?;
        }
        let value = make();
        // SAFETY: capacity was secured above and slot `len` is raw memory.
        let slot = unsafe { self.buf.slot(self.len) };
        // SAFETY: as above.
        unsafe { slots::construct_at(slot, value) };
        self.len += 1;
        // SAFETY: the slot was just constructed and is now part of `[0, len)`.
        Ok(unsafe { &mut *slot })
    }

    /// Appends the element returned by a fallible `make`.
    ///
    /// # Errors
    ///
    /// - `ConstructError::Storage` if capacity cannot be secured
    /// - `ConstructError::Element` if `make` fails; the elements are untouched
    pub fn try_push_with<E>(
        &mut self,
        make: impl FnOnce() -> Result<T, E>,
    ) -> Result<&mut T, ConstructError<E>> {
        if self.len == self.capacity() {
            self.grow_amortized(1)?;
        }
        let value = make().map_err(ConstructError::Element)?;
        Ok(self.push_with(|| value)?)
    }

    /// Removes and returns the last element.
    ///
    /// Returns `None` if the vector is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` held the last live element and is no longer counted.
        Some(unsafe { ptr::read(self.buf.slot(self.len)) })
    }

    /// Checked element access.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_get(&self, index: usize) -> Result<&T, GrowVecError> {
        let length = self.len;
        self.as_slice()
            .get(index)
            .ok_or(GrowVecError::IndexOutOfBounds { index, length })
    }

    /// Checked mutable element access.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `index >= len()`.
    pub fn try_get_mut(&mut self, index: usize) -> Result<&mut T, GrowVecError> {
        let length = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(GrowVecError::IndexOutOfBounds { index, length })
    }

    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Raw address of the first slot. Dangling while no storage is held.
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    #[must_use]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_ptr()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[0, len)` is live, and the pointer is aligned and non-null even without storage.
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` makes the borrow unique.
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Destroys the elements past `new_len`, tail first. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        // shorten first: a panicking destructor then leaks the rest instead of double-dropping
        self.len = new_len;
        // SAFETY: `[new_len, new_len + tail)` were live and are no longer counted.
        unsafe { slots::destroy_range(self.buf.slot(new_len), tail) };
    }

    /// Destroys every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    ///
    /// Growth reallocates to exactly `new_len` slots. If a clone panics,
    /// the elements filled before it stay in the vector.
    ///
    /// # Errors
    ///
    /// Returns the allocation error and leaves `self` unchanged.
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), GrowVecError>
    where
        T: Clone,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.grow(new_len)?;
        let extra = new_len - self.len;
        let base = self.buf.as_ptr();
        let mut len = LenGuard::new(&mut self.len);
        for _ in 1..extra {
            // SAFETY: `len.current() < new_len <= capacity` and the slot is raw memory.
            unsafe { slots::construct_at(base.add(len.current()), value.clone()) };
            len.increment();
        }
        // SAFETY: the last new slot, same reasoning.
        unsafe { slots::construct_at(base.add(len.current()), value) };
        len.increment();
        Ok(())
    }

    /// Resizes to `new_len`, filling new slots with values returned by `make`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error and leaves `self` unchanged.
    pub fn resize_with(
        &mut self,
        new_len: usize,
        mut make: impl FnMut() -> T,
    ) -> Result<(), GrowVecError> {
        self.try_resize_with(new_len, || Ok::<T, Infallible>(make()))
            .map_err(storage_only)
    }

    /// Resizes to `new_len` using a fallible `make`.
    ///
    /// On an element error, the elements built before it stay in the vector.
    ///
    /// # Errors
    ///
    /// - `ConstructError::Storage` if capacity cannot be secured; `self` is unchanged
    /// - `ConstructError::Element` with the first error returned by `make`
    pub fn try_resize_with<E>(
        &mut self,
        new_len: usize,
        mut make: impl FnMut() -> Result<T, E>,
    ) -> Result<(), ConstructError<E>> {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }
        self.grow(new_len)?;
        let base = self.buf.as_ptr();
        let mut len = LenGuard::new(&mut self.len);
        while len.current() < new_len {
            let value = make().map_err(ConstructError::Element)?;
            // SAFETY: `len.current() < new_len <= capacity` and the slot is raw memory.
            unsafe { slots::construct_at(base.add(len.current()), value) };
            len.increment();
        }
        Ok(())
    }

    fn check_position(&self, index: usize) -> Result<(), GrowVecError> {
        if index > self.len {
            return Err(GrowVecError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        Ok(())
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot right.
    ///
    /// Returns the index of the inserted element.
    ///
    /// # Errors
    ///
    /// - `GrowVecError::IndexOutOfBounds` if `index > len()`
    /// - the allocation error if growth fails
    ///
    /// In both cases `self` is unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> Result<usize, GrowVecError> {
        self.check_position(index)?;
        if self.len == self.capacity() {
            self.grow_amortized(1)?;
        }
        // SAFETY: `index <= len < capacity`; the shifted tail ends at slot `len`,
        // which is raw memory, and the vacated slot is then constructed.
        unsafe {
            let slot = self.buf.slot(index);
            ptr::copy(slot, slot.add(1), self.len - index);
            slots::construct_at(slot, value);
        }
        self.len += 1;
        Ok(index)
    }

    /// Inserts the element returned by `make` at `index`.
    ///
    /// Capacity is secured before `make` runs. If `make` panics the elements
    /// are untouched.
    ///
    /// # Errors
    ///
    /// Same as [`GrowVec::insert`]; `make` is not called on error.
    pub fn insert_with(
        &mut self,
        index: usize,
        make: impl FnOnce() -> T,
    ) -> Result<usize, GrowVecError> {
        self.check_position(index)?;
        if self.len == self.capacity() {
            self.grow_amortized(1)?;
        }
        self.insert(index, make())
    }

    /// Builds `count` elements in the spare slots past `len`, then rotates them to `index`.
    ///
    /// Construction finishes before any live element moves, so a failure
    /// leaves the elements unchanged.
    ///
    /// # Safety
    ///
    /// `build` receives a pointer to `count` unoccupied slots. It must either
    /// construct all of them and return `Ok`, or construct none (destroying
    /// anything it built) and return `Err`.
    unsafe fn stage_at<E>(
        &mut self,
        index: usize,
        count: usize,
        build: impl FnOnce(*mut T) -> Result<(), E>,
    ) -> Result<usize, ConstructError<E>> {
        self.check_position(index)?;
        if count == 0 {
            return Ok(index);
        }
        self.grow_amortized(count)?;
        // SAFETY: `len + count <= capacity` after growth.
        let spare = unsafe { self.buf.slot(self.len) };
        build(spare).map_err(ConstructError::Element)?;
        self.len += count;
        self.as_mut_slice()[index..].rotate_right(count);
        Ok(index)
    }

    /// Inserts `count` clones of `value` at `index`.
    ///
    /// Returns the index of the first inserted element.
    ///
    /// # Errors
    ///
    /// Same as [`GrowVec::insert`].
    pub fn insert_n(&mut self, index: usize, count: usize, value: &T) -> Result<usize, GrowVecError>
    where
        T: Clone,
    {
        // SAFETY: `fill_range` builds all `count` slots or unwinds after destroying its prefix.
        let staged = unsafe {
            self.stage_at(index, count, |spare| {
                slots::fill_range(spare, count, value);
                Ok::<(), Infallible>(())
            })
        };
        staged.map_err(storage_only)
    }

    /// Inserts clones of every element of `items` at `index`.
    ///
    /// # Errors
    ///
    /// Same as [`GrowVec::insert`].
    pub fn insert_from_slice(&mut self, index: usize, items: &[T]) -> Result<usize, GrowVecError>
    where
        T: Clone,
    {
        // SAFETY: `copy_range` builds all slots or unwinds after destroying its prefix.
        let staged = unsafe {
            self.stage_at(index, items.len(), |spare| {
                slots::copy_range(items, spare);
                Ok::<(), Infallible>(())
            })
        };
        staged.map_err(storage_only)
    }

    /// Inserts `count` elements returned by a fallible `make` at `index`.
    ///
    /// # Errors
    ///
    /// - `ConstructError::Storage` for a bad index or failed growth
    /// - `ConstructError::Element` with the first error of `make`
    ///
    /// The elements are unchanged on every error.
    pub fn try_insert_with<E>(
        &mut self,
        index: usize,
        count: usize,
        make: impl FnMut() -> Result<T, E>,
    ) -> Result<usize, ConstructError<E>> {
        // SAFETY: `try_fill_with` builds all slots or destroys its prefix before returning `Err`.
        unsafe { self.stage_at(index, count, |spare| slots::try_fill_with(spare, count, make)) }
    }

    /// Inserts every item of `items` at `index`, in order.
    ///
    /// Items are appended first and rotated into place once the input is
    /// exhausted. Growth doubles the capacity like `push`. If the input panics
    /// or growth fails, the appended items are destroyed again.
    ///
    /// # Errors
    ///
    /// Same as [`GrowVec::insert`].
    pub fn insert_iter(
        &mut self,
        index: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<usize, GrowVecError> {
        self.check_position(index)?;
        let items = items.into_iter();
        let old_len = self.len;
        let mut staged = TailRollback {
            vec: self,
            keep: old_len,
        };
        staged.vec.grow_amortized(items.size_hint().0)?;
        for item in items {
            staged.vec.push(item)?;
        }
        staged.keep = staged.vec.len;
        let count = staged.keep - old_len;
        staged.vec.as_mut_slice()[index..].rotate_right(count);
        Ok(index)
    }

    /// Removes the element at `index`, shifting the tail left.
    ///
    /// Returns `index`, which now holds the following element or equals `len()`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<usize, GrowVecError> {
        if index >= self.len {
            return Err(GrowVecError::IndexOutOfBounds {
                index,
                length: self.len,
            });
        }
        // SAFETY: `index < len`; the element is moved out, the tail closes the
        // gap, and the last slot stops being counted.
        let removed = unsafe {
            let slot = self.buf.slot(index);
            let removed = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            removed
        };
        self.len -= 1;
        drop(removed);
        Ok(index)
    }

    /// Removes the elements in `range`, shifting the tail left.
    ///
    /// Returns the start of the range, which now holds the first element
    /// after it or equals `len()`.
    ///
    /// # Errors
    ///
    /// Returns `GrowVecError::IndexOutOfBounds` if the range is reversed or
    /// ends past `len()`.
    pub fn erase_range(&mut self, range: impl RangeBounds<usize>) -> Result<usize, GrowVecError> {
        let length = self.len;
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => length,
        };
        if end > length {
            return Err(GrowVecError::IndexOutOfBounds { index: end, length });
        }
        if start > end {
            return Err(GrowVecError::IndexOutOfBounds {
                index: start,
                length,
            });
        }

        let removed = end - start;
        // a panicking destructor leaks the tail instead of double-dropping
        self.len = start;
        // SAFETY: `[start, end)` were live and are no longer counted; the tail
        // `[end, length)` is then moved down over them.
        unsafe {
            let first = self.buf.slot(start);
            slots::destroy_range(first, removed);
            ptr::copy(first.add(removed), first, length - end);
        }
        self.len = length - removed;
        Ok(start)
    }

    /// Exchanges storage, length and capacity with `other`.
    pub fn swap_with(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the contents out, leaving `self` empty with no storage.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Creates a `GrowVec` holding `count` clones of `value`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error. If a clone panics, everything built is
    /// destroyed and the storage released before unwinding continues.
    pub fn from_elem(count: usize, value: T) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        let buf = RawStorage::allocate(count)?;
        if count > 0 {
            // SAFETY: the fresh region has `count` unoccupied slots.
            let mut partial = unsafe { Partial::new(buf.as_ptr()) };
            for _ in 1..count {
                partial.push(value.clone());
            }
            partial.push(value);
            partial.commit();
        }
        Ok(Self { buf, len: count })
    }

    /// Creates a `GrowVec` holding clones of `items`, with capacity `items.len()`.
    ///
    /// # Errors
    ///
    /// Same as [`GrowVec::from_elem`].
    pub fn from_slice(items: &[T]) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        let buf = RawStorage::allocate(items.len())?;
        // SAFETY: the fresh region has `items.len()` unoccupied slots and cannot overlap `items`.
        unsafe { slots::copy_range(items, buf.as_ptr()) };
        Ok(Self {
            buf,
            len: items.len(),
        })
    }

    /// Collects `items` into a new `GrowVec`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error; the partially collected vector is dropped.
    pub fn try_from_iter(items: impl IntoIterator<Item = T>) -> Result<Self, GrowVecError> {
        let items = items.into_iter();
        let mut vec = Self::with_capacity(items.size_hint().0)?;
        for item in items {
            vec.push(item)?;
        }
        Ok(vec)
    }

    /// Deep copy with capacity equal to `len()`.
    ///
    /// # Errors
    ///
    /// Same as [`GrowVec::from_elem`]; `self` is never modified.
    pub fn try_clone(&self) -> Result<Self, GrowVecError>
    where
        T: Clone,
    {
        Self::from_slice(self.as_slice())
    }

    /// Replaces the contents with `count` clones of `value`.
    ///
    /// The replacement is built first, so `self` is unchanged on failure.
    ///
    /// # Errors
    ///
    /// Returns the allocation error.
    pub fn assign_n(&mut self, count: usize, value: &T) -> Result<(), GrowVecError>
    where
        T: Clone,
    {
        let mut replacement = Self::with_capacity(count)?;
        // SAFETY: the fresh region has `count` unoccupied slots.
        unsafe { slots::fill_range(replacement.buf.as_ptr(), count, value) };
        replacement.len = count;
        self.swap_with(&mut replacement);
        Ok(())
    }

    /// Replaces the contents with clones of `items`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error; `self` is unchanged.
    pub fn assign_from_slice(&mut self, items: &[T]) -> Result<(), GrowVecError>
    where
        T: Clone,
    {
        let mut replacement = Self::from_slice(items)?;
        self.swap_with(&mut replacement);
        Ok(())
    }

    /// Replaces the contents with the items of `items`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error; `self` is unchanged.
    pub fn assign_iter(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), GrowVecError> {
        let mut replacement = Self::try_from_iter(items)?;
        self.swap_with(&mut replacement);
        Ok(())
    }

    /// Appends clones of `items`.
    ///
    /// # Errors
    ///
    /// Returns the allocation error; `self` is unchanged.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), GrowVecError>
    where
        T: Clone,
    {
        self.insert_from_slice(self.len, items).map(|_| ())
    }

    /// Appends every item of `items`; on failure the appended items are removed again.
    ///
    /// # Errors
    ///
    /// Returns the allocation error; `self` keeps its elements.
    pub fn try_extend(&mut self, items: impl IntoIterator<Item = T>) -> Result<(), GrowVecError> {
        self.insert_iter(self.len, items).map(|_| ())
    }

    /// Read-only cursor at the first element.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Read-only cursor one past the last element.
    #[must_use]
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    /// Mutable cursor at the first element.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    /// Mutable cursor one past the last element.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, T> {
        let len = self.len;
        CursorMut::new(self.as_mut_slice(), len)
    }

    /// Front-to-back iteration; the iterator is also a [`Cursor`].
    #[must_use]
    pub fn iter(&self) -> Cursor<'_, T> {
        self.cursor()
    }

    /// Back-to-front iteration over the same cursor type.
    #[must_use]
    pub fn iter_rev(&self) -> Rev<Cursor<'_, T>> {
        Rev::new(self.cursor_end())
    }

    /// Hands the storage and length to an owning iterator without destroying anything.
    pub(crate) fn into_raw_parts(self) -> (RawStorage<T>, usize) {
        let mut this = ManuallyDrop::new(self);
        let buf = mem::replace(&mut this.buf, RawStorage::empty());
        (buf, this.len)
    }
}

/// Truncates back to `keep` unless disarmed by raising `keep` to the current length.
struct TailRollback<'a, T> {
    vec: &'a mut GrowVec<T>,
    keep: usize,
}

impl<T> Drop for TailRollback<'_, T> {
    fn drop(&mut self) {
        self.vec.truncate(self.keep);
    }
}

fn storage_only(err: ConstructError<Infallible>) -> GrowVecError {
    match err {
        ConstructError::Storage(err) => err,
        ConstructError::Element(never) => match never {},
    }
}

#[cold]
#[inline(never)]
pub(crate) fn storage_failure(err: &GrowVecError) -> ! {
    panic!("{err}")
}

impl<T> Drop for GrowVec<T> {
    fn drop(&mut self) {
        // SAFETY: `[0, len)` is live; `buf` releases the memory afterwards.
        unsafe { slots::destroy_range(self.buf.as_ptr(), self.len) };
    }
}

impl<T> Default for GrowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowVec<T> {
    /// # Panics
    ///
    /// Panics if the copy's storage cannot be allocated.
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| storage_failure(&err))
    }

    /// Copy-and-swap: `self` is untouched if the copy fails.
    fn clone_from(&mut self, source: &Self) {
        let mut copy = source.clone();
        self.swap_with(&mut copy);
    }
}

impl<T> Deref for GrowVec<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for GrowVec<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for GrowVec<T> {
    type Output = I::Output;

    /// # Panics
    ///
    /// Panics when out of bounds; use [`GrowVec::try_get`] for a checked result.
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.as_slice()[index]
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for GrowVec<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        &mut self.as_mut_slice()[index]
    }
}

impl<T: fmt::Debug> fmt::Debug for GrowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<GrowVec<U>> for GrowVec<T> {
    fn eq(&self, other: &GrowVec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for GrowVec<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for GrowVec<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for GrowVec<T> {}

impl<T: PartialOrd> PartialOrd for GrowVec<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_slice().partial_cmp(other.as_slice())
    }
}

impl<T: Ord> Ord for GrowVec<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<T: Hash> Hash for GrowVec<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T, const N: usize> TryFrom<[T; N]> for GrowVec<T> {
    type Error = GrowVecError;

    fn try_from(items: [T; N]) -> Result<Self, Self::Error> {
        let buf = RawStorage::allocate(N)?;
        let items = ManuallyDrop::new(items);
        // SAFETY: ownership of all `N` elements moves into the fresh region;
        // the array is never dropped.
        unsafe { slots::move_range(items.as_ptr(), buf.as_ptr(), N) };
        Ok(Self { buf, len: N })
    }
}

impl<T: Clone> TryFrom<&[T]> for GrowVec<T> {
    type Error = GrowVecError;

    fn try_from(items: &[T]) -> Result<Self, Self::Error> {
        Self::from_slice(items)
    }
}
