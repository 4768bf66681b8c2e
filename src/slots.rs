//! Element lifetime primitives.
//!
//! These are the only places that construct or destroy elements. Every
//! bulk helper builds into a [`Partial`] region, so a panic or an error
//! in the middle destroys exactly the prefix that was built and nothing else.

use core::ptr;

/// Moves `value` into an unoccupied slot.
///
/// # Safety
///
/// `slot` is valid for writes and does not hold a live element.
#[inline]
pub(crate) unsafe fn construct_at<T>(slot: *mut T, value: T) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::write(slot, value) };
}

/// Destroys the live elements in `[first, first + count)`, tail first.
///
/// # Safety
///
/// Every slot in the range holds a live element, and none is used afterwards.
pub(crate) unsafe fn destroy_range<T>(first: *mut T, count: usize) {
    let mut remaining = count;
    while remaining > 0 {
        remaining -= 1;
        // SAFETY: `remaining < count`, so the slot is inside the live range.
        unsafe { ptr::drop_in_place(first.add(remaining)) };
    }
}

/// Bitwise relocation of `count` elements into a disjoint region.
///
/// Cannot fail. Afterwards the source slots are raw memory again.
///
/// # Safety
///
/// Source slots are live, destination slots are unoccupied, regions do not overlap.
#[inline]
pub(crate) unsafe fn move_range<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy_nonoverlapping(src, dst, count) };
}

/// A region being filled front to back.
///
/// Until [`Partial::commit`] is called, dropping it destroys the elements
/// built so far.
pub(crate) struct Partial<T> {
    start: *mut T,
    built: usize,
}

impl<T> Partial<T> {
    /// # Safety
    ///
    /// `start` is valid for writes for as many slots as will be pushed, and
    /// those slots are unoccupied.
    #[inline]
    pub(crate) unsafe fn new(start: *mut T) -> Self {
        Self { start, built: 0 }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        // SAFETY: `new`'s contract covers the next slot.
        unsafe { construct_at(self.start.add(self.built), value) };
        self.built += 1;
    }

    /// Keeps the built elements alive and returns how many there are.
    #[inline]
    pub(crate) fn commit(self) -> usize {
        let built = self.built;
        core::mem::forget(self);
        built
    }
}

impl<T> Drop for Partial<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `built` slots from `start` were constructed by `push`.
        unsafe { destroy_range(self.start, self.built) };
    }
}

/// Fills `count` slots at `dst` with clones of `value`.
///
/// # Safety
///
/// `dst` is valid for `count` unoccupied slots.
pub(crate) unsafe fn fill_range<T: Clone>(dst: *mut T, count: usize, value: &T) {
    // SAFETY: forwarded from the caller.
    let mut partial = unsafe { Partial::new(dst) };
    for _ in 0..count {
        partial.push(value.clone());
    }
    partial.commit();
}

/// Clones every element of `src` into the slots at `dst`.
///
/// # Safety
///
/// `dst` is valid for `src.len()` unoccupied slots and does not overlap `src`.
pub(crate) unsafe fn copy_range<T: Clone>(src: &[T], dst: *mut T) {
    // SAFETY: forwarded from the caller.
    let mut partial = unsafe { Partial::new(dst) };
    for item in src {
        partial.push(item.clone());
    }
    partial.commit();
}

/// Builds `count` elements from a fallible closure.
///
/// On the first error the already-built prefix is destroyed and the error returned.
///
/// # Safety
///
/// `dst` is valid for `count` unoccupied slots.
pub(crate) unsafe fn try_fill_with<T, E>(
    dst: *mut T,
    count: usize,
    mut make: impl FnMut() -> Result<T, E>,
) -> Result<(), E> {
    // SAFETY: forwarded from the caller.
    let mut partial = unsafe { Partial::new(dst) };
    for _ in 0..count {
        partial.push(make()?);
    }
    partial.commit();
    Ok(())
}

/// Writes the local length back on drop.
///
/// Used where the guarantee is basic: elements built before a failure stay live.
pub(crate) struct LenGuard<'a> {
    len: &'a mut usize,
    local: usize,
}

impl<'a> LenGuard<'a> {
    #[inline]
    pub(crate) fn new(len: &'a mut usize) -> Self {
        let local = *len;
        Self { len, local }
    }

    #[inline]
    pub(crate) fn current(&self) -> usize {
        self.local
    }

    #[inline]
    pub(crate) fn increment(&mut self) {
        self.local += 1;
    }
}

impl Drop for LenGuard<'_> {
    fn drop(&mut self) {
        *self.len = self.local;
    }
}
