//! Random-access positions into a `GrowVec`.
//!
//! A position ranges over `[0, end]`, where `end` is one past the last
//! element. Cursors borrow the vector, so any call that could reallocate or
//! shift elements cannot run while a cursor is alive. To keep a location
//! across such a call, keep its `position()` instead.

use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Offset arithmetic, distance and ordering over a contiguous run of elements.
pub trait RandomAccess {
    type Item;

    /// Current position in `[0, end()]`.
    fn position(&self) -> usize;

    /// One past the last addressable position.
    fn end(&self) -> usize;

    /// Moves to an absolute position.
    ///
    /// # Panics
    ///
    /// Panics if `position > end()`.
    fn seek(&mut self, position: usize);

    /// Element at an absolute position, `None` at or past `end()`.
    fn element(&self, position: usize) -> Option<&Self::Item>;

    /// Address identifying the underlying run; equal for cursors over the same vector.
    fn origin(&self) -> *const Self::Item;

    /// Element under the cursor.
    fn current(&self) -> Option<&Self::Item> {
        self.element(self.position())
    }

    /// Moves by `n` positions, backwards when negative.
    ///
    /// # Panics
    ///
    /// Panics if the target falls outside `[0, end()]`.
    fn advance(&mut self, n: isize) {
        let target = offset_position(self.position(), n, self.end());
        self.seek(target);
    }

    /// Signed number of steps from `self` to `other`.
    fn distance_to(&self, other: &Self) -> isize
    where
        Self: Sized,
    {
        signed(other.position()) - signed(self.position())
    }
}

/// Mutable access through a [`RandomAccess`] cursor.
pub trait RandomAccessMut: RandomAccess {
    fn element_mut(&mut self, position: usize) -> Option<&mut Self::Item>;

    fn current_mut(&mut self) -> Option<&mut Self::Item> {
        let position = self.position();
        self.element_mut(position)
    }
}

#[allow(clippy::cast_possible_wrap)]
fn signed(position: usize) -> isize {
    // positions never exceed `isize::MAX`: no allocation is larger
    position as isize
}

fn offset_position(position: usize, n: isize, end: usize) -> usize {
    let target = position.checked_add_signed(n);
    assert!(
        matches!(target, Some(target) if target <= end),
        "Cursor offset {n} from position {position} leaves [0, {end}]"
    );
    target.unwrap_or(position)
}

/// Best-effort identity: vectors holding no memory (empty, or with zero-sized
/// elements) share one dangling address and cannot be told apart.
fn same_run<C: RandomAccess>(a: &C, b: &C) -> bool {
    core::ptr::eq(a.origin(), b.origin()) && a.end() == b.end()
}

/// Read-only cursor. Also iterates front to back from its position.
///
/// Compare cursors with the operators (`==`, `<`, `-`) or through
/// [`RandomAccess::position`]. The method forms `a.eq(b)`, `a.lt(b)` and
/// `a.partial_cmp(b)` resolve to [`Iterator`] and compare the remaining
/// elements instead; call `PartialOrd::partial_cmp(&a, &b)` explicitly when
/// the `Option<Ordering>` is needed.
///
/// ```
/// # use growvec::GrowVec;
/// let vec = GrowVec::try_from([7, 7]).unwrap();
/// let (first, second) = (vec.cursor(), vec.cursor() + 1);
/// assert!(first < second);
/// assert_eq!(
///     PartialOrd::partial_cmp(&first, &second),
///     Some(core::cmp::Ordering::Less)
/// );
/// // element-wise: `[7, 7]` against `[7]`
/// assert_eq!(first.partial_cmp(second), Some(core::cmp::Ordering::Greater));
/// ```
pub struct Cursor<'a, T> {
    items: &'a [T],
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(items: &'a [T], position: usize) -> Self {
        debug_assert!(position <= items.len());
        Self { items, position }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Element under the cursor, `None` at the end.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.items.get(self.position)
    }

    /// Element `offset` positions away, like `it[offset]`.
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&'a T> {
        let target = self.position.checked_add_signed(offset)?;
        self.items.get(target)
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position)
            .field("end", &self.items.len())
            .finish()
    }
}

impl<T> RandomAccess for Cursor<'_, T> {
    type Item = T;

    fn position(&self) -> usize {
        self.position
    }

    fn end(&self) -> usize {
        self.items.len()
    }

    fn seek(&mut self, position: usize) {
        assert!(
            position <= self.items.len(),
            "Cursor position {} beyond end {}",
            position,
            self.items.len()
        );
        self.position = position;
    }

    fn element(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    fn origin(&self) -> *const T {
        self.items.as_ptr()
    }
}

impl<'a, T> Iterator for Cursor<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.get(self.position)?;
        self.position += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.items.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for Cursor<'_, T> {}

impl<T> FusedIterator for Cursor<'_, T> {}

/// Cursor that can write through. Widens into a [`Cursor`] with `From`.
pub struct CursorMut<'a, T> {
    items: &'a mut [T],
    position: usize,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(items: &'a mut [T], position: usize) -> Self {
        debug_assert!(position <= items.len());
        Self { items, position }
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn get(&self) -> Option<&T> {
        self.items.get(self.position)
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.items.get_mut(self.position)
    }

    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&T> {
        let target = self.position.checked_add_signed(offset)?;
        self.items.get(target)
    }

    pub fn peek_mut(&mut self, offset: isize) -> Option<&mut T> {
        let target = self.position.checked_add_signed(offset)?;
        self.items.get_mut(target)
    }

    /// Consumes the cursor, keeping the mutable borrow of the element under it.
    #[must_use]
    pub fn into_mut(self) -> Option<&'a mut T> {
        self.items.get_mut(self.position)
    }

    /// Read-only view at the same position, borrowing this cursor.
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(&*self.items, self.position)
    }
}

impl<'a, T> From<CursorMut<'a, T>> for Cursor<'a, T> {
    fn from(cursor: CursorMut<'a, T>) -> Self {
        Cursor::new(cursor.items, cursor.position)
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("position", &self.position)
            .field("end", &self.items.len())
            .finish()
    }
}

impl<T> RandomAccess for CursorMut<'_, T> {
    type Item = T;

    fn position(&self) -> usize {
        self.position
    }

    fn end(&self) -> usize {
        self.items.len()
    }

    fn seek(&mut self, position: usize) {
        assert!(
            position <= self.items.len(),
            "Cursor position {} beyond end {}",
            position,
            self.items.len()
        );
        self.position = position;
    }

    fn element(&self, position: usize) -> Option<&T> {
        self.items.get(position)
    }

    fn origin(&self) -> *const T {
        self.items.as_ptr()
    }
}

impl<T> RandomAccessMut for CursorMut<'_, T> {
    fn element_mut(&mut self, position: usize) -> Option<&mut T> {
        self.items.get_mut(position)
    }
}

/// Walks a forward cursor backwards.
///
/// Reverse position `0` is the last element; reverse position `end()` is
/// one before the first. The wrapped cursor keeps the forward position
/// just past the element being viewed.
#[derive(Clone, Copy, Debug)]
pub struct Rev<C> {
    base: C,
}

impl<C: RandomAccess> Rev<C> {
    /// Wraps `base`; the reverse cursor views the element just before it.
    pub fn new(base: C) -> Self {
        Self { base }
    }

    /// The forward cursor, positioned just past the viewed element.
    pub fn base(&self) -> &C {
        &self.base
    }

    pub fn into_base(self) -> C {
        self.base
    }

    /// Reverse position: `0` views the last element.
    #[must_use]
    pub fn position(&self) -> usize {
        RandomAccess::position(self)
    }
}

impl<'a, T> Rev<Cursor<'a, T>> {
    /// Element under the reverse cursor.
    #[must_use]
    pub fn get(&self) -> Option<&'a T> {
        self.base.peek(-1)
    }
}

impl<C: RandomAccess> RandomAccess for Rev<C> {
    type Item = C::Item;

    fn position(&self) -> usize {
        self.base.end() - self.base.position()
    }

    fn end(&self) -> usize {
        self.base.end()
    }

    fn seek(&mut self, position: usize) {
        let end = self.base.end();
        assert!(
            position <= end,
            "Cursor position {position} beyond end {end}"
        );
        self.base.seek(end - position);
    }

    fn element(&self, position: usize) -> Option<&C::Item> {
        let end = self.base.end();
        if position >= end {
            return None;
        }
        self.base.element(end - 1 - position)
    }

    fn origin(&self) -> *const C::Item {
        self.base.origin()
    }
}

impl<C: RandomAccessMut> RandomAccessMut for Rev<C> {
    fn element_mut(&mut self, position: usize) -> Option<&mut C::Item> {
        let end = self.base.end();
        if position >= end {
            return None;
        }
        self.base.element_mut(end - 1 - position)
    }
}

impl<'a, T> Iterator for Rev<Cursor<'a, T>> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.get()?;
        self.base.position -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.base.position, Some(self.base.position))
    }
}

impl<T> ExactSizeIterator for Rev<Cursor<'_, T>> {}

impl<T> FusedIterator for Rev<Cursor<'_, T>> {}

macro_rules! cursor_offsets {
    ($ty:ty, [$($generics:tt)*]) => {
        impl<$($generics)*> AddAssign<isize> for $ty {
            fn add_assign(&mut self, n: isize) {
                self.advance(n);
            }
        }

        impl<$($generics)*> SubAssign<isize> for $ty {
            fn sub_assign(&mut self, n: isize) {
                self.advance(-n);
            }
        }

        impl<$($generics)*> Add<isize> for $ty {
            type Output = Self;

            fn add(mut self, n: isize) -> Self {
                self.advance(n);
                self
            }
        }

        impl<$($generics)*> Sub<isize> for $ty {
            type Output = Self;

            fn sub(mut self, n: isize) -> Self {
                self.advance(-n);
                self
            }
        }
    };
}

// Shared cursors only: two `CursorMut` over one vector cannot coexist.
macro_rules! cursor_ordering {
    ($ty:ty, [$($generics:tt)*]) => {
        impl<$($generics)*> Sub for $ty {
            type Output = isize;

            /// Distance `self - other`, like subtracting two iterators.
            fn sub(self, other: Self) -> isize {
                other.distance_to(&self)
            }
        }

        impl<$($generics)*> PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                same_run(self, other)
                    && RandomAccess::position(self) == RandomAccess::position(other)
            }
        }

        impl<$($generics)*> PartialOrd for $ty {
            /// `None` for cursors over different vectors that hold memory.
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                if !same_run(self, other) {
                    return None;
                }
                Some(RandomAccess::position(self).cmp(&RandomAccess::position(other)))
            }
        }
    };
}

cursor_offsets!(Cursor<'_, T>, [T]);
cursor_offsets!(CursorMut<'_, T>, [T]);
cursor_offsets!(Rev<C>, [C: RandomAccess]);

cursor_ordering!(Cursor<'_, T>, [T]);
cursor_ordering!(Rev<C>, [C: RandomAccess]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_position_within_bounds() {
        assert_eq!(offset_position(2, 3, 5), 5);
        assert_eq!(offset_position(2, -2, 5), 0);
    }

    #[test]
    #[should_panic(expected = "Cursor offset -3 from position 2 leaves [0, 5]")]
    fn test_offset_position_before_start() {
        let _ = offset_position(2, -3, 5);
    }

    #[test]
    fn test_rev_positions_mirror_forward() {
        let items = [10, 20, 30];
        let rev = Rev::new(Cursor::new(&items, 3));
        assert_eq!(RandomAccess::position(&rev), 0);
        assert_eq!(rev.get(), Some(&30));
        assert_eq!(rev.element(2), Some(&10));
        assert_eq!(rev.element(3), None);
    }
}
