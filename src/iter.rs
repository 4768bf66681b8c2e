use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use crate::core::{storage_failure, GrowVec};
use crate::cursor::Cursor;
use crate::raw::RawStorage;
use crate::slots;

/// Owning iterator over the elements of a `GrowVec`
///
/// Elements not yet yielded are destroyed when the iterator is dropped.
pub struct IntoIter<T> {
    buf: RawStorage<T>,
    front: usize,
    back: usize,
}

impl<T> IntoIter<T> {
    /// Elements not yet yielded, front to back.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live and inside the region.
        unsafe { slice::from_raw_parts(self.buf.slot(self.front), self.back - self.front) }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: `front < back`, so the slot is live; it stops being counted right after.
        let item = unsafe { ptr::read(self.buf.slot(self.front)) };
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: slot `back` was live and is no longer counted.
        Some(unsafe { ptr::read(self.buf.slot(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // SAFETY: `[front, back)` is still live; the region is released by `buf` afterwards.
        unsafe { slots::destroy_range(self.buf.slot(self.front), self.back - self.front) };
    }
}

impl<T> IntoIterator for GrowVec<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        let (buf, len) = self.into_raw_parts();
        IntoIter {
            buf,
            front: 0,
            back: len,
        }
    }
}

impl<'a, T> IntoIterator for &'a GrowVec<T> {
    type Item = &'a T;
    type IntoIter = Cursor<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut GrowVec<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T> FromIterator<T> for GrowVec<T> {
    /// # Panics
    ///
    /// Panics if storage cannot be allocated; use [`GrowVec::try_from_iter`] to handle it.
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        GrowVec::try_from_iter(items).unwrap_or_else(|err| storage_failure(&err))
    }
}

impl<T> Extend<T> for GrowVec<T> {
    /// # Panics
    ///
    /// Panics if storage cannot grow; use [`GrowVec::try_extend`] to handle it.
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        if let Err(err) = self.try_extend(items) {
            storage_failure(&err);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for GrowVec<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, items: I) {
        self.extend(items.into_iter().copied());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_partially_consumed_iterator_drops_rest() {
        let token = Rc::new(());
        let vec: GrowVec<Rc<()>> = (0..4).map(|_| Rc::clone(&token)).collect();
        assert_eq!(Rc::strong_count(&token), 5);

        let mut iter = vec.into_iter();
        let first = iter.next();
        let last = iter.next_back();
        assert_eq!(iter.as_slice().len(), 2);
        drop(iter);

        assert_eq!(Rc::strong_count(&token), 3);
        drop(first);
        drop(last);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_into_iter_order() {
        let vec = GrowVec::try_from([1, 2, 3, 4]).unwrap();
        let mut iter = vec.into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_extend_by_reference() {
        let mut vec = GrowVec::try_from([1u8]).unwrap();
        vec.extend(&[2u8, 3]);
        assert_eq!(vec, [1, 2, 3]);
    }
}
