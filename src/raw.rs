//! Raw slot storage: obtains and releases memory, never touches elements.

use alloc::alloc::{alloc, dealloc};
use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ptr::NonNull;

use tracing::debug;

use crate::error::GrowVecError;

/// An owned region of `capacity` uninitialized slots of `T`.
///
/// Dropping the region releases the memory only. Whoever constructed
/// elements inside it must destroy them first.
pub(crate) struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the region is exclusively owned, so it is as thread-safe as `T`.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only ever hands out `&T`.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> RawStorage<T> {
    const IS_ZST: bool = size_of::<T>() == 0;

    /// A region with no slots and no memory behind it.
    pub(crate) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _owns: PhantomData,
        }
    }

    /// Largest slot count whose byte size stays within `isize::MAX`.
    pub(crate) const fn max_len() -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            isize::MAX as usize / size_of::<T>()
        }
    }

    /// Obtains raw memory for exactly `slots` elements. Nothing is constructed.
    ///
    /// Zero-sized element types and `slots == 0` never reach the allocator.
    ///
    /// # Errors
    ///
    /// - `GrowVecError::CapacityOverflow` if `slots` exceeds [`Self::max_len`]
    /// - `GrowVecError::AllocationFailed` if the allocator returns null
    pub(crate) fn allocate(slots: usize) -> Result<Self, GrowVecError> {
        if slots == 0 {
            return Ok(Self::empty());
        }
        if slots > Self::max_len() {
            debug!(target: "growvec", requested = slots, max = Self::max_len(), "slot request rejected");
            return Err(GrowVecError::CapacityOverflow {
                requested: slots,
                max: Self::max_len(),
            });
        }
        if Self::IS_ZST {
            return Ok(Self {
                ptr: NonNull::dangling(),
                capacity: slots,
                _owns: PhantomData,
            });
        }

        let layout = Layout::array::<T>(slots).map_err(|_| GrowVecError::CapacityOverflow {
            requested: slots,
            max: Self::max_len(),
        })?;
        // SAFETY: `layout` has a non-zero size because `slots > 0` and `T` is not zero-sized.
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw.cast::<T>()) else {
            debug!(target: "growvec", bytes = layout.size(), "allocator returned null");
            return Err(GrowVecError::AllocationFailed {
                bytes: layout.size(),
            });
        };

        Ok(Self {
            ptr,
            capacity: slots,
            _owns: PhantomData,
        })
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Address of slot 0. Dangling but aligned when no memory is held.
    #[inline]
    pub(crate) const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Address of slot `index`.
    ///
    /// # Safety
    ///
    /// `index <= self.capacity()`.
    #[inline]
    pub(crate) unsafe fn slot(&self, index: usize) -> *mut T {
        debug_assert!(index <= self.capacity);
        // SAFETY: the caller keeps `index` within the region or one past its end.
        unsafe { self.ptr.as_ptr().add(index) }
    }

    /// `true` when real memory is held.
    #[inline]
    pub(crate) const fn is_allocated(&self) -> bool {
        self.capacity != 0 && !Self::IS_ZST
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if !self.is_allocated() {
            return;
        }
        // SAFETY: the same layout was computable when the region was allocated.
        let layout = unsafe {
            Layout::from_size_align_unchecked(
                size_of::<T>() * self.capacity,
                core::mem::align_of::<T>(),
            )
        };
        // SAFETY: `ptr` came from `alloc` with exactly this layout and is released once.
        unsafe { dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_slots_hold_no_memory() {
        let storage = RawStorage::<u64>::allocate(0).unwrap();
        assert_eq!(storage.capacity(), 0);
        assert!(!storage.is_allocated());
    }

    #[test]
    fn test_allocate_exact_slot_count() {
        let storage = RawStorage::<u32>::allocate(17).unwrap();
        assert_eq!(storage.capacity(), 17);
        assert!(storage.is_allocated());
        assert_eq!(storage.as_ptr() as usize % core::mem::align_of::<u32>(), 0);
    }

    #[test]
    fn test_reject_unaddressable_request() {
        let err = RawStorage::<u64>::allocate(usize::MAX).err().unwrap();
        assert_eq!(
            err,
            GrowVecError::CapacityOverflow {
                requested: usize::MAX,
                max: isize::MAX as usize / 8,
            }
        );
    }

    #[test]
    fn test_max_len_just_past_limit() {
        let max = RawStorage::<[u8; 16]>::max_len();
        assert!(RawStorage::<[u8; 16]>::allocate(max + 1).is_err());
    }

    #[test]
    fn test_zero_sized_elements_never_allocate() {
        let storage = RawStorage::<()>::allocate(1_000).unwrap();
        assert_eq!(storage.capacity(), 1_000);
        assert!(!storage.is_allocated());
        assert_eq!(RawStorage::<()>::max_len(), usize::MAX);
    }
}
