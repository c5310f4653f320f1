use alloc::alloc::{alloc, dealloc, handle_alloc_error, realloc};
use core::{alloc::Layout, mem, ptr::NonNull};

/// Owned, uninitialized storage for `capacity` values of `T`.
///
/// Dropping a `RawBuffer` releases the allocation but never drops the values
/// stored in it. Tracking which slots are live is the owner's job.
pub(super) struct RawBuffer<T> {
    ptr: NonNull<T>,
    capacity: usize,
}

// SAFETY: the buffer uniquely owns its allocation, so moving it to another
// thread is as safe as moving the `T`s it holds.
unsafe impl<T: Send> Send for RawBuffer<T> {}
// SAFETY: shared access only hands out the pointer; all reads go through the owner.
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// A buffer with no slots and no allocation.
    pub(super) const fn empty() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    pub(super) fn with_capacity(capacity: usize) -> Self {
        let mut buffer = Self::empty();
        buffer.resize(capacity);
        buffer
    }

    pub(super) const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pointer to the first slot. Never null, even when nothing is allocated.
    pub(super) const fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves the storage to exactly `new_capacity` slots.
    ///
    /// The first `min(capacity, new_capacity)` slots keep their contents. The
    /// caller must have already moved or dropped anything stored past
    /// `new_capacity`.
    ///
    /// Aborts through [`handle_alloc_error`] if the allocator fails.
    pub(super) fn resize(&mut self, new_capacity: usize) {
        if new_capacity == self.capacity {
            return;
        }

        if Self::IS_ZST {
            self.capacity = new_capacity;
            return;
        }

        if new_capacity == 0 {
            self.release();
            return;
        }

        let new_layout = layout_for::<T>(new_capacity);
        let raw = if self.capacity == 0 {
            // SAFETY: `new_layout` has a non-zero size because `T` is not a ZST
            // and `new_capacity > 0`.
            unsafe { alloc(new_layout) }
        } else {
            let old_layout = layout_for::<T>(self.capacity);
            // SAFETY: `ptr` was allocated by the global allocator with
            // `old_layout`, and the new size is non-zero and was validated by
            // `Layout::array`.
            unsafe { realloc(self.ptr.as_ptr().cast(), old_layout, new_layout.size()) }
        };

        self.ptr = NonNull::new(raw.cast()).unwrap_or_else(|| handle_alloc_error(new_layout));
        self.capacity = new_capacity;
    }

    fn release(&mut self) {
        if !Self::IS_ZST && self.capacity > 0 {
            // SAFETY: a non-zero capacity of a sized `T` always means `ptr`
            // came from the global allocator with exactly this layout.
            unsafe { dealloc(self.ptr.as_ptr().cast(), layout_for::<T>(self.capacity)) };
        }
        self.ptr = NonNull::dangling();
        self.capacity = 0;
    }
}

fn layout_for<T>(capacity: usize) -> Layout {
    Layout::array::<T>(capacity)
        .unwrap_or_else(|_| panic!("capacity overflow: cannot lay out {capacity} slots"))
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}
