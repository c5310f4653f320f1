use core::{fmt, ptr, slice};

use super::raw::RawBuffer;

/// By-value iterator over a [`DynamicArray`](super::DynamicArray).
///
/// Owns the array's storage; elements not yet yielded are dropped together
/// with the iterator.
pub struct IntoIter<T> {
    pub(super) buffer: RawBuffer<T>,
    pub(super) start: usize,
    pub(super) end: usize,
}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots in `start..end` are initialized and not yet moved out.
        unsafe {
            slice::from_raw_parts(
                self.buffer.as_ptr().add(self.start),
                self.end - self.start,
            )
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        // SAFETY: `start < end`, so the slot is live; advancing `start` marks
        // it as moved out.
        let item = unsafe { ptr::read(self.buffer.as_ptr().add(self.start)) };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.start >= self.end {
            return None;
        }

        self.end -= 1;
        // SAFETY: the slot at the old `end - 1` is live and now excluded from the range.
        Some(unsafe { ptr::read(self.buffer.as_ptr().add(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = ptr::slice_from_raw_parts_mut(
            // SAFETY: `start <= end <= capacity`, so the offset stays in bounds.
            unsafe { self.buffer.as_ptr().add(self.start) },
            self.end - self.start,
        );
        // SAFETY: every slot in `start..end` is still initialized. The storage
        // itself is released when `buffer` drops.
        unsafe { ptr::drop_in_place(remaining) };
    }
}
