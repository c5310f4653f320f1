use core::{
    cmp::Ordering,
    mem,
    ops::{Index, IndexMut},
    ptr, slice,
};

use tracing::{debug, trace};

use crate::errors::{ArrayError, Result};

use raw::RawBuffer;

pub use iter::IntoIter;

mod display;
mod iter;
mod raw;

/// Growth step used when the caller has no size estimate.
pub const DEFAULT_GROWTH_STEP: usize = 5;

/// A contiguous, growable array whose capacity changes in fixed steps.
///
/// The growth step is the capacity requested at construction. Every mutation
/// that changes the length first rebalances the buffer: a full buffer grows by
/// one step, and a buffer with more than one step of slack shrinks by one step.
/// Capacity therefore never moves by more than one step per mutation.
pub struct DynamicArray<T> {
    buffer: RawBuffer<T>,
    length: usize,
    growth_step: usize,
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with [`DEFAULT_GROWTH_STEP`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_growth_step(DEFAULT_GROWTH_STEP)
    }

    /// Creates an empty array with `growth_step` slots allocated.
    ///
    /// The same number is used as the grow/shrink increment for the lifetime
    /// of the array. A step of zero allocates nothing and then grows one slot
    /// at a time.
    ///
    /// # Panics
    ///
    /// Panics if `growth_step` slots of `T` overflow `isize::MAX` bytes.
    /// Aborts if the allocator fails.
    #[must_use]
    pub fn with_growth_step(growth_step: usize) -> Self {
        Self {
            buffer: RawBuffer::with_capacity(growth_step),
            length: 0,
            growth_step: growth_step.max(1),
        }
    }

    /// Creates an array holding `count` clones of `value`.
    #[must_use]
    pub fn repeating(value: T, count: usize) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_growth_step(count);
        for _ in 0..count {
            array.append(value.clone());
        }
        array
    }

    /// Drops every element and releases the storage.
    pub fn deinit(self) {
        debug!(
            length = self.length,
            capacity = self.capacity(),
            "deinitializing dynamic array"
        );
    }

    /// Drops the current contents and storage, then starts over as an empty
    /// array with a new growth step.
    pub fn reinit(&mut self, growth_step: usize) {
        debug!(
            length = self.length,
            capacity = self.capacity(),
            growth_step,
            "reinitializing dynamic array"
        );
        *self = Self::with_growth_step(growth_step);
    }

    /// A `bool` value indicating whether the array is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// The number of elements in the array.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// The number of elements the array can hold before it has to grow.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// The fixed amount capacity grows or shrinks by.
    #[must_use]
    pub const fn growth_step(&self) -> usize {
        self.growth_step
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `length` slots are initialized, and the pointer is
        // non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buffer.as_ptr(), self.length) }
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`, and `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.buffer.as_ptr(), self.length) }
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a reference to the first element, if available.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns a reference to the last element, if available.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Grows or shrinks the buffer by one growth step if it is out of balance
    /// with the current length.
    ///
    /// Every length-changing operation already calls this; it is public so
    /// callers can settle the capacity after bulk work.
    pub fn rebalance(&mut self) {
        self.rebalance_for(self.length);
    }

    /// Adjusts capacity by at most one step for a buffer that is about to
    /// hold `length` elements.
    fn rebalance_for(&mut self, length: usize) {
        let capacity = self.capacity();
        if length >= capacity {
            let grown = capacity.saturating_add(self.growth_step);
            trace!(
                length,
                capacity,
                grown,
                growth_step = self.growth_step,
                "growing dynamic array"
            );
            self.buffer.resize(grown);
        } else if length.saturating_add(self.growth_step) < capacity {
            let shrunk = capacity - self.growth_step;
            trace!(
                length,
                capacity,
                shrunk,
                growth_step = self.growth_step,
                "shrinking dynamic array"
            );
            self.buffer.resize(shrunk);
        }
    }

    /// Checks `index < limit`, reporting the current length on failure.
    fn check_bounds(&self, index: usize, limit: usize) -> Result<()> {
        if index < limit {
            Ok(())
        } else {
            trace!(index, length = self.length, "index out of bounds");
            Err(ArrayError::OutOfBounds {
                index,
                length: self.length,
            })
        }
    }

    /// Adds a new element at the end of the array and returns its index.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::DynamicArray;
    ///
    /// let mut array = DynamicArray::with_growth_step(2);
    /// assert_eq!(array.append('a'), 0);
    /// assert_eq!(array.append('b'), 1);
    /// assert_eq!(array.append('c'), 2);
    /// assert_eq!(array.capacity(), 4);
    /// ```
    pub fn append(&mut self, value: T) -> usize {
        self.rebalance();

        let index = self.length;
        // SAFETY: rebalancing guarantees `length < capacity`.
        unsafe { ptr::write(self.buffer.as_ptr().add(index), value) };
        self.length += 1;
        index
    }

    /// Returns the element at `index`.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.check_bounds(index, self.length)?;
        Ok(&self.as_slice()[index])
    }

    /// Returns the element at `index` mutably.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        self.check_bounds(index, self.length)?;
        Ok(&mut self.as_mut_slice()[index])
    }

    /// Inserts `value` at `index`, shifting everything from `index` onwards
    /// one slot to the right.
    ///
    /// `index == len()` is accepted and appends.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index > len()`. The array is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::dynamic_array;
    ///
    /// let mut array = dynamic_array![1, 2, 4];
    /// array.insert(2, 3).unwrap();
    /// assert_eq!(array.as_slice(), &[1, 2, 3, 4]);
    /// assert!(array.insert(9, 0).is_err());
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.check_bounds(index, self.length + 1)?;
        self.rebalance_for(self.length + 1);

        // SAFETY: rebalancing for `length + 1` leaves room for one more slot,
        // and `index <= length` keeps both ranges inside the buffer.
        unsafe {
            let slot = self.buffer.as_ptr().add(index);
            ptr::copy(slot, slot.add(1), self.length - index);
            ptr::write(slot, value);
        }
        self.length += 1;
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the elements
    /// after it one slot to the left.
    ///
    /// # Errors
    ///
    /// [`ArrayError::OutOfBounds`] if `index >= len()`. The array is left untouched.
    pub fn delete(&mut self, index: usize) -> Result<T> {
        self.check_bounds(index, self.length)?;
        Ok(self.take_at(index))
    }

    /// Moves the element at `index` out and closes the gap. `index` must be
    /// below `length`.
    fn take_at(&mut self, index: usize) -> T {
        debug_assert!(index < self.length);

        // SAFETY: `index < length`, so the slot is live, and the tail being
        // moved is the `length - 1 - index` live slots after it.
        let value = unsafe {
            let slot = self.buffer.as_ptr().add(index);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.length - 1 - index);
            value
        };
        self.length -= 1;
        self.rebalance();
        value
    }

    /// Removes every element equal to `value`, keeping the order of the rest.
    /// Returns how many elements were removed.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let mut removed = 0;
        let mut index = 0;
        while index < self.length {
            if self.as_slice()[index] == *value {
                // The next element slid into `index`, so look at it again.
                drop(self.take_at(index));
                removed += 1;
            } else {
                index += 1;
            }
        }
        removed
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`ArrayError::Empty`] if the array has no elements.
    pub fn pop(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(ArrayError::Empty);
        }
        Ok(self.take_at(self.length - 1))
    }

    /// Returns the number of elements equal to `value`.
    pub fn count_of(&self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.iter().filter(|element| *element == value).count()
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.first_index_of(value).is_some()
    }

    /// Index of the leftmost element equal to `value`.
    pub fn first_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == value)
    }

    /// Index of the rightmost element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|element| element == value)
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        let length = self.length;
        let elements = self.as_mut_slice();
        for i in 0..length / 2 {
            elements.swap(i, length - 1 - i);
        }
    }

    /// Sorts the elements in ascending order.
    ///
    /// The sort is stable. Incomparable pairs (such as `NaN`) compare as
    /// equal, which is not a consistent order: when they are present the
    /// sort still returns with every element kept, but the order is
    /// unspecified.
    pub fn sort(&mut self)
    where
        T: PartialOrd,
    {
        self.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }

    /// Sorts the elements in descending order.
    ///
    /// This is an ascending sort followed by [`reverse`](Self::reverse), so
    /// equal elements end up in reverse of their original order.
    pub fn sort_descending(&mut self)
    where
        T: PartialOrd,
    {
        self.sort();
        self.reverse();
    }

    /// Sorts the elements with `compare`, stably.
    ///
    /// Each element is walked back into the sorted prefix before it, one swap
    /// at a time, and stops at the front at the latest. The number of
    /// comparisons is bounded by the length alone, so this returns even when
    /// `compare` is not a total order; the resulting order is then
    /// unspecified.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let elements = self.as_mut_slice();
        for i in 1..elements.len() {
            let mut j = i;
            while j > 0 && compare(&elements[j - 1], &elements[j]) == Ordering::Greater {
                elements.swap(j - 1, j);
                j -= 1;
            }
        }
    }

    /// Replaces this array with an independent copy of `source`.
    ///
    /// The copy uses the source's current capacity as its growth step.
    pub fn copy_from(&mut self, source: &Self)
    where
        T: Clone,
    {
        debug!(
            length = source.length,
            capacity = source.capacity(),
            "copying dynamic array"
        );
        self.reinit(source.capacity());
        self.extend_from(source);
    }

    /// Appends a clone of every element of `source`, in order.
    pub fn extend_from(&mut self, source: &Self)
    where
        T: Clone,
    {
        for element in source {
            self.append(element.clone());
        }
    }

    /// Moves every element of `source` onto the end of this array.
    ///
    /// `source` is consumed and its storage released.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray::dynamic_array;
    ///
    /// let mut a = dynamic_array![1, 2];
    /// let b = dynamic_array![3, 4];
    /// a.merge(b);
    /// assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
    /// ```
    pub fn merge(&mut self, source: Self) {
        debug!(
            length = self.length,
            source_length = source.length,
            "merging dynamic arrays"
        );
        self.extend(source);
    }

    /// Moves the elements from `index` onwards into `destination`, in order.
    ///
    /// `destination` is reinitialized first, with the number of moved
    /// elements as its growth step. `index` is clamped to `len()`, and this
    /// array keeps `[0, index)`.
    pub fn split_into(&mut self, destination: &mut Self, index: usize) {
        let index = index.min(self.length);
        debug!(index, length = self.length, "splitting dynamic array");

        destination.reinit(self.length - index);
        while index < self.length {
            destination.append(self.take_at(index));
        }
    }

    /// Splits off the elements from `index` onwards into a new array.
    ///
    /// See [`split_into`](Self::split_into).
    #[must_use]
    pub fn split_off(&mut self, index: usize) -> Self {
        let mut tail = Self::with_growth_step(0);
        self.split_into(&mut tail, index);
        tail
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    fn clone(&self) -> Self {
        let mut copy = Self::with_growth_step(self.capacity());
        copy.extend_from(self);
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source);
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match self.get_mut(index) {
            Ok(element) => element,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let end = mem::take(&mut self.length);
        IntoIter {
            buffer: mem::replace(&mut self.buffer, RawBuffer::empty()),
            start: 0,
            end,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the first `length` slots are live; the storage is
        // released afterwards by `RawBuffer`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.buffer.as_ptr(),
                self.length,
            ));
        }
    }
}

/// Builds a [`DynamicArray`] with the default growth step.
///
/// ```
/// use dynarray::dynamic_array;
///
/// let listed = dynamic_array![1, 2, 3];
/// assert_eq!(listed.len(), 3);
///
/// let repeated = dynamic_array![0u8; 4];
/// assert_eq!(repeated.as_slice(), &[0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dynamic_array {
    ($($elem:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut array = $crate::DynamicArray::new();
        $(array.append($elem);)*
        array
    }};

    ($elem:expr; $count:expr) => {{
        $crate::DynamicArray::repeating($elem, $count)
    }};
}
