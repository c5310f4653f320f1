//! A growable contiguous array whose capacity moves in fixed steps.
//!
//! [`DynamicArray`] grows by its growth step whenever it fills up and gives one
//! step back whenever a whole step of slack has accumulated, so memory follows
//! the logical length closely without reallocating on every mutation.
//!
//! ```
//! use dynarray::{DynamicArray, ArrayError};
//!
//! let mut array = DynamicArray::with_growth_step(3);
//! for value in 1..=5 {
//!     array.append(value);
//! }
//! assert_eq!(array.capacity(), 6);
//!
//! array.insert(2, 99).unwrap();
//! array.sort();
//! assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5, 99]);
//! assert_eq!(array.get(6), Err(ArrayError::OutOfBounds { index: 6, length: 6 }));
//! ```

#![no_std]
#![warn(clippy::nursery, clippy::pedantic, clippy::all)]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod collections;
pub mod errors;

pub use collections::dynamic_array::{DEFAULT_GROWTH_STEP, DynamicArray};
pub use errors::{ArrayError, Result};
