use thiserror::Error;

/// Result type returned by fallible [`DynamicArray`](crate::DynamicArray) operations.
pub type Result<T, E = ArrayError> = core::result::Result<T, E>;

/// Errors reported by index- and state-checked operations.
///
/// A failed operation never changes the container.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ArrayError {
    /// The index does not address a live element (or a valid insertion point).
    #[error("index {index} out of bounds for length {length}")]
    OutOfBounds { index: usize, length: usize },

    /// The operation needs at least one element.
    #[error("array is empty")]
    Empty,
}
