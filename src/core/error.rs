//! # Errors
//!
//! Lens failures mean a lens addressed something the given value does not
//! contain. They are never recovered inside the core: they travel back to
//! whoever called `dispatch` and the store keeps its previous state.

use std::fmt;

/// Errors raised by the built-in lens factories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensError {
    /// A key lens addressed a key the mapping does not contain.
    MissingKey { key: String },
    /// An index lens addressed a position outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// A property lens addressed a name the object does not have.
    PropertyNotFound { name: String },
    /// A property exists but does not hold the requested type,
    /// or the value is not an object at all.
    TypeMismatch { name: String, expected: String },
}

impl fmt::Display for LensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LensError::MissingKey { key } => write!(f, "missing key: {key}"),
            LensError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            LensError::PropertyNotFound { name } => write!(f, "no property named `{name}`"),
            LensError::TypeMismatch { name, expected } => {
                write!(f, "type mismatch at `{name}`: expected {expected}")
            }
        }
    }
}

impl std::error::Error for LensError {}

/// Errors returned by `Store::dispatch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// `dispatch` was called while another dispatch on the same store was
    /// still delivering notifications. Integration bug, not retryable.
    ReentrantDispatch,
    /// The reducer failed; the store state is unchanged.
    Lens(LensError),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReentrantDispatch => {
                write!(f, "dispatch called while a dispatch is in progress")
            }
            StoreError::Lens(e) => write!(f, "reducer failed: {e}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Lens(e) => Some(e),
            StoreError::ReentrantDispatch => None,
        }
    }
}

impl From<LensError> for StoreError {
    fn from(e: LensError) -> Self {
        StoreError::Lens(e)
    }
}
