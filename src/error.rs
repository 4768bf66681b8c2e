use thiserror::Error;

/// Error types for `GrowVec` operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum GrowVecError {
    /// Requested slot count exceeds what the address space can describe
    #[error("Capacity overflow: requested {requested} slots, but at most {max} are addressable")]
    CapacityOverflow {
        /// Number of slots requested
        requested: usize,
        /// Largest slot count for this element type
        max: usize,
    },
    /// The global allocator could not provide the region
    #[error("Allocation failed: could not obtain {bytes} bytes")]
    AllocationFailed {
        /// Size of the rejected request in bytes
        bytes: usize,
    },
    /// Index is beyond the current vector length
    #[error("Index out of bounds: index {index} is beyond vector length {length}")]
    IndexOutOfBounds {
        /// Index that was accessed
        index: usize,
        /// Current length of the vector
        length: usize,
    },
}

/// Failure of an operation that builds elements through a fallible closure.
///
/// `Element` carries the caller's error untouched.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ConstructError<E> {
    /// Storage could not be secured before construction started
    #[error(transparent)]
    Storage(#[from] GrowVecError),
    /// The element closure reported an error
    #[error("Element construction failed: {0}")]
    Element(E),
}

/// Failure while reading whitespace-separated tokens into a `GrowVec`
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum ReadTokensError<E> {
    /// Storage could not grow to hold the next element
    #[error(transparent)]
    Storage(#[from] GrowVecError),
    /// A token did not parse as an element
    #[error("Token {index} is not a valid element: {reason}")]
    Parse {
        /// Zero-based position of the token in the input
        index: usize,
        /// Error reported by the element's `FromStr`
        reason: E,
    },
}
