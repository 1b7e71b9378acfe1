use thiserror::Error;

/// Result alias used by every fallible [`RingBuffer`](crate::RingBuffer) operation.
pub type Result<T> = std::result::Result<T, RingBufferError>;

/// Errors reported by ring buffer operations.
///
/// A failing call never changes the buffer's cursors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    /// Requested capacity was zero
    #[error("ring buffer capacity must be greater than zero")]
    InvalidCapacity,
    /// The allocator could not provide the storage region
    #[error("failed to allocate {capacity} bytes of ring buffer storage")]
    Allocation {
        /// Capacity that was requested
        capacity: usize,
    },
    /// Not enough free space for the write
    #[error("insufficient space: requested {requested} bytes, {available} available")]
    InsufficientSpace {
        /// Bytes the caller tried to write
        requested: usize,
        /// Free bytes at the time of the call
        available: usize,
    },
    /// Not enough unread data for the read
    #[error("insufficient data: requested {requested} bytes, {available} available")]
    InsufficientData {
        /// Bytes the caller tried to read
        requested: usize,
        /// Unread bytes at the time of the call
        available: usize,
    },
    /// Enough free space in total, but not in one run before the wrap boundary
    #[error("fragmented space: requested {requested} contiguous bytes, {contiguous} available before wrap")]
    FragmentedSpace {
        /// Bytes the caller tried to commit
        requested: usize,
        /// Length of the contiguous writable run
        contiguous: usize,
    },
}

impl From<RingBufferError> for std::io::Error {
    fn from(err: RingBufferError) -> Self {
        std::io::Error::other(err)
    }
}
