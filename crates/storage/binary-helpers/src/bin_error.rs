use std::array::TryFromSliceError;
use thiserror::Error;

/// Errors raised while reading or writing fixed-width little-endian fields
/// through a byte slice.
#[derive(Error, Debug)]
pub enum BinaryError {
    /// The requested range does not fit inside the provided slice.
    #[error(
        "attempt to access {expected} bytes at offset {from_offset}, but the slice does not contain that range"
    )]
    InvalidSliceRange {
        /// Number of bytes the accessor tried to read or write.
        expected: usize,
        /// Offset at which the access was attempted.
        from_offset: usize,
    },
    /// A fixed-size array conversion failed after the length was already checked.
    #[error("error converting a slice to a fixed-size array")]
    SliceConversionError(#[from] TryFromSliceError),
}
