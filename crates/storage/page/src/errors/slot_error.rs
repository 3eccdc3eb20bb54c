use crate::errors::header_error::HeaderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum SlotError {
    #[error("slot directory region expected to be {expected_size} bytes, but was {actual_size}")]
    SlotRegionSizeMismatch {
        expected_size: usize,
        actual_size: usize,
    },
    #[error(
        "attempted to read a slot from an invalid slice size; expected {expected_size}, got {actual_size}"
    )]
    SlotSizeMismatch {
        expected_size: usize,
        actual_size: usize,
    },
    #[error("attempted to access an invalid slot index: {slot_index}")]
    InvalidSlot { slot_index: usize },
    #[error("slot {slot_index} does not reference a live record")]
    SlotNotInUse { slot_index: usize },
    #[error("error while interpreting binary data")]
    BinaryError(#[from] binary_helpers::bin_error::BinaryError),
    #[error("error while reading page header")]
    HeaderError(#[from] HeaderError),
}
