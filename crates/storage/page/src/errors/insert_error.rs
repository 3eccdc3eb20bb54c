use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum InsertError {
    #[error("unable to insert record of {record_len} bytes in page with {page_free_space} free bytes")]
    InsufficientSpace {
        record_len: usize,
        page_free_space: usize,
    },
    #[error("error while accessing slot directory")]
    SlotError(#[from] SlotError),
    #[error("error while accessing header")]
    HeaderError(#[from] HeaderError),
}
