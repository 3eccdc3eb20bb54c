use crate::errors::delete_error::DeleteError;
use crate::errors::header_error::HeaderError;
use crate::errors::insert_error::InsertError;
use crate::errors::slot_error::SlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum UpdateError {
    #[error("unable to update record of {record_len} bytes in page with {page_free_space} free bytes")]
    InsufficientSpace {
        record_len: usize,
        page_free_space: usize,
    },
    #[error("error while accessing slot directory")]
    SlotError(#[from] SlotError),
    #[error("error while accessing header")]
    HeaderError(#[from] HeaderError),
    #[error("error while writing the updated record")]
    InsertError(#[from] InsertError),
    #[error("error while deleting the previous record")]
    DeleteError(#[from] DeleteError),
}
