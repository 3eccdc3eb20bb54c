use crate::errors::header_error::HeaderError;
use crate::errors::slot_error::SlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DeleteError {
    #[error("error while accessing slot directory")]
    SlotError(#[from] SlotError),
    #[error("error while accessing header")]
    HeaderError(#[from] HeaderError),
}
