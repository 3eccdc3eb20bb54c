use crate::errors::slot_error::SlotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum ReadError {
    #[error("error while reading slot directory")]
    SlotError(#[from] SlotError),
}
