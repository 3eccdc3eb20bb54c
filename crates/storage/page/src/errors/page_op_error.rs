use crate::errors::delete_error::DeleteError;
use crate::errors::header_error::HeaderError;
use crate::errors::insert_error::InsertError;
use crate::errors::read_error::ReadError;
use crate::errors::slot_error::SlotError;
use crate::errors::update_error::UpdateError;
use thiserror::Error;

/// Aggregator error type for all possible page related sub-errors.
#[derive(Debug, Error)]
pub(crate) enum PageOpError {
    #[error("error while accessing header")]
    Header(#[from] HeaderError),
    #[error("error while accessing slot directory")]
    Slot(#[from] SlotError),
    #[error("error while reading record")]
    Read(#[from] ReadError),
    #[error("error while inserting record")]
    Insert(#[from] InsertError),
    #[error("error while deleting record")]
    Delete(#[from] DeleteError),
    #[error("error while updating record")]
    Update(#[from] UpdateError),
}

impl PageOpError {
    pub(crate) fn is_insufficient_space(&self) -> bool {
        matches!(
            self,
            PageOpError::Insert(InsertError::InsufficientSpace { .. })
                | PageOpError::Update(UpdateError::InsufficientSpace { .. })
        )
    }
}
