//! Errors surfaced by heap-file record operations.

use thiserror::Error;

/// An error encountered while inserting, deleting, or reading a tuple.
#[derive(Debug, Error)]
pub enum HeapError {
    /// The buffer pool could not service the underlying page request.
    #[error("buffer pool error")]
    Buffer(#[from] buffer::BufferError),
    /// A page-level operation failed for a reason other than running out of
    /// space (which `insert_tuple` handles by advancing to the next page).
    #[error("page error")]
    Page(#[from] page::PageError),
}
