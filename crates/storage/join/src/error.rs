//! Errors surfaced by the join operators.

use thiserror::Error;

/// An error encountered while planning or executing a join.
#[derive(Debug, Error)]
pub enum JoinError {
    /// The two input schemas share no attribute name to join on.
    #[error("tables `{left}` and `{right}` have no common attribute to join on")]
    NoCommonAttribute { left: String, right: String },
    /// A heap-file operation on an input, output, or partition table failed.
    #[error("heap-file error")]
    Heap(#[from] heap::HeapError),
    /// A buffer pool operation failed (most commonly, a page-count lookup on
    /// an unregistered file).
    #[error("buffer pool error")]
    Buffer(#[from] buffer::BufferError),
}
