use page::page_id::{FileId, PageId};
use thiserror::Error;

/// Errors raised by [`crate::BufferPool`] operations.
#[derive(Debug, Error)]
pub enum BufferError {
    /// Every frame was pinned during a full clock sweep; no victim could be
    /// found.
    #[error("buffer pool exhausted: all frames are pinned")]
    BufferExceeded,
    /// `unpin_page` was called on a page whose pin count is already zero.
    #[error("page {0} is not pinned")]
    PageNotPinned(PageId),
    /// `flush_file` found a frame claiming to belong to the file but marked
    /// invalid.
    #[error("frame {0} claims file {1} but is not valid")]
    BadBuffer(usize, FileId),
    /// `flush_file` found a still-pinned frame belonging to the file.
    #[error("page {0} is still pinned")]
    PagePinned(PageId),
    /// The given `FileId` was never registered with this pool.
    #[error("file {0} is not registered with this buffer pool")]
    UnknownFile(FileId),
    /// A lower-level file operation failed.
    #[error("file I/O error")]
    File(#[from] file::FileError),
}
