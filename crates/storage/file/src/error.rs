use page::page_id::PageId;
use thiserror::Error;

/// Errors raised while reading, writing, allocating, or deleting a page in a
/// [`crate::File`].
#[derive(Debug, Error)]
pub enum FileError {
    /// The requested page number does not exist in this file.
    #[error("page {0} does not exist in this file")]
    PageNotFound(PageId),
    /// An I/O error occurred while reading or writing the backing storage.
    #[error("I/O error accessing file {filename}")]
    Io {
        filename: String,
        #[source]
        source: std::io::Error,
    },
    /// A page's header could not be read or written.
    #[error("error accessing page header")]
    PageError(#[from] page::PageError),
}
