//! Errors surfaced while opening or registering table files.

use thiserror::Error;

/// An error encountered while the storage manager opens a table's backing
/// file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The underlying file could not be opened or created.
    #[error("file error")]
    File(#[from] file::FileError),
}
