//! Errors surfaced while dispatching a single REPL statement.

use thiserror::Error;

/// An error encountered while parsing or executing one line of input.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The line didn't match any statement grammar this driver understands.
    #[error("{0}")]
    Parse(String),

    /// The line's leading keyword isn't `CREATE`, `INSERT`, or `JOIN`.
    #[error("unknown statement `{0}`")]
    UnknownStatement(String),

    /// A `JOIN` named a table with no open handle.
    #[error("unknown table `{0}`")]
    UnknownTable(String),

    /// Schema parsing or catalog registration failed.
    #[error(transparent)]
    Schema(#[from] catalog::SchemaError),

    /// Opening or registering a table's backing file failed.
    #[error(transparent)]
    Storage(#[from] storage_api::StorageError),

    /// A heap-file operation failed.
    #[error(transparent)]
    Heap(#[from] heap::HeapError),

    /// A join operator failed.
    #[error(transparent)]
    Join(#[from] join::JoinError),
}
