//! Errors produced while parsing or registering table schemas.

use thiserror::Error;

/// An error encountered while tokenizing or parsing a SQL statement, or
/// while registering the resulting schema with a [`crate::Catalog`].
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The statement did not match the grammar this crate understands.
    #[error("{0}")]
    Parse(String),

    /// A `CREATE TABLE` named a table that already exists in the catalog.
    #[error("table `{0}` already exists")]
    TableAlreadyExists(String),

    /// A lookup named a table the catalog has no schema for.
    #[error("table `{0}` is not registered")]
    UnknownTable(String),
}
