//! In-memory registry of table schemas, parsed from `CREATE TABLE`
//! statements.

mod error;
mod schema;
mod tokenizer;

pub use error::SchemaError;
pub use schema::{Attribute, DataType, TableSchema};

use std::collections::HashMap;

/// Holds every table schema known to the running session.
#[derive(Debug, Default)]
pub struct Catalog {
    tables: HashMap<String, TableSchema>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `sql` as a `CREATE TABLE` statement and registers the
    /// resulting schema, failing if a table by that name is already
    /// registered.
    pub fn add_table_schema(&mut self, sql: &str) -> Result<&TableSchema, SchemaError> {
        let schema = TableSchema::from_sql(sql)?;
        if self.tables.contains_key(&schema.name) {
            return Err(SchemaError::TableAlreadyExists(schema.name));
        }
        let name = schema.name.clone();
        self.tables.insert(name.clone(), schema);
        Ok(self.tables.get(&name).expect("just inserted"))
    }

    /// Registers an already-built schema directly, failing if a table by
    /// that name is already registered. Used for schemas computed
    /// programmatically (e.g. a join's result schema) rather than parsed
    /// from a `CREATE TABLE` statement.
    pub fn register_schema(&mut self, schema: TableSchema) -> Result<&TableSchema, SchemaError> {
        if self.tables.contains_key(&schema.name) {
            return Err(SchemaError::TableAlreadyExists(schema.name));
        }
        let name = schema.name.clone();
        self.tables.insert(name.clone(), schema);
        Ok(self.tables.get(&name).expect("just inserted"))
    }

    /// Looks up a previously registered schema by table name.
    pub fn table(&self, name: &str) -> Result<&TableSchema, SchemaError> {
        self.tables
            .get(name)
            .ok_or_else(|| SchemaError::UnknownTable(name.to_string()))
    }

    /// Iterates over every registered schema.
    pub fn tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.values()
    }
}
