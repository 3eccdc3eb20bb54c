//! Parses and dispatches the statements the driver accepts: `CREATE TABLE`,
//! `INSERT INTO`, and `JOIN`. Tokenizes by splitting on whitespace and
//! punctuation rather than indexing by fixed offsets, in the same spirit as
//! the catalog crate's `CREATE TABLE` tokenizer.

use std::collections::HashMap;

use catalog::{Catalog, TableSchema};
use heap::{tuple, HeapFile};
use join::{FileIdAllocator, GraceHashJoin, NestedLoopBlockHashJoin, OnePassJoin};
use storage_api::StorageManager;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JoinAlgorithm {
    OnePass,
    NestedLoop,
    Grace,
}

struct JoinSpec {
    left: String,
    right: String,
    algorithm: JoinAlgorithm,
    budget: usize,
}

/// Holds the schema registry and open table handles for a running session,
/// and dispatches each input line to the catalog, heap, and join crates.
#[derive(Debug)]
pub struct Engine {
    catalog: Catalog,
    storage: StorageManager,
    tables: HashMap<String, HeapFile>,
}

impl Engine {
    pub fn new(storage: StorageManager) -> Self {
        Self {
            catalog: Catalog::new(),
            storage,
            tables: HashMap::new(),
        }
    }

    /// Parses and executes one statement, returning a line to print back.
    pub fn execute(&mut self, line: &str) -> Result<String, EngineError> {
        let trimmed = line.trim();
        let keyword = trimmed
            .split_whitespace()
            .next()
            .unwrap_or("")
            .to_ascii_uppercase();

        match keyword.as_str() {
            "" => Ok(String::new()),
            "CREATE" => self.create_table(trimmed),
            "INSERT" => self.insert(trimmed),
            "JOIN" => self.join(trimmed),
            other => Err(EngineError::UnknownStatement(other.to_string())),
        }
    }

    fn create_table(&mut self, sql: &str) -> Result<String, EngineError> {
        let schema = self.catalog.add_table_schema(sql)?;
        let name = schema.name.clone();
        let table = self.storage.open_table(&name)?;
        self.tables.insert(name.clone(), table);
        Ok(format!("table `{name}` created"))
    }

    fn insert(&mut self, sql: &str) -> Result<String, EngineError> {
        let (table_name, values) = parse_insert(sql)?;
        let schema = self.catalog.table(&table_name)?;
        if values.len() != schema.attributes.len() {
            return Err(EngineError::Parse(format!(
                "table `{table_name}` expects {} values, got {}",
                schema.attributes.len(),
                values.len()
            )));
        }
        let table = *self
            .tables
            .get(&table_name)
            .ok_or_else(|| EngineError::UnknownTable(table_name.clone()))?;

        let record = tuple::encode(&values);
        let rid = table.insert_tuple(self.storage.pool(), &record)?;
        Ok(format!(
            "inserted into `{table_name}` at page {} slot {}",
            rid.page_number, rid.slot_number
        ))
    }

    fn join(&mut self, sql: &str) -> Result<String, EngineError> {
        let spec = parse_join(sql)?;

        let left_schema = self.catalog.table(&spec.left)?.clone();
        let right_schema = self.catalog.table(&spec.right)?.clone();
        let left = *self
            .tables
            .get(&spec.left)
            .ok_or_else(|| EngineError::UnknownTable(spec.left.clone()))?;
        let right = *self
            .tables
            .get(&spec.right)
            .ok_or_else(|| EngineError::UnknownTable(spec.right.clone()))?;

        let (mut result_schema, _) = join::result_schema(&left_schema, &right_schema)?;
        let result_name = format!("{}_{}_join", spec.left, spec.right);
        result_schema.name = result_name.clone();
        self.catalog.register_schema(result_schema)?;
        let result = self.storage.open_table(&result_name)?;
        self.tables.insert(result_name.clone(), result);

        let stats = match spec.algorithm {
            JoinAlgorithm::OnePass => OnePassJoin::execute(
                self.storage.pool(),
                left,
                &left_schema,
                right,
                &right_schema,
                result,
            )?,
            JoinAlgorithm::NestedLoop => {
                let operator = NestedLoopBlockHashJoin {
                    budget: spec.budget,
                };
                operator.execute(
                    self.storage.pool(),
                    left,
                    &left_schema,
                    right,
                    &right_schema,
                    result,
                )?
            }
            JoinAlgorithm::Grace => {
                let operator = GraceHashJoin {
                    budget: spec.budget,
                };
                let first_temp_id = self.storage.next_temp_file_id();
                let mut ids = FileIdAllocator::starting_at(first_temp_id);
                operator.execute(
                    self.storage.pool(),
                    left,
                    &left_schema,
                    right,
                    &right_schema,
                    result,
                    &mut ids,
                )?
            }
        };

        Ok(format!(
            "`{result_name}` holds {} result tuples ({} io(s))",
            stats.num_result_tuples, stats.num_ios
        ))
    }
}

fn expect_word<'a>(words: &mut impl Iterator<Item = &'a str>, expected: &str) -> Result<(), EngineError> {
    match words.next() {
        Some(word) if word.eq_ignore_ascii_case(expected) => Ok(()),
        Some(other) => Err(EngineError::Parse(format!(
            "expected `{expected}`, found `{other}`"
        ))),
        None => Err(EngineError::Parse(format!("expected `{expected}`"))),
    }
}

fn next_word<'a>(words: &mut impl Iterator<Item = &'a str>) -> Result<String, EngineError> {
    words
        .next()
        .map(str::to_string)
        .ok_or_else(|| EngineError::Parse("unexpected end of statement".to_string()))
}

/// Parses `INSERT INTO name VALUES (v1, v2, ...)`.
fn parse_insert(sql: &str) -> Result<(String, Vec<String>), EngineError> {
    let mut words = sql.split_whitespace();
    expect_word(&mut words, "INSERT")?;
    expect_word(&mut words, "INTO")?;
    let table_name = next_word(&mut words)?;
    expect_word(&mut words, "VALUES")?;

    let rest: String = words.collect::<Vec<_>>().join(" ");
    let rest = rest.trim();
    let inner = rest
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| EngineError::Parse("expected `(v1, v2, ...)`".to_string()))?;

    let values = inner
        .split(',')
        .map(|v| v.trim().trim_matches('\'').trim_matches('"').to_string())
        .collect();

    Ok((table_name, values))
}

/// Parses `JOIN left right ON attr [USING onepass|nested_loop|grace] [BUDGET n]`.
fn parse_join(sql: &str) -> Result<JoinSpec, EngineError> {
    let mut words = sql.split_whitespace();
    expect_word(&mut words, "JOIN")?;
    let left = next_word(&mut words)?;
    let right = next_word(&mut words)?;
    expect_word(&mut words, "ON")?;
    let _join_attr = next_word(&mut words)?;

    let mut algorithm = JoinAlgorithm::OnePass;
    let mut budget = 3usize;

    while let Some(word) = words.next() {
        match word.to_ascii_uppercase().as_str() {
            "USING" => {
                let name = next_word(&mut words)?;
                algorithm = match name.to_ascii_lowercase().as_str() {
                    "onepass" => JoinAlgorithm::OnePass,
                    "nested_loop" => JoinAlgorithm::NestedLoop,
                    "grace" => JoinAlgorithm::Grace,
                    other => {
                        return Err(EngineError::Parse(format!(
                            "unknown join algorithm `{other}`"
                        )))
                    }
                };
            }
            "BUDGET" => {
                let n = next_word(&mut words)?;
                budget = n
                    .parse()
                    .map_err(|_| EngineError::Parse("BUDGET must be a positive integer".to_string()))?;
            }
            other => {
                return Err(EngineError::Parse(format!(
                    "unexpected token `{other}` in JOIN statement"
                )))
            }
        }
    }

    Ok(JoinSpec {
        left,
        right,
        algorithm,
        budget,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> (Engine, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(8, dir.path());
        (Engine::new(storage), dir)
    }

    #[test]
    fn creates_a_table_and_inserts_a_row() {
        let (mut engine, _dir) = engine();
        engine
            .execute("CREATE TABLE students (id INT, name VARCHAR(20))")
            .unwrap();
        let message = engine
            .execute("INSERT INTO students VALUES (1, alice)")
            .unwrap();
        assert!(message.contains("inserted"));
    }

    #[test]
    fn joins_two_tables_on_a_shared_attribute() {
        let (mut engine, _dir) = engine();
        engine.execute("CREATE TABLE l (id INT, name VARCHAR(20))").unwrap();
        engine.execute("CREATE TABLE r (id INT, city VARCHAR(20))").unwrap();
        engine.execute("INSERT INTO l VALUES (1, alice)").unwrap();
        engine.execute("INSERT INTO r VALUES (1, nyc)").unwrap();

        let message = engine.execute("JOIN l r ON id USING onepass").unwrap();
        assert!(message.contains("1 result tuples"));
    }

    #[test]
    fn rejects_an_unknown_statement() {
        let (mut engine, _dir) = engine();
        assert!(engine.execute("DROP TABLE t").is_err());
    }

    #[test]
    fn rejects_insert_with_the_wrong_number_of_values() {
        let (mut engine, _dir) = engine();
        engine.execute("CREATE TABLE t (a INT, b INT)").unwrap();
        assert!(engine.execute("INSERT INTO t VALUES (1)").is_err());
    }
}
