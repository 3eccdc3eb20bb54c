//! Table schemas and the attribute types they're built from.

use crate::error::SchemaError;
use crate::tokenizer::Tokenizer;

/// The type of a single attribute's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// A fixed-width integer.
    Int,
    /// A fixed-length character string of `len` bytes.
    Char(u32),
    /// A variable-length character string with a maximum of `len` bytes.
    Varchar(u32),
}

/// A single column in a [`TableSchema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute's name.
    pub name: String,
    /// The attribute's declared type.
    pub ty: DataType,
    /// The declared maximum size in bytes, for `Char`/`Varchar` attributes
    /// (`0` for `Int`).
    pub max_size: u32,
    /// Whether the attribute was declared `NOT NULL`.
    pub not_null: bool,
    /// Whether the attribute was declared `UNIQUE`.
    pub unique: bool,
}

/// The schema of a table: its name and ordered attribute list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// The table's name.
    pub name: String,
    /// The table's attributes, in declaration order.
    pub attributes: Vec<Attribute>,
}

impl TableSchema {
    /// Parses a `CREATE TABLE name (attr TYPE[(len)] [NOT NULL] [UNIQUE], ...)`
    /// statement into a [`TableSchema`].
    pub fn from_sql(sql: &str) -> Result<Self, SchemaError> {
        let mut tokens = Tokenizer::new(sql);

        tokens.expect_keyword("CREATE")?;
        tokens.expect_keyword("TABLE")?;
        let name = tokens.expect_ident()?;
        tokens.expect_punct('(')?;

        let mut attributes = Vec::new();
        loop {
            let attr_name = tokens.expect_ident()?;
            let (ty, max_size) = parse_data_type(&mut tokens)?;

            let mut not_null = false;
            let mut unique = false;
            loop {
                match tokens.peek_keyword() {
                    Some(kw) if kw.eq_ignore_ascii_case("NOT") => {
                        tokens.expect_keyword("NOT")?;
                        tokens.expect_keyword("NULL")?;
                        not_null = true;
                    }
                    Some(kw) if kw.eq_ignore_ascii_case("UNIQUE") => {
                        tokens.expect_keyword("UNIQUE")?;
                        unique = true;
                    }
                    _ => break,
                }
            }

            attributes.push(Attribute {
                name: attr_name,
                ty,
                max_size,
                not_null,
                unique,
            });

            if tokens.try_punct(',') {
                continue;
            }
            tokens.expect_punct(')')?;
            break;
        }

        if attributes.is_empty() {
            return Err(SchemaError::Parse("table must declare at least one attribute".into()));
        }

        Ok(TableSchema { name, attributes })
    }
}

fn parse_data_type(tokens: &mut Tokenizer) -> Result<(DataType, u32), SchemaError> {
    let keyword = tokens.expect_ident()?;
    match keyword.to_ascii_uppercase().as_str() {
        "INT" => Ok((DataType::Int, 0)),
        "CHAR" => {
            tokens.expect_punct('(')?;
            let len = tokens.expect_number()?;
            tokens.expect_punct(')')?;
            Ok((DataType::Char(len), len))
        }
        "VARCHAR" => {
            tokens.expect_punct('(')?;
            let len = tokens.expect_number()?;
            tokens.expect_punct(')')?;
            Ok((DataType::Varchar(len), len))
        }
        other => Err(SchemaError::Parse(format!("unknown data type `{other}`"))),
    }
}
