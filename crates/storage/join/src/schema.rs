//! Computes a join's result schema and locates the shared join attribute.

use catalog::{Attribute, TableSchema};

use crate::error::JoinError;

/// Finds the single attribute name shared by both schemas, and builds the
/// result schema: left attributes followed by right attributes, excluding
/// the duplicated join attribute, named `"T"`.
pub fn result_schema(
    left: &TableSchema,
    right: &TableSchema,
) -> Result<(TableSchema, String), JoinError> {
    let join_attr = left
        .attributes
        .iter()
        .find(|l| right.attributes.iter().any(|r| r.name == l.name))
        .map(|attr| attr.name.clone())
        .ok_or_else(|| JoinError::NoCommonAttribute {
            left: left.name.clone(),
            right: right.name.clone(),
        })?;

    let mut attributes: Vec<Attribute> = left.attributes.clone();
    attributes.extend(
        right
            .attributes
            .iter()
            .filter(|attr| attr.name != join_attr)
            .cloned(),
    );

    Ok((
        TableSchema {
            name: "T".to_string(),
            attributes,
        },
        join_attr,
    ))
}

/// The tuple-position index of `attr_name` within `schema`.
pub(crate) fn attr_index(schema: &TableSchema, attr_name: &str) -> usize {
    schema
        .attributes
        .iter()
        .position(|attr| attr.name == attr_name)
        .expect("join attribute must be present in its own table's schema")
}
