//! Tuples are encoded on disk as attribute values joined by single spaces;
//! attribute identity comes from the table schema's declaration order, not
//! from any on-disk type tag.

/// Encodes an ordered list of attribute values into a single tuple record.
pub fn encode<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits a stored tuple record back into its attribute values.
pub fn decode(record: &str) -> Vec<String> {
    record.split(' ').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_preserves_values() {
        let values = vec!["1".to_string(), "alice".to_string(), "nyc".to_string()];
        let record = encode(&values);
        assert_eq!(record, "1 alice nyc");
        assert_eq!(decode(&record), values);
    }
}
