//! The one-pass hash join: build an in-memory multimap from the smaller
//! table, then stream-probe the larger one.

use std::collections::HashMap;

use buffer::BufferPool;
use catalog::TableSchema;
use heap::HeapFile;

use crate::common::{assemble_result_row, pick_build_side, split_on_key, JoinStats};
use crate::error::JoinError;
use crate::schema::{attr_index, result_schema};

/// Computes the equi-join of `left` and `right` on their single shared
/// attribute, writing result tuples into `result`.
///
/// Requires that the build (smaller) side's multimap fits entirely in
/// memory; no page budget is enforced here.
pub struct OnePassJoin;

impl OnePassJoin {
    pub fn execute(
        pool: &mut BufferPool,
        left: HeapFile,
        left_schema: &TableSchema,
        right: HeapFile,
        right_schema: &TableSchema,
        result: HeapFile,
    ) -> Result<JoinStats, JoinError> {
        let (_, join_attr) = result_schema(left_schema, right_schema)?;
        let (build, probe, build_is_left) = pick_build_side(pool, left, right)?;
        let (build_schema, probe_schema) = if build_is_left {
            (left_schema, right_schema)
        } else {
            (right_schema, left_schema)
        };
        let build_key_index = attr_index(build_schema, &join_attr);
        let probe_key_index = attr_index(probe_schema, &join_attr);

        let mut multimap: HashMap<String, Vec<Vec<String>>> = HashMap::new();
        build.for_each_tuple(pool, |_, tuple| {
            let (key, rest) = split_on_key(tuple, build_key_index);
            multimap.entry(key).or_default().push(rest);
        })?;

        let mut pending_rows = Vec::new();
        probe.for_each_tuple(pool, |_, tuple| {
            let (key, probe_rest) = split_on_key(tuple, probe_key_index);
            if let Some(build_matches) = multimap.get(&key) {
                for build_rest in build_matches {
                    pending_rows.push(assemble_result_row(build_rest, &probe_rest, build_is_left));
                }
            }
        })?;

        let num_result_tuples = pending_rows.len();
        for row in &pending_rows {
            result.insert_tuple(pool, row)?;
        }

        Ok(JoinStats {
            num_result_tuples,
            num_used_buf_pages: 1,
            num_ios: (crate::common::page_count(pool, build.file_id())?
                + crate::common::page_count(pool, probe.file_id())?) as usize,
            is_complete: true,
        })
    }
}
