//! Shared bookkeeping used by every join operator: build/probe side
//! selection, tuple splitting, and run statistics.

use buffer::BufferPool;
use heap::{tuple, HeapFile};
use page::page_id::FileId;

use crate::error::JoinError;

/// Counters an operator reports after a run, mirroring the original
/// source's `printRunningStats` fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoinStats {
    pub num_result_tuples: usize,
    pub num_used_buf_pages: usize,
    pub num_ios: usize,
    pub is_complete: bool,
}

pub(crate) fn page_count(pool: &BufferPool, file_id: FileId) -> Result<u32, JoinError> {
    let (begin, end) = pool.file_page_range(file_id)?;
    Ok(end - begin)
}

/// Picks the table with fewer pages as the build side. Returns
/// `(build, probe, build_is_left)`.
pub(crate) fn pick_build_side(
    pool: &BufferPool,
    left: HeapFile,
    right: HeapFile,
) -> Result<(HeapFile, HeapFile, bool), JoinError> {
    let left_pages = page_count(pool, left.file_id())?;
    let right_pages = page_count(pool, right.file_id())?;
    if left_pages <= right_pages {
        Ok((left, right, true))
    } else {
        Ok((right, left, false))
    }
}

/// Splits a stored tuple into its join-key value and its remaining
/// attribute values, in schema order with the key removed.
pub(crate) fn split_on_key(tuple: &str, key_index: usize) -> (String, Vec<String>) {
    let mut values = tuple::decode(tuple);
    let key = values.remove(key_index);
    (key, values)
}

/// Reassembles a result row in left-then-right order from a matched
/// build/probe pair, given which original side the build table was.
pub(crate) fn assemble_result_row(
    build_rest: &[String],
    probe_rest: &[String],
    build_is_left: bool,
) -> String {
    let mut row = if build_is_left {
        build_rest.to_vec()
    } else {
        probe_rest.to_vec()
    };
    row.extend(if build_is_left {
        probe_rest.to_vec()
    } else {
        build_rest.to_vec()
    });
    tuple::encode(&row)
}
