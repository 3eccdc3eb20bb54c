//! Grace hash join: partition both inputs into matching hash buckets on
//! temporary heap files, then join each bucket pair with the one-pass
//! algorithm.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use buffer::BufferPool;
use catalog::TableSchema;
use file::InMemoryFile;
use heap::HeapFile;
use page::page_id::FileId;

use crate::common::{page_count, pick_build_side, split_on_key, JoinStats};
use crate::error::JoinError;
use crate::one_pass::OnePassJoin;
use crate::schema::{attr_index, result_schema};

/// Hands out `FileId`s for a grace hash join's temporary partition files,
/// starting above the range used by the tables already registered with the
/// pool.
pub struct FileIdAllocator {
    next: FileId,
}

impl FileIdAllocator {
    pub fn starting_at(first: FileId) -> Self {
        Self { next: first }
    }

    fn next(&mut self) -> FileId {
        let id = self.next;
        self.next += 1;
        id
    }
}

fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Grace hash join with a `budget`-page buffer, used to size the number of
/// partition buckets.
pub struct GraceHashJoin {
    pub budget: usize,
}

impl GraceHashJoin {
    pub fn execute(
        &self,
        pool: &mut BufferPool,
        left: HeapFile,
        left_schema: &TableSchema,
        right: HeapFile,
        right_schema: &TableSchema,
        result: HeapFile,
        temp_ids: &mut FileIdAllocator,
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

        let chunk_pages = self.budget.saturating_sub(1).max(1) as u32;
        let build_pages = page_count(pool, build.file_id())?.max(1);
        let num_buckets = build_pages.div_ceil(chunk_pages).max(1) as usize;

        let mut build_buckets = Vec::with_capacity(num_buckets);
        let mut probe_buckets = Vec::with_capacity(num_buckets);
        for i in 0..num_buckets {
            let build_id = pool.register_file(Box::new(InMemoryFile::new(
                temp_ids.next(),
                format!("grace-build-{i}"),
            )));
            build_buckets.push(HeapFile::new(build_id));
            let probe_id = pool.register_file(Box::new(InMemoryFile::new(
                temp_ids.next(),
                format!("grace-probe-{i}"),
            )));
            probe_buckets.push(HeapFile::new(probe_id));
        }

        let mut build_rows = Vec::new();
        build.for_each_tuple(pool, |_, tuple| build_rows.push(tuple.to_string()))?;
        for tuple in &build_rows {
            let (key, _) = split_on_key(tuple, build_key_index);
            let bucket = (hash_key(&key) as usize) % num_buckets;
            build_buckets[bucket].insert_tuple(pool, tuple)?;
        }

        let mut probe_rows = Vec::new();
        probe.for_each_tuple(pool, |_, tuple| probe_rows.push(tuple.to_string()))?;
        for tuple in &probe_rows {
            let (key, _) = split_on_key(tuple, probe_key_index);
            let bucket = (hash_key(&key) as usize) % num_buckets;
            probe_buckets[bucket].insert_tuple(pool, tuple)?;
        }

        let (left_buckets, right_buckets) = if build_is_left {
            (&build_buckets, &probe_buckets)
        } else {
            (&probe_buckets, &build_buckets)
        };

        let mut num_ios = 0usize;
        for bucket in build_buckets.iter().chain(probe_buckets.iter()) {
            num_ios += page_count(pool, bucket.file_id())? as usize;
        }

        let mut num_result_tuples = 0usize;
        let mut num_used_buf_pages = 0usize;
        for i in 0..num_buckets {
            let stats = OnePassJoin::execute(
                pool,
                left_buckets[i],
                left_schema,
                right_buckets[i],
                right_schema,
                result,
            )?;
            num_result_tuples += stats.num_result_tuples;
            num_used_buf_pages = num_used_buf_pages.max(stats.num_used_buf_pages);
            num_ios += stats.num_ios;
        }

        for bucket in build_buckets.into_iter().chain(probe_buckets) {
            let (begin, end) = pool.file_page_range(bucket.file_id())?;
            for page_no in begin..end {
                let _ = pool.dispose_page(bucket.file_id(), page_no);
            }
            pool.unregister_file(bucket.file_id());
        }

        Ok(JoinStats {
            num_result_tuples,
            num_used_buf_pages,
            num_ios,
            is_complete: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Attribute, DataType};

    fn schema(name: &str, attrs: &[&str]) -> TableSchema {
        TableSchema {
            name: name.to_string(),
            attributes: attrs
                .iter()
                .map(|a| Attribute {
                    name: a.to_string(),
                    ty: DataType::Int,
                    max_size: 0,
                    not_null: false,
                    unique: false,
                })
                .collect(),
        }
    }

    fn register(pool: &mut BufferPool, id: u32, name: &str) -> HeapFile {
        let file_id = pool.register_file(Box::new(InMemoryFile::new(id, name)));
        HeapFile::new(file_id)
    }

    #[test]
    fn partitions_and_joins_matching_buckets() {
        let mut pool = BufferPool::new(32);
        let left = register(&mut pool, 1, "l");
        let right = register(&mut pool, 2, "r");
        let result = register(&mut pool, 3, "t");

        for i in 0..10 {
            left.insert_tuple(&mut pool, &format!("{i} left{i}")).unwrap();
        }
        for i in 0..10 {
            right.insert_tuple(&mut pool, &format!("{i} right{i}")).unwrap();
        }

        let left_schema = schema("l", &["id", "tag"]);
        let right_schema = schema("r", &["id", "tag"]);

        let join = GraceHashJoin { budget: 3 };
        let mut ids = FileIdAllocator::starting_at(1000);
        let stats = join
            .execute(
                &mut pool,
                left,
                &left_schema,
                right,
                &right_schema,
                result,
                &mut ids,
            )
            .unwrap();

        assert_eq!(stats.num_result_tuples, 10);

        let mut rows = Vec::new();
        result
            .for_each_tuple(&mut pool, |_, t| rows.push(t.to_string()))
            .unwrap();
        rows.sort();
        let mut expected: Vec<String> = (0..10).map(|i| format!("left{i} right{i}")).collect();
        expected.sort();
        assert_eq!(rows, expected);
    }
}
