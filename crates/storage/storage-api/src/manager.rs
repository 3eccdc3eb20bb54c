//! Opens named tables as disk-backed files and registers them with a
//! shared buffer pool. The engine's single point of contact with storage,
//! mirroring the role the teacher's `StorageManager` plays for its server.

use std::path::PathBuf;

use buffer::BufferPool;
use file::DiskFile;
use heap::HeapFile;
use page::page_id::FileId;

use crate::error::StorageError;

/// Owns the buffer pool and hands out heap-file handles for tables stored
/// under a single data directory.
#[derive(Debug)]
pub struct StorageManager {
    pool: BufferPool,
    data_dir: PathBuf,
    next_file_id: FileId,
}

impl StorageManager {
    /// Creates a manager with a `buffer_pages`-frame pool, storing table
    /// files under `data_dir`.
    pub fn new(buffer_pages: usize, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool: BufferPool::new(buffer_pages),
            data_dir: data_dir.into(),
            next_file_id: 1,
        }
    }

    /// Opens (creating if necessary) `name`'s backing file under the data
    /// directory and registers it with the pool, returning a heap-file
    /// handle ready for `insert_tuple`/`for_each_tuple`.
    pub fn open_table(&mut self, name: &str) -> Result<HeapFile, StorageError> {
        let file_id = self.next_file_id;
        self.next_file_id += 1;
        let path = self.data_dir.join(format!("{name}.tbl"));
        let file = DiskFile::open(file_id, path)?;
        let file_id = self.pool.register_file(Box::new(file));
        Ok(HeapFile::new(file_id))
    }

    /// Hands out the next `FileId` without opening a table. Used by Grace
    /// Hash Join to get collision-free ids for the temporary partition
    /// files it registers directly with the pool.
    pub fn next_temp_file_id(&mut self) -> FileId {
        let id = self.next_file_id;
        self.next_file_id += 1;
        id
    }

    /// Borrows the pool every storage operation ultimately runs through.
    pub fn pool(&mut self) -> &mut BufferPool {
        &mut self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_and_inserts_into_a_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = StorageManager::new(4, dir.path());

        let table = storage.open_table("students").unwrap();
        let rid = table.insert_tuple(storage.pool(), "1 alice").unwrap();
        assert_eq!(table.get_tuple(storage.pool(), rid).unwrap(), "1 alice");
    }

    #[test]
    fn assigns_distinct_file_ids_to_each_table() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = StorageManager::new(4, dir.path());

        let a = storage.open_table("a").unwrap();
        let b = storage.open_table("b").unwrap();
        assert_ne!(a.file_id(), b.file_id());
    }
}
