//! Record-level operations over a table backed by a [`buffer::BufferPool`].

use buffer::BufferPool;
use page::page_id::{FileId, RecordId};

use crate::error::HeapError;

/// A thin handle onto a table's pages. Holds no state of its own beyond the
/// `FileId` the pool registered the table's [`file::File`] under; every
/// operation is a pure client of the pool, mirroring the original storage
/// layer's `(tuple, file, bufMgr)` call shape.
#[derive(Debug, Clone, Copy)]
pub struct HeapFile {
    file_id: FileId,
}

impl HeapFile {
    /// Wraps an already-registered file as a heap file.
    pub fn new(file_id: FileId) -> Self {
        Self { file_id }
    }

    /// The `FileId` this heap file operates on.
    pub fn file_id(&self) -> FileId {
        self.file_id
    }

    /// Inserts `tuple` into the first existing page with room for it,
    /// allocating a fresh page only if none is found.
    pub fn insert_tuple(&self, pool: &mut BufferPool, tuple: &str) -> Result<RecordId, HeapError> {
        let (begin, end) = pool.file_page_range(self.file_id)?;
        for page_no in begin..end {
            let frame_id = pool.read_page(self.file_id, page_no)?;
            if pool.frame(frame_id).page_number()? == 0 {
                // a freed page sitting on the free list between begin..end
                pool.unpin_page(self.file_id, page_no, false)?;
                continue;
            }

            match pool.frame_mut(frame_id).insert_record(tuple.as_bytes()) {
                Ok(rid) => {
                    pool.unpin_page(self.file_id, page_no, true)?;
                    return Ok(rid);
                }
                Err(err) if err.is_insufficient_space() => {
                    pool.unpin_page(self.file_id, page_no, false)?;
                    continue;
                }
                Err(err) => {
                    pool.unpin_page(self.file_id, page_no, false)?;
                    return Err(err.into());
                }
            }
        }

        let (frame_id, page_no) = pool.alloc_page(self.file_id)?;
        let rid = pool.frame_mut(frame_id).insert_record(tuple.as_bytes())?;
        pool.unpin_page(self.file_id, page_no, true)?;
        Ok(rid)
    }

    /// Deletes the tuple identified by `rid`.
    pub fn delete_tuple(&self, pool: &mut BufferPool, rid: RecordId) -> Result<(), HeapError> {
        let frame_id = pool.read_page(self.file_id, rid.page_number)?;
        pool.frame_mut(frame_id)
            .delete_record(rid.slot_number, true)?;
        pool.unpin_page(self.file_id, rid.page_number, true)?;
        Ok(())
    }

    /// Reads back the tuple identified by `rid`.
    pub fn get_tuple(&self, pool: &mut BufferPool, rid: RecordId) -> Result<String, HeapError> {
        let frame_id = pool.read_page(self.file_id, rid.page_number)?;
        let bytes = pool.frame(frame_id).get_record(rid.slot_number)?;
        let tuple = String::from_utf8_lossy(bytes).into_owned();
        pool.unpin_page(self.file_id, rid.page_number, false)?;
        Ok(tuple)
    }

    /// Visits every live tuple in the file, page by page, in ascending
    /// `(page_number, slot_number)` order. Pages are pinned only for the
    /// duration of their own visit.
    pub fn for_each_tuple(
        &self,
        pool: &mut BufferPool,
        visit: impl FnMut(RecordId, &str),
    ) -> Result<(), HeapError> {
        let (begin, end) = pool.file_page_range(self.file_id)?;
        self.for_each_tuple_in_range(pool, begin, end, visit)
    }

    /// Like [`HeapFile::for_each_tuple`], but restricted to the page-number
    /// range `[start, end)`. Used by the join operators to hash only a
    /// budget-sized chunk of the build table at a time.
    pub fn for_each_tuple_in_range(
        &self,
        pool: &mut BufferPool,
        start: u32,
        end: u32,
        mut visit: impl FnMut(RecordId, &str),
    ) -> Result<(), HeapError> {
        for page_no in start..end {
            let frame_id = pool.read_page(self.file_id, page_no)?;
            if pool.frame(frame_id).page_number()? == 0 {
                pool.unpin_page(self.file_id, page_no, false)?;
                continue;
            }

            let mut slot = None;
            loop {
                slot = pool.frame(frame_id).next_used_slot(slot)?;
                let Some(slot_number) = slot else { break };
                let rid = RecordId::new(page_no, slot_number);
                let bytes = pool.frame(frame_id).get_record(slot_number)?;
                let tuple = String::from_utf8_lossy(bytes).into_owned();
                visit(rid, &tuple);
            }

            pool.unpin_page(self.file_id, page_no, false)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use file::InMemoryFile;

    fn heap_file(pool: &mut BufferPool) -> HeapFile {
        let file_id = pool.register_file(Box::new(InMemoryFile::new(1, "t")));
        HeapFile::new(file_id)
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut pool = BufferPool::new(4);
        let heap = heap_file(&mut pool);

        let rid = heap.insert_tuple(&mut pool, "1 alice").unwrap();
        assert_eq!(heap.get_tuple(&mut pool, rid).unwrap(), "1 alice");
    }

    #[test]
    fn insert_spills_to_a_new_page_once_full() {
        let mut pool = BufferPool::new(4);
        let heap = heap_file(&mut pool);

        let big = "x".repeat(4100);
        let first = heap.insert_tuple(&mut pool, &big).unwrap();
        let second = heap.insert_tuple(&mut pool, &big).unwrap();
        assert_ne!(first.page_number, second.page_number);
    }

    #[test]
    fn delete_removes_tuple_from_scan() {
        let mut pool = BufferPool::new(4);
        let heap = heap_file(&mut pool);

        let rid = heap.insert_tuple(&mut pool, "1 alice").unwrap();
        heap.insert_tuple(&mut pool, "2 bob").unwrap();
        heap.delete_tuple(&mut pool, rid).unwrap();

        let mut seen = Vec::new();
        heap.for_each_tuple(&mut pool, |_, tuple| seen.push(tuple.to_string()))
            .unwrap();
        assert_eq!(seen, vec!["2 bob".to_string()]);
    }

    #[test]
    fn deleted_page_slot_is_reused_by_a_later_insert() {
        let mut pool = BufferPool::new(4);
        let heap = heap_file(&mut pool);

        let big = "x".repeat(4100);
        heap.insert_tuple(&mut pool, &big).unwrap();
        let second = heap.insert_tuple(&mut pool, &big).unwrap();
        heap.delete_tuple(&mut pool, second).unwrap();

        let mut seen = 0;
        heap.for_each_tuple(&mut pool, |_, _| seen += 1).unwrap();
        assert_eq!(seen, 1);
    }
}
