//! Chained-hash index from `(file, page_number)` to the frame currently
//! holding that page.

use page::page_id::PageId;
use thiserror::Error;

use crate::FrameId;

#[derive(Debug, Error)]
pub(crate) enum FrameIndexError {
    #[error("page {0} is already indexed")]
    AlreadyPresent(PageId),
    #[error("page {0} is not indexed")]
    NotFound(PageId),
}

/// Maps a page's identity to the frame of the buffer pool currently caching
/// it, using separate chaining. Sized to roughly `1.2 * capacity + 1`
/// buckets at construction, as is typical for a chained hash table aiming to
/// keep load factor under one.
#[derive(Debug)]
pub(crate) struct FrameIndex {
    buckets: Vec<Vec<(PageId, FrameId)>>,
}

impl FrameIndex {
    pub(crate) fn new(capacity: usize) -> Self {
        let num_buckets = (capacity * 12 / 10 + 1).max(1);
        Self {
            buckets: (0..num_buckets).map(|_| Vec::new()).collect(),
        }
    }

    fn bucket_for(&self, page_id: PageId) -> usize {
        let mixed = stable_hash(page_id.file_id) ^ (page_id.page_number as u64);
        (mixed % self.buckets.len() as u64) as usize
    }

    pub(crate) fn insert(&mut self, page_id: PageId, frame_id: FrameId) -> Result<(), FrameIndexError> {
        let bucket_index = self.bucket_for(page_id);
        let bucket = &mut self.buckets[bucket_index];
        if bucket.iter().any(|(id, _)| *id == page_id) {
            return Err(FrameIndexError::AlreadyPresent(page_id));
        }
        bucket.push((page_id, frame_id));
        Ok(())
    }

    pub(crate) fn lookup(&self, page_id: PageId) -> Result<FrameId, FrameIndexError> {
        let bucket_index = self.bucket_for(page_id);
        self.buckets[bucket_index]
            .iter()
            .find(|(id, _)| *id == page_id)
            .map(|(_, frame_id)| *frame_id)
            .ok_or(FrameIndexError::NotFound(page_id))
    }

    pub(crate) fn remove(&mut self, page_id: PageId) -> Result<(), FrameIndexError> {
        let bucket_index = self.bucket_for(page_id);
        let bucket = &mut self.buckets[bucket_index];
        let position = bucket
            .iter()
            .position(|(id, _)| *id == page_id)
            .ok_or(FrameIndexError::NotFound(page_id))?;
        bucket.swap_remove(position);
        Ok(())
    }
}

/// A small stable mixing function for the file-identity half of the key;
/// `page_number` is mixed in directly by the caller.
fn stable_hash(file_id: u32) -> u64 {
    let mut x = file_id as u64;
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_lookup_round_trips() {
        let mut index = FrameIndex::new(4);
        let page_id = PageId::new(1, 7);
        index.insert(page_id, 2).unwrap();
        assert_eq!(index.lookup(page_id).unwrap(), 2);
    }

    #[test]
    fn duplicate_insert_fails() {
        let mut index = FrameIndex::new(4);
        let page_id = PageId::new(1, 7);
        index.insert(page_id, 2).unwrap();
        assert!(matches!(
            index.insert(page_id, 3),
            Err(FrameIndexError::AlreadyPresent(_))
        ));
    }

    #[test]
    fn lookup_miss_fails() {
        let index = FrameIndex::new(4);
        assert!(matches!(
            index.lookup(PageId::new(1, 1)),
            Err(FrameIndexError::NotFound(_))
        ));
    }

    #[test]
    fn remove_then_lookup_fails() {
        let mut index = FrameIndex::new(4);
        let page_id = PageId::new(1, 7);
        index.insert(page_id, 2).unwrap();
        index.remove(page_id).unwrap();
        assert!(matches!(
            index.lookup(page_id),
            Err(FrameIndexError::NotFound(_))
        ));
    }

    #[test]
    fn remove_miss_fails() {
        let mut index = FrameIndex::new(4);
        assert!(matches!(
            index.remove(PageId::new(1, 1)),
            Err(FrameIndexError::NotFound(_))
        ));
    }
}
