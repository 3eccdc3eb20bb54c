//! The buffer pool: a fixed-capacity cache of page frames backed by the
//! `file` crate's on-disk or in-memory files, replaced under the clock
//! policy with pin/unpin reference counting and dirty-bit write-back.

mod errors;
mod frame;
mod frame_index;
mod pool;

pub use errors::BufferError;
pub use frame::FrameId;
pub use pool::BufferPool;

#[cfg(test)]
mod tests {
    use super::*;
    use file::InMemoryFile;

    fn pool_with_file(capacity: usize) -> (BufferPool, page::page_id::FileId) {
        let mut pool = BufferPool::new(capacity);
        let file_id = pool.register_file(Box::new(InMemoryFile::new(1, "t")));
        (pool, file_id)
    }

    #[test]
    fn alloc_then_read_round_trips() {
        let (mut pool, file_id) = pool_with_file(4);

        let (frame_id, page_no) = pool.alloc_page(file_id).unwrap();
        pool.frame_mut(frame_id).insert_record(b"hello").unwrap();
        pool.unpin_page(file_id, page_no, true).unwrap();

        let frame_id = pool.read_page(file_id, page_no).unwrap();
        assert_eq!(pool.frame(frame_id).get_record(1).unwrap(), b"hello");
        pool.unpin_page(file_id, page_no, false).unwrap();
    }

    #[test]
    fn unpinning_unpinned_page_fails() {
        let (mut pool, file_id) = pool_with_file(4);
        let (_frame_id, page_no) = pool.alloc_page(file_id).unwrap();
        pool.unpin_page(file_id, page_no, false).unwrap();
        assert!(matches!(
            pool.unpin_page(file_id, page_no, false),
            Err(BufferError::PageNotPinned(_))
        ));
    }

    #[test]
    fn unpinning_unknown_page_is_tolerated() {
        let (mut pool, file_id) = pool_with_file(4);
        assert!(pool.unpin_page(file_id, 99, false).is_ok());
    }

    #[test]
    fn all_frames_pinned_fails_allocation() {
        let (mut pool, file_id) = pool_with_file(2);
        pool.alloc_page(file_id).unwrap();
        pool.alloc_page(file_id).unwrap();
        assert!(matches!(
            pool.alloc_page(file_id),
            Err(BufferError::BufferExceeded)
        ));
    }

    #[test]
    fn eviction_writes_back_dirty_page_before_reuse() {
        let (mut pool, file_id) = pool_with_file(1);

        let (frame_id, first_page_no) = pool.alloc_page(file_id).unwrap();
        pool.frame_mut(frame_id).insert_record(b"dirty").unwrap();
        pool.unpin_page(file_id, first_page_no, true).unwrap();

        // Only one frame exists; allocating a second page must evict the
        // first, flushing it to the file first.
        pool.alloc_page(file_id).unwrap();

        let frame_id = pool.read_page(file_id, first_page_no).unwrap();
        assert_eq!(pool.frame(frame_id).get_record(1).unwrap(), b"dirty");
    }

    #[test]
    fn pinned_page_survives_eviction_pressure() {
        let (mut pool, file_id) = pool_with_file(3);

        let (_f1, p1) = pool.alloc_page(file_id).unwrap();
        pool.unpin_page(file_id, p1, false).unwrap();
        let (_f2, p2) = pool.alloc_page(file_id).unwrap();
        pool.unpin_page(file_id, p2, false).unwrap();
        let (_f3, p3) = pool.alloc_page(file_id).unwrap();
        pool.unpin_page(file_id, p3, false).unwrap();

        // Re-read p1 but keep it pinned this time: the pool is now full and
        // every frame has had its second chance, so the next allocation must
        // evict one of p2/p3, never the still-pinned p1.
        pool.read_page(file_id, p1).unwrap();

        let (_f4, _p4) = pool.alloc_page(file_id).unwrap();
        assert!(pool.read_page(file_id, p1).is_ok());
        pool.unpin_page(file_id, p1, false).unwrap();
        pool.unpin_page(file_id, p1, false).unwrap();
    }

    #[test]
    fn dispose_removes_page_from_index_and_file() {
        let (mut pool, file_id) = pool_with_file(4);
        let (_frame_id, page_no) = pool.alloc_page(file_id).unwrap();
        pool.unpin_page(file_id, page_no, false).unwrap();

        pool.dispose_page(file_id, page_no).unwrap();
        assert!(pool.read_page(file_id, page_no).is_err());
    }

    #[test]
    fn flush_file_fails_on_pinned_page() {
        let (mut pool, file_id) = pool_with_file(4);
        pool.alloc_page(file_id).unwrap();
        assert!(matches!(
            pool.flush_file(file_id),
            Err(BufferError::PagePinned(_))
        ));
    }

    #[test]
    fn flush_file_clears_dirty_bits_once_unpinned() {
        let (mut pool, file_id) = pool_with_file(4);
        let (frame_id, page_no) = pool.alloc_page(file_id).unwrap();
        pool.frame_mut(frame_id).insert_record(b"x").unwrap();
        pool.unpin_page(file_id, page_no, true).unwrap();

        pool.flush_file(file_id).unwrap();
        let frame_id = pool.read_page(file_id, page_no).unwrap();
        assert_eq!(pool.frame(frame_id).get_record(1).unwrap(), b"x");
    }
}
