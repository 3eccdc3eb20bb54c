//! The fixed-capacity buffer pool: clock eviction, pin/dirty bookkeeping,
//! and the file registry frames are loaded from and flushed to.

use std::collections::HashMap;

use file::File;
use page::Page;
use page::page_id::{FileId, PageId};

use crate::errors::BufferError;
use crate::frame::{BufDesc, FrameId};
use crate::frame_index::FrameIndex;

/// A fixed-capacity pool of page frames, shared by every table a query
/// touches. Frames are addressed by pinning a page and receiving back its
/// [`FrameId`]; callers fetch the actual bytes via [`BufferPool::frame`] /
/// [`BufferPool::frame_mut`].
pub struct BufferPool {
    frames: Vec<Page>,
    descriptors: Vec<BufDesc>,
    clock_hand: usize,
    index: FrameIndex,
    files: HashMap<FileId, Box<dyn File>>,
    flush_on_drop: bool,
}

impl BufferPool {
    /// Creates a pool of `capacity` frames that flushes dirty frames on
    /// drop.
    pub fn new(capacity: usize) -> Self {
        Self::with_flush_on_drop(capacity, true)
    }

    /// Creates a pool of `capacity` frames, with control over whether dirty
    /// frames are flushed when the pool is dropped.
    pub fn with_flush_on_drop(capacity: usize, flush_on_drop: bool) -> Self {
        assert!(capacity > 0, "buffer pool must have at least one frame");
        Self {
            frames: (0..capacity)
                .map(|_| Page::new_zeroed(PageId::new(0, 0)))
                .collect(),
            descriptors: (0..capacity).map(BufDesc::empty).collect(),
            clock_hand: capacity - 1,
            index: FrameIndex::new(capacity),
            files: HashMap::new(),
            flush_on_drop,
        }
    }

    /// Registers a file with the pool, returning the `FileId` future calls
    /// address it by. The pool takes ownership of the file so that an
    /// eviction can write back to it even when the caller currently driving
    /// the miss is working with a different file.
    pub fn register_file(&mut self, file: Box<dyn File>) -> FileId {
        let file_id = file.file_id();
        self.files.insert(file_id, file);
        file_id
    }

    /// Pins the page at `(file_id, page_no)`, loading it from disk on a
    /// miss, and returns the frame it now lives in.
    pub fn read_page(&mut self, file_id: FileId, page_no: u32) -> Result<FrameId, BufferError> {
        let page_id = PageId::new(file_id, page_no);
        if let Ok(frame_id) = self.index.lookup(page_id) {
            let desc = &mut self.descriptors[frame_id];
            desc.pin_count += 1;
            desc.ref_bit = true;
            return Ok(frame_id);
        }

        let frame_id = self.alloc_buf()?;
        let page = self
            .files
            .get(&file_id)
            .ok_or(BufferError::UnknownFile(file_id))?
            .read_page(page_id)?;
        self.frames[frame_id] = page;
        let _ = self.index.insert(page_id, frame_id);
        self.descriptors[frame_id].set(file_id, page_no);
        Ok(frame_id)
    }

    /// Unpins the page at `(file_id, page_no)`. Unknown pages are tolerated
    /// with a warning rather than an error.
    pub fn unpin_page(
        &mut self,
        file_id: FileId,
        page_no: u32,
        dirty: bool,
    ) -> Result<(), BufferError> {
        let page_id = PageId::new(file_id, page_no);
        let Ok(frame_id) = self.index.lookup(page_id) else {
            tracing::warn!(%page_id, "unpin of a page not currently in the buffer pool");
            return Ok(());
        };

        let desc = &mut self.descriptors[frame_id];
        if desc.pin_count == 0 {
            return Err(BufferError::PageNotPinned(page_id));
        }
        desc.pin_count -= 1;
        if dirty {
            desc.dirty = true;
        }
        Ok(())
    }

    /// Allocates a new page in `file_id`, pins it, and returns its frame and
    /// page number.
    pub fn alloc_page(&mut self, file_id: FileId) -> Result<(FrameId, u32), BufferError> {
        let page_id = self
            .files
            .get_mut(&file_id)
            .ok_or(BufferError::UnknownFile(file_id))?
            .allocate_page()?;

        let frame_id = self.alloc_buf()?;
        let page = self
            .files
            .get(&file_id)
            .ok_or(BufferError::UnknownFile(file_id))?
            .read_page(page_id)?;
        self.frames[frame_id] = page;
        let _ = self.index.insert(page_id, frame_id);
        self.descriptors[frame_id].set(file_id, page_id.page_number);
        Ok((frame_id, page_id.page_number))
    }

    /// Removes the page at `(file_id, page_no)` from the pool (if cached)
    /// and from its file.
    pub fn dispose_page(&mut self, file_id: FileId, page_no: u32) -> Result<(), BufferError> {
        let page_id = PageId::new(file_id, page_no);
        if let Ok(frame_id) = self.index.lookup(page_id) {
            let _ = self.index.remove(page_id);
            self.descriptors[frame_id].clear();
        }
        self.files
            .get_mut(&file_id)
            .ok_or(BufferError::UnknownFile(file_id))?
            .delete_page(page_no)?;
        Ok(())
    }

    /// Writes back and evicts every frame belonging to `file_id`.
    pub fn flush_file(&mut self, file_id: FileId) -> Result<(), BufferError> {
        for frame_id in 0..self.descriptors.len() {
            if self.descriptors[frame_id].file != file_id {
                continue;
            }
            if !self.descriptors[frame_id].valid {
                return Err(BufferError::BadBuffer(frame_id, file_id));
            }
            if self.descriptors[frame_id].pin_count > 0 {
                let page_no = self.descriptors[frame_id].page_no;
                return Err(BufferError::PagePinned(PageId::new(file_id, page_no)));
            }
            if self.descriptors[frame_id].dirty {
                let file = self
                    .files
                    .get_mut(&file_id)
                    .ok_or(BufferError::UnknownFile(file_id))?;
                file.write_page(&self.frames[frame_id])?;
            }
            let page_no = self.descriptors[frame_id].page_no;
            let _ = self.index.remove(PageId::new(file_id, page_no));
            self.descriptors[frame_id].clear();
        }
        Ok(())
    }

    /// Drops a file from the registry, returning it if it was registered.
    /// Callers are responsible for disposing or flushing its pages first;
    /// this does not touch the frame index or any cached frames.
    pub fn unregister_file(&mut self, file_id: FileId) -> Option<Box<dyn File>> {
        self.files.remove(&file_id)
    }

    /// Returns the `(begin, end)` page-number range a file has ever handed
    /// out, per [`file::File::begin`]/[`file::File::end`]. `end - begin` is
    /// an upper bound on live pages; some page numbers in the range may be
    /// on the free list.
    pub fn file_page_range(&self, file_id: FileId) -> Result<(u32, u32), BufferError> {
        let file = self
            .files
            .get(&file_id)
            .ok_or(BufferError::UnknownFile(file_id))?;
        Ok((file.begin(), file.end()))
    }

    /// Borrows the page currently occupying `frame_id`.
    pub fn frame(&self, frame_id: FrameId) -> &Page {
        &self.frames[frame_id]
    }

    /// Mutably borrows the page currently occupying `frame_id`.
    pub fn frame_mut(&mut self, frame_id: FrameId) -> &mut Page {
        &mut self.frames[frame_id]
    }

    /// Clock replacement: finds (evicting if necessary) a frame with no
    /// pins, writing it back first if dirty.
    fn alloc_buf(&mut self) -> Result<FrameId, BufferError> {
        let num_frames = self.descriptors.len();
        let mut pinned_observed = 0usize;

        loop {
            self.clock_hand = (self.clock_hand + 1) % num_frames;
            let frame_id = self.clock_hand;
            let desc = self.descriptors[frame_id];

            if !desc.valid {
                self.descriptors[frame_id].clear();
                return Ok(frame_id);
            }
            if desc.ref_bit {
                self.descriptors[frame_id].ref_bit = false;
                continue;
            }
            if desc.pin_count > 0 {
                pinned_observed += 1;
                if pinned_observed >= num_frames {
                    return Err(BufferError::BufferExceeded);
                }
                continue;
            }

            let page_id = PageId::new(desc.file, desc.page_no);
            if desc.dirty {
                let file = self
                    .files
                    .get_mut(&desc.file)
                    .ok_or(BufferError::UnknownFile(desc.file))?;
                file.write_page(&self.frames[frame_id])?;
            }
            let _ = self.index.remove(page_id);
            self.descriptors[frame_id].clear();
            return Ok(frame_id);
        }
    }
}

impl std::fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BufferPool")
            .field("capacity", &self.frames.len())
            .field("clock_hand", &self.clock_hand)
            .field("registered_files", &self.files.keys().collect::<Vec<_>>())
            .field("flush_on_drop", &self.flush_on_drop)
            .finish_non_exhaustive()
    }
}

impl Drop for BufferPool {
    fn drop(&mut self) {
        if !self.flush_on_drop {
            return;
        }
        for frame_id in 0..self.descriptors.len() {
            let desc = self.descriptors[frame_id];
            if !desc.valid || !desc.dirty {
                continue;
            }
            let Some(file) = self.files.get_mut(&desc.file) else {
                continue;
            };
            if let Err(err) = file.write_page(&self.frames[frame_id]) {
                tracing::error!(frame_id, file = desc.file, %err, "failed to flush dirty frame on drop");
            }
        }
    }
}
