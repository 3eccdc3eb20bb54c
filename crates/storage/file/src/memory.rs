//! A `File` implementation that keeps every page in memory.
//!
//! Used by tests and by join operators that spill partitions to temporary
//! storage that never needs to survive the process.

use page::Page;
use page::page_id::{FileId, PageId};

use crate::File;
use crate::error::FileError;

/// An in-memory, non-durable stand-in for a disk-backed file.
#[derive(Debug)]
pub struct InMemoryFile {
    file_id: FileId,
    name: String,
    pages: Vec<Option<Page>>,
    free_list_head: u32,
}

impl InMemoryFile {
    /// Creates an empty file with no allocated pages.
    pub fn new(file_id: FileId, name: impl Into<String>) -> Self {
        Self {
            file_id,
            name: name.into(),
            pages: vec![None],
            free_list_head: 0,
        }
    }

    fn slot(&self, page_number: u32) -> Option<&Page> {
        self.pages.get(page_number as usize).and_then(|p| p.as_ref())
    }
}

impl File for InMemoryFile {
    fn file_id(&self) -> FileId {
        self.file_id
    }

    fn filename(&self) -> &str {
        &self.name
    }

    fn allocate_page(&mut self) -> Result<PageId, FileError> {
        let page_number = match self.free_list_head {
            0 => {
                self.pages.push(None);
                (self.pages.len() - 1) as u32
            }
            recycled => {
                let freed_page = self
                    .slot(recycled)
                    .ok_or(FileError::PageNotFound(PageId::new(self.file_id, recycled)))?;
                self.free_list_head = freed_page.next_page_number()?;
                recycled
            }
        };

        let page = Page::new_empty(PageId::new(self.file_id, page_number));
        self.pages[page_number as usize] = Some(page);
        tracing::debug!(file = self.filename(), page_number, "allocated page");
        Ok(PageId::new(self.file_id, page_number))
    }

    fn read_page(&self, page_id: PageId) -> Result<Page, FileError> {
        let stored = self
            .slot(page_id.page_number)
            .ok_or(FileError::PageNotFound(page_id))?;
        Ok(Page::from_bytes(Box::new(*stored.data()), page_id))
    }

    fn write_page(&mut self, page: &Page) -> Result<(), FileError> {
        let page_number = page.page_id().page_number;
        let slot = self
            .pages
            .get_mut(page_number as usize)
            .ok_or(FileError::PageNotFound(page.page_id()))?;
        *slot = Some(Page::from_bytes(Box::new(*page.data()), page.page_id()));
        Ok(())
    }

    fn delete_page(&mut self, page_number: u32) -> Result<(), FileError> {
        if self.slot(page_number).is_none() {
            return Err(FileError::PageNotFound(PageId::new(self.file_id, page_number)));
        }
        let mut freed = Page::new_empty(PageId::new(self.file_id, 0));
        freed.set_next_page_number(self.free_list_head)?;
        self.pages[page_number as usize] = Some(freed);
        self.free_list_head = page_number;
        tracing::debug!(file = self.filename(), page_number, "deleted page");
        Ok(())
    }

    fn end(&self) -> u32 {
        self.pages.len() as u32
    }
}
