//! A `File` implementation backed by a single OS file on disk.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

#[cfg(unix)]
use std::os::unix::fs::FileExt;
#[cfg(windows)]
use std::os::windows::fs::FileExt;

use page::PAGE_SIZE;
use page::page_id::{FileId, PageId};
use page::Page;

use crate::File;
use crate::error::FileError;

/// A file of fixed-size pages, persisted on disk.
///
/// Page `n` lives at byte offset `n * PAGE_SIZE`. Page `0` is never handed
/// out through the public API; reserving its slot keeps every other page
/// number mapped directly to its own offset.
#[derive(Debug)]
pub struct DiskFile {
    file_id: FileId,
    path: PathBuf,
    handle: fs::File,
    num_pages: u32,
    free_list_head: u32,
}

impl DiskFile {
    /// Opens (creating if necessary) the file at `path` as a [`DiskFile`]
    /// identified by `file_id`, rebuilding its in-memory free list by
    /// scanning for pages whose stored page number is the free sentinel.
    pub fn open<P: Into<PathBuf>>(file_id: FileId, path: P) -> Result<Self, FileError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| io_err(&path, source))?;
        }

        let handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| io_err(&path, source))?;

        let len = handle.metadata().map_err(|source| io_err(&path, source))?.len();
        let num_pages = (len / PAGE_SIZE as u64) as u32;

        let mut disk_file = Self {
            file_id,
            path,
            handle,
            num_pages,
            free_list_head: 0,
        };
        disk_file.rebuild_free_list()?;
        Ok(disk_file)
    }

    fn rebuild_free_list(&mut self) -> Result<(), FileError> {
        let mut head = 0;
        for page_number in (1..=self.num_pages).rev() {
            let mut page = self.read_page_raw(page_number)?;
            if page.page_number()? != 0 {
                continue;
            }
            page.set_next_page_number(head)?;
            self.write_page_raw(&page)?;
            head = page_number;
        }
        self.free_list_head = head;
        Ok(())
    }

    fn read_page_raw(&self, page_number: u32) -> Result<Page, FileError> {
        let mut buf = Box::new([0u8; PAGE_SIZE]);
        let offset = page_number as u64 * PAGE_SIZE as u64;
        read_at(&self.handle, buf.as_mut_slice(), offset)
            .map_err(|source| io_err(&self.path, source))?;
        Ok(Page::from_bytes(buf, PageId::new(self.file_id, page_number)))
    }

    fn write_page_raw(&mut self, page: &Page) -> Result<(), FileError> {
        let offset = page.page_id().page_number as u64 * PAGE_SIZE as u64;
        write_at(&self.handle, &page.data()[..], offset).map_err(|source| io_err(&self.path, source))
    }

    fn append_blank_page(&mut self) -> Result<u32, FileError> {
        self.num_pages += 1;
        let page_number = self.num_pages;
        let page = Page::new_empty(PageId::new(self.file_id, 0));
        let offset = page_number as u64 * PAGE_SIZE as u64;
        write_at(&self.handle, &page.data()[..], offset).map_err(|source| io_err(&self.path, source))?;
        Ok(page_number)
    }
}

impl File for DiskFile {
    fn file_id(&self) -> FileId {
        self.file_id
    }

    fn filename(&self) -> &str {
        self.path.to_str().unwrap_or("<non-utf8 path>")
    }

    fn allocate_page(&mut self) -> Result<PageId, FileError> {
        let page_number = match self.free_list_head {
            0 => self.append_blank_page()?,
            recycled => {
                let freed_page = self.read_page_raw(recycled)?;
                self.free_list_head = freed_page.next_page_number()?;
                recycled
            }
        };

        let page = Page::new_empty(PageId::new(self.file_id, page_number));
        self.write_page_raw(&page)?;
        tracing::debug!(file = self.filename(), page_number, "allocated page");
        Ok(PageId::new(self.file_id, page_number))
    }

    fn read_page(&self, page_id: PageId) -> Result<Page, FileError> {
        if page_id.page_number == 0 || page_id.page_number > self.num_pages {
            return Err(FileError::PageNotFound(page_id));
        }
        self.read_page_raw(page_id.page_number)
    }

    fn write_page(&mut self, page: &Page) -> Result<(), FileError> {
        self.write_page_raw(page)
    }

    fn delete_page(&mut self, page_number: u32) -> Result<(), FileError> {
        if page_number == 0 || page_number > self.num_pages {
            return Err(FileError::PageNotFound(PageId::new(self.file_id, page_number)));
        }
        let mut freed = Page::new_empty(PageId::new(self.file_id, 0));
        freed.set_next_page_number(self.free_list_head)?;
        self.write_page_raw(&freed)?;
        self.free_list_head = page_number;
        tracing::debug!(file = self.filename(), page_number, "deleted page");
        Ok(())
    }

    fn end(&self) -> u32 {
        self.num_pages + 1
    }
}

fn io_err(path: &std::path::Path, source: std::io::Error) -> FileError {
    FileError::Io {
        filename: path.display().to_string(),
        source,
    }
}

#[inline]
fn read_at(file: &fs::File, buf: &mut [u8], offset: u64) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        file.read_exact_at(buf, offset)
    }
    #[cfg(windows)]
    {
        let mut read = 0;
        while read < buf.len() {
            let n = file.seek_read(&mut buf[read..], offset + read as u64)?;
            if n == 0 {
                return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof));
            }
            read += n;
        }
        Ok(())
    }
}

#[inline]
fn write_at(file: &fs::File, buf: &[u8], offset: u64) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        file.write_all_at(buf, offset)
    }
    #[cfg(windows)]
    {
        let mut written = 0;
        while written < buf.len() {
            let n = file.seek_write(&buf[written..], offset + written as u64)?;
            if n == 0 {
                return Err(std::io::Error::from(std::io::ErrorKind::WriteZero));
            }
            written += n;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn allocate_then_read_round_trips() {
        let dir = tempdir().unwrap();
        let mut file = DiskFile::open(1, dir.path().join("t.db")).unwrap();

        let page_id = file.allocate_page().unwrap();
        let mut page = file.read_page(page_id).unwrap();
        page.insert_record(b"hello").unwrap();
        file.write_page(&page).unwrap();

        let reread = file.read_page(page_id).unwrap();
        assert_eq!(reread.get_record(1).unwrap(), b"hello");
    }

    #[test]
    fn deleted_page_is_reused_before_growing() {
        let dir = tempdir().unwrap();
        let mut file = DiskFile::open(2, dir.path().join("t.db")).unwrap();

        let a = file.allocate_page().unwrap();
        let end_before = file.end();
        file.delete_page(a.page_number).unwrap();

        let b = file.allocate_page().unwrap();
        assert_eq!(b.page_number, a.page_number);
        assert_eq!(file.end(), end_before);
    }

    #[test]
    fn reading_unallocated_page_fails() {
        let dir = tempdir().unwrap();
        let file = DiskFile::open(3, dir.path().join("t.db")).unwrap();
        assert!(file.read_page(PageId::new(3, 1)).is_err());
    }

    #[test]
    fn free_list_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.db");
        let a;
        {
            let mut file = DiskFile::open(4, &path).unwrap();
            a = file.allocate_page().unwrap();
            file.allocate_page().unwrap();
            file.delete_page(a.page_number).unwrap();
        }

        let mut file = DiskFile::open(4, &path).unwrap();
        let reused = file.allocate_page().unwrap();
        assert_eq!(reused.page_number, a.page_number);
    }
}
