use crate::PAGE_SIZE;
use crate::page::Page;
use crate::page_id::PageId;

impl Page {
    /// Creates a new page with every byte zeroed. The header is left
    /// uninitialized (`current_page_number == 0`, the free-page sentinel);
    /// call [`Page::new_empty`] to get a live, insertable page.
    pub fn new_zeroed(page_id: PageId) -> Self {
        Self {
            page_id,
            data: Box::new([0; PAGE_SIZE]),
        }
    }

    /// Creates a new page initialized with an empty slot directory and full
    /// free space.
    pub fn new_empty(page_id: PageId) -> Self {
        let mut page = Self::new_zeroed(page_id);
        // The header slice is always exactly HEADER_SIZE bytes, so resetting
        // a freshly zeroed page can never fail.
        page.header_mut()
            .expect("header slice has a fixed, correct size")
            .reset(page_id.page_number)
            .expect("resetting a freshly zeroed header cannot fail");
        page
    }

    /// Wraps an existing byte array as a page, without touching its
    /// contents. Used when reading a page back from disk.
    pub fn from_bytes(bytes: Box<[u8; PAGE_SIZE]>, page_id: PageId) -> Self {
        Self {
            page_id,
            data: bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_empty_page_has_zero_slots_and_full_free_space() {
        let page_id = PageId::new(1, 7);
        let page = Page::new_empty(page_id);

        assert_eq!(page.page_id(), page_id);
        let header = page.header_ref().unwrap();
        assert_eq!(header.get_num_slots().unwrap(), 0);
        assert_eq!(header.get_current_page_number().unwrap(), 7);
        assert_eq!(
            page.free_space().unwrap(),
            PAGE_SIZE - crate::HEADER_SIZE
        );
    }

    #[test]
    fn from_bytes_preserves_contents() {
        let page_id = PageId::new(1, 1);
        let bytes = Box::new([5u8; PAGE_SIZE]);
        let page = Page::from_bytes(bytes, page_id);

        assert_eq!(page.page_id(), page_id);
        assert_eq!(page.data()[..], [5u8; PAGE_SIZE][..]);
    }
}
