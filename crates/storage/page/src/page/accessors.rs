use crate::HEADER_SIZE;
use crate::errors::header_error::HeaderError;
use crate::header::{HeaderMut, HeaderRef};
use crate::page::Page;
use crate::page_id::PageId;

impl Page {
    /// Returns an immutable view of the header.
    #[inline]
    pub(crate) fn header_ref(&self) -> Result<HeaderRef<'_>, HeaderError> {
        HeaderRef::new(&self.data[..HEADER_SIZE])
    }

    /// Returns a mutable view of the header.
    #[inline]
    pub(crate) fn header_mut(&mut self) -> Result<HeaderMut<'_>, HeaderError> {
        HeaderMut::new(&mut self.data[..HEADER_SIZE])
    }

    /// The `PageId` of this page.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Returns an immutable reference to the underlying bytes of the page.
    pub fn data(&self) -> &[u8; crate::PAGE_SIZE] {
        &self.data
    }

    /// Returns a mutable reference to the underlying bytes of the page.
    pub fn data_mut(&mut self) -> &mut [u8; crate::PAGE_SIZE] {
        &mut self.data
    }
}
