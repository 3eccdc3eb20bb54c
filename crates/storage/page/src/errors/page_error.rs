use crate::errors::page_op_error::PageOpError;
use crate::page_id::PageId;

/// Public facing error type returned by the Page module.
#[derive(Debug, thiserror::Error)]
#[error("error on page {page_id}: {source}")]
pub struct PageError {
    /// The page ID on which the error occurred.
    pub(crate) page_id: PageId,
    /// The source error.
    pub(crate) source: PageOpError,
}

/// Public facing result type of page operations.
pub type PageResult<T> = Result<T, PageError>;

impl PageError {
    /// The page ID on which the error occurred.
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Whether this error means the record didn't fit on the page, as
    /// opposed to a genuine programming error (e.g. an invalid slot).
    /// Callers that scan a heap file for a page with room use this to
    /// decide whether to move on to the next page or propagate.
    pub fn is_insufficient_space(&self) -> bool {
        self.source.is_insufficient_space()
    }
}

/// Helper trait to attach page_id context when surfacing errors.
pub(crate) trait WithPageId<T> {
    fn with_page_id(self, page_id: PageId) -> PageResult<T>;
}

impl<T> WithPageId<T> for Result<T, PageOpError> {
    fn with_page_id(self, page_id: PageId) -> PageResult<T> {
        self.map_err(|source| PageError { page_id, source })
    }
}
