use std::fmt;

/// A simple type to define the unique identity of a file, which is at its core just a u32.
pub type FileId = u32;

/// A unique identifier for any page, scoped to the file containing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageId {
    /// Unique identifier of the file containing the page.
    pub file_id: FileId,

    /// The specific page number within the file.
    pub page_number: u32,
}

impl PageId {
    /// Creates a new `PageId` instance with the given file ID and page number.
    pub fn new(file_id: FileId, page_number: u32) -> Self {
        Self {
            file_id,
            page_number,
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_id, self.page_number)
    }
}

/// Identifies a single record by the page that holds it and its 1-based slot number
/// within that page. Slot number 0 is never a valid record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordId {
    /// Page number within the owning file.
    pub page_number: u32,
    /// 1-based slot number within the page. Never zero for a valid record.
    pub slot_number: u16,
}

impl RecordId {
    /// Creates a new `RecordId`. Panics if `slot_number` is zero, since slot 0 is the
    /// reserved sentinel for "no record".
    pub fn new(page_number: u32, slot_number: u16) -> Self {
        assert_ne!(slot_number, 0, "slot number 0 is reserved and never valid");
        Self {
            page_number,
            slot_number,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.page_number, self.slot_number)
    }
}
