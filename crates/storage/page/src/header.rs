//! Layout and accessors for the page header in a slotted page.
//!
//! # Page Header Layout
//!
//! The page header occupies the first [`HEADER_SIZE`] bytes of every slotted
//! page and contains the bookkeeping needed to manage free space and the
//! page's position within its file. All fields are little-endian.
//!
//! | Field                    | Type | Offset |
//! |--------------------------|------|--------|
//! | `free_space_lower_bound` | u16  | 0      |
//! | `free_space_upper_bound` | u16  | 2      |
//! | `num_slots`              | u16  | 4      |
//! | `num_free_slots`         | u16  | 6      |
//! | `current_page_number`    | u32  | 8      |
//! | `next_page_number`       | u32  | 12     |
//!
//! `free_space_lower_bound` marks the first byte past the slot directory;
//! `free_space_upper_bound` marks the first byte of the record data region,
//! which grows downward (toward lower offsets) as records are inserted.
//! `current_page_number == 0` marks a page as free/uninitialized.

use crate::HEADER_SIZE;
use crate::errors::header_error::HeaderError;
use binary_helpers::le::{read_le, write_le};
use paste::paste;

/// Immutable zero-copy view into the header of a page.
#[derive(Debug)]
pub struct HeaderRef<'a> {
    bytes: &'a [u8; HEADER_SIZE],
}

impl<'a> HeaderRef<'a> {
    /// Creates a new `HeaderRef` from a slice of bytes if it matches `HEADER_SIZE`.
    pub fn new(bytes: &'a [u8]) -> Result<Self, HeaderError> {
        let bytes: &[u8; HEADER_SIZE] =
            bytes
                .try_into()
                .map_err(|_| HeaderError::HeaderSliceSizeMismatch {
                    actual: bytes.len(),
                    expected: HEADER_SIZE,
                })?;
        Ok(Self { bytes })
    }
}

/// Mutable zero-copy view into the header of a page.
#[derive(Debug)]
pub struct HeaderMut<'a> {
    bytes: &'a mut [u8; HEADER_SIZE],
}

impl<'a> HeaderMut<'a> {
    /// Creates a new `HeaderMut` from a slice of bytes if it matches `HEADER_SIZE`.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self, HeaderError> {
        let len = bytes.len();
        let bytes: &mut [u8; HEADER_SIZE] =
            bytes
                .try_into()
                .map_err(|_| HeaderError::HeaderSliceSizeMismatch {
                    actual: len,
                    expected: HEADER_SIZE,
                })?;
        Ok(Self { bytes })
    }

    /// Resets the header to describe an empty page with the given page number.
    /// `current_page_number == 0` is the free/uninitialized sentinel, so an
    /// empty but live page always carries a nonzero page number.
    ///
    /// `free_space_lower_bound`/`free_space_upper_bound` are absolute byte
    /// offsets into the page: the lower bound starts right after the header
    /// (where the slot directory begins) and the upper bound starts at the
    /// end of the page (records are appended at `upper_bound - len`).
    pub fn reset(&mut self, page_number: u32) -> Result<(), HeaderError> {
        self.set_free_space_lower_bound(HEADER_SIZE as u16)?;
        self.set_free_space_upper_bound(crate::PAGE_SIZE as u16)?;
        self.set_num_slots(0)?;
        self.set_num_free_slots(0)?;
        self.set_current_page_number(page_number)?;
        self.set_next_page_number(0)?;
        Ok(())
    }
}

/// Defines header field constants and getter/setter methods.
///
/// Pattern: `field_id(identifier): field_type(type) = field_offset(usize)`
macro_rules! impl_header_accessors {
    ( $( $field_name:ident : $field_type:ty = $field_offset:expr ; )* ) => {
        paste! {
            $(
                #[doc = concat!("Offset of `", stringify!($field_name), "` — type `", stringify!($field_type), "`.")]
                pub const [<$field_name:upper>] : usize = $field_offset;

                impl<'a> HeaderRef<'a> {
                    #[doc = concat!("Reads `", stringify!($field_name), "`.")]
                    pub fn [<get_ $field_name>](&self) -> Result<$field_type, HeaderError> {
                        Ok(read_le::<$field_type>(self.bytes, $field_offset)?)
                    }
                }

                impl<'a> HeaderMut<'a> {
                    #[doc = concat!("Reads `", stringify!($field_name), "`.")]
                    pub fn [<get_ $field_name>](&self) -> Result<$field_type, HeaderError> {
                        Ok(read_le::<$field_type>(self.bytes, $field_offset)?)
                    }

                    #[doc = concat!("Writes `", stringify!($field_name), "`.")]
                    pub fn [<set_ $field_name>](&mut self, val: $field_type) -> Result<(), HeaderError> {
                        write_le::<$field_type>(self.bytes, $field_offset, val)?;
                        Ok(())
                    }
                }
            )*
        }
    };
}

impl_header_accessors! {
    free_space_lower_bound : u16 = 0;
    free_space_upper_bound : u16 = 2;
    num_slots : u16 = 4;
    num_free_slots : u16 = 6;
    current_page_number : u32 = 8;
    next_page_number : u32 = 12;
}
