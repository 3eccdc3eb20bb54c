//! Zero-copy views into the slot directory of a slotted page.
//!
//! Unlike the legacy right-to-left layouts used by some page formats, this
//! directory grows forward from the start of the data region: slot index 0
//! occupies the first [`SLOT_SIZE`] bytes, slot index 1 the next, and so on.
//! A slot's physical position is therefore `slot_index * SLOT_SIZE`.

use crate::errors::slot_error::SlotError;
use crate::slot::{SLOT_SIZE, SlotMut, SlotRef};
use std::ops::Range;

/// Immutable zero-copy view into the slot directory of a slotted page.
#[derive(Debug)]
pub(crate) struct SlotArrayRef<'a> {
    bytes: &'a [u8],
}

impl<'a> SlotArrayRef<'a> {
    /// Creates a new `SlotArrayRef`, validating that the slice length matches
    /// the expected slot count.
    pub(super) fn new(bytes: &'a [u8], slot_count: u16) -> Result<Self, SlotError> {
        let expected_len = slot_count as usize * SLOT_SIZE;
        if bytes.len() != expected_len {
            return Err(SlotError::SlotRegionSizeMismatch {
                expected_size: expected_len,
                actual_size: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Gets an immutable view of the slot at the given zero-based index.
    pub(crate) fn slot_ref(&self, slot_index: u32) -> Result<SlotRef<'a>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_index)?;
        let slot_bytes = self.bytes.get(range).ok_or(SlotError::InvalidSlot {
            slot_index: slot_index as usize,
        })?;
        SlotRef::from_raw(slot_index, slot_bytes)
    }
}

/// Mutable zero-copy view into the slot directory of a slotted page.
#[derive(Debug)]
pub(crate) struct SlotArrayMut<'a> {
    bytes: &'a mut [u8],
}

impl<'a> SlotArrayMut<'a> {
    /// Creates a new `SlotArrayMut`, validating that the slice length matches
    /// the expected slot count.
    pub(super) fn new(bytes: &'a mut [u8], slot_count: u16) -> Result<Self, SlotError> {
        let expected_len = slot_count as usize * SLOT_SIZE;
        if bytes.len() != expected_len {
            return Err(SlotError::SlotRegionSizeMismatch {
                expected_size: expected_len,
                actual_size: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    pub(crate) fn slot_ref(&self, slot_index: u32) -> Result<SlotRef<'_>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_index)?;
        let slot_bytes = self.bytes.get(range).ok_or(SlotError::InvalidSlot {
            slot_index: slot_index as usize,
        })?;
        SlotRef::from_raw(slot_index, slot_bytes)
    }

    pub(crate) fn slot_mut(&mut self, slot_index: u32) -> Result<SlotMut<'_>, SlotError> {
        let range = slot_range(self.bytes.len(), slot_index)?;
        let slot_bytes = self.bytes.get_mut(range).ok_or(SlotError::InvalidSlot {
            slot_index: slot_index as usize,
        })?;
        SlotMut::from_raw(slot_index, slot_bytes)
    }
}

fn slot_range(slot_array_size: usize, slot_index: u32) -> Result<Range<usize>, SlotError> {
    let start = slot_index as usize * SLOT_SIZE;
    let end = start + SLOT_SIZE;
    if end > slot_array_size {
        return Err(SlotError::InvalidSlot {
            slot_index: slot_index as usize,
        });
    }
    Ok(start..end)
}

#[cfg(test)]
mod slot_array_ref_tests {
    use super::*;

    #[test]
    fn new_invalid_size() {
        let bytes = vec![0u8; 10];
        let result = SlotArrayRef::new(&bytes, 3);
        assert!(matches!(
            result,
            Err(SlotError::SlotRegionSizeMismatch {
                expected_size: 18,
                actual_size: 10
            })
        ));
    }

    #[test]
    fn forward_indexing_reads_first_slot_at_start() {
        let mut bytes = vec![0u8; SLOT_SIZE * 2];
        bytes[0..6].copy_from_slice(&[1, 0, 5, 0, 9, 0]); // used, offset=5, len=9
        let slot_array = SlotArrayRef::new(&bytes, 2).unwrap();
        let slot0 = slot_array.slot_ref(0).unwrap();
        assert!(slot0.used());
        assert_eq!(slot0.item_offset().unwrap(), 5);
        assert_eq!(slot0.item_length().unwrap(), 9);
    }

    #[test]
    fn out_of_bounds_index_is_invalid() {
        let bytes = vec![0u8; SLOT_SIZE * 2];
        let slot_array = SlotArrayRef::new(&bytes, 2).unwrap();
        assert!(matches!(
            slot_array.slot_ref(2),
            Err(SlotError::InvalidSlot { slot_index: 2 })
        ));
    }
}

#[cfg(test)]
mod slot_array_mut_tests {
    use super::*;

    #[test]
    fn set_then_read_back() {
        let mut bytes = vec![0u8; SLOT_SIZE * 2];
        {
            let mut slot_array = SlotArrayMut::new(&mut bytes, 2).unwrap();
            let mut slot1 = slot_array.slot_mut(1).unwrap();
            slot1.set_used(true);
            slot1.set_item_offset(100).unwrap();
            slot1.set_item_length(20).unwrap();
        }
        let slot_array = SlotArrayRef::new(&bytes, 2).unwrap();
        let slot0 = slot_array.slot_ref(0).unwrap();
        assert!(!slot0.used());
        let slot1 = slot_array.slot_ref(1).unwrap();
        assert!(slot1.used());
        assert_eq!(slot1.item_offset().unwrap(), 100);
        assert_eq!(slot1.item_length().unwrap(), 20);
    }
}
