use crate::errors::slot_error::SlotError;
use binary_helpers::le::{read_le, write_le};

/// Fixed size of a slot directory entry in bytes: a one-byte `used` flag
/// (padded to two bytes for alignment), an `item_offset` u16, and an
/// `item_length` u16.
pub(crate) const SLOT_SIZE: usize = 6;

/// A zero-copy read-only view into a 6-byte slot directory entry.
#[derive(Debug)]
pub(crate) struct SlotRef<'a> {
    slot_index: u32,
    bytes: &'a [u8; SLOT_SIZE],
}

impl<'a> SlotRef<'a> {
    #[inline]
    pub(super) fn from_raw(slot_index: u32, bytes: &'a [u8]) -> Result<Self, SlotError> {
        if bytes.len() != SLOT_SIZE {
            return Err(SlotError::SlotSizeMismatch {
                expected_size: SLOT_SIZE,
                actual_size: bytes.len(),
            });
        }

        let bytes_array: &[u8; SLOT_SIZE] = bytes
            .try_into()
            .unwrap_or_else(|_| unreachable!("bytes.len() == SLOT_SIZE but try_into() failed"));

        Ok(Self {
            slot_index,
            bytes: bytes_array,
        })
    }

    #[inline]
    pub(crate) fn slot_index(&self) -> u32 {
        self.slot_index
    }

    #[inline]
    pub(crate) fn used(&self) -> bool {
        self.bytes[0] != 0
    }

    #[inline]
    pub(crate) fn item_offset(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 2)?)
    }

    #[inline]
    pub(crate) fn item_length(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 4)?)
    }
}

/// A zero-copy mutable view into a 6-byte slot directory entry.
#[derive(Debug)]
pub(crate) struct SlotMut<'a> {
    slot_index: u32,
    bytes: &'a mut [u8; SLOT_SIZE],
}

impl<'a> SlotMut<'a> {
    #[inline]
    pub(super) fn from_raw(slot_index: u32, bytes: &'a mut [u8]) -> Result<Self, SlotError> {
        if bytes.len() != SLOT_SIZE {
            return Err(SlotError::SlotSizeMismatch {
                expected_size: SLOT_SIZE,
                actual_size: bytes.len(),
            });
        }

        let bytes_array: &mut [u8; SLOT_SIZE] = bytes
            .try_into()
            .unwrap_or_else(|_| unreachable!("bytes.len() == SLOT_SIZE but try_into() failed"));

        Ok(Self {
            slot_index,
            bytes: bytes_array,
        })
    }

    #[inline]
    pub(crate) fn slot_index(&self) -> u32 {
        self.slot_index
    }

    #[inline]
    pub(crate) fn used(&self) -> bool {
        self.bytes[0] != 0
    }

    #[inline]
    pub(crate) fn item_offset(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 2)?)
    }

    #[inline]
    pub(crate) fn item_length(&self) -> Result<u16, SlotError> {
        Ok(read_le::<u16>(self.bytes, 4)?)
    }

    #[inline]
    pub(crate) fn set_used(&mut self, used: bool) {
        self.bytes[0] = used as u8;
    }

    #[inline]
    pub(crate) fn set_item_offset(&mut self, offset: u16) -> Result<(), SlotError> {
        Ok(write_le::<u16>(self.bytes, 2, offset)?)
    }

    #[inline]
    pub(crate) fn set_item_length(&mut self, length: u16) -> Result<(), SlotError> {
        Ok(write_le::<u16>(self.bytes, 4, length)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_size_constant_is_six() {
        assert_eq!(SLOT_SIZE, 6);
    }

    #[test]
    fn slot_ref_from_raw_with_valid_bytes_reads_fields_correctly() {
        let bytes = [0x01, 0x00, 0x10, 0x00, 0x20, 0x00];
        let slot = SlotRef::from_raw(5, &bytes).unwrap();
        assert_eq!(slot.slot_index(), 5);
        assert!(slot.used());
        assert_eq!(slot.item_offset().unwrap(), 0x10);
        assert_eq!(slot.item_length().unwrap(), 0x20);
    }

    #[test]
    fn slot_ref_from_raw_with_invalid_size_returns_size_mismatch() {
        let bytes = [0x01, 0x02, 0x03];
        let res = SlotRef::from_raw(1, &bytes);
        assert!(matches!(
            res,
            Err(SlotError::SlotSizeMismatch {
                expected_size: 6,
                actual_size: 3
            })
        ));
    }

    #[test]
    fn slot_mut_roundtrip() {
        let mut bytes = [0u8; SLOT_SIZE];
        {
            let mut slot = SlotMut::from_raw(3, &mut bytes).unwrap();
            slot.set_used(true);
            slot.set_item_offset(0x1234).unwrap();
            slot.set_item_length(0x5678).unwrap();
            assert!(slot.used());
            assert_eq!(slot.item_offset().unwrap(), 0x1234);
            assert_eq!(slot.item_length().unwrap(), 0x5678);
        }
        assert_eq!(bytes[0], 1);
    }

    #[test]
    fn slot_mut_unused_after_clear() {
        let mut bytes = [0xFFu8; SLOT_SIZE];
        let mut slot = SlotMut::from_raw(0, &mut bytes).unwrap();
        slot.set_used(false);
        slot.set_item_offset(0).unwrap();
        slot.set_item_length(0).unwrap();
        assert!(!slot.used());
        assert_eq!(slot.item_offset().unwrap(), 0);
        assert_eq!(slot.item_length().unwrap(), 0);
    }
}
