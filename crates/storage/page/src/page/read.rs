use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::errors::read_error::ReadError;
use crate::errors::slot_error::SlotError;
use crate::page::Page;
use crate::page::delete::slot_number_to_index;

impl Page {
    /// Returns the bytes of the record at `slot_number` (1-based).
    pub fn get_record(&self, slot_number: u16) -> PageResult<&[u8]> {
        self.get_record_internal(slot_number)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    pub(super) fn get_record_internal(&self, slot_number: u16) -> Result<&[u8], ReadError> {
        let slot_index = slot_number_to_index(slot_number)?;
        let slot_array = self.slot_array_ref()?;
        let slot = slot_array.slot_ref(slot_index)?;
        if !slot.used() {
            return Err(SlotError::SlotNotInUse {
                slot_index: slot_index as usize,
            }
            .into());
        }
        let offset = slot.item_offset()? as usize;
        let length = slot.item_length()? as usize;
        Ok(&self.data[offset..offset + length])
    }
}
