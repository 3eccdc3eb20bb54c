use crate::errors::insert_error::InsertError;
use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::page::Page;
use crate::page_id::RecordId;
use crate::slot::SLOT_SIZE;
use binary_helpers::conversions::UsizeConversion;

impl Page {
    /// Inserts `record` into the page, returning the `RecordId` it was
    /// assigned. Reuses a previously-deleted slot when one is available;
    /// otherwise appends a new slot to the directory. The record's bytes
    /// always land at `free_space_upper_bound - record.len()`.
    pub fn insert_record(&mut self, record: &[u8]) -> PageResult<RecordId> {
        self.insert_record_internal(record)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    pub(super) fn insert_record_internal(
        &mut self,
        record: &[u8],
    ) -> Result<RecordId, InsertError> {
        let record_len = record.len();
        let free_slot = self.find_free_slot()?;
        let needs_new_slot = free_slot.is_none();

        let required = record_len + if needs_new_slot { SLOT_SIZE } else { 0 };
        let free_space = self.free_space_internal()?;
        if free_space < required {
            return Err(InsertError::InsufficientSpace {
                record_len,
                page_free_space: free_space,
            });
        }

        let header = self.header_ref()?;
        let upper_bound = header.get_free_space_upper_bound()?;
        let page_number = header.get_current_page_number()?;
        let new_upper_bound = upper_bound - record_len as u16;

        let slot_index = match free_slot {
            Some(index) => {
                let num_free_slots = self.header_ref()?.get_num_free_slots()?;
                self.header_mut()?.set_num_free_slots(num_free_slots - 1)?;
                index
            }
            None => {
                let num_slots = self.header_ref()?.get_num_slots()?;
                let lower_bound = self.header_ref()?.get_free_space_lower_bound()?;
                self.header_mut()?.set_num_slots(num_slots + 1)?;
                self.header_mut()?
                    .set_free_space_lower_bound(lower_bound + SLOT_SIZE as u16)?;
                num_slots as u32
            }
        };

        self.header_mut()?
            .set_free_space_upper_bound(new_upper_bound)?;

        let data_start = new_upper_bound as usize;
        self.data[data_start..data_start + record_len].copy_from_slice(record);

        let mut slot_array = self.slot_array_mut()?;
        let mut slot = slot_array.slot_mut(slot_index)?;
        slot.set_used(true);
        slot.set_item_offset(new_upper_bound)?;
        slot.set_item_length(record_len.to_u16().map_err(|_| {
            crate::errors::slot_error::SlotError::InvalidSlot {
                slot_index: slot_index as usize,
            }
        })?)?;

        Ok(RecordId::new(page_number, slot_index as u16 + 1))
    }
}
