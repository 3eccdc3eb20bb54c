use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::errors::update_error::UpdateError;
use crate::page::Page;
use crate::page::delete::slot_number_to_index;
use binary_helpers::conversions::UsizeConversion;

impl Page {
    /// Replaces the record at `slot_number` (1-based) with `new_record`.
    /// The new content may be smaller, equal, or larger than the current
    /// record, as long as it still fits on the page once the old record's
    /// space is reclaimed. The slot number — and therefore the record's
    /// `RecordId` — never changes.
    pub fn update_record(&mut self, slot_number: u16, new_record: &[u8]) -> PageResult<()> {
        self.update_record_internal(slot_number, new_record)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    pub(super) fn update_record_internal(
        &mut self,
        slot_number: u16,
        new_record: &[u8],
    ) -> Result<(), UpdateError> {
        let slot_index = slot_number_to_index(slot_number)?;
        let old_length = {
            let slot_array = self.slot_array_ref()?;
            let slot = slot_array.slot_ref(slot_index)?;
            if !slot.used() {
                return Err(crate::errors::slot_error::SlotError::SlotNotInUse {
                    slot_index: slot_index as usize,
                }
                .into());
            }
            slot.item_length()? as usize
        };

        let available = self.free_space_internal()? + old_length;
        if new_record.len() > available {
            return Err(UpdateError::InsufficientSpace {
                record_len: new_record.len(),
                page_free_space: available,
            });
        }

        self.delete_record_internal(slot_number, false)?;
        self.insert_into_slot(slot_index, new_record)?;
        Ok(())
    }

    /// Writes `record` into a specific, already-allocated (but currently
    /// free) slot, consuming one entry from `num_free_slots`. Used by update
    /// to preserve a record's `RecordId` across a resize.
    fn insert_into_slot(
        &mut self,
        slot_index: u32,
        record: &[u8],
    ) -> Result<(), crate::errors::insert_error::InsertError> {
        let header = self.header_ref()?;
        let upper_bound = header.get_free_space_upper_bound()?;
        let num_free_slots = header.get_num_free_slots()?;
        let new_upper_bound = upper_bound - record.len() as u16;

        self.header_mut()?
            .set_free_space_upper_bound(new_upper_bound)?;
        self.header_mut()?.set_num_free_slots(num_free_slots - 1)?;

        let data_start = new_upper_bound as usize;
        self.data[data_start..data_start + record.len()].copy_from_slice(record);

        let mut slot_array = self.slot_array_mut()?;
        let mut slot = slot_array.slot_mut(slot_index)?;
        slot.set_used(true);
        slot.set_item_offset(new_upper_bound)?;
        slot.set_item_length(record.len().to_u16().map_err(|_| {
            crate::errors::slot_error::SlotError::InvalidSlot {
                slot_index: slot_index as usize,
            }
        })?)?;
        Ok(())
    }
}
