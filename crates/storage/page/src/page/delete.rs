use crate::errors::delete_error::DeleteError;
use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::errors::slot_error::SlotError;
use crate::page::Page;
use crate::slot::SLOT_SIZE;

impl Page {
    /// Deletes the record at `slot_number` (1-based). When
    /// `allow_slot_compaction` is set, every still-live record whose item
    /// offset is lower than the deleted record's offset is shifted rightward
    /// by the deleted record's length, closing the gap and reclaiming the
    /// space at `free_space_upper_bound`; and if the deleted slot (or any run
    /// of unused slots ending at it) sits at the tail of the directory, that
    /// trailing run is trimmed, shrinking `num_slots` and reclaiming the
    /// directory bytes at `free_space_lower_bound`. Without compaction the
    /// slot is simply tombstoned and its space is only reclaimed for reuse by
    /// a future insert into that same slot.
    pub fn delete_record(
        &mut self,
        slot_number: u16,
        allow_slot_compaction: bool,
    ) -> PageResult<()> {
        self.delete_record_internal(slot_number, allow_slot_compaction)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    pub(super) fn delete_record_internal(
        &mut self,
        slot_number: u16,
        allow_slot_compaction: bool,
    ) -> Result<(), DeleteError> {
        let slot_index = slot_number_to_index(slot_number)?;

        let (deleted_offset, deleted_length) = {
            let slot_array = self.slot_array_ref()?;
            let slot = slot_array.slot_ref(slot_index)?;
            if !slot.used() {
                return Err(SlotError::SlotNotInUse {
                    slot_index: slot_index as usize,
                }
                .into());
            }
            (slot.item_offset()?, slot.item_length()?)
        };

        {
            let mut slot_array = self.slot_array_mut()?;
            let mut slot = slot_array.slot_mut(slot_index)?;
            slot.set_used(false);
            slot.set_item_offset(0)?;
            slot.set_item_length(0)?;
        }
        let num_free_slots = self.header_ref()?.get_num_free_slots()?;
        self.header_mut()?.set_num_free_slots(num_free_slots + 1)?;

        if allow_slot_compaction {
            self.shift_records_after_delete(deleted_offset, deleted_length)?;
            self.trim_trailing_unused_slots()?;
        }

        Ok(())
    }

    /// While the highest-indexed slot in the directory is unused, removes it:
    /// shrinks `num_slots`, returns its directory entry to
    /// `free_space_lower_bound`, and drops it from `num_free_slots` since it
    /// no longer exists to be reused.
    fn trim_trailing_unused_slots(&mut self) -> Result<(), DeleteError> {
        loop {
            let num_slots = self.header_ref()?.get_num_slots()?;
            let Some(last_index) = num_slots.checked_sub(1) else {
                break;
            };

            let last_is_used = {
                let slot_array = self.slot_array_ref()?;
                slot_array.slot_ref(last_index as u32)?.used()
            };
            if last_is_used {
                break;
            }

            let lower_bound = self.header_ref()?.get_free_space_lower_bound()?;
            let num_free_slots = self.header_ref()?.get_num_free_slots()?;
            self.header_mut()?.set_num_slots(num_slots - 1)?;
            self.header_mut()?
                .set_free_space_lower_bound(lower_bound - SLOT_SIZE as u16)?;
            self.header_mut()?
                .set_num_free_slots(num_free_slots - 1)?;
        }
        Ok(())
    }

    /// Shifts every live record whose offset is below `deleted_offset`
    /// rightward (toward the end of the page) by `deleted_length` bytes,
    /// closing the hole the deleted record left behind, then grows
    /// `free_space_upper_bound` by `deleted_length` to reclaim the space.
    fn shift_records_after_delete(
        &mut self,
        deleted_offset: u16,
        deleted_length: u16,
    ) -> Result<(), DeleteError> {
        if deleted_length == 0 {
            return Ok(());
        }

        let num_slots = self.header_ref()?.get_num_slots()?;
        let upper_bound = self.header_ref()?.get_free_space_upper_bound()?;

        for index in 0..num_slots as u32 {
            let (offset, length) = {
                let slot_array = self.slot_array_ref()?;
                let slot = slot_array.slot_ref(index)?;
                if !slot.used() || slot.item_offset()? >= deleted_offset {
                    continue;
                }
                (slot.item_offset()?, slot.item_length()?)
            };

            let src = offset as usize..(offset as usize + length as usize);
            let new_offset = offset + deleted_length;
            self.data.copy_within(src, new_offset as usize);

            let mut slot_array = self.slot_array_mut()?;
            slot_array.slot_mut(index)?.set_item_offset(new_offset)?;
        }

        self.header_mut()?
            .set_free_space_upper_bound(upper_bound + deleted_length)?;
        Ok(())
    }
}

pub(super) fn slot_number_to_index(slot_number: u16) -> Result<u32, SlotError> {
    slot_number
        .checked_sub(1)
        .map(|v| v as u32)
        .ok_or(SlotError::InvalidSlot { slot_index: 0 })
}
