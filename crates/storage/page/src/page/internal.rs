use crate::HEADER_SIZE;
use crate::errors::page_error::{PageResult, WithPageId};
use crate::errors::page_op_error::PageOpError;
use crate::errors::slot_error::SlotError;
use crate::page::Page;
use crate::slot::SLOT_SIZE;
use crate::slot_array::{SlotArrayMut, SlotArrayRef};

impl Page {
    /// Returns an immutable view of the slot directory.
    #[inline]
    pub(crate) fn slot_array_ref(&self) -> Result<SlotArrayRef<'_>, SlotError> {
        let num_slots = self.header_ref()?.get_num_slots()?;
        let end = HEADER_SIZE + num_slots as usize * SLOT_SIZE;
        SlotArrayRef::new(&self.data[HEADER_SIZE..end], num_slots)
    }

    /// Returns a mutable view of the slot directory.
    #[inline]
    pub(crate) fn slot_array_mut(&mut self) -> Result<SlotArrayMut<'_>, SlotError> {
        let num_slots = self.header_ref()?.get_num_slots()?;
        let end = HEADER_SIZE + num_slots as usize * SLOT_SIZE;
        SlotArrayMut::new(&mut self.data[HEADER_SIZE..end], num_slots)
    }

    /// Looks for an existing unused slot to reuse. Returns `None` when every
    /// allocated slot is currently in use (a new slot must be appended).
    pub(super) fn find_free_slot(&self) -> Result<Option<u32>, SlotError> {
        let num_free_slots = self.header_ref()?.get_num_free_slots()?;
        if num_free_slots == 0 {
            return Ok(None);
        }

        let slot_array = self.slot_array_ref()?;
        let num_slots = self.header_ref()?.get_num_slots()?;
        for index in 0..num_slots as u32 {
            if !slot_array.slot_ref(index)?.used() {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    pub(super) fn free_space_internal(
        &self,
    ) -> Result<usize, crate::errors::header_error::HeaderError> {
        let header = self.header_ref()?;
        Ok((header.get_free_space_upper_bound()? - header.get_free_space_lower_bound()?) as usize)
    }
}

impl Page {
    /// Number of bytes available for new records and slot-directory growth.
    pub fn free_space(&self) -> PageResult<usize> {
        self.free_space_internal()
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Whether a record of `record_len` bytes would currently fit, including
    /// the cost of a new slot directory entry if no deleted slot can be
    /// reused.
    pub fn has_space_for(&self, record_len: usize) -> PageResult<bool> {
        self.has_space_for_internal(record_len)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    fn has_space_for_internal(
        &self,
        record_len: usize,
    ) -> Result<bool, crate::errors::header_error::HeaderError> {
        let free_slot_available = self.header_ref()?.get_num_free_slots()? > 0;
        let required = record_len + if free_slot_available { 0 } else { SLOT_SIZE };
        Ok(self.free_space_internal()? >= required)
    }

    /// The page number of this page, as recorded in its own header.
    pub fn page_number(&self) -> PageResult<u32> {
        self.header_ref()
            .and_then(|h| h.get_current_page_number())
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// The page number of the next page in this page's heap file chain, or
    /// `0` if this is the last page.
    pub fn next_page_number(&self) -> PageResult<u32> {
        self.header_ref()
            .and_then(|h| h.get_next_page_number())
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    /// Sets the page number of the next page in this page's heap file chain.
    pub fn set_next_page_number(&mut self, next: u32) -> PageResult<()> {
        let page_id = self.page_id;
        self.header_mut()
            .and_then(|mut h| h.set_next_page_number(next))
            .map_err(PageOpError::from)
            .with_page_id(page_id)
    }

    /// Finds the next used slot at or after the given zero-based index,
    /// returning its 1-based slot number. Used to iterate live records in
    /// ascending slot-number order.
    pub fn next_used_slot(&self, after: Option<u16>) -> PageResult<Option<u16>> {
        self.next_used_slot_internal(after)
            .map_err(PageOpError::from)
            .with_page_id(self.page_id)
    }

    fn next_used_slot_internal(&self, after: Option<u16>) -> Result<Option<u16>, SlotError> {
        let num_slots = self.header_ref()?.get_num_slots()?;
        let slot_array = self.slot_array_ref()?;
        let start = after.map(|s| s as u32).unwrap_or(0);
        for index in start..num_slots as u32 {
            if slot_array.slot_ref(index)?.used() {
                return Ok(Some(index as u16 + 1));
            }
        }
        Ok(None)
    }
}
