//! A fixed-size slotted page.
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────┐
//!   │ Header (HEADER_SIZE bytes)                                       │
//!   ├──────────────────────────────────────────────────────────────────┤
//!   │ Slot directory (grows forward, one SLOT_SIZE entry per slot)     │
//!   ├──────────────────────────────────────────────────────────────────┤
//!   │ Free space                                                       │
//!   ├──────────────────────────────────────────────────────────────────┤
//!   │ Record data (grows backward from the end of the page)           │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Adding a slot never moves existing slots; inserting a record never moves
//! existing records unless a caller explicitly requests compaction on
//! delete.

mod accessors;
mod ctors;
mod delete;
mod insert;
mod internal;
mod read;
mod update;

use crate::PAGE_SIZE;
use crate::page_id::PageId;

/// A single slotted page of fixed size `PAGE_SIZE`.
#[derive(Debug)]
pub struct Page {
    pub(crate) page_id: PageId,
    pub(crate) data: Box<[u8; PAGE_SIZE]>,
}

#[cfg(test)]
mod tests {
    use super::Page;
    use crate::page_id::PageId;

    fn page() -> Page {
        Page::new_empty(PageId::new(1, 1))
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut page = page();
        let rid = page.insert_record(b"hello").unwrap();
        assert_eq!(rid.slot_number, 1);
        assert_eq!(page.get_record(rid.slot_number).unwrap(), b"hello");
    }

    #[test]
    fn inserting_records_shrinks_free_space_by_record_plus_slot() {
        let mut page = page();
        let before = page.free_space().unwrap();
        page.insert_record(b"abc").unwrap();
        let after = page.free_space().unwrap();
        assert_eq!(before - after, 3 + crate::slot::SLOT_SIZE);
    }

    #[test]
    fn delete_without_compaction_leaves_free_space_unchanged() {
        let mut page = page();
        let rid = page.insert_record(b"abc").unwrap();
        let before = page.free_space().unwrap();
        page.delete_record(rid.slot_number, false).unwrap();
        assert_eq!(page.free_space().unwrap(), before);
        assert!(page.get_record(rid.slot_number).is_err());
    }

    #[test]
    fn delete_with_compaction_reclaims_space() {
        let mut page = page();
        let rid = page.insert_record(b"abc").unwrap();
        let before = page.free_space().unwrap();
        let num_slots_before = page.header_ref().unwrap().get_num_slots().unwrap();
        page.delete_record(rid.slot_number, true).unwrap();
        assert_eq!(
            page.free_space().unwrap(),
            before + 3 + crate::slot::SLOT_SIZE
        );
        assert_eq!(
            page.header_ref().unwrap().get_num_slots().unwrap(),
            num_slots_before - 1
        );
    }

    #[test]
    fn compaction_shifts_later_records_but_preserves_their_contents() {
        let mut page = page();
        let first = page.insert_record(b"first").unwrap();
        let second = page.insert_record(b"second-rec").unwrap();
        page.delete_record(first.slot_number, true).unwrap();
        assert_eq!(page.get_record(second.slot_number).unwrap(), b"second-rec");
    }

    #[test]
    fn update_to_smaller_record_succeeds_and_keeps_slot_number() {
        let mut page = page();
        let rid = page.insert_record(b"original-value").unwrap();
        page.update_record(rid.slot_number, b"short").unwrap();
        assert_eq!(page.get_record(rid.slot_number).unwrap(), b"short");
    }

    #[test]
    fn update_to_larger_record_succeeds_and_keeps_slot_number() {
        let mut page = page();
        let rid = page.insert_record(b"short").unwrap();
        page.update_record(rid.slot_number, b"a much longer value")
            .unwrap();
        assert_eq!(
            page.get_record(rid.slot_number).unwrap(),
            b"a much longer value"
        );
    }

    #[test]
    fn reused_slot_is_picked_up_before_growing_the_directory() {
        let mut page = page();
        let a = page.insert_record(b"a").unwrap();
        let _b = page.insert_record(b"b").unwrap();
        page.delete_record(a.slot_number, false).unwrap();
        let num_slots_before = page.header_ref().unwrap().get_num_slots().unwrap();

        let c = page.insert_record(b"c").unwrap();
        assert_eq!(c.slot_number, a.slot_number);
        assert_eq!(
            page.header_ref().unwrap().get_num_slots().unwrap(),
            num_slots_before
        );
    }

    #[test]
    fn insert_fails_once_page_is_full() {
        let mut page = page();
        let big = vec![0u8; crate::PAGE_SIZE];
        assert!(page.insert_record(&big).is_err());
    }

    #[test]
    fn next_used_slot_iterates_in_ascending_order_skipping_deleted() {
        let mut page = page();
        let a = page.insert_record(b"a").unwrap();
        let b = page.insert_record(b"b").unwrap();
        let c = page.insert_record(b"c").unwrap();
        page.delete_record(b.slot_number, false).unwrap();

        let first = page.next_used_slot(None).unwrap().unwrap();
        assert_eq!(first, a.slot_number);
        let second = page.next_used_slot(Some(first)).unwrap().unwrap();
        assert_eq!(second, c.slot_number);
    }

    #[test]
    fn has_space_for_accounts_for_new_slot_cost() {
        let page = page();
        let free = page.free_space().unwrap();
        assert!(page.has_space_for(free - crate::slot::SLOT_SIZE).unwrap());
        assert!(!page.has_space_for(free - crate::slot::SLOT_SIZE + 1).unwrap());
    }

    #[test]
    fn next_page_number_round_trips() {
        let mut page = page();
        assert_eq!(page.next_page_number().unwrap(), 0);
        page.set_next_page_number(9).unwrap();
        assert_eq!(page.next_page_number().unwrap(), 9);
    }
}
