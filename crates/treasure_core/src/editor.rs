//! Slot mutations: give, transfer, sort. Each operation is a complete,
//! synchronous transition on in-memory regions; persistence is the
//! document's job.

use crate::error::{CoreError, CoreErrorCode};
use crate::region::Region;
use crate::slot::Slot;

/// One slot moved by [`transfer`], recorded before the source was zeroed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovedSlot {
    pub source_index: usize,
    pub dest_index: usize,
    pub item_id: i16,
    pub amount: i16,
}

/// Insert `(item_id, amount)` into the first empty slot of `region`,
/// zeroing every other tracked field. Fails with `NoCapacity` and
/// leaves the region unchanged when no empty slot exists. Returns the
/// index written.
pub fn give(region: &mut Region, item_id: i16, amount: i16) -> Result<usize, CoreError> {
    let Some(index) = region.first_empty() else {
        return Err(CoreError::new(
            CoreErrorCode::NoCapacity,
            format!("no empty slot left (all {} slots occupied)", region.len()),
        ));
    };

    region.set_slot(index, Slot::with_item(item_id, amount))?;
    Ok(index)
}

/// Move the non-empty slots at `indices` (in the given order) from
/// `source` into the first empty slots of `dest`. Each move gives
/// `(item_id, amount)` to the destination and fully zeroes the source
/// slot. On the first `NoCapacity` the operation stops immediately:
/// moves already made stay committed, and the failure is reported once.
pub fn transfer(
    source: &mut Region,
    indices: impl IntoIterator<Item = usize>,
    dest: &mut Region,
) -> Result<Vec<MovedSlot>, CoreError> {
    let mut moved = Vec::new();

    for source_index in indices {
        let slot = source.slot(source_index)?;
        if slot.is_empty() {
            continue;
        }

        let dest_index = give(dest, slot.item_id, slot.amount)?;
        source.set_slot(source_index, Slot::default())?;
        moved.push(MovedSlot {
            source_index,
            dest_index,
            item_id: slot.item_id,
            amount: slot.amount,
        });
    }

    Ok(moved)
}

/// Stable-sort the region ascending by the tracked field tuple, then
/// stably move every empty slot to the end. Idempotent.
pub fn sort(region: &mut Region) {
    let variant = region.variant();
    let slots = region.slots_mut();
    slots.sort_by_key(|slot| slot.sort_key(variant));
    slots.sort_by_key(Slot::is_empty);
}

#[cfg(test)]
mod tests {
    use super::{give, sort, transfer};
    use crate::error::CoreErrorCode;
    use crate::layout::ByteRange;
    use crate::region::Region;
    use crate::slot::{SLOT_STRIDE, Slot, SlotVariant};

    fn region_of(slots: &[Slot]) -> Region {
        let mut buffer = vec![0u8; slots.len() * SLOT_STRIDE];
        for (index, slot) in slots.iter().enumerate() {
            slot.encode_into(&mut buffer, index * SLOT_STRIDE, SlotVariant::Full)
                .expect("encode should fit the buffer");
        }
        Region::from_bytes(
            &buffer,
            ByteRange {
                start: 0,
                end: buffer.len(),
            },
            SlotVariant::Full,
        )
        .expect("region should decode")
    }

    #[test]
    fn give_fills_first_empty_slot_and_zeroes_other_fields() {
        let mut region = region_of(&[Slot::default(), Slot::with_item(7, 2)]);
        let index = give(&mut region, 9, 1).expect("give should find an empty slot");
        assert_eq!(index, 0);
        assert_eq!(
            region.slots(),
            &[Slot::with_item(9, 1), Slot::with_item(7, 2)]
        );
    }

    #[test]
    fn give_decreases_empty_count_by_exactly_one() {
        let mut region = region_of(&[Slot::default(), Slot::with_item(7, 2), Slot::default()]);
        let before = region.empty_count();
        give(&mut region, 5, 3).expect("give should find an empty slot");
        assert_eq!(region.empty_count(), before - 1);
        let matches = region
            .slots()
            .iter()
            .filter(|slot| slot.item_id == 5 && slot.amount == 3)
            .count();
        assert_eq!(matches, 1);
    }

    #[test]
    fn give_on_full_region_fails_and_leaves_slots_unchanged() {
        let mut region = region_of(&[Slot::with_item(1, 1), Slot::with_item(2, 2)]);
        let before = region.clone();
        let err = give(&mut region, 9, 1).expect_err("full region should reject give");
        assert_eq!(err.code, CoreErrorCode::NoCapacity);
        assert_eq!(region, before);
    }

    #[test]
    fn transfer_skips_empty_sources_and_zeroes_moved_slots() {
        let mut hotbar = region_of(&[
            Slot::default(),
            Slot {
                modifier: 2,
                unknown: 3,
                item_id: 11,
                amount: 4,
                durability: 500,
                renderer: 1,
                padding: 0,
            },
            Slot::with_item(12, 6),
        ]);
        let mut inventory = region_of(&[Slot::default(), Slot::default(), Slot::default()]);

        let moved =
            transfer(&mut hotbar, 0..3, &mut inventory).expect("transfer should succeed");
        assert_eq!(moved.len(), 2);
        assert_eq!((moved[0].source_index, moved[0].dest_index), (1, 0));
        assert_eq!((moved[1].source_index, moved[1].dest_index), (2, 1));

        // Destination receives only id/amount; auxiliary fields are zeroed.
        assert_eq!(
            inventory.slots()[..2],
            [Slot::with_item(11, 4), Slot::with_item(12, 6)]
        );
        // Moved source slots are fully zeroed, not just their id.
        assert_eq!(hotbar.slots()[1], Slot::default());
        assert_eq!(hotbar.slots()[2], Slot::default());
    }

    #[test]
    fn transfer_stops_on_first_no_capacity_and_keeps_partial_progress() {
        let mut hotbar = region_of(&[Slot::with_item(11, 4), Slot::with_item(12, 6)]);
        let mut inventory = region_of(&[Slot::default(), Slot::with_item(1, 1)]);

        let err = transfer(&mut hotbar, 0..2, &mut inventory)
            .expect_err("second move should exhaust capacity");
        assert_eq!(err.code, CoreErrorCode::NoCapacity);

        // First move committed; second source slot untouched.
        assert_eq!(inventory.slots()[0], Slot::with_item(11, 4));
        assert_eq!(hotbar.slots()[0], Slot::default());
        assert_eq!(hotbar.slots()[1], Slot::with_item(12, 6));
    }

    #[test]
    fn transfer_rejects_out_of_range_source_index() {
        let mut hotbar = region_of(&[Slot::with_item(11, 4)]);
        let mut inventory = region_of(&[Slot::default()]);
        let err = transfer(&mut hotbar, [3], &mut inventory)
            .expect_err("index 3 should be out of range");
        assert_eq!(err.code, CoreErrorCode::IndexOutOfRange);
    }

    #[test]
    fn sort_orders_ascending_with_empties_last() {
        let mut region = region_of(&[
            Slot::default(),
            Slot::with_item(7, 2),
            Slot::default(),
        ]);
        sort(&mut region);
        assert_eq!(
            region.slots(),
            &[Slot::with_item(7, 2), Slot::default(), Slot::default()]
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let mut region = region_of(&[
            Slot::with_item(9, 1),
            Slot::default(),
            Slot::with_item(3, 5),
            Slot::with_item(3, 2),
        ]);
        sort(&mut region);
        let once = region.clone();
        sort(&mut region);
        assert_eq!(region, once);
    }

    #[test]
    fn sort_keeps_empty_slots_in_a_contiguous_suffix() {
        let mut region = region_of(&[
            Slot::with_item(9, 1),
            Slot::default(),
            Slot::with_item(3, 5),
            Slot::default(),
            Slot::with_item(1, 2),
        ]);
        sort(&mut region);

        let first_empty = region.first_empty().expect("region has empty slots");
        assert!(region.slots()[first_empty..].iter().all(Slot::is_empty));
        let ids: Vec<i16> = region.slots()[..first_empty]
            .iter()
            .map(|slot| slot.item_id)
            .collect();
        assert_eq!(ids, vec![1, 3, 9]);
    }
}
