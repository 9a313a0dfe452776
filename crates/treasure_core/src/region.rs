use crate::error::{CoreError, CoreErrorCode};
use crate::layout::ByteRange;
use crate::slot::{SLOT_STRIDE, Slot, SlotVariant};

/// An ordered, indexable collection of slots decoded from a contiguous
/// byte span of the save buffer. Slot order is ascending offset order,
/// which is also presentation and storage order; only an explicit sort
/// may reorder it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    range: ByteRange,
    variant: SlotVariant,
    slots: Vec<Slot>,
}

impl Region {
    pub fn from_bytes(
        buffer: &[u8],
        range: ByteRange,
        variant: SlotVariant,
    ) -> Result<Self, CoreError> {
        let mut slots = Vec::with_capacity(range.slot_count());
        for index in 0..range.slot_count() {
            slots.push(Slot::decode(buffer, range.start + index * SLOT_STRIDE, variant)?);
        }

        Ok(Self {
            range,
            variant,
            slots,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn range(&self) -> ByteRange {
        self.range
    }

    pub fn variant(&self) -> SlotVariant {
        self.variant
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }

    pub fn slot(&self, index: usize) -> Result<Slot, CoreError> {
        self.slots
            .get(index)
            .copied()
            .ok_or_else(|| self.index_error(index))
    }

    pub fn set_slot(&mut self, index: usize, slot: Slot) -> Result<(), CoreError> {
        let len = self.slots.len();
        match self.slots.get_mut(index) {
            Some(target) => {
                *target = slot;
                Ok(())
            }
            None => Err(index_error(index, len)),
        }
    }

    /// First slot satisfying the emptiness invariant (`item_id == 0`),
    /// scanning in ascending index order.
    pub fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Slot::is_empty)
    }

    pub fn empty_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_empty()).count()
    }

    /// Re-encode every slot at its absolute offset in `buffer`. Bytes
    /// outside the encoded fields are left as the buffer holds them.
    pub fn encode_into(&self, buffer: &mut [u8]) -> Result<(), CoreError> {
        for (index, slot) in self.slots.iter().enumerate() {
            slot.encode_into(buffer, self.range.start + index * SLOT_STRIDE, self.variant)?;
        }
        Ok(())
    }

    fn index_error(&self, index: usize) -> CoreError {
        index_error(index, self.slots.len())
    }
}

fn index_error(index: usize, len: usize) -> CoreError {
    CoreError::new(
        CoreErrorCode::IndexOutOfRange,
        format!("slot index {index} out of range for region of {len} slots"),
    )
}
