use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreErrorCode};

/// Width of one inventory record in the save buffer.
pub const SLOT_STRIDE: usize = 12;

/// Raw on-disk item id that decodes to "no item".
const RAW_EMPTY_ITEM_ID: i16 = -1;

/// One fixed-width inventory record. All multi-byte fields are
/// little-endian in the save buffer, at sub-offsets 0, 2, 4, 6, 8, 10, 11.
///
/// A slot is empty iff `item_id == 0`; the raw sentinel `-1` is
/// normalized to `0` at decode time so call sites never compare
/// against the sentinel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub modifier: i16,
    pub unknown: i16,
    pub item_id: i16,
    pub amount: i16,
    pub durability: i16,
    pub renderer: i8,
    pub padding: i8,
}

/// Which fields of the 12-byte record a save revision tracks.
///
/// `Reduced` revisions keep only the item id (sub-offset 0) and amount
/// (sub-offset 2); bytes 4-11 are opaque and must survive write-back
/// exactly as the base buffer holds them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotVariant {
    Full,
    Reduced,
}

impl Slot {
    pub fn is_empty(&self) -> bool {
        self.item_id == 0
    }

    /// A slot carrying only an item id and amount, every other tracked
    /// field zeroed.
    pub fn with_item(item_id: i16, amount: i16) -> Self {
        Self {
            item_id,
            amount,
            ..Self::default()
        }
    }

    pub fn decode(buffer: &[u8], offset: usize, variant: SlotVariant) -> Result<Self, CoreError> {
        let record = record_at(buffer, offset)?;

        let mut slot = match variant {
            SlotVariant::Full => Self {
                modifier: read_i16_le(record, 0),
                unknown: read_i16_le(record, 2),
                item_id: read_i16_le(record, 4),
                amount: read_i16_le(record, 6),
                durability: read_i16_le(record, 8),
                renderer: record[10] as i8,
                padding: record[11] as i8,
            },
            SlotVariant::Reduced => Self {
                item_id: read_i16_le(record, 0),
                amount: read_i16_le(record, 2),
                ..Self::default()
            },
        };

        if slot.item_id == RAW_EMPTY_ITEM_ID {
            slot.item_id = 0;
        }

        Ok(slot)
    }

    /// Write this slot's tracked fields into `buffer` at `offset`.
    /// `Reduced` touches only bytes 0..4 of the record.
    pub fn encode_into(
        &self,
        buffer: &mut [u8],
        offset: usize,
        variant: SlotVariant,
    ) -> Result<(), CoreError> {
        let buffer_len = buffer.len();
        let record = buffer
            .get_mut(offset..offset + SLOT_STRIDE)
            .ok_or_else(|| short_buffer_error(buffer_len, offset))?;

        match variant {
            SlotVariant::Full => {
                record[0..2].copy_from_slice(&self.modifier.to_le_bytes());
                record[2..4].copy_from_slice(&self.unknown.to_le_bytes());
                record[4..6].copy_from_slice(&self.item_id.to_le_bytes());
                record[6..8].copy_from_slice(&self.amount.to_le_bytes());
                record[8..10].copy_from_slice(&self.durability.to_le_bytes());
                record[10] = self.renderer as u8;
                record[11] = self.padding as u8;
            }
            SlotVariant::Reduced => {
                record[0..2].copy_from_slice(&self.item_id.to_le_bytes());
                record[2..4].copy_from_slice(&self.amount.to_le_bytes());
            }
        }

        Ok(())
    }

    /// Ordering key for region sorts: the tracked fields in record order.
    pub fn sort_key(&self, variant: SlotVariant) -> (i16, i16, i16, i16, i16, i8, i8) {
        match variant {
            SlotVariant::Full => (
                self.modifier,
                self.unknown,
                self.item_id,
                self.amount,
                self.durability,
                self.renderer,
                self.padding,
            ),
            SlotVariant::Reduced => (self.item_id, self.amount, 0, 0, 0, 0, 0),
        }
    }
}

fn record_at(buffer: &[u8], offset: usize) -> Result<&[u8], CoreError> {
    buffer
        .get(offset..offset + SLOT_STRIDE)
        .ok_or_else(|| short_buffer_error(buffer.len(), offset))
}

fn short_buffer_error(buffer_len: usize, offset: usize) -> CoreError {
    CoreError::new(
        CoreErrorCode::MalformedRecord,
        format!(
            "buffer too short for slot record at offset {offset}: len={buffer_len}, need at least {}",
            offset + SLOT_STRIDE
        ),
    )
}

fn read_i16_le(record: &[u8], at: usize) -> i16 {
    i16::from_le_bytes([record[at], record[at + 1]])
}
