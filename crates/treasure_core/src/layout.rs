use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreErrorCode};
use crate::slot::{SLOT_STRIDE, SlotVariant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Whole records in the range. Observed save revisions use end
    /// offsets that are not stride-aligned; a trailing partial record
    /// is never decoded, so the count floors.
    pub fn slot_count(&self) -> usize {
        self.len() / SLOT_STRIDE
    }

    fn overlaps(&self, other: &ByteRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Half-open range of slot indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotRange {
    pub start: usize,
    pub end: usize,
}

impl SlotRange {
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Region byte offsets and the tracked-field set for one save-format
/// revision. The offsets differ across revisions, so the layout is
/// configuration (deserializable from JSON) rather than constants in
/// the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveLayout {
    pub inventory: ByteRange,
    pub hotbar: ByteRange,
    /// Hotbar indices eligible for the mobile-transfer operation.
    pub mobile: SlotRange,
    pub variant: SlotVariant,
}

impl SaveLayout {
    /// The save revision the editor was originally written against:
    /// 36 inventory records from 0x1D8 and 10 hotbar records from 0x7C,
    /// the last four hotbar slots being the mobile-transfer subset.
    pub fn classic() -> Self {
        Self {
            inventory: ByteRange {
                start: 0x1D8,
                end: 0x388,
            },
            hotbar: ByteRange {
                start: 0x7C,
                end: 0xF4,
            },
            mobile: SlotRange { start: 6, end: 10 },
            variant: SlotVariant::Full,
        }
    }

    pub fn validate(&self, file_len: usize) -> Result<(), CoreError> {
        for (label, range) in [("inventory", &self.inventory), ("hotbar", &self.hotbar)] {
            if range.start > range.end {
                return Err(CoreError::new(
                    CoreErrorCode::MalformedRecord,
                    format!(
                        "invalid {label} range: {}..{} is reversed",
                        range.start, range.end
                    ),
                ));
            }
            if range.end > file_len {
                return Err(CoreError::new(
                    CoreErrorCode::MalformedRecord,
                    format!(
                        "{label} range {}..{} does not fit the save file (length {file_len})",
                        range.start, range.end
                    ),
                ));
            }
            if range.slot_count() == 0 {
                return Err(CoreError::new(
                    CoreErrorCode::MalformedRecord,
                    format!(
                        "{label} range {}..{} holds no whole {SLOT_STRIDE}-byte record",
                        range.start, range.end
                    ),
                ));
            }
        }

        if self.inventory.overlaps(&self.hotbar) {
            return Err(CoreError::new(
                CoreErrorCode::MalformedRecord,
                format!(
                    "inventory range {}..{} overlaps hotbar range {}..{}",
                    self.inventory.start, self.inventory.end, self.hotbar.start, self.hotbar.end
                ),
            ));
        }

        if self.mobile.start > self.mobile.end || self.mobile.end > self.hotbar.slot_count() {
            return Err(CoreError::new(
                CoreErrorCode::MalformedRecord,
                format!(
                    "mobile slot range {}..{} is outside the hotbar (0..{})",
                    self.mobile.start,
                    self.mobile.end,
                    self.hotbar.slot_count()
                ),
            ));
        }

        Ok(())
    }
}
