//! Save-file codec and slot mutation engine: decodes the inventory and
//! hotbar regions of a player save into owned slot models, applies
//! give/transfer/sort mutations, and writes back byte-exactly outside
//! the encoded fields.

pub mod catalog;
pub mod document;
pub mod editor;
pub mod error;
pub mod layout;
pub mod region;
pub mod slot;

pub use catalog::ItemCatalog;
pub use document::SaveDocument;
pub use editor::MovedSlot;
pub use error::{CoreError, CoreErrorCode};
pub use layout::{ByteRange, SaveLayout, SlotRange};
pub use region::Region;
pub use slot::{SLOT_STRIDE, Slot, SlotVariant};
