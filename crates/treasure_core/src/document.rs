use std::fs;
use std::path::Path;

use crate::error::{CoreError, CoreErrorCode};
use crate::layout::SaveLayout;
use crate::region::Region;

/// Owns the original save bytes plus the decoded regions, and produces
/// the write-back buffer.
///
/// The original bytes are never mutated in place: persistence copies
/// them and overwrites exactly the bytes the slot codec defines, so
/// headers, other save sections, and untracked sub-fields stay
/// byte-identical to the file that was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveDocument {
    original: Vec<u8>,
    layout: SaveLayout,
    inventory: Region,
    hotbar: Region,
}

impl SaveDocument {
    pub fn open(path: &Path, layout: SaveLayout) -> Result<Self, CoreError> {
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::SaveFileMissing,
                format!("cannot read save file {}: {e}", path.display()),
            )
        })?;
        Self::from_bytes(bytes, layout)
    }

    pub fn from_bytes(bytes: Vec<u8>, layout: SaveLayout) -> Result<Self, CoreError> {
        layout.validate(bytes.len())?;
        let inventory = Region::from_bytes(&bytes, layout.inventory, layout.variant)?;
        let hotbar = Region::from_bytes(&bytes, layout.hotbar, layout.variant)?;

        Ok(Self {
            original: bytes,
            layout,
            inventory,
            hotbar,
        })
    }

    pub fn layout(&self) -> &SaveLayout {
        &self.layout
    }

    pub fn inventory(&self) -> &Region {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Region {
        &mut self.inventory
    }

    pub fn hotbar(&self) -> &Region {
        &self.hotbar
    }

    pub fn hotbar_mut(&mut self) -> &mut Region {
        &mut self.hotbar
    }

    /// Both regions at once, for operations that move slots between them.
    pub fn regions_mut(&mut self) -> (&mut Region, &mut Region) {
        (&mut self.inventory, &mut self.hotbar)
    }

    pub fn to_bytes_unmodified(&self) -> Vec<u8> {
        self.original.clone()
    }

    /// Copy of the original buffer with every region slot re-encoded at
    /// its absolute offset. With no mutations applied this is
    /// byte-identical to the loaded file.
    pub fn to_bytes_modified(&self) -> Result<Vec<u8>, CoreError> {
        let mut out = self.original.clone();
        self.inventory.encode_into(&mut out)?;
        self.hotbar.encode_into(&mut out)?;
        Ok(out)
    }

    /// Materialize and write the whole buffer in a single write, so an
    /// interrupted persist never leaves a partially patched file.
    pub fn persist(&self, path: &Path) -> Result<(), CoreError> {
        let bytes = self.to_bytes_modified()?;
        fs::write(path, bytes).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to write {}: {e}", path.display()),
            )
        })
    }
}
