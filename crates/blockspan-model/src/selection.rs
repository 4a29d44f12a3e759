//! Block-level selection descriptors.
//!
//! ## Learning: Plain Values
//!
//! A `SelectionState` is just data: two (block, offset) endpoints and a
//! focus flag. It derives `Clone`, `PartialEq` and serde traits and
//! has no behavior that depends on a document.
//!
//! Anchor and focus are stored as given. Range queries expect the
//! anchor block to come before (or be) the focus block; nothing here
//! reorders them.

use serde::{Deserialize, Serialize};

use crate::BlockKey;

/// A selection from (`anchor_key`, `anchor_offset`) to
/// (`focus_key`, `focus_offset`).
///
/// Offsets are character offsets within their block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Block where the selection starts
    pub anchor_key: BlockKey,
    /// Offset within the anchor block
    pub anchor_offset: usize,
    /// Block where the selection ends
    pub focus_key: BlockKey,
    /// Offset within the focus block
    pub focus_offset: usize,
    /// Whether the editor had focus when the selection was made
    #[serde(default)]
    pub has_focus: bool,
}

impl SelectionState {
    /// Creates a forward selection between two endpoints.
    pub fn new(
        anchor_key: impl Into<BlockKey>,
        anchor_offset: usize,
        focus_key: impl Into<BlockKey>,
        focus_offset: usize,
    ) -> Self {
        Self {
            anchor_key: anchor_key.into(),
            anchor_offset,
            focus_key: focus_key.into(),
            focus_offset,
            has_focus: false,
        }
    }

    /// Creates a zero-width selection (a caret) inside one block.
    pub fn collapsed(key: impl Into<BlockKey>, offset: usize) -> Self {
        let key = key.into();
        Self::new(key.clone(), offset, key, offset)
    }

    /// Creates a selection inside a single block.
    pub fn block(key: impl Into<BlockKey>, start: usize, end: usize) -> Self {
        let key = key.into();
        Self::new(key.clone(), start, key, end)
    }

    /// Returns true if anchor and focus are the same point.
    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }
}
