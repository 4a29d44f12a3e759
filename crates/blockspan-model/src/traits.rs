//! The document contract query code is written against.
//!
//! ## Learning: Associated Types
//!
//! `BlockSequence::Block` ties a content snapshot to the concrete block
//! type it hands out. Generic code names `C::Block` and never needs to
//! know whether it is looking at `ContentBlock` or a host editor's own
//! block type.

use crate::{BlockKey, SelectionState};

/// A single block of text.
pub trait TextBlock {
    /// Per-character data consulted by `find_ranges`.
    type Char;

    /// Returns the block's unique key.
    fn key(&self) -> &BlockKey;

    /// Returns the block length in characters.
    fn len(&self) -> usize;

    /// Returns true if the block has no text.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reports every run of equivalent characters accepted by `filter`.
    ///
    /// How characters are grouped into runs is up to the block. `filter`
    /// sees the first character of each run; accepted runs are reported
    /// as `found(start, end)` with `end` exclusive, in ascending order.
    fn find_ranges(
        &self,
        filter: &mut dyn FnMut(&Self::Char) -> bool,
        found: &mut dyn FnMut(usize, usize),
    );
}

/// An immutable, ordered collection of blocks.
pub trait BlockSequence {
    type Block: TextBlock;

    /// Looks a block up by key.
    fn block_for_key(&self, key: &BlockKey) -> Option<&Self::Block>;

    /// Returns the block following `key`, or `None` at the end of the
    /// document (or if `key` is unknown).
    fn block_after(&self, key: &BlockKey) -> Option<&Self::Block>;
}

/// An editor snapshot: content plus the current selection.
pub trait EditorSnapshot {
    type Content: BlockSequence;

    /// Returns the current content.
    fn current_content(&self) -> &Self::Content;

    /// Returns the current selection.
    fn selection(&self) -> &SelectionState;
}
