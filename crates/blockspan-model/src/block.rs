//! Content blocks and per-character metadata.
//!
//! ## Learning: Run-Length Scanning
//!
//! Entity ranges are never stored explicitly. Each character records the
//! entity it belongs to, and ranges are rediscovered by walking the
//! characters and grouping neighbours that point at the same entity.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::traits::TextBlock;
use crate::{BlockKey, EntityKey};

/// Metadata attached to a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharacterMetadata {
    /// Entity covering this character, if any
    pub entity: Option<EntityKey>,
}

impl CharacterMetadata {
    /// Metadata for a plain character.
    pub const EMPTY: CharacterMetadata = CharacterMetadata { entity: None };
}

/// An immutable block of text.
///
/// `characters` always has one entry per `char` of `text`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    key: BlockKey,
    text: String,
    characters: Vec<CharacterMetadata>,
}

impl ContentBlock {
    /// Creates a block without any entities.
    pub fn new(key: impl Into<BlockKey>, text: impl Into<String>) -> Self {
        let text = text.into();
        let characters = vec![CharacterMetadata::EMPTY; text.chars().count()];
        Self {
            key: key.into(),
            text,
            characters,
        }
    }

    /// Replaces the key; used when a generated key clashes.
    pub(crate) fn set_key(&mut self, key: BlockKey) {
        self.key = key;
    }

    /// Marks `range` (character offsets) as covered by `entity`.
    ///
    /// Callers check the range against `len()` first.
    pub(crate) fn apply_entity(&mut self, range: Range<usize>, entity: EntityKey) {
        for character in &mut self.characters[range] {
            character.entity = Some(entity);
        }
    }

    // ==================== Getters ====================

    /// Returns the block key.
    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    /// Returns the block text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the length in characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Returns the entity at a character offset.
    pub fn entity_at(&self, offset: usize) -> Option<EntityKey> {
        self.characters.get(offset).and_then(|c| c.entity)
    }

    // ==================== Range Scanning ====================

    /// Reports every run of characters sharing one entity that `filter`
    /// accepts.
    ///
    /// Runs without an entity are offered to `filter` too, so a filter
    /// usually starts by checking `entity().is_some()`.
    pub fn find_entity_ranges(
        &self,
        mut filter: impl FnMut(&CharacterMetadata) -> bool,
        mut found: impl FnMut(usize, usize),
    ) {
        find_runs(
            &self.characters,
            |a, b| a.entity == b.entity,
            &mut filter,
            &mut found,
        );
    }
}

impl TextBlock for ContentBlock {
    type Char = CharacterMetadata;

    fn key(&self) -> &BlockKey {
        &self.key
    }

    fn len(&self) -> usize {
        self.characters.len()
    }

    fn find_ranges(
        &self,
        filter: &mut dyn FnMut(&CharacterMetadata) -> bool,
        found: &mut dyn FnMut(usize, usize),
    ) {
        self.find_entity_ranges(filter, found);
    }
}

/// Splits `items` into maximal runs of neighbours that are `equal`,
/// then reports the runs whose first item passes `filter`.
fn find_runs<T>(
    items: &[T],
    equal: impl Fn(&T, &T) -> bool,
    filter: &mut dyn FnMut(&T) -> bool,
    found: &mut dyn FnMut(usize, usize),
) {
    let mut start = 0;
    while start < items.len() {
        let head = &items[start];
        let mut end = start + 1;
        while end < items.len() && equal(head, &items[end]) {
            end += 1;
        }
        if filter(head) {
            found(start, end);
        }
        start = end;
    }
}
