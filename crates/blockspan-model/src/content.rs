//! Document content: ordered blocks plus their entity map.
//!
//! ## Learning: The Builder Pattern
//!
//! `ContentState` is immutable once built. `ContentStateBuilder`
//! collects blocks and entity spans by value (`self -> Self`) so a whole
//! document reads as one expression, and defers every check to `build()`,
//! which returns a `ModelResult`.

use std::collections::HashMap;
use std::ops::Range;

use crate::traits::BlockSequence;
use crate::{BlockKey, ContentBlock, Entity, EntityKey, EntityMap, ModelError, ModelResult};

/// An immutable snapshot of a document.
///
/// Always holds at least one block, and block keys are unique.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
    index: HashMap<BlockKey, usize>,
    entity_map: EntityMap,
}

impl ContentState {
    /// Starts building a document.
    pub fn builder() -> ContentStateBuilder {
        ContentStateBuilder::new()
    }

    /// Creates a document with one block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut content = Self {
            blocks: Vec::new(),
            index: HashMap::new(),
            entity_map: EntityMap::new(),
        };
        for line in text.split('\n') {
            let key = unused_key(|key| content.index.contains_key(key));
            content.index.insert(key.clone(), content.blocks.len());
            content.blocks.push(ContentBlock::new(key, line));
        }
        content
    }

    // ==================== Blocks ====================

    /// Returns all blocks in document order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Returns the number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kept for the `len`/`is_empty` convention.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Returns the first block.
    pub fn first_block(&self) -> &ContentBlock {
        &self.blocks[0]
    }

    /// Returns the last block.
    pub fn last_block(&self) -> &ContentBlock {
        &self.blocks[self.blocks.len() - 1]
    }

    /// Returns the block for a key.
    pub fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.index.get(key).map(|&i| &self.blocks[i])
    }

    /// Returns the block after `key`.
    pub fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        self.index.get(key).and_then(|&i| self.blocks.get(i + 1))
    }

    // ==================== Entities ====================

    /// Returns the entity map.
    pub fn entity_map(&self) -> &EntityMap {
        &self.entity_map
    }

    /// Returns an entity by key.
    pub fn entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entity_map.get(key)
    }
}

impl BlockSequence for ContentState {
    type Block = ContentBlock;

    fn block_for_key(&self, key: &BlockKey) -> Option<&ContentBlock> {
        ContentState::block_for_key(self, key)
    }

    fn block_after(&self, key: &BlockKey) -> Option<&ContentBlock> {
        ContentState::block_after(self, key)
    }
}

/// Generates keys until one is not `taken`.
fn unused_key(taken: impl Fn(&BlockKey) -> bool) -> BlockKey {
    loop {
        let key = BlockKey::generate();
        if !taken(&key) {
            return key;
        }
    }
}

/// An entity span waiting to be applied at build time.
#[derive(Debug)]
struct PendingSpan {
    block: Option<usize>,
    range: Range<usize>,
    entity: EntityKey,
}

/// Builder for `ContentState`.
#[derive(Debug, Default)]
pub struct ContentStateBuilder {
    blocks: Vec<ContentBlock>,
    /// Indices of blocks whose key was generated
    generated: Vec<usize>,
    entity_map: EntityMap,
    spans: Vec<PendingSpan>,
    /// First failure from a chained call, reported by `build()`
    error: Option<ModelError>,
}

impl ContentStateBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a block with a generated key.
    ///
    /// Generated keys never clash with explicit ones: a clash with a key
    /// added later is resolved in `build()`.
    pub fn block(mut self, text: impl Into<String>) -> Self {
        let key = unused_key(|key| self.blocks.iter().any(|block| block.key() == key));
        self.generated.push(self.blocks.len());
        self.block_with_key(key, text)
    }

    /// Appends a block with an explicit key.
    pub fn block_with_key(mut self, key: impl Into<BlockKey>, text: impl Into<String>) -> Self {
        self.blocks.push(ContentBlock::new(key, text));
        self
    }

    /// Registers `entity` and attaches it to characters `start..end` of
    /// the most recently added block.
    pub fn entity(mut self, start: usize, end: usize, entity: Entity) -> Self {
        match self.entity_map.create(entity) {
            Ok(key) => self.apply_entity(start, end, key),
            Err(err) => {
                self.error.get_or_insert(err);
                self
            }
        }
    }

    /// Attaches an already registered entity to characters `start..end`
    /// of the most recently added block.
    pub fn apply_entity(mut self, start: usize, end: usize, entity: EntityKey) -> Self {
        self.spans.push(PendingSpan {
            block: self.blocks.len().checked_sub(1),
            range: start..end,
            entity,
        });
        self
    }

    /// Registers an entity without attaching it anywhere.
    pub fn create_entity(&mut self, entity: Entity) -> ModelResult<EntityKey> {
        self.entity_map.create(entity)
    }

    /// Registers an entity under a fixed key.
    pub(crate) fn insert_entity(&mut self, key: EntityKey, entity: Entity) {
        self.entity_map.insert(key, entity);
    }

    /// Validates and builds the document.
    pub fn build(self) -> ModelResult<ContentState> {
        let Self {
            mut blocks,
            generated,
            entity_map,
            spans,
            error,
        } = self;

        if let Some(err) = error {
            return Err(err);
        }
        if blocks.is_empty() {
            return Err(ModelError::EmptyDocument);
        }

        // explicit keys first, so generated ones give way on a clash
        let mut index = HashMap::with_capacity(blocks.len());
        for (i, block) in blocks.iter().enumerate() {
            if generated.contains(&i) {
                continue;
            }
            if index.insert(block.key().clone(), i).is_some() {
                return Err(ModelError::DuplicateKey(block.key().clone()));
            }
        }
        for i in generated {
            if index.contains_key(blocks[i].key()) {
                blocks[i].set_key(unused_key(|key| index.contains_key(key)));
            }
            index.insert(blocks[i].key().clone(), i);
        }

        for span in spans {
            let Some(i) = span.block else {
                return Err(ModelError::SpanWithoutBlock {
                    start: span.range.start,
                    end: span.range.end,
                });
            };
            let block = &mut blocks[i];
            if !entity_map.contains(span.entity) {
                return Err(ModelError::UnknownEntity(span.entity.to_string()));
            }
            if span.range.start > span.range.end || span.range.end > block.len() {
                return Err(ModelError::SpanOutOfBounds {
                    key: block.key().clone(),
                    start: span.range.start,
                    end: span.range.end,
                    len: block.len(),
                });
            }
            block.apply_entity(span.range, span.entity);
        }

        Ok(ContentState {
            blocks,
            index,
            entity_map,
        })
    }
}
