//! # Blockspan Model
//!
//! Immutable block-based document model for rich-text content.
//!
//! ## Key Concepts
//!
//! ### Blocks and Keys
//! - A document is an ordered list of `ContentBlock`s
//! - Every block carries a unique `BlockKey`
//! - Navigation is forward-only: "the block after this key"
//!
//! ### Entities
//! - An entity is a tagged annotation (a link, a mention, ...)
//! - Each character may point at one entity via `CharacterMetadata`
//! - Consecutive characters sharing an entity form an entity range
//!
//! ### Traits at the Seam
//! - Query code is written against `TextBlock`, `BlockSequence` and
//!   `EditorSnapshot`, so any host model can plug in
//! - `ContentState` and `EditorState` are the in-memory implementations

mod block;
mod content;
mod editor_state;
mod entity;
mod key;
pub mod raw;
mod selection;
pub mod traits;

pub use block::{CharacterMetadata, ContentBlock};
pub use content::{ContentState, ContentStateBuilder};
pub use editor_state::EditorState;
pub use entity::{Entity, EntityKey, EntityMap, Mutability};
pub use key::BlockKey;
pub use raw::{RawBlock, RawDocument, RawEntity, RawEntityRange, convert_from_raw};
pub use selection::SelectionState;
pub use traits::{BlockSequence, EditorSnapshot, TextBlock};

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors that can occur while building or loading a document
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Duplicate block key: {0}")]
    DuplicateKey(BlockKey),

    #[error("Entity span {start}..{end} is out of bounds for block {key} (length {len})")]
    SpanOutOfBounds {
        key: BlockKey,
        start: usize,
        end: usize,
        len: usize,
    },

    #[error("Entity span {start}..{end} was declared before any block")]
    SpanWithoutBlock { start: usize, end: usize },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("No entity keys left")]
    EntityKeysExhausted,

    #[error("Document has no blocks")]
    EmptyDocument,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
