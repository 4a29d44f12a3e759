//! # Blockspan Core
//!
//! Read-only queries over block-based documents.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              EntityChecker<S>                 │
//! │   selection ─► selected_blocks ─► Strategy    │
//! │                     │                 │       │
//! │               BlockSequence       TextBlock   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! - [`range::selected_blocks`] walks from an anchor block to a focus
//!   block using only "block for key" and "block after key".
//! - [`checker::EntityChecker`] binds a [`Strategy`] once and answers
//!   "does this selection contain a matching range?" for any number of
//!   editor snapshots.
//!
//! Nothing here mutates its inputs or keeps state between calls.

pub mod checker;
pub mod config;
pub mod range;
pub mod strategy;

pub use checker::{EntityChecker, Strategy, selection_contains_entity};
pub use config::Config;
pub use range::{BlockRange, selected_blocks};
pub use strategy::{AnyEntityStrategy, EntityTypeStrategy};

use blockspan_model::BlockKey;

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Block not found: {0}")]
    UnknownBlock(BlockKey),

    #[error("Focus block {focus} is not reachable from anchor block {anchor}")]
    UnreachableFocus { anchor: BlockKey, focus: BlockKey },
}
