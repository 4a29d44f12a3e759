//! Checking whether a selection contains a matching range.
//!
//! ## Learning: Closures vs. Structs
//!
//! The checker could have been a function returning a closure. Holding
//! the strategy in a small struct instead keeps the captured state
//! explicit, gives the value a nameable type and lets callers store it
//! in their own structs without boxing.

use blockspan_model::{BlockSequence, EditorSnapshot, SelectionState};

use crate::CoreResult;
use crate::range::selected_blocks;

/// Finds matching ranges inside a block.
///
/// Implementations report each match as `found(start, end)` (character
/// offsets, `end` exclusive). The content snapshot is passed along so
/// entity keys can be resolved.
///
/// Any `Fn(&C::Block, &C, &mut dyn FnMut(usize, usize))` is a strategy.
pub trait Strategy<C: BlockSequence> {
    fn find_ranges(&self, block: &C::Block, content: &C, found: &mut dyn FnMut(usize, usize));
}

impl<C, F> Strategy<C> for F
where
    C: BlockSequence,
    F: Fn(&C::Block, &C, &mut dyn FnMut(usize, usize)),
{
    fn find_ranges(&self, block: &C::Block, content: &C, found: &mut dyn FnMut(usize, usize)) {
        self(block, content, found)
    }
}

/// Reports whether selections contain a range matched by `S`.
#[derive(Debug, Clone)]
pub struct EntityChecker<S> {
    strategy: S,
}

/// Creates an [`EntityChecker`] bound to `strategy`.
pub fn selection_contains_entity<S>(strategy: S) -> EntityChecker<S> {
    EntityChecker::new(strategy)
}

impl<S> EntityChecker<S> {
    /// Creates a checker bound to `strategy`.
    pub fn new(strategy: S) -> Self {
        Self { strategy }
    }

    /// Returns the bound strategy.
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Returns true if any block in the selection has a match inside the
    /// selection bounds.
    ///
    /// Uses `selection` when given, the editor's own selection otherwise.
    /// In the first block a match must start at or after the anchor
    /// offset; in the last block it must end at or before the focus
    /// offset. Blocks in between count whole. Scanning stops at the
    /// first block with a qualifying match.
    pub fn contains<E>(&self, editor_state: &E, selection: Option<&SelectionState>) -> CoreResult<bool>
    where
        E: EditorSnapshot,
        S: Strategy<E::Content>,
    {
        let selection = selection.unwrap_or_else(|| editor_state.selection());
        let content = editor_state.current_content();
        let blocks = selected_blocks(content, &selection.anchor_key, &selection.focus_key)?;
        let last = blocks.len() - 1;

        for (i, block) in blocks.into_iter().enumerate() {
            let bounds = Bounds {
                min_start: (i == 0).then_some(selection.anchor_offset),
                max_end: (i == last).then_some(selection.focus_offset),
            };

            let mut hit = None;
            self.strategy.find_ranges(block, content, &mut |start, end| {
                if hit.is_none() && bounds.admits(start, end) {
                    hit = Some((start, end));
                }
            });

            if let Some((start, end)) = hit {
                tracing::debug!(
                    "Match {}..{} in block {} of {}",
                    start,
                    end,
                    i + 1,
                    last + 1
                );
                return Ok(true);
            }
        }

        tracing::debug!("No match in {} block(s)", last + 1);
        Ok(false)
    }
}

/// Offset limits for matches in one block.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_start: Option<usize>,
    max_end: Option<usize>,
}

impl Bounds {
    fn admits(&self, start: usize, end: usize) -> bool {
        self.min_start.is_none_or(|min| start >= min) && self.max_end.is_none_or(|max| end <= max)
    }
}
