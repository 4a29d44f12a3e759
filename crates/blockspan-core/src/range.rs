//! Collecting the blocks between two keys.
//!
//! ## Learning: Iterators over Borrowed Data
//!
//! `BlockRange<'a, 'k, C>` hands out `&'a C::Block` references that
//! borrow from the content, not from the iterator. That is why the
//! collected `Vec` can outlive the `BlockRange` that produced it. The
//! keys only need to live as long as the walk (`'k`).

use blockspan_model::{BlockKey, BlockSequence, TextBlock};

use crate::{CoreError, CoreResult};

/// Returns the blocks from `anchor` to `focus`, both included, in
/// document order.
///
/// `focus` must be `anchor` or come after it. Walking off the end of the
/// document before reaching `focus` yields
/// [`CoreError::UnreachableFocus`].
///
/// # Example
/// ```
/// use blockspan_core::selected_blocks;
/// use blockspan_model::{BlockKey, ContentState};
///
/// let content = ContentState::builder()
///     .block_with_key("a", "one")
///     .block_with_key("b", "two")
///     .block_with_key("c", "three")
///     .build()
///     .unwrap();
///
/// let blocks = selected_blocks(&content, &BlockKey::from("a"), &BlockKey::from("b")).unwrap();
/// assert_eq!(blocks.len(), 2);
/// ```
pub fn selected_blocks<'a, C: BlockSequence>(
    content: &'a C,
    anchor: &BlockKey,
    focus: &BlockKey,
) -> CoreResult<Vec<&'a C::Block>> {
    let blocks = BlockRange::new(content, anchor, focus).collect::<CoreResult<Vec<_>>>()?;
    tracing::trace!("Collected {} block(s) from {} to {}", blocks.len(), anchor, focus);
    Ok(blocks)
}

/// Where the walk stands.
enum Cursor<'a, B> {
    /// Nothing yielded yet
    Start,
    /// Last yielded block
    After(&'a B),
    /// Focus reached or an error was yielded
    Done,
}

/// Lazy forward walk from an anchor block to a focus block.
///
/// Yields `Ok(block)` for every block in the range, or a single `Err`
/// after which it is exhausted.
pub struct BlockRange<'a, 'k, C: BlockSequence> {
    content: &'a C,
    anchor: &'k BlockKey,
    focus: &'k BlockKey,
    cursor: Cursor<'a, C::Block>,
}

impl<'a, 'k, C: BlockSequence> BlockRange<'a, 'k, C> {
    /// Creates a walk; no lookups happen until the first `next()`.
    pub fn new(content: &'a C, anchor: &'k BlockKey, focus: &'k BlockKey) -> Self {
        Self {
            content,
            anchor,
            focus,
            cursor: Cursor::Start,
        }
    }
}

impl<'a, C: BlockSequence> Iterator for BlockRange<'a, '_, C> {
    type Item = CoreResult<&'a C::Block>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = match self.cursor {
            Cursor::Start => self
                .content
                .block_for_key(self.anchor)
                .ok_or_else(|| CoreError::UnknownBlock(self.anchor.clone())),
            Cursor::After(previous) => self.content.block_after(previous.key()).ok_or_else(|| {
                CoreError::UnreachableFocus {
                    anchor: self.anchor.clone(),
                    focus: self.focus.clone(),
                }
            }),
            Cursor::Done => return None,
        };

        self.cursor = match &result {
            Ok(block) if block.key() != self.focus => Cursor::After(*block),
            _ => Cursor::Done,
        };

        Some(result)
    }
}

impl<C: BlockSequence> std::iter::FusedIterator for BlockRange<'_, '_, C> {}
