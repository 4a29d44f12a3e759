//! Editor snapshots.

use crate::traits::EditorSnapshot;
use crate::{ContentState, SelectionState};

/// Content paired with the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    content: ContentState,
    selection: SelectionState,
}

impl EditorState {
    /// Creates a state with the caret at the start of the first block.
    pub fn new(content: ContentState) -> Self {
        let selection = SelectionState::collapsed(content.first_block().key().clone(), 0);
        Self { content, selection }
    }

    /// Creates a state with an explicit selection.
    pub fn with_selection(content: ContentState, selection: SelectionState) -> Self {
        Self { content, selection }
    }

    /// Returns a copy of this state with a different selection.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        Self {
            content: self.content.clone(),
            selection: SelectionState {
                has_focus: true,
                ..selection
            },
        }
    }

    /// Returns a selection covering the whole document.
    pub fn select_all(&self) -> SelectionState {
        let first = self.content.first_block();
        let last = self.content.last_block();
        SelectionState::new(first.key().clone(), 0, last.key().clone(), last.len())
    }

    /// Returns the content.
    pub fn current_content(&self) -> &ContentState {
        &self.content
    }

    /// Returns the selection.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

impl EditorSnapshot for EditorState {
    type Content = ContentState;

    fn current_content(&self) -> &ContentState {
        &self.content
    }

    fn selection(&self) -> &SelectionState {
        &self.selection
    }
}
