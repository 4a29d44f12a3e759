//! Ready-made strategies for the reference document model.

use blockspan_model::{BlockSequence, CharacterMetadata, ContentBlock, ContentState, TextBlock};

use crate::checker::Strategy;

/// Matches ranges covered by an entity of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTypeStrategy {
    kind: String,
}

impl EntityTypeStrategy {
    /// Creates a strategy matching entities of type `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    /// Returns the entity type this strategy looks for.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl Strategy<ContentState> for EntityTypeStrategy {
    fn find_ranges(
        &self,
        block: &ContentBlock,
        content: &ContentState,
        found: &mut dyn FnMut(usize, usize),
    ) {
        block.find_entity_ranges(
            |c| {
                c.entity
                    .and_then(|key| content.entity(key))
                    .is_some_and(|entity| entity.is_kind(&self.kind))
            },
            found,
        );
    }
}

/// Matches every range covered by any entity.
///
/// Works with any model whose blocks carry `CharacterMetadata`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyEntityStrategy;

impl<C> Strategy<C> for AnyEntityStrategy
where
    C: BlockSequence,
    C::Block: TextBlock<Char = CharacterMetadata>,
{
    fn find_ranges(&self, block: &C::Block, _content: &C, found: &mut dyn FnMut(usize, usize)) {
        TextBlock::find_ranges(block, &mut |c: &CharacterMetadata| c.entity.is_some(), found);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection_contains_entity;
    use blockspan_model::{EditorState, Entity, Mutability, SelectionState};

    fn state() -> EditorState {
        let content = ContentState::builder()
            .block_with_key("a", "read the docs")
            .entity(9, 13, Entity::new("LINK", Mutability::Mutable))
            .block_with_key("b", "ask @sam")
            .entity(4, 8, Entity::new("MENTION", Mutability::Immutable))
            .build()
            .unwrap();
        EditorState::new(content)
    }

    fn ranges<S: Strategy<ContentState>>(strategy: &S, state: &EditorState) -> Vec<(usize, usize)> {
        let content = state.current_content();
        let mut found = Vec::new();
        for block in content.blocks() {
            strategy.find_ranges(block, content, &mut |s, e| found.push((s, e)));
        }
        found
    }

    #[test]
    fn test_entity_type_strategy() {
        let state = state();
        assert_eq!(ranges(&EntityTypeStrategy::new("LINK"), &state), vec![(9, 13)]);
        assert_eq!(ranges(&EntityTypeStrategy::new("MENTION"), &state), vec![(4, 8)]);
        assert!(ranges(&EntityTypeStrategy::new("IMAGE"), &state).is_empty());
    }

    #[test]
    fn test_entity_type_is_case_sensitive() {
        let state = state();
        assert!(ranges(&EntityTypeStrategy::new("link"), &state).is_empty());
    }

    #[test]
    fn test_any_entity_strategy() {
        let state = state();
        assert_eq!(ranges(&AnyEntityStrategy, &state), vec![(9, 13), (4, 8)]);
    }

    #[test]
    fn test_strategies_with_checker() {
        let state = state();
        let selection = SelectionState::block("b", 0, 8);

        let mentions = selection_contains_entity(EntityTypeStrategy::new("MENTION"));
        let links = selection_contains_entity(EntityTypeStrategy::new("LINK"));
        let any = selection_contains_entity(AnyEntityStrategy);

        assert!(mentions.contains(&state, Some(&selection)).unwrap());
        assert!(!links.contains(&state, Some(&selection)).unwrap());
        assert!(any.contains(&state, Some(&selection)).unwrap());
        assert_eq!(links.strategy().kind(), "LINK");
    }
}
