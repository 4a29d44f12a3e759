//! Entities and the per-document entity map.
//!
//! Entities are append-only: `EntityMap::create` hands out the next key
//! and existing entries never change.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{ModelError, ModelResult};

/// Key of an entity inside an `EntityMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKey(u32);

impl EntityKey {
    /// Creates a key from its numeric value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How an entity reacts when the text it covers is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mutability {
    /// Text can change freely; the entity stays attached
    #[default]
    Mutable,
    /// Any edit removes the entity from the whole range
    Immutable,
    /// Edits remove the entity from the affected segment only
    Segmented,
}

/// A tagged annotation attached to a range of characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Entity type, e.g. `LINK` or `MENTION`
    #[serde(rename = "type")]
    pub kind: String,

    /// Edit behavior
    #[serde(default)]
    pub mutability: Mutability,

    /// Arbitrary payload (link target, user id, ...)
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Entity {
    /// Creates an entity with no payload.
    pub fn new(kind: impl Into<String>, mutability: Mutability) -> Self {
        Self {
            kind: kind.into(),
            mutability,
            data: serde_json::Value::Null,
        }
    }

    /// Attaches a payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }

    /// Returns true if the entity has the given type.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

/// Registry of the entities referenced by a document.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityMap {
    entities: BTreeMap<EntityKey, Entity>,
    /// `None` once `u32::MAX` has been handed out
    next_key: Option<u32>,
}

impl EntityMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entities: BTreeMap::new(),
            next_key: Some(0),
        }
    }

    /// Stores an entity and returns its key.
    pub fn create(&mut self, entity: Entity) -> ModelResult<EntityKey> {
        let key = EntityKey(self.next_key.ok_or(ModelError::EntityKeysExhausted)?);
        self.next_key = key.0.checked_add(1);
        self.entities.insert(key, entity);
        Ok(key)
    }

    /// Stores an entity under a caller-chosen key.
    ///
    /// Later `create` calls never reuse `key`.
    pub(crate) fn insert(&mut self, key: EntityKey, entity: Entity) {
        if self.next_key.is_some_and(|next| key.0 >= next) {
            self.next_key = key.0.checked_add(1);
        }
        self.entities.insert(key, entity);
    }

    /// Returns the entity for a key.
    pub fn get(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(&key)
    }

    /// Returns true if the key is registered.
    pub fn contains(&self, key: EntityKey) -> bool {
        self.entities.contains_key(&key)
    }

    /// Iterates over all entities in key order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter().map(|(&key, entity)| (key, entity))
    }

    /// Returns the number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if no entities are registered.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for EntityMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_sequential_keys() {
        let mut map = EntityMap::new();
        let a = map.create(Entity::new("LINK", Mutability::Mutable)).unwrap();
        let b = map.create(Entity::new("MENTION", Mutability::Immutable)).unwrap();

        assert_eq!(a.value(), 0);
        assert_eq!(b.value(), 1);
        assert!(map.get(a).unwrap().is_kind("LINK"));
        assert_eq!(map.get(b).unwrap().mutability, Mutability::Immutable);
    }

    #[test]
    fn test_insert_bumps_next_key() {
        let mut map = EntityMap::new();
        map.insert(EntityKey::new(7), Entity::new("LINK", Mutability::Mutable));
        let next = map.create(Entity::new("LINK", Mutability::Mutable)).unwrap();
        assert_eq!(next.value(), 8);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_insert_below_next_key_keeps_counter() {
        let mut map = EntityMap::new();
        map.insert(EntityKey::new(5), Entity::new("LINK", Mutability::Mutable));
        map.insert(EntityKey::new(2), Entity::new("LINK", Mutability::Mutable));
        let next = map.create(Entity::new("LINK", Mutability::Mutable)).unwrap();
        assert_eq!(next.value(), 6);
    }

    #[test]
    fn test_max_key_exhausts_map() {
        let mut map = EntityMap::new();
        map.insert(EntityKey::new(u32::MAX), Entity::new("LINK", Mutability::Mutable));

        assert!(map.contains(EntityKey::new(u32::MAX)));
        assert!(matches!(
            map.create(Entity::new("LINK", Mutability::Mutable)),
            Err(ModelError::EntityKeysExhausted)
        ));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_entity_json_shape() {
        let entity = Entity::new("LINK", Mutability::Immutable)
            .with_data(serde_json::json!({ "url": "https://example.com" }));
        let json = serde_json::to_value(&entity).unwrap();

        assert_eq!(json["type"], "LINK");
        assert_eq!(json["mutability"], "IMMUTABLE");
        assert_eq!(json["data"]["url"], "https://example.com");
    }
}
