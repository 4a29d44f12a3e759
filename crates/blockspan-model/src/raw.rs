//! Raw (JSON) document format.
//!
//! ## Learning: Serde Field Renames
//!
//! The on-disk format uses camelCase keys (`entityRanges`, `entityMap`)
//! and stores entity ranges as offset/length pairs. `#[serde(rename_all)]`
//! maps those onto idiomatic snake_case fields without hand-written
//! parsing code.
//!
//! ```json
//! {
//!   "blocks": [
//!     { "key": "a1", "text": "see the docs",
//!       "entityRanges": [{ "offset": 8, "length": 4, "key": 0 }] }
//!   ],
//!   "entityMap": {
//!     "0": { "type": "LINK", "mutability": "MUTABLE", "data": { "url": "/docs" } }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{BlockKey, ContentState, Entity, EntityKey, ModelError, ModelResult, Mutability};

/// A serialized document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: BTreeMap<String, RawEntity>,
}

/// A serialized block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    /// Block key; generated when missing
    #[serde(default)]
    pub key: Option<BlockKey>,
    pub text: String,
    #[serde(default)]
    pub entity_ranges: Vec<RawEntityRange>,
}

/// A serialized entity range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntityRange {
    pub offset: usize,
    pub length: usize,
    /// Key into the document's entity map
    pub key: u32,
}

/// A serialized entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEntity {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub mutability: Mutability,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl RawDocument {
    /// Parses a raw document from JSON.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a raw document from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Serializes to pretty-printed JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds a `ContentState` from its raw form.
pub fn convert_from_raw(raw: &RawDocument) -> ModelResult<ContentState> {
    let mut builder = ContentState::builder();

    for (name, entity) in &raw.entity_map {
        let key = name
            .parse::<u32>()
            .map_err(|_| ModelError::UnknownEntity(name.clone()))?;
        builder.insert_entity(
            EntityKey::new(key),
            Entity {
                kind: entity.kind.clone(),
                mutability: entity.mutability,
                data: entity.data.clone(),
            },
        );
    }

    for block in &raw.blocks {
        builder = match &block.key {
            Some(key) => builder.block_with_key(key.clone(), block.text.clone()),
            None => builder.block(block.text.clone()),
        };
        for range in &block.entity_ranges {
            // an overflowing end is past any block, so build() rejects it
            builder = builder.apply_entity(
                range.offset,
                range.offset.saturating_add(range.length),
                EntityKey::new(range.key),
            );
        }
    }

    builder.build()
}

impl ContentState {
    /// Converts the document to its raw form.
    pub fn to_raw(&self) -> RawDocument {
        let blocks = self
            .blocks()
            .iter()
            .map(|block| {
                let mut entity_ranges = Vec::new();
                block.find_entity_ranges(
                    |c| c.entity.is_some(),
                    |start, end| {
                        if let Some(key) = block.entity_at(start) {
                            entity_ranges.push(RawEntityRange {
                                offset: start,
                                length: end - start,
                                key: key.value(),
                            });
                        }
                    },
                );
                RawBlock {
                    key: Some(block.key().clone()),
                    text: block.text().to_string(),
                    entity_ranges,
                }
            })
            .collect();

        let entity_map = self
            .entity_map()
            .iter()
            .map(|(key, entity)| {
                (
                    key.to_string(),
                    RawEntity {
                        kind: entity.kind.clone(),
                        mutability: entity.mutability,
                        data: entity.data.clone(),
                    },
                )
            })
            .collect();

        RawDocument {
            blocks,
            entity_map,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DOC: &str = r#"{
        "blocks": [
            { "key": "a", "text": "Lorem ipsum" },
            { "key": "b", "text": "this contains an entity",
              "entityRanges": [{ "offset": 5, "length": 8, "key": 0 }] }
        ],
        "entityMap": {
            "0": { "type": "DUMMY_ENTITY", "mutability": "MUTABLE" }
        }
    }"#;

    #[test]
    fn test_convert_from_raw() {
        let raw = RawDocument::from_json(DOC).unwrap();
        let content = convert_from_raw(&raw).unwrap();

        assert_eq!(content.len(), 2);
        let b = content.block_for_key(&BlockKey::from("b")).unwrap();
        assert_eq!(b.entity_at(4), None);
        assert_eq!(b.entity_at(5), Some(EntityKey::new(0)));
        assert_eq!(b.entity_at(12), Some(EntityKey::new(0)));
        assert_eq!(b.entity_at(13), None);
        assert!(content.entity(EntityKey::new(0)).unwrap().is_kind("DUMMY_ENTITY"));
    }

    #[test]
    fn test_raw_round_trip_keeps_spans() {
        let raw = RawDocument::from_json(DOC).unwrap();
        let content = convert_from_raw(&raw).unwrap();
        let back = content.to_raw();

        assert_eq!(back.blocks[1].entity_ranges, raw.blocks[1].entity_ranges);
        assert_eq!(back.blocks[0].key, Some(BlockKey::from("a")));
        assert_eq!(back.entity_map["0"].kind, "DUMMY_ENTITY");
    }

    #[test]
    fn test_json_round_trip() {
        let content = convert_from_raw(&RawDocument::from_json(DOC).unwrap()).unwrap();
        let json = content.to_raw().to_json().unwrap();
        let reloaded = convert_from_raw(&RawDocument::from_json(&json).unwrap()).unwrap();

        assert_eq!(reloaded, content);
    }

    #[test]
    fn test_huge_range_length_is_out_of_bounds() {
        let raw = RawDocument::from_json(&format!(
            r#"{{ "blocks": [{{ "key": "a", "text": "short",
                 "entityRanges": [{{ "offset": 2, "length": {}, "key": 0 }}] }}],
                "entityMap": {{ "0": {{ "type": "LINK" }} }} }}"#,
            usize::MAX
        ))
        .unwrap();

        assert!(matches!(
            convert_from_raw(&raw),
            Err(ModelError::SpanOutOfBounds { start: 2, end: usize::MAX, len: 5, .. })
        ));
    }

    #[test]
    fn test_max_entity_key_loads() {
        let raw = RawDocument::from_json(
            r#"{ "blocks": [{ "key": "a", "text": "link",
                 "entityRanges": [{ "offset": 0, "length": 4, "key": 4294967295 }] }],
                "entityMap": { "4294967295": { "type": "LINK" } } }"#,
        )
        .unwrap();

        let content = convert_from_raw(&raw).unwrap();
        assert_eq!(content.first_block().entity_at(0), Some(EntityKey::new(u32::MAX)));
    }

    #[test]
    fn test_missing_keys_are_generated() {
        let raw = RawDocument::from_json(r#"{ "blocks": [{ "text": "x" }, { "text": "y" }] }"#)
            .unwrap();
        let content = convert_from_raw(&raw).unwrap();
        assert_ne!(content.first_block().key(), content.last_block().key());
    }

    #[test]
    fn test_bad_entity_key_is_rejected() {
        let raw = RawDocument::from_json(
            r#"{ "blocks": [{ "text": "x" }], "entityMap": { "link": { "type": "LINK" } } }"#,
        )
        .unwrap();
        assert!(matches!(
            convert_from_raw(&raw),
            Err(ModelError::UnknownEntity(name)) if name == "link"
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOC.as_bytes()).unwrap();

        let raw = RawDocument::from_file(file.path()).unwrap();
        assert_eq!(raw.blocks.len(), 2);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            RawDocument::from_json("{ not json"),
            Err(ModelError::Json(_))
        ));
    }
}
