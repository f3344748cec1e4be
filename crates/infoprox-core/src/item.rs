use serde::{Deserialize, Serialize};

use crate::tag::{ItemTag, KeyTag};

/// A physical object lying in a room or carried by the player.
///
/// Items are owned by exactly one collection at a time; moving one between a
/// room and the inventory is always a remove followed by a push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, also the primary match target for player queries.
    pub name: String,
    /// Semantic markers.
    #[serde(default)]
    pub tags: Vec<ItemTag>,
    /// Whether the item can be picked up.
    #[serde(default = "default_portable")]
    pub portable: bool,
    /// Text shown when the item is examined or read.
    #[serde(default)]
    pub description: String,
    /// Optional weight in arbitrary units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

fn default_portable() -> bool {
    true
}

impl Item {
    /// Create a portable item with no tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            portable: true,
            description: String::new(),
            weight: None,
        }
    }

    /// Add a tag.
    pub fn with_tag(mut self, tag: ItemTag) -> Self {
        self.tags.push(tag);
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Mark the item as bolted in place.
    pub fn fixed(mut self) -> Self {
        self.portable = false;
        if !self.tags.contains(&ItemTag::Fixture) {
            self.tags.push(ItemTag::Fixture);
        }
        self
    }

    /// Set the weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// All key tags this item carries.
    pub fn key_tags(&self) -> impl Iterator<Item = &KeyTag> {
        self.tags.iter().filter_map(ItemTag::as_key)
    }

    /// Returns true if this item opens locks tagged with `key`.
    pub fn opens(&self, key: &KeyTag) -> bool {
        self.key_tags().any(|k| k == key)
    }

    /// Returns true if the item is one of the goal artifacts.
    pub fn is_artifact(&self) -> bool {
        self.tags.iter().any(|t| matches!(t, ItemTag::Artifact(_)))
    }

    /// Returns true if the item is a note.
    pub fn is_note(&self) -> bool {
        self.tags.contains(&ItemTag::Note)
    }

    /// Returns true if the item has something written on it.
    pub fn is_readable(&self) -> bool {
        self.tags.iter().any(ItemTag::is_readable)
    }
}
