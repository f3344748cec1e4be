//! Structured item and lock tags.
//!
//! Tags keep their textual encodings (`key:rune1`, `artifact:sunstone`,
//! `note`, `goal:artifacts`) at the serialization boundary so saved games
//! stay readable, but everything inside the engine works on the enums.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Identifies which doors an ordinary key opens, encoded as `key:<scheme><n>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyTag {
    /// The theme's key scheme, e.g. `rune`.
    pub scheme: String,
    /// Ordinal distinguishing keys of the same scheme.
    pub index: u32,
}

impl KeyTag {
    /// Create a key tag.
    pub fn new(scheme: impl Into<String>, index: u32) -> Self {
        Self {
            scheme: scheme.into(),
            index,
        }
    }
}

impl fmt::Display for KeyTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "key:{}{}", self.scheme, self.index)
    }
}

impl FromStr for KeyTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix("key:")
            .ok_or_else(|| CoreError::InvalidTag(s.to_string()))?;
        let split = body
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| CoreError::InvalidTag(s.to_string()))?;
        let (scheme, digits) = body.split_at(split);
        if scheme.is_empty() {
            return Err(CoreError::InvalidTag(s.to_string()));
        }
        let index = digits
            .parse()
            .map_err(|_| CoreError::InvalidTag(s.to_string()))?;
        Ok(Self::new(scheme, index))
    }
}

/// A semantic marker on an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ItemTag {
    /// Opens passages locked with the same key tag.
    Key(KeyTag),
    /// One of the theme's goal artifacts, identified by slug.
    Artifact(String),
    /// A narrative note.
    Note,
    /// Something written on paper.
    Paper,
    /// A book.
    Book,
    /// Bolted in place.
    Fixture,
    /// Any other descriptive tag, used only for matching.
    Plain(String),
}

impl ItemTag {
    /// The key tag, if this is a key marker.
    pub fn as_key(&self) -> Option<&KeyTag> {
        match self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }

    /// Returns true for tags that make an item readable.
    pub fn is_readable(&self) -> bool {
        matches!(self, Self::Note | Self::Paper | Self::Book)
    }

    /// Words used when matching player queries against this tag.
    pub fn tokens(&self) -> Vec<String> {
        self.to_string()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl fmt::Display for ItemTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Artifact(slug) => write!(f, "artifact:{slug}"),
            Self::Note => f.write_str("note"),
            Self::Paper => f.write_str("paper"),
            Self::Book => f.write_str("book"),
            Self::Fixture => f.write_str("fixture"),
            Self::Plain(tag) => f.write_str(tag),
        }
    }
}

impl FromStr for ItemTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("key:") {
            return s.parse().map(Self::Key);
        }
        if let Some(slug) = s.strip_prefix("artifact:") {
            if slug.is_empty() {
                return Err(CoreError::InvalidTag(s.to_string()));
            }
            return Ok(Self::Artifact(slug.to_string()));
        }
        match s {
            "" => Err(CoreError::InvalidTag(s.to_string())),
            "note" => Ok(Self::Note),
            "paper" => Ok(Self::Paper),
            "book" => Ok(Self::Book),
            "fixture" => Ok(Self::Fixture),
            other => Ok(Self::Plain(other.to_string())),
        }
    }
}

impl TryFrom<String> for ItemTag {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ItemTag> for String {
    fn from(tag: ItemTag) -> Self {
        tag.to_string()
    }
}

/// What it takes to open a locked passage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lock {
    /// Opened by any item carrying this key tag.
    Key(KeyTag),
    /// Opened only by carrying every goal artifact. Encoded `goal:artifacts`.
    Goal,
}

impl Lock {
    /// The key tag, if this is an ordinary key lock.
    pub fn key_tag(&self) -> Option<&KeyTag> {
        match self {
            Self::Key(key) => Some(key),
            Self::Goal => None,
        }
    }
}

impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => write!(f, "{key}"),
            Self::Goal => f.write_str("goal:artifacts"),
        }
    }
}
