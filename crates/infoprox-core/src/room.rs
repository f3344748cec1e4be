use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::item::Item;
use crate::passage::PassageId;
use crate::theme::{Archetype, Theme};

/// Unique identifier for a room, e.g. `r3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub String);

impl RoomId {
    /// Create a room ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A location in the world.
///
/// Exits are stored as passage handles; the lock state of an exit lives on
/// the passage so both sides of a doorway always agree.
#[derive(Debug, Clone)]
pub struct Room {
    /// Unique identifier.
    pub id: RoomId,
    /// Display name.
    pub name: String,
    /// The world's theme.
    pub theme: Theme,
    /// What kind of room this is.
    pub archetype: &'static Archetype,
    /// The adjective rolled for this room.
    pub adjective: &'static str,
    /// Items lying here, in no particular order.
    pub items: Vec<Item>,
    /// Passage handle per direction.
    pub exits: BTreeMap<Direction, PassageId>,
    /// Whether the player has looked around here.
    pub seen: bool,
    /// Base description text.
    pub description: String,
}

impl Room {
    /// Create a room from an archetype and adjective.
    pub fn new(
        id: RoomId,
        theme: Theme,
        archetype: &'static Archetype,
        adjective: &'static str,
    ) -> Self {
        let name = archetype.display_name();
        let description = format!("A {adjective} {}.", name.to_lowercase());
        Self {
            id,
            name,
            theme,
            archetype,
            adjective,
            items: Vec::new(),
            exits: BTreeMap::new(),
            seen: false,
            description,
        }
    }

    /// Returns true if this is the goal room.
    pub fn is_vault(&self) -> bool {
        self.archetype.is_vault()
    }

    /// Returns true if an exit already uses `direction`.
    pub fn has_exit(&self, direction: Direction) -> bool {
        self.exits.contains_key(&direction)
    }

    /// Directions from `candidates` that have no exit yet.
    pub fn free_directions(&self, candidates: &[Direction]) -> Vec<Direction> {
        candidates
            .iter()
            .copied()
            .filter(|d| !self.has_exit(*d))
            .collect()
    }

    /// Remove and return the first item matching `pred`.
    pub fn take_item(&mut self, pred: impl Fn(&Item) -> bool) -> Option<Item> {
        let pos = self.items.iter().position(pred)?;
        Some(self.items.remove(pos))
    }
}
