//! Game state: the world being played plus everything about the player.

use std::collections::{BTreeMap, BTreeSet};

use infoprox_core::{Item, KeyTag, Room, RoomId, World};

/// Grid position used only for map drawing.
pub type Coord = (i32, i32, i32);

/// The player's state in a running game.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The world being explored. Owned by the game for its whole life.
    pub world: World,
    /// Current room, looked up by ID in the world.
    pub room: RoomId,
    /// Items carried.
    pub inventory: Vec<Item>,
    /// Points earned.
    pub score: u32,
    /// Commands processed.
    pub turns: u32,
    /// Map positions recorded as rooms are entered.
    pub coords: BTreeMap<RoomId, Coord>,
    /// Set once the goal gate has been opened.
    pub won: bool,
}

impl GameState {
    /// Start a new game in the world's start room.
    pub fn new(world: World) -> Self {
        let room = world.start().clone();
        let mut coords = BTreeMap::new();
        coords.insert(room.clone(), (0, 0, 0));
        Self {
            world,
            room,
            inventory: Vec::new(),
            score: 0,
            turns: 0,
            coords,
            won: false,
        }
    }

    /// The room the player stands in.
    pub fn current(&self) -> Option<&Room> {
        self.world.room(&self.room)
    }

    /// Mutable access to the room the player stands in.
    pub fn current_mut(&mut self) -> Option<&mut Room> {
        self.world.room_mut(&self.room)
    }

    /// The current map position, or the origin if none was recorded.
    pub fn position(&self) -> Coord {
        self.coords.get(&self.room).copied().unwrap_or((0, 0, 0))
    }

    /// Every key tag across the carried items.
    pub fn key_tags(&self) -> BTreeSet<KeyTag> {
        self.inventory
            .iter()
            .flat_map(|i| i.key_tags())
            .cloned()
            .collect()
    }

    /// How many artifacts are carried.
    pub fn artifact_count(&self) -> usize {
        self.inventory.iter().filter(|i| i.is_artifact()).count()
    }
}
