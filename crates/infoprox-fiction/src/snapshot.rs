//! Save files.
//!
//! A snapshot does not store the world graph. It stores the generation
//! inputs plus everything play can change, and [`Snapshot::restore`]
//! regenerates the world from the seed before applying the overrides.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use infoprox_core::{Direction, Item, RoomId, Theme};
use infoprox_worldgen::{GenConfig, generate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FictionError, FictionResult};
use crate::state::GameState;

/// Saved lock state of one exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitState {
    /// Whether the exit is barred.
    pub locked: bool,
}

/// Saved state of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomState {
    /// Whether the player has been here.
    pub seen: bool,
    /// Items lying in the room.
    pub items: Vec<Item>,
    /// Lock flags by exit direction.
    pub exits: BTreeMap<Direction, ExitState>,
}

/// Everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Generation seed.
    pub seed: u64,
    /// Generation theme.
    pub theme: Theme,
    /// Generation room count.
    pub room_count: usize,
    /// The player's room.
    pub room: RoomId,
    /// Points earned.
    pub score: u32,
    /// Commands processed.
    pub turns: u32,
    /// Whether the goal gate has been opened.
    #[serde(default)]
    pub won: bool,
    /// Items carried, in pickup order.
    pub inventory: Vec<Item>,
    /// Per-room overrides.
    pub rooms: BTreeMap<RoomId, RoomState>,
    /// Map positions. Older saves may lack them.
    #[serde(default)]
    pub coords: BTreeMap<RoomId, [i32; 3]>,
    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,
}

impl Snapshot {
    /// Capture the current game.
    pub fn capture(state: &GameState) -> Self {
        let world = &state.world;
        let rooms = world
            .rooms()
            .map(|room| {
                let exits = world
                    .exits(&room.id)
                    .iter()
                    .map(|e| {
                        (
                            e.direction,
                            ExitState {
                                locked: e.is_locked(),
                            },
                        )
                    })
                    .collect();
                let saved = RoomState {
                    seen: room.seen,
                    items: room.items.clone(),
                    exits,
                };
                (room.id.clone(), saved)
            })
            .collect();

        Self {
            seed: world.seed,
            theme: world.theme,
            room_count: world.len(),
            room: state.room.clone(),
            score: state.score,
            turns: state.turns,
            won: state.won,
            inventory: state.inventory.clone(),
            rooms,
            coords: state
                .coords
                .iter()
                .map(|(id, &(x, y, z))| (id.clone(), [x, y, z]))
                .collect(),
            saved_at: Utc::now(),
        }
    }

    /// Regenerate the world and apply the saved overrides.
    ///
    /// Fails if the save names a room or exit the regenerated world lacks.
    pub fn restore(self) -> FictionResult<GameState> {
        let config = GenConfig::default()
            .with_seed(self.seed)
            .with_room_count(self.room_count)
            .with_theme(self.theme);
        let mut world = generate(&config);

        if world.room(&self.room).is_none() {
            return Err(FictionError::UnknownRoom(self.room));
        }
        for (id, saved) in self.rooms {
            if world.room(&id).is_none() {
                return Err(FictionError::UnknownRoom(id));
            }
            let mut locks = Vec::with_capacity(saved.exits.len());
            for (direction, exit) in &saved.exits {
                let pid = world
                    .exit(&id, *direction)
                    .map(|e| e.passage.id)
                    .ok_or_else(|| FictionError::UnknownExit {
                        room: id.clone(),
                        direction: *direction,
                    })?;
                locks.push((pid, exit.locked));
            }
            for (pid, locked) in locks {
                world.set_locked(pid, locked);
            }

            let room = world
                .room_mut(&id)
                .ok_or_else(|| FictionError::UnknownRoom(id.clone()))?;
            room.seen = saved.seen;
            room.items = saved.items;
        }

        let mut state = GameState::new(world);
        state.room = self.room;
        state.inventory = self.inventory;
        state.score = self.score;
        state.turns = self.turns;
        state.won = self.won;
        if !self.coords.is_empty() {
            state.coords = self
                .coords
                .into_iter()
                .map(|(id, [x, y, z])| (id, (x, y, z)))
                .collect();
        }
        state.coords.entry(state.room.clone()).or_insert((0, 0, 0));
        debug!(seed = self.seed, room = %state.room, "snapshot restored");
        Ok(state)
    }

    /// Write as pretty JSON.
    pub fn write(&self, path: &Path) -> FictionResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a snapshot written by [`Snapshot::write`].
    pub fn read(path: &Path) -> FictionResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FictionSession;

    fn config() -> GenConfig {
        GenConfig::default()
            .with_seed(7)
            .with_room_count(10)
            .with_theme(Theme::Scifi)
    }

    fn play(session: &mut FictionSession, inputs: &[&str]) {
        for input in inputs {
            session.process(input).unwrap();
        }
    }

    /// A walk that tries every direction and grabs what it can.
    const WANDER: &[&str] = &[
        "take all", "n", "take key", "e", "take key", "s", "use", "w", "u", "d",
        "take key", "n", "n", "use", "e", "look", "take key", "w", "s",
    ];

    #[test]
    fn capture_records_generation_inputs() {
        let state = GameState::new(generate(&config()));
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.seed, 7);
        assert_eq!(snap.theme, Theme::Scifi);
        assert_eq!(snap.room_count, 10);
        assert_eq!(snap.room, *state.world.start());
        assert_eq!(snap.rooms.len(), 10);
        let locked = snap
            .rooms
            .values()
            .flat_map(|r| r.exits.values())
            .filter(|e| e.locked)
            .count();
        // Each locked passage is seen from both of its rooms.
        assert_eq!(locked % 2, 0);
        assert!(locked >= 2);
    }

    #[test]
    fn resumed_game_matches_uninterrupted_run() {
        let (first, rest) = WANDER.split_at(9);

        let mut straight = FictionSession::new(generate(&config()));
        play(&mut straight, WANDER);

        let mut before = FictionSession::new(generate(&config()));
        play(&mut before, first);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.json");
        Snapshot::capture(before.state()).write(&path).unwrap();

        let restored = Snapshot::read(&path).unwrap().restore().unwrap();
        let mut after = FictionSession::from_state(restored);
        play(&mut after, rest);

        let (a, b) = (straight.state(), after.state());
        assert_eq!(a.room, b.room);
        assert_eq!(a.score, b.score);
        assert_eq!(a.turns, b.turns);
        assert_eq!(a.inventory, b.inventory);
        assert_eq!(a.coords, b.coords);
    }

    #[test]
    fn restore_applies_overrides() {
        let mut state = GameState::new(generate(&config()));
        let start = state.world.start().clone();
        let pid = state
            .world
            .passages()
            .iter()
            .find(|p| p.locked)
            .map(|p| p.id)
            .unwrap();
        state.world.set_locked(pid, false);
        let taken = state.current_mut().unwrap().items.pop();
        state.inventory.extend(taken);
        state.score = 3;

        let restored = Snapshot::capture(&state).restore().unwrap();
        assert!(!restored.world.passage(pid).unwrap().locked);
        assert_eq!(restored.inventory, state.inventory);
        assert_eq!(
            restored.world.room(&start).unwrap().items,
            state.world.room(&start).unwrap().items
        );
        assert_eq!(restored.score, 3);
    }

    #[test]
    fn restore_rejects_unknown_room() {
        let state = GameState::new(generate(&config()));
        let mut snap = Snapshot::capture(&state);
        snap.room = RoomId::new("nowhere");
        assert!(matches!(snap.restore(), Err(FictionError::UnknownRoom(_))));
    }

    #[test]
    fn restore_rejects_unknown_exit() {
        let state = GameState::new(generate(&config()));
        let mut snap = Snapshot::capture(&state);
        let start = state.world.start().clone();
        let room = snap.rooms.get_mut(&start).unwrap();
        let free = Direction::ALL
            .into_iter()
            .find(|d| !room.exits.contains_key(d))
            .unwrap();
        room.exits.insert(free, ExitState { locked: true });
        assert!(matches!(
            snap.restore(),
            Err(FictionError::UnknownExit { direction, .. }) if direction == free
        ));
    }

    #[test]
    fn read_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Snapshot::read(&path), Err(FictionError::Json(_))));
        assert!(matches!(
            Snapshot::read(&dir.path().join("missing.json")),
            Err(FictionError::Io(_))
        ));
    }

    #[test]
    fn old_saves_without_coords_still_load() {
        let state = GameState::new(generate(&config()));
        let mut value = serde_json::to_value(Snapshot::capture(&state)).unwrap();
        let object = value.as_object_mut().unwrap();
        object.remove("coords");
        object.remove("won");
        let snap: Snapshot = serde_json::from_value(value).unwrap();
        let restored = snap.restore().unwrap();
        assert_eq!(restored.position(), (0, 0, 0));
        assert!(!restored.won);
    }
}
