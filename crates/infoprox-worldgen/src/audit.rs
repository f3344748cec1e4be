//! Structural checks on a generated (or partly played) world.

use std::collections::BTreeSet;
use std::fmt;

use infoprox_core::{Item, KeyTag, RoomId, Traversal, World};

use crate::config::{MAX_ROOMS, MIN_ROOMS};
use crate::verify::guarded_tags;

/// Number of artifacts the goal gate asks for.
pub const ARTIFACTS_REQUIRED: usize = 3;

/// Result of auditing a world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    /// Number of rooms.
    pub rooms: usize,
    /// Whether the start room exists.
    pub start_present: bool,
    /// Whether the start room has at least one unlocked exit.
    pub start_has_open_exit: bool,
    /// Rooms reachable from the audit origin without crossing a locked passage.
    pub reachable: usize,
    /// Keys guarding a locked passage that are neither carried nor strictly reachable.
    pub unreachable_keys: Vec<KeyTag>,
    /// Artifacts lying in rooms plus artifacts carried.
    pub artifacts: usize,
    /// Artifacts reachable once every obtainable key is used, carried ones included.
    pub reachable_artifacts: usize,
    /// Whether no two artifacts share a room.
    pub artifacts_distinct: bool,
    /// Artifacts lying in the vault.
    pub artifacts_in_vault: usize,
    /// Number of goal-locked passages.
    pub goal_gates: usize,
    /// Whether some side of a goal gate can be reached with obtainable keys.
    pub goal_reachable: bool,
}

impl Audit {
    /// Returns true if the world can be finished from the audit origin.
    pub fn is_solvable(&self) -> bool {
        self.start_present
            && self.start_has_open_exit
            && self.unreachable_keys.is_empty()
            && self.reachable_artifacts >= ARTIFACTS_REQUIRED
            && self.artifacts_distinct
            && self.artifacts_in_vault == 0
            && self.goal_gates == 1
            && self.goal_reachable
    }

    /// Returns true if the room count is within the generator's bounds.
    pub fn size_in_bounds(&self) -> bool {
        (MIN_ROOMS..=MAX_ROOMS).contains(&self.rooms)
    }
}

impl fmt::Display for Audit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.is_solvable() {
            "solvable"
        } else {
            "UNSOLVABLE"
        };
        writeln!(f, "rooms: {} ({} reachable)", self.rooms, self.reachable)?;
        writeln!(
            f,
            "start: {}",
            if self.start_has_open_exit {
                "has an open exit"
            } else {
                "sealed"
            }
        )?;
        if self.unreachable_keys.is_empty() {
            writeln!(f, "keys: all reachable")?;
        } else {
            let tags: Vec<String> = self.unreachable_keys.iter().map(|t| t.to_string()).collect();
            writeln!(f, "keys: unreachable {}", tags.join(", "))?;
        }
        writeln!(
            f,
            "artifacts: {} ({} reachable, {} in vault)",
            self.artifacts, self.reachable_artifacts, self.artifacts_in_vault
        )?;
        writeln!(f, "goal gates: {}", self.goal_gates)?;
        write!(f, "verdict: {verdict}")
    }
}

/// Audit a freshly generated world from its start room.
pub fn audit(world: &World) -> Audit {
    audit_from(world, world.start(), &[])
}

/// Audit a world from `from`, treating `carried` as already in hand.
pub fn audit_from(world: &World, from: &RoomId, carried: &[Item]) -> Audit {
    let start = world.start();
    let start_present = world.room(start).is_some();
    let start_has_open_exit = world.exits(start).iter().any(|e| !e.is_locked());

    let strict = world.reachable_from(from, Traversal::RespectLocks);
    let held: BTreeSet<&KeyTag> = carried.iter().flat_map(|i| i.key_tags()).collect();
    let unreachable_keys = guarded_tags(world)
        .into_iter()
        .filter(|tag| {
            !held.contains(tag)
                && !world
                    .rooms_with_item(|i| i.opens(tag))
                    .iter()
                    .any(|r| strict.contains(*r))
        })
        .collect();

    let expanded = key_closure(world, from, carried);
    let vault = world.vault().map(|r| &r.id);
    let artifact_rooms = world.rooms_with_item(|i| i.is_artifact());
    let room_artifacts: usize = world
        .rooms()
        .map(|r| r.items.iter().filter(|i| i.is_artifact()).count())
        .sum();
    let carried_artifacts = carried.iter().filter(|i| i.is_artifact()).count();
    let reachable_artifacts = world
        .rooms()
        .filter(|r| expanded.contains(&r.id))
        .map(|r| r.items.iter().filter(|i| i.is_artifact()).count())
        .sum::<usize>()
        + carried_artifacts;
    let artifacts_in_vault = vault
        .and_then(|v| world.room(v))
        .map_or(0, |r| r.items.iter().filter(|i| i.is_artifact()).count());

    let goals: Vec<_> = world.passages().iter().filter(|p| p.is_goal()).collect();
    let goal_reachable = goals
        .iter()
        .any(|p| p.ends().iter().any(|e| expanded.contains(&e.room)));

    Audit {
        rooms: world.len(),
        start_present,
        start_has_open_exit,
        reachable: strict.len(),
        unreachable_keys,
        artifacts: room_artifacts + carried_artifacts,
        reachable_artifacts,
        artifacts_distinct: artifact_rooms.len() == room_artifacts,
        artifacts_in_vault,
        goal_gates: goals.len(),
        goal_reachable,
    }
}

/// Rooms reachable from `from` by repeatedly picking up every key in reach.
pub fn key_closure(world: &World, from: &RoomId, carried: &[Item]) -> BTreeSet<RoomId> {
    let mut keys: BTreeSet<KeyTag> = carried.iter().flat_map(|i| i.key_tags()).cloned().collect();
    loop {
        let reached = world.reachable_from(from, Traversal::WithKeys(&keys));
        let before = keys.len();
        keys.extend(
            world
                .rooms()
                .filter(|r| reached.contains(&r.id))
                .flat_map(|r| r.items.iter())
                .flat_map(|i| i.key_tags())
                .cloned(),
        );
        if keys.len() == before {
            return reached;
        }
    }
}
