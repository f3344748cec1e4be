//! Solvability verifier: repairs a placed world so it can always be finished.

use std::collections::BTreeSet;

use infoprox_core::{Item, ItemTag, KeyTag, PassageId, RoomId, Traversal, World};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::context::GenContext;
use crate::pass::GenPass;

/// Repairs reachability after locks, keys, and artifacts are placed.
///
/// Runs in order:
/// 1. strict reachable set from start (every locked passage is a wall);
/// 2. if every start exit is locked, unlock one, never the goal gate;
/// 3. move keys that sit outside the reachable set into the start room;
/// 4. bring the key of every key-locked start exit into the start room;
/// 5. move artifacts out of the vault, out of unreachable rooms, and apart.
#[derive(Debug, Default)]
pub struct Verifier;

impl GenPass for Verifier {
    fn name(&self) -> &str {
        "verify"
    }

    fn run(&mut self, ctx: &mut GenContext<'_>) {
        let start = ctx.world.start().clone();
        let theme = ctx.config.theme;

        free_start(ctx.world, &start);
        let reached = ctx.world.reachable_from(&start, Traversal::RespectLocks);
        debug!(reached = reached.len(), rooms = ctx.world.len(), "strict reachability");

        for tag in guarded_tags(ctx.world) {
            match ctx.world.find_item(|i| i.opens(&tag)).cloned() {
                Some(room) if reached.contains(&room) => {}
                Some(room) => {
                    move_item(ctx.world, &room, &start, |i| i.opens(&tag));
                    info!(key = %tag, from = %room, "unreachable key moved to start");
                }
                None => {
                    create_key(ctx.world, &start, theme.key().name, &tag);
                    warn!(key = %tag, "missing key created in start");
                }
            }
        }

        let start_tags: Vec<KeyTag> = ctx
            .world
            .exits(&start)
            .iter()
            .filter(|e| e.is_locked())
            .filter_map(|e| e.key_tag().cloned())
            .collect();
        for tag in start_tags {
            let in_start = ctx
                .world
                .room(&start)
                .is_some_and(|r| r.items.iter().any(|i| i.opens(&tag)));
            if in_start {
                continue;
            }
            match ctx.world.find_item(|i| i.opens(&tag)).cloned() {
                Some(room) => {
                    move_item(ctx.world, &room, &start, |i| i.opens(&tag));
                    info!(key = %tag, from = %room, "start exit key moved to start");
                }
                None => {
                    create_key(ctx.world, &start, theme.key().name, &tag);
                    warn!(key = %tag, "start exit had no key, created one");
                }
            }
        }

        place_artifacts(ctx.world, ctx.rng, &start, &reached);
    }
}

/// Tags of keys that currently guard a locked passage, in passage order.
pub(crate) fn guarded_tags(world: &World) -> Vec<KeyTag> {
    let mut seen = BTreeSet::new();
    world
        .passages()
        .iter()
        .filter(|p| p.locked)
        .filter_map(|p| p.key_tag())
        .filter(|t| seen.insert((*t).clone()))
        .cloned()
        .collect()
}

fn free_start(world: &mut World, start: &RoomId) {
    let exits = world.exits(start);
    if exits.is_empty() || exits.iter().any(|e| !e.is_locked()) {
        return;
    }
    let pick: Option<PassageId> = exits
        .iter()
        .find(|e| e.key_tag().is_some())
        .or_else(|| exits.iter().find(|e| !e.is_goal()))
        .map(|e| e.passage.id);
    if let Some(pid) = pick {
        world.set_locked(pid, false);
        info!(passage = %pid, "start was sealed in, unlocked one exit");
    }
}

fn move_item(world: &mut World, from: &RoomId, to: &RoomId, pred: impl Fn(&Item) -> bool) {
    let Some(item) = world.room_mut(from).and_then(|r| r.take_item(pred)) else {
        return;
    };
    if let Some(room) = world.room_mut(to) {
        room.items.push(item);
    }
}

fn create_key(world: &mut World, room: &RoomId, noun: &str, tag: &KeyTag) {
    let item = Item::new(format!("{noun} {}", tag.index))
        .with_tag(ItemTag::Key(tag.clone()))
        .with_tag(ItemTag::Plain("key".into()));
    if let Some(r) = world.room_mut(room) {
        r.items.push(item);
    }
}

/// Keep one artifact per reachable non-vault room.
fn place_artifacts(
    world: &mut World,
    rng: &mut StdRng,
    start: &RoomId,
    reached: &BTreeSet<RoomId>,
) {
    let vault = world.vault().map(|r| r.id.clone());
    let is_vault = |id: &RoomId| vault.as_ref() == Some(id);

    let mut occupied: BTreeSet<RoomId> = BTreeSet::new();
    let mut misplaced: Vec<(RoomId, String)> = Vec::new();
    for room in world.rooms() {
        for item in room.items.iter().filter(|i| i.is_artifact()) {
            if !is_vault(&room.id) && reached.contains(&room.id) && !occupied.contains(&room.id) {
                occupied.insert(room.id.clone());
            } else {
                misplaced.push((room.id.clone(), item.name.clone()));
            }
        }
    }
    if misplaced.is_empty() {
        return;
    }

    let keys: BTreeSet<KeyTag> = world
        .rooms()
        .flat_map(|r| r.items.iter())
        .flat_map(|i| i.key_tags())
        .cloned()
        .collect();
    let expanded = world.reachable_from(start, Traversal::WithKeys(&keys));

    for (from, name) in misplaced {
        let free = |set: &BTreeSet<RoomId>| -> Vec<RoomId> {
            world
                .room_ids()
                .iter()
                .filter(|id| set.contains(*id) && !is_vault(*id) && !occupied.contains(*id))
                .cloned()
                .collect()
        };
        let mut candidates = free(reached);
        if candidates.is_empty() {
            candidates = free(&expanded);
        }
        if candidates.is_empty() {
            warn!(artifact = %name, room = %from, "no free room for artifact");
            continue;
        }
        let to = candidates[rng.random_range(0..candidates.len())].clone();
        move_item(world, &from, &to, |i| i.is_artifact() && i.name == name);
        info!(artifact = %name, from = %from, to = %to, "artifact moved");
        occupied.insert(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenConfig;
    use crate::context::Layout;
    use infoprox_core::{Direction, Lock, Room, Theme};
    use rand::SeedableRng;

    fn room(id: &str, arch: &str) -> Room {
        let theme = Theme::Fantasy;
        Room::new(RoomId::new(id), theme, theme.archetype(arch).unwrap(), "dim")
    }

    /// r0 -east- r1 -east- r2 -east- r3 (vault)
    fn corridor() -> World {
        let mut world = World::new(Theme::Fantasy, 1);
        for (id, arch) in [("r0", "library"), ("r1", "library"), ("r2", "library"), ("r3", "vault")] {
            world.add_room(room(id, arch)).unwrap();
        }
        for (a, b) in [("r0", "r1"), ("r1", "r2"), ("r2", "r3")] {
            world
                .connect(&a.into(), Direction::East, &b.into(), Direction::West)
                .unwrap();
        }
        world
    }

    fn verify(world: &mut World) {
        let config = GenConfig::default().with_seed(1);
        let mut rng = StdRng::seed_from_u64(1);
        let mut layout = Layout::default();
        let mut ctx = GenContext {
            world,
            rng: &mut rng,
            layout: &mut layout,
            config: &config,
        };
        Verifier.run(&mut ctx);
    }

    fn rune(n: u32) -> KeyTag {
        KeyTag::new("rune", n)
    }

    fn key(n: u32) -> Item {
        Item::new(format!("rune key {n}")).with_tag(ItemTag::Key(rune(n)))
    }

    fn artifact(slug: &str) -> Item {
        Item::new(slug).with_tag(ItemTag::Artifact(slug.into()))
    }

    #[test]
    fn key_behind_its_own_lock_moves_to_start() {
        let mut world = corridor();
        world.lock_passage(PassageId(1), Lock::Key(rune(1)));
        world.room_mut(&"r2".into()).unwrap().items.push(key(1));
        verify(&mut world);
        assert_eq!(world.find_item(|i| i.opens(&rune(1))), Some(&RoomId::new("r0")));
        assert!(world.passage(PassageId(1)).unwrap().locked);
    }

    #[test]
    fn sealed_start_gets_one_open_exit() {
        let mut world = corridor();
        world.lock_passage(PassageId(0), Lock::Key(rune(1)));
        world.room_mut(&"r1".into()).unwrap().items.push(key(1));
        verify(&mut world);
        assert!(world.exits(world.start()).iter().any(|e| !e.is_locked()));
    }

    #[test]
    fn sealed_start_never_opens_goal_gate() {
        let mut world = corridor();
        world
            .connect(&"r0".into(), Direction::North, &"r3".into(), Direction::South)
            .unwrap();
        world.lock_passage(PassageId(0), Lock::Key(rune(1)));
        world.lock_passage(PassageId(3), Lock::Goal);
        world.room_mut(&"r0".into()).unwrap().items.push(key(1));
        verify(&mut world);
        assert!(world.passage(PassageId(3)).unwrap().locked);
        assert!(!world.passage(PassageId(0)).unwrap().locked);
    }

    #[test]
    fn missing_key_is_created_in_start() {
        let mut world = corridor();
        world.lock_passage(PassageId(1), Lock::Key(rune(2)));
        verify(&mut world);
        assert_eq!(world.find_item(|i| i.opens(&rune(2))), Some(&RoomId::new("r0")));
    }

    #[test]
    fn start_exit_key_is_fetched_from_a_neighbour() {
        let mut world = corridor();
        world
            .connect(&"r0".into(), Direction::North, &"r2".into(), Direction::South)
            .unwrap();
        world.lock_passage(PassageId(0), Lock::Key(rune(1)));
        world.room_mut(&"r2".into()).unwrap().items.push(key(1));
        verify(&mut world);
        assert_eq!(world.rooms_with_item(|i| i.opens(&rune(1))), vec![&RoomId::new("r0")]);
        assert!(world.passage(PassageId(0)).unwrap().locked);
    }

    #[test]
    fn reachable_key_stays_put() {
        let mut world = corridor();
        world.lock_passage(PassageId(2), Lock::Key(rune(1)));
        world.room_mut(&"r1".into()).unwrap().items.push(key(1));
        verify(&mut world);
        assert_eq!(world.find_item(|i| i.opens(&rune(1))), Some(&RoomId::new("r1")));
    }

    #[test]
    fn artifacts_leave_vault_and_spread_out() {
        let mut world = corridor();
        world.room_mut(&"r3".into()).unwrap().items.push(artifact("sunstone"));
        world.room_mut(&"r1".into()).unwrap().items.push(artifact("crown"));
        world.room_mut(&"r1".into()).unwrap().items.push(artifact("chalice"));
        verify(&mut world);

        let rooms = world.rooms_with_item(|i| i.is_artifact());
        assert_eq!(rooms.len(), 3);
        assert!(!rooms.contains(&&RoomId::new("r3")));
    }

    #[test]
    fn artifacts_fall_back_to_keyed_rooms() {
        let mut world = corridor();
        world.lock_passage(PassageId(1), Lock::Key(rune(1)));
        world.room_mut(&"r0".into()).unwrap().items.push(key(1));
        world.room_mut(&"r0".into()).unwrap().items.push(artifact("a"));
        world.room_mut(&"r1".into()).unwrap().items.push(artifact("b"));
        world.room_mut(&"r1".into()).unwrap().items.push(artifact("c"));
        verify(&mut world);

        let rooms = world.rooms_with_item(|i| i.is_artifact());
        assert_eq!(
            rooms,
            vec![&RoomId::new("r0"), &RoomId::new("r1"), &RoomId::new("r2")]
        );
    }

    #[test]
    fn guarded_tags_skip_open_and_goal_passages() {
        let mut world = corridor();
        world.lock_passage(PassageId(0), Lock::Key(rune(1)));
        world.lock_passage(PassageId(1), Lock::Key(rune(2)));
        world.lock_passage(PassageId(2), Lock::Goal);
        world.set_locked(PassageId(0), false);
        assert_eq!(guarded_tags(&world), vec![rune(2)]);
    }
}
