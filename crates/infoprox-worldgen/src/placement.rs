//! Vault, goal gate, keys, key locks, artifacts, and notes.

use infoprox_core::{
    Archetype, Direction, Item, ItemTag, KeyTag, Lock, PassageId, RoomId, Theme, Traversal, World,
};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::audit::ARTIFACTS_REQUIRED;
use crate::builder::{connect_rooms, stitch};
use crate::context::GenContext;
use crate::pass::GenPass;

/// Number of ordinary keys (and key-locked passages) per world.
pub const KEY_COUNT: u32 = 2;

/// Places the vault, goal gate, keys, locks, artifacts, and notes.
#[derive(Debug, Default)]
pub struct Placement;

impl GenPass for Placement {
    fn name(&self) -> &str {
        "placement"
    }

    fn run(&mut self, ctx: &mut GenContext<'_>) {
        let theme = ctx.config.theme;
        let start = ctx.world.start().clone();

        let Some(vault) = choose_vault(ctx.world, ctx.rng, theme) else {
            warn!("no room available for the vault");
            return;
        };
        ensure_exit(ctx.world, ctx.rng, &vault);

        let fixture = theme.goal_fixture();
        if let Some(room) = ctx.world.room_mut(&vault) {
            room.items.push(
                Item::new(fixture.name)
                    .with_description(fixture.description)
                    .fixed(),
            );
        }

        let goal = choose_goal_passage(ctx.world, &start, &vault);
        if let Some(pid) = goal {
            ctx.world.lock_passage(pid, Lock::Goal);
            let stitched = stitch(ctx.world, ctx.rng, &start, Some(pid));
            debug!(passage = %pid, stitched, "goal gate placed");
        }

        let keys = place_keys(ctx.world, ctx.rng, theme, &vault);
        lock_with_keys(ctx.world, ctx.rng, &keys, &vault);
        place_artifacts(ctx.world, ctx.rng, theme, &vault);
        place_notes(ctx.world, theme, &keys);

        ctx.layout.vault = Some(vault);
        ctx.layout.goal = goal;
        ctx.layout.keys = keys;
    }
}

/// Pick the one room that becomes the vault.
///
/// Prefers the last rolled vault that is not the start room; every other
/// rolled vault is restyled so exactly one remains. Converts the last room in
/// generation order when no vault was rolled.
fn choose_vault(world: &mut World, rng: &mut StdRng, theme: Theme) -> Option<RoomId> {
    let start = world.start().clone();
    let rolled: Vec<RoomId> = world
        .rooms()
        .filter(|r| r.is_vault())
        .map(|r| r.id.clone())
        .collect();

    let vault = match rolled.iter().rev().find(|id| **id != start) {
        Some(id) => id.clone(),
        None => world
            .room_ids()
            .iter()
            .rev()
            .find(|id| **id != start)?
            .clone(),
    };

    let others: Vec<&'static Archetype> = theme
        .archetypes()
        .iter()
        .filter(|a| !a.is_vault())
        .collect();
    for id in rolled.iter().filter(|id| **id != vault) {
        let arch = others[rng.random_range(0..others.len())];
        restyle(world, rng, id, arch);
    }
    if !rolled.contains(&vault) {
        restyle(world, rng, &vault, theme.vault());
    }
    Some(vault)
}

fn restyle(world: &mut World, rng: &mut StdRng, id: &RoomId, arch: &'static Archetype) {
    let adj = arch.adjectives[rng.random_range(0..arch.adjectives.len())];
    if let Some(room) = world.room_mut(id) {
        room.archetype = arch;
        room.adjective = adj;
        room.name = arch.display_name();
        room.description = format!("A {adj} {}.", room.name.to_lowercase());
    }
}

fn ensure_exit(world: &mut World, rng: &mut StdRng, vault: &RoomId) {
    if world.room(vault).is_some_and(|r| !r.exits.is_empty()) {
        return;
    }
    let mut others: Vec<RoomId> = world
        .room_ids()
        .iter()
        .filter(|id| *id != vault)
        .cloned()
        .collect();
    others.shuffle(rng);
    for other in &others {
        if connect_rooms(world, rng, vault, other, &Direction::ALL).is_some() {
            debug!(vault = %vault, to = %other, "vault given an exit");
            return;
        }
    }
    warn!(vault = %vault, "vault has no exit");
}

/// The vault exit whose removal keeps the most rooms reachable from start.
fn choose_goal_passage(world: &World, start: &RoomId, vault: &RoomId) -> Option<PassageId> {
    let mut best: Option<(PassageId, usize)> = None;
    for exit in world.exits(vault) {
        let pid = exit.passage.id;
        let size = world.reachable_from(start, Traversal::Avoiding(pid)).len();
        if best.is_none_or(|(_, s)| size > s) {
            best = Some((pid, size));
        }
    }
    best.map(|(pid, _)| pid)
}

/// Drop the ordinary keys into early rooms. Returns their tags.
fn place_keys(world: &mut World, rng: &mut StdRng, theme: Theme, vault: &RoomId) -> Vec<KeyTag> {
    let early_len = (world.len() / 3).max(3).min(world.len());
    let mut early: Vec<RoomId> = world.room_ids()[..early_len]
        .iter()
        .filter(|id| *id != vault)
        .cloned()
        .collect();
    if early.is_empty() {
        early.push(world.start().clone());
    }

    let template = theme.key();
    let mut tags = Vec::new();
    for index in 1..=KEY_COUNT {
        let tag = KeyTag::new(theme.key_scheme(), index);
        let item = Item::new(format!("{} {index}", template.name))
            .with_tag(ItemTag::Key(tag.clone()))
            .with_tag(ItemTag::Plain("key".into()))
            .with_description(template.description);
        let room = &early[rng.random_range(0..early.len())];
        if let Some(r) = world.room_mut(room) {
            r.items.push(item);
        }
        debug!(key = %tag, room = %room, "key placed");
        tags.push(tag);
    }
    tags
}

/// Lock one random open passage per key.
///
/// A passage is skipped when locking it would leave fewer than
/// [`ARTIFACTS_REQUIRED`] non-vault rooms reachable from start, so the
/// artifacts never need a key.
fn lock_with_keys(world: &mut World, rng: &mut StdRng, keys: &[KeyTag], vault: &RoomId) {
    let start = world.start().clone();
    let mut open: Vec<PassageId> = world
        .passages()
        .iter()
        .filter(|p| !p.locked)
        .map(|p| p.id)
        .collect();
    open.shuffle(rng);
    let mut open = open.into_iter();
    for tag in keys {
        let pick = open.by_ref().find(|&pid| {
            world.set_locked(pid, true);
            let reached = world
                .reachable_from(&start, Traversal::RespectLocks)
                .iter()
                .filter(|id| *id != vault)
                .count();
            world.set_locked(pid, false);
            reached >= ARTIFACTS_REQUIRED
        });
        match pick {
            Some(pid) => {
                world.lock_passage(pid, Lock::Key(tag.clone()));
                debug!(key = %tag, passage = %pid, "passage locked");
            }
            None => warn!(key = %tag, "no passage can take this lock"),
        }
    }
}

fn place_artifacts(world: &mut World, rng: &mut StdRng, theme: Theme, vault: &RoomId) {
    let mut rooms: Vec<RoomId> = world
        .room_ids()
        .iter()
        .filter(|id| *id != vault)
        .cloned()
        .collect();
    rooms.shuffle(rng);
    for (spec, room) in theme.artifacts().iter().zip(&rooms) {
        if let Some(r) = world.room_mut(room) {
            r.items.push(
                Item::new(spec.name)
                    .with_tag(ItemTag::Artifact(spec.slug.to_string()))
                    .with_description(spec.description),
            );
        }
        debug!(artifact = spec.slug, room = %room, "artifact placed");
    }
}

/// Leave a note beside each key, pointing at a locked exit in that room if there is one.
fn place_notes(world: &mut World, theme: Theme, keys: &[KeyTag]) {
    let template = theme.note();
    for tag in keys {
        let Some(room) = world.find_item(|i| i.opens(tag)).cloned() else {
            continue;
        };
        let barred = world
            .exits(&room)
            .iter()
            .find(|e| e.is_locked())
            .map(|e| e.direction);
        let text = match barred {
            Some(dir) => format!(
                "{} Scrawled across it: \"The way {dir} is barred. The {} will not stay hidden for long.\"",
                template.description,
                theme.key().name
            ),
            None => format!(
                "{} Scrawled across it: \"Every door here answers to something. Keep what you find.\"",
                template.description
            ),
        };
        let note = Item::new(template.name)
            .with_tag(ItemTag::Note)
            .with_tag(ItemTag::Paper)
            .with_description(text)
            .with_weight(0);
        if let Some(r) = world.room_mut(&room) {
            r.items.push(note);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::config::GenConfig;
    use crate::context::Layout;
    use infoprox_core::Room;
    use rand::SeedableRng;

    fn place(seed: u64, rooms: usize, theme: Theme) -> (World, Layout) {
        let config = GenConfig::default()
            .with_seed(seed)
            .with_room_count(rooms)
            .with_theme(theme);
        let mut world = World::new(theme, seed);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut layout = Layout::default();
        let mut ctx = GenContext {
            world: &mut world,
            rng: &mut rng,
            layout: &mut layout,
            config: &config,
        };
        GraphBuilder.run(&mut ctx);
        Placement.run(&mut ctx);
        (world, layout)
    }

    #[test]
    fn exactly_one_vault_not_at_start() {
        for seed in 0..40 {
            let (world, layout) = place(seed, 10, Theme::Scifi);
            let vaults: Vec<_> = world.rooms().filter(|r| r.is_vault()).collect();
            assert_eq!(vaults.len(), 1, "seed {seed}");
            assert_ne!(&vaults[0].id, world.start());
            assert_eq!(layout.vault.as_ref(), Some(&vaults[0].id));
            assert!(!vaults[0].exits.is_empty());
        }
    }

    #[test]
    fn vault_holds_fixed_goal_fixture() {
        let (world, _) = place(5, 9, Theme::Horror);
        let vault = world.vault().unwrap();
        let fixture = vault
            .items
            .iter()
            .find(|i| i.name == Theme::Horror.goal_fixture().name)
            .unwrap();
        assert!(!fixture.portable);
    }

    #[test]
    fn one_goal_gate_out_of_vault() {
        for seed in 0..40 {
            let (world, layout) = place(seed, 12, Theme::Fantasy);
            let goals: Vec<_> = world.passages().iter().filter(|p| p.is_goal()).collect();
            assert_eq!(goals.len(), 1, "seed {seed}");
            assert!(goals[0].locked);
            assert!(goals[0].touches(&layout.vault.clone().unwrap()));
            assert_eq!(layout.goal, Some(goals[0].id));
        }
    }

    #[test]
    fn rooms_stay_connected_without_goal_gate() {
        for seed in 0..40 {
            let (world, layout) = place(seed, 8, Theme::Fantasy);
            let vault = layout.vault.unwrap();
            let reached =
                world.reachable_from(world.start(), Traversal::Avoiding(layout.goal.unwrap()));
            for id in world.room_ids() {
                assert!(*id == vault || reached.contains(id), "seed {seed}: {id}");
            }
        }
    }

    #[test]
    fn two_keys_and_two_key_locks() {
        for seed in 0..40 {
            let (world, layout) = place(seed, 11, Theme::Fantasy);
            assert_eq!(layout.keys.len(), 2);
            for tag in &layout.keys {
                let locks = world
                    .passages()
                    .iter()
                    .filter(|p| p.key_tag() == Some(tag) && p.locked)
                    .count();
                assert_eq!(locks, 1, "seed {seed}: {tag}");
                assert!(world.find_item(|i| i.opens(tag)).is_some());
            }
        }
    }

    #[test]
    fn keys_start_in_early_rooms() {
        let (world, layout) = place(21, 15, Theme::Scifi);
        let early = &world.room_ids()[..5];
        for tag in &layout.keys {
            let room = world.find_item(|i| i.opens(tag)).unwrap();
            assert!(early.contains(room));
        }
    }

    #[test]
    fn artifacts_in_distinct_non_vault_rooms() {
        for seed in 0..40 {
            let (world, _) = place(seed, 8, Theme::Horror);
            let rooms = world.rooms_with_item(|i| i.is_artifact());
            assert_eq!(rooms.len(), 3, "seed {seed}");
            let vault = &world.vault().unwrap().id;
            assert!(rooms.iter().all(|r| *r != vault));
        }
    }

    #[test]
    fn key_locks_leave_room_for_artifacts() {
        for seed in 0..60 {
            for rooms in [8, 11, 15] {
                let (world, layout) = place(seed, rooms, Theme::Scifi);
                let vault = layout.vault.unwrap();
                let open = world
                    .reachable_from(world.start(), Traversal::RespectLocks)
                    .into_iter()
                    .filter(|id| *id != vault)
                    .count();
                assert!(open >= ARTIFACTS_REQUIRED, "seed {seed}, {rooms} rooms: {open}");
            }
        }
    }

    #[test]
    fn a_note_sits_beside_each_key() {
        for seed in 0..40 {
            let (world, layout) = place(seed, 10, Theme::Fantasy);
            for tag in &layout.keys {
                let room_id = world.find_item(|i| i.opens(tag)).unwrap();
                let room = world.room(room_id).unwrap();
                let note = room.items.iter().find(|i| i.is_note()).unwrap();
                let barred = world
                    .exits(room_id)
                    .iter()
                    .find(|e| e.is_locked())
                    .map(|e| e.direction);
                if let Some(dir) = barred {
                    let hint = format!("The way {dir} is barred.");
                    assert!(
                        note.description.contains(&hint),
                        "seed {seed}: {}",
                        note.description
                    );
                }
            }
        }
    }

    #[test]
    fn note_names_the_barred_exit() {
        let theme = Theme::Fantasy;
        let mut world = World::new(theme, 1);
        for id in ["a", "b"] {
            let arch = theme.archetype("library").unwrap();
            world.add_room(Room::new(RoomId::new(id), theme, arch, "dim")).unwrap();
        }
        let tag = KeyTag::new("rune", 1);
        let pid = world
            .connect(&"a".into(), Direction::Down, &"b".into(), Direction::Up)
            .unwrap();
        world.lock_passage(pid, Lock::Key(tag.clone()));
        world
            .room_mut(&"a".into())
            .unwrap()
            .items
            .push(Item::new("rune key 1").with_tag(ItemTag::Key(tag.clone())));

        place_notes(&mut world, theme, &[tag]);
        let room = world.room(&"a".into()).unwrap();
        let note = room.items.iter().find(|i| i.is_note()).unwrap();
        assert!(note.description.contains("The way down is barred."));
    }
}
