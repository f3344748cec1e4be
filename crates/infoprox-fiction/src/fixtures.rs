//! A small hand-built world shared by the unit tests.

use infoprox_core::{Direction, Item, ItemTag, KeyTag, Lock, Room, RoomId, Theme, World};

use crate::state::GameState;

fn room(id: &str, arch: &str, adjective: &'static str) -> Room {
    let theme = Theme::Fantasy;
    let archetype = theme.archetype(arch).unwrap();
    Room::new(RoomId::new(id), theme, archetype, adjective)
}

fn put(world: &mut World, room: &str, item: Item) {
    world.room_mut(&room.into()).unwrap().items.push(item);
}

pub(crate) fn artifact(name: &str, slug: &str) -> Item {
    Item::new(name).with_tag(ItemTag::Artifact(slug.into()))
}

pub(crate) fn rune_key(n: u32) -> Item {
    Item::new(format!("rune key {n}"))
        .with_tag(ItemTag::Key(KeyTag::new("rune", n)))
        .with_tag(ItemTag::Plain("key".into()))
        .with_description("A slim key etched with a single rune.")
}

/// ```text
///        vault
///          | (goal)
///  hall - library = workshop      (= locked with key:rune1)
///   ^
///  observatory (up from hall)
/// ```
pub(crate) fn fixture_world() -> World {
    let mut world = World::new(Theme::Fantasy, 42);
    world.add_room(room("hall", "great_hall", "vaulted")).unwrap();
    world.add_room(room("library", "library", "musty")).unwrap();
    world.add_room(room("vault", "vault", "sealed")).unwrap();
    world.add_room(room("workshop", "workshop", "cluttered")).unwrap();
    world.add_room(room("observatory", "observatory", "domed")).unwrap();

    let link = |world: &mut World, a: &str, da: Direction, b: &str, db: Direction| {
        world.connect(&a.into(), da, &b.into(), db).unwrap()
    };
    link(&mut world, "hall", Direction::East, "library", Direction::West);
    let goal = link(&mut world, "library", Direction::North, "vault", Direction::South);
    let keyed = link(&mut world, "library", Direction::East, "workshop", Direction::West);
    link(&mut world, "hall", Direction::Up, "observatory", Direction::Down);
    world.lock_passage(goal, Lock::Goal);
    world.lock_passage(keyed, Lock::Key(KeyTag::new("rune", 1)));

    put(&mut world, "hall", rune_key(1));
    put(
        &mut world,
        "hall",
        Item::new("vellum scrap")
            .with_tag(ItemTag::Note)
            .with_tag(ItemTag::Paper)
            .with_description("The way east is barred."),
    );
    put(
        &mut world,
        "hall",
        Item::new("iron brazier")
            .with_description("Coals glow within.")
            .fixed(),
    );
    put(&mut world, "library", artifact("sunstone", "sunstone"));
    put(
        &mut world,
        "workshop",
        artifact("moonsilver chalice", "moonsilver_chalice"),
    );
    put(&mut world, "observatory", artifact("starlit crown", "starlit_crown"));
    put(&mut world, "vault", Item::new("warded seal").fixed());
    world
}

pub(crate) fn fixture_state() -> GameState {
    GameState::new(fixture_world())
}
