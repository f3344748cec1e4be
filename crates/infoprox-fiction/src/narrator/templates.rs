//! Text templates for rooms, help, and banners.

use infoprox_core::{Room, World};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Join words as `a`, `a and b`, or `a, b and c`.
pub fn and_join<S: AsRef<str>>(words: &[S]) -> String {
    match words {
        [] => String::new(),
        [one] => one.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{} and {}", head.join(", "), last.as_ref())
        }
    }
}

/// Stable 64-bit FNV-1a hash, used to seed per-room flavor.
fn fnv1a(text: &str) -> u64 {
    text.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

/// The room's flavor line. Always the same line for the same room ID.
pub fn flavor_line(room: &Room) -> Option<&'static str> {
    let lines = room.archetype.flavor;
    if lines.is_empty() {
        return None;
    }
    let mut rng = StdRng::seed_from_u64(fnv1a(room.id.as_str()));
    Some(lines[rng.random_range(0..lines.len())])
}

/// Full description of `room`. `seen` selects "You are in" over "You arrive in".
pub fn room_text(world: &World, room: &Room, seen: bool) -> String {
    let verb = if seen { "are" } else { "arrive" };
    let mut first = format!("You {verb} in {}.", room.name);
    let base = room.description.trim_end_matches('.');
    if !base.is_empty() && !first.to_lowercase().contains(&base.to_lowercase()) {
        first = format!("{first} {base}.");
    }

    let mut parts = vec![first];
    if let Some(line) = flavor_line(room) {
        parts.push(line.to_string());
    }

    if !room.items.is_empty() {
        let names: Vec<&str> = room.items.iter().map(|i| i.name.as_str()).collect();
        parts.push(format!("You see {}.", and_join(&names)));
    }

    let exits = world.exits(&room.id);
    let dirs: Vec<&str> = exits.iter().map(|e| e.direction.name()).collect();
    if dirs.is_empty() {
        parts.push("Exits lead nowhere.".to_string());
    } else {
        parts.push(format!("Exits lead {}.", and_join(&dirs)));
    }

    let locked: Vec<&str> = exits
        .iter()
        .filter(|e| e.is_locked() && !e.is_goal())
        .map(|e| e.direction.name())
        .collect();
    match locked.as_slice() {
        [] => {}
        [one] => parts.push(format!("The way {one} is locked.")),
        many => parts.push(format!("The ways {} are locked.", and_join(many))),
    }
    for exit in exits.iter().filter(|e| e.is_locked() && e.is_goal()) {
        parts.push(format!("The way {} is sealed.", exit.direction));
    }

    if let Some(note) = room.items.iter().find(|i| i.is_note()) {
        parts.push(format!("Something is written on the {}.", note.name));
    }

    parts.join(" ")
}

/// Opening line of a session.
pub fn banner(world: &World, loaded: bool) -> String {
    let state = if loaded { "Loaded game." } else { "New game." };
    format!(
        "INFOPROX: {state} A {} world of {} rooms, seed {}. Type 'help' for commands.",
        world.theme,
        world.len(),
        world.seed
    )
}

/// Help text, optionally for a single topic.
pub fn help_text(topic: Option<&str>) -> String {
    let Some(topic) = topic else {
        return "Commands:\n  \
            look (l), examine <item> (x), read <item>\n  \
            go <dir>, n/s/e/w/u/d\n  \
            take <item>, drop <item>, inventory (i)\n  \
            use <item> [on <dir>], unlock, open\n  \
            map [all], score, save [file], load [file], quit\n\
            Type 'help <topic>' for movement, items, keys, map, or saving."
            .to_string();
    };
    match topic {
        "movement" | "go" | "move" => "Movement: go <direction>, or just n, s, e, w, u, d. \
            Locked ways need a key; the vault gate needs all three artifacts."
            .to_string(),
        "items" | "take" | "inventory" => "Items: take <item> picks something up (+1 point). \
            drop <item> puts it down. examine and read look closer. inventory lists what you carry."
            .to_string(),
        "keys" | "use" | "unlock" => "Keys: use <key> [on <direction>] unlocks a matching door (+5). \
            With no key named, every key you carry is tried. \
            The vault gate opens when you hold three artifacts (+10)."
            .to_string(),
        "map" => "Map: [@] you, [<] up, [>] down, [=] both, - and | open ways, \
            # locked, ? unexplored. 'map all' draws every level."
            .to_string(),
        "saving" | "save" | "load" => "Saving: save [file] writes the game (default save.json). \
            load [file] restores it."
            .to_string(),
        other => format!("No help available for '{other}'."),
    }
}
