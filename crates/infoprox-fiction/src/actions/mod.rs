//! Action resolver: one function per verb.
//!
//! Every action takes the game state, may mutate it, and returns the text to
//! show the player. Invalid actions are answered, never raised.

mod unlock;

use infoprox_core::{Direction, Item};
use tracing::debug;

use crate::narrator::{and_join, room_text};
use crate::parser::{find_item, suggest_item};
use crate::state::GameState;

pub use unlock::use_item;

const NOWHERE: &str = "You are nowhere at all.";

/// Describe the current room and mark it seen.
pub fn look(state: &mut GameState) -> String {
    let Some(room) = state.current_mut() else {
        return NOWHERE.to_string();
    };
    let seen = room.seen;
    room.seen = true;
    match state.current() {
        Some(room) => room_text(&state.world, room, seen),
        None => NOWHERE.to_string(),
    }
}

/// Move through the exit in `direction`.
pub fn go(state: &mut GameState, direction: Option<Direction>) -> String {
    let Some(direction) = direction else {
        return "You can't go that way.".to_string();
    };
    let Some(exit) = state.world.exit(&state.room, direction) else {
        return "You can't go that way.".to_string();
    };
    if exit.is_locked() {
        return "It's locked.".to_string();
    }
    let to = exit.to.clone();

    if !state.coords.contains_key(&to) {
        let (x, y, z) = state.position();
        let (dx, dy, dz) = direction.delta();
        state.coords.insert(to.clone(), (x + dx, y + dy, z + dz));
    }
    debug!(from = %state.room, to = %to, %direction, "moved");
    state.room = to;
    look(state)
}

/// Pick up an item from the room.
pub fn take(state: &mut GameState, query: &str) -> String {
    if query.trim().is_empty() {
        return "Take what?".to_string();
    }
    let Some(room) = state.current_mut() else {
        return NOWHERE.to_string();
    };
    let Some(index) = find_item(&room.items, query) else {
        return not_here(&room.items, query);
    };
    if !room.items[index].portable {
        return "You can't take that.".to_string();
    }
    let item = room.items.remove(index);
    state.inventory.push(item);
    state.score += 1;
    "Taken.".to_string()
}

/// Put a carried item down in the room.
pub fn drop(state: &mut GameState, query: &str) -> String {
    if query.trim().is_empty() {
        return "Drop what?".to_string();
    }
    let Some(index) = find_item(&state.inventory, query) else {
        return "You don't have that.".to_string();
    };
    let item = state.inventory.remove(index);
    match state.current_mut() {
        Some(room) => {
            room.items.push(item);
            "Dropped.".to_string()
        }
        None => {
            state.inventory.insert(index, item);
            NOWHERE.to_string()
        }
    }
}

/// List carried items.
pub fn inventory(state: &GameState) -> String {
    if state.inventory.is_empty() {
        return "You are carrying nothing.".to_string();
    }
    let names: Vec<&str> = state.inventory.iter().map(|i| i.name.as_str()).collect();
    format!("You are carrying: {}.", names.join(", "))
}

/// Describe an item, carried first, then in the room.
pub fn examine(state: &GameState, query: &str) -> String {
    if query.trim().is_empty() {
        return "Examine what?".to_string();
    }
    let Some(item) = locate(state, query) else {
        return not_here(room_items(state), query);
    };
    if item.description.is_empty() {
        format!("You see nothing special about the {}.", item.name)
    } else {
        item.description.clone()
    }
}

/// Read a note, paper, or book.
pub fn read(state: &GameState, query: &str) -> String {
    if query.trim().is_empty() {
        return "Read what?".to_string();
    }
    let Some(item) = locate(state, query) else {
        return not_here(room_items(state), query);
    };
    if !item.is_readable() {
        return format!("There's nothing written on the {}.", item.name);
    }
    if item.description.is_empty() {
        "It's blank.".to_string()
    } else {
        item.description.clone()
    }
}

/// Report score, turns, and artifacts carried.
pub fn score(state: &GameState) -> String {
    let mut text = format!("Score: {} Turns: {}", state.score, state.turns);
    let artifacts: Vec<&str> = state
        .inventory
        .iter()
        .filter(|i| i.is_artifact())
        .map(|i| i.name.as_str())
        .collect();
    if !artifacts.is_empty() {
        text.push_str(&format!("\nArtifacts: {}.", and_join(&artifacts)));
    }
    text
}

fn room_items(state: &GameState) -> &[Item] {
    state.current().map(|r| r.items.as_slice()).unwrap_or(&[])
}

fn locate<'a>(state: &'a GameState, query: &str) -> Option<&'a Item> {
    if let Some(index) = find_item(&state.inventory, query) {
        return Some(&state.inventory[index]);
    }
    let items = room_items(state);
    find_item(items, query).map(|index| &items[index])
}

fn not_here(items: &[Item], query: &str) -> String {
    match suggest_item(items, query) {
        Some(name) => format!("You don't see that here. Did you mean the {name}?"),
        None => "You don't see that here.".to_string(),
    }
}
