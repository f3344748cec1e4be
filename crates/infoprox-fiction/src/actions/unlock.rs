//! The `use` verb: keys, doors, and the goal gate.

use std::collections::BTreeSet;

use infoprox_core::{Direction, KeyTag, PassageId};
use infoprox_worldgen::ARTIFACTS_REQUIRED;
use tracing::info;

use crate::narrator::and_join;
use crate::parser::find_item;
use crate::state::GameState;

/// Points for opening a keyed door, once per successful use.
const KEY_POINTS: u32 = 5;
/// Points for opening the goal gate.
const GOAL_POINTS: u32 = 10;

/// Use an item, optionally aimed at a direction.
///
/// An explicit `target` is read as a direction; failing that, direction
/// words inside `item` are taken as the target and dropped from the item
/// query. The goal gate is checked first whenever it is the aim (or nothing
/// is aimed at). Then the named key is tried. If the name matches no carried
/// key, every carried key is tried.
pub fn use_item(state: &mut GameState, item: &str, target: &str) -> String {
    let (query, aim) = split_aim(item, target);

    if let Some(reply) = try_goal(state, aim) {
        return reply;
    }

    let locked: Vec<(Direction, PassageId, KeyTag)> = state
        .world
        .exits(&state.room)
        .iter()
        .filter(|e| e.is_locked() && aim.is_none_or(|d| d == e.direction))
        .filter_map(|e| e.key_tag().map(|k| (e.direction, e.passage.id, k.clone())))
        .collect();

    let named: Option<BTreeSet<KeyTag>> = if query.is_empty() {
        None
    } else {
        find_item(&state.inventory, &query)
            .map(|index| state.inventory[index].key_tags().cloned().collect::<BTreeSet<_>>())
            .filter(|tags| !tags.is_empty())
    };
    let keys = named.unwrap_or_else(|| state.key_tags());

    let mut opened = Vec::new();
    for (direction, pid, tag) in &locked {
        if keys.contains(tag) && state.world.set_locked(*pid, false) {
            opened.push(direction.name());
        }
    }
    if !opened.is_empty() {
        state.score += KEY_POINTS;
        info!(room = %state.room, doors = opened.len(), "unlocked");
        return format!("You unlock the way {}.", and_join(&opened));
    }

    if state
        .world
        .exits(&state.room)
        .iter()
        .any(|e| e.is_locked() && aim.is_none_or(|d| d == e.direction))
    {
        "No matching locks here.".to_string()
    } else {
        "Nothing happens.".to_string()
    }
}

/// Split `use` arguments into an item query and an aimed direction.
fn split_aim(item: &str, target: &str) -> (String, Option<Direction>) {
    let target_dir = target
        .split_whitespace()
        .find_map(Direction::parse)
        .or_else(|| Direction::parse(target));
    if target_dir.is_some() {
        return (item.trim().to_string(), target_dir);
    }

    let mut aim = None;
    let mut words = Vec::new();
    for word in item.split_whitespace() {
        match Direction::parse_word(word) {
            Some(d) if aim.is_none() => aim = Some(d),
            _ => words.push(word),
        }
    }
    (words.join(" "), aim)
}

/// Goal gate handling. Returns `None` when the gate is not in play here.
fn try_goal(state: &mut GameState, aim: Option<Direction>) -> Option<String> {
    let (direction, pid) = state
        .world
        .exits(&state.room)
        .iter()
        .find(|e| e.is_goal() && e.is_locked() && aim.is_none_or(|d| d == e.direction))
        .map(|e| (e.direction, e.passage.id))?;

    let held = state.artifact_count();
    if held < ARTIFACTS_REQUIRED {
        return Some(format!(
            "The way {direction} is sealed. It wants {ARTIFACTS_REQUIRED} artifacts; you carry {held}."
        ));
    }

    state.world.set_locked(pid, false);
    state.score += GOAL_POINTS;
    state.won = true;
    info!(room = %state.room, %direction, "goal gate opened");
    Some(format!(
        "The artifacts blaze in your hands and the seal gives way. \
         You unlock the way {direction}. You have won!"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{go, take};
    use crate::fixtures::{artifact, fixture_state, rune_key};
    use infoprox_core::{Item, ItemTag, RoomId};

    fn in_library() -> GameState {
        let mut state = fixture_state();
        go(&mut state, Some(Direction::East));
        state
    }

    fn workshop_door_locked(state: &GameState) -> bool {
        state
            .world
            .exit(&RoomId::new("library"), Direction::East)
            .unwrap()
            .is_locked()
    }

    #[test]
    fn named_key_on_direction_unlocks_both_sides() {
        let mut state = in_library();
        state.inventory.push(rune_key(1));
        let reply = use_item(&mut state, "rune key", "east");
        assert_eq!(reply, "You unlock the way east.");
        assert_eq!(state.score, KEY_POINTS);
        assert!(!workshop_door_locked(&state));
        let mirror = state
            .world
            .exit(&RoomId::new("workshop"), Direction::West)
            .unwrap();
        assert!(!mirror.is_locked());
    }

    #[test]
    fn second_use_does_nothing() {
        let mut state = in_library();
        state.inventory.push(rune_key(1));
        use_item(&mut state, "rune key", "east");
        assert_eq!(use_item(&mut state, "rune key", "east"), "Nothing happens.");
        assert_eq!(state.score, KEY_POINTS);
    }

    #[test]
    fn bare_use_tries_every_key() {
        let mut state = in_library();
        state.inventory.push(rune_key(2));
        state.inventory.push(rune_key(1));
        assert_eq!(use_item(&mut state, "", "east"), "You unlock the way east.");
        assert!(!workshop_door_locked(&state));
    }

    #[test]
    fn unknown_item_falls_back_to_carried_keys() {
        let mut state = in_library();
        state.inventory.push(rune_key(1));
        assert_eq!(use_item(&mut state, "banana", "east"), "You unlock the way east.");
    }

    #[test]
    fn named_non_key_falls_back_to_carried_keys() {
        let mut state = in_library();
        state.inventory.push(rune_key(1));
        state
            .inventory
            .push(Item::new("vellum scrap").with_tag(ItemTag::Note));
        assert_eq!(
            use_item(&mut state, "vellum scrap", "east"),
            "You unlock the way east."
        );
        assert!(!workshop_door_locked(&state));
        assert_eq!(state.score, KEY_POINTS);
    }

    #[test]
    fn wrong_named_key_does_not_fall_back() {
        let mut state = in_library();
        state.inventory.push(rune_key(2));
        state.inventory.push(rune_key(1));
        assert_eq!(
            use_item(&mut state, "rune key 2", "east"),
            "No matching locks here."
        );
        assert!(workshop_door_locked(&state));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn direction_inside_item_text_is_the_aim() {
        let mut state = in_library();
        state.inventory.push(rune_key(1));
        assert_eq!(use_item(&mut state, "rune key east", ""), "You unlock the way east.");
    }

    #[test]
    fn goal_gate_needs_three_artifacts() {
        let mut state = in_library();
        take(&mut state, "sunstone");
        let reply = use_item(&mut state, "", "");
        assert_eq!(reply, "The way north is sealed. It wants 3 artifacts; you carry 1.");
        assert!(!state.won);
        assert!(
            state
                .world
                .exit(&RoomId::new("library"), Direction::North)
                .unwrap()
                .is_locked()
        );
    }

    #[test]
    fn goal_gate_opens_once_with_three_artifacts() {
        let mut state = in_library();
        state.inventory.push(artifact("sunstone", "sunstone"));
        state.inventory.push(artifact("chalice", "moonsilver_chalice"));
        state.inventory.push(artifact("crown", "starlit_crown"));
        let reply = use_item(&mut state, "", "north");
        assert!(reply.ends_with("You unlock the way north. You have won!"));
        assert!(state.won);
        assert_eq!(state.score, GOAL_POINTS);
        assert!(
            !state
                .world
                .exit(&RoomId::new("vault"), Direction::South)
                .unwrap()
                .is_locked()
        );
        assert_eq!(use_item(&mut state, "", "north"), "Nothing happens.");
        assert_eq!(state.score, GOAL_POINTS);
    }

    #[test]
    fn unaimed_use_meets_goal_gate_first() {
        let mut state = in_library();
        state.inventory.push(rune_key(1));
        let reply = use_item(&mut state, "rune key", "");
        assert!(reply.starts_with("The way north is sealed."));
        assert!(workshop_door_locked(&state));
        assert_eq!(state.score, 0);
    }

    #[test]
    fn nothing_locked_nothing_happens() {
        let mut state = fixture_state();
        state.inventory.push(rune_key(1));
        assert_eq!(use_item(&mut state, "rune key", ""), "Nothing happens.");
    }
}
