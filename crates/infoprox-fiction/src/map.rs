//! ASCII map of the rooms the player has visited.
//!
//! Each room is a three-character cell. Connectors sit between cells:
//!
//! ```text
//!       ?
//!  [<]-[@]?
//! ```
//!
//! `-` and `|` are open ways, `#` is locked, and `?` is an exit whose far
//! side has not been mapped next to it. North is at the top.

use std::collections::{BTreeMap, BTreeSet};

use infoprox_core::{Direction, RoomId, World};

use crate::state::GameState;

/// Printed under every map.
pub const LEGEND: &str =
    "Legend: [@] you, [<] up, [>] down, [=] up and down, - | open, # locked, ? unexplored";

/// Cells of one level, keyed by `(x, y)`.
type Level<'a> = BTreeMap<(i32, i32), &'a RoomId>;

/// Render the current level, or every level when `all` is set.
///
/// Rooms appear only once the player has recorded a position for them.
pub fn render(state: &GameState, all: bool) -> String {
    let current_z = state.position().2;
    let levels: BTreeSet<i32> = if all {
        state.coords.values().map(|&(_, _, z)| z).collect()
    } else {
        BTreeSet::from([current_z])
    };

    let mut out = Vec::new();
    for z in levels.into_iter().rev() {
        out.push(format!("Level {z}:"));
        out.extend(render_level(state, &cells(state, z)));
    }
    out.push(LEGEND.to_string());
    out.join("\n")
}

/// Place rooms on the `z` level. On a collision the player's room wins,
/// otherwise the earlier room in generation order.
fn cells(state: &GameState, z: i32) -> Level<'_> {
    let mut level = Level::new();
    for id in state.world.room_ids() {
        let Some(&(x, y, rz)) = state.coords.get(id) else {
            continue;
        };
        if rz != z {
            continue;
        }
        if *id == state.room {
            level.insert((x, y), id);
        } else {
            level.entry((x, y)).or_insert(id);
        }
    }
    level
}

fn render_level(state: &GameState, level: &Level<'_>) -> Vec<String> {
    let Some((min_x, max_x, min_y, max_y)) = bounds(level) else {
        return Vec::new();
    };
    let world = &state.world;
    let at = |x: i32, y: i32| level.get(&(x, y)).copied();

    let mut lines = Vec::new();
    for y in (min_y..=max_y).rev() {
        lines.push(vertical_line(world, min_x, max_x, |x| (at(x, y + 1), at(x, y))));

        let mut row = String::new();
        for x in min_x..=max_x {
            row.push(connector(world, at(x - 1, y), Direction::East, at(x, y), '-'));
            row.push('[');
            row.push(at(x, y).map_or(' ', |id| glyph(state, id)));
            row.push(']');
        }
        row.push(connector(world, at(max_x, y), Direction::East, None, '-'));
        lines.push(row.trim_end().to_string());
    }
    lines.push(vertical_line(world, min_x, max_x, |x| (at(x, min_y), None)));

    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

/// The connector line between a row and the row below it.
fn vertical_line<'a>(
    world: &World,
    min_x: i32,
    max_x: i32,
    pair: impl Fn(i32) -> (Option<&'a RoomId>, Option<&'a RoomId>),
) -> String {
    let mut line = String::new();
    for x in min_x..=max_x {
        let (upper, lower) = pair(x);
        line.push_str("  ");
        line.push(connector(world, upper, Direction::South, lower, '|'));
        line.push(' ');
    }
    line.trim_end().to_string()
}

fn bounds(level: &Level<'_>) -> Option<(i32, i32, i32, i32)> {
    let xs = level.keys().map(|&(x, _)| x);
    let ys = level.keys().map(|&(_, y)| y);
    Some((xs.clone().min()?, xs.max()?, ys.clone().min()?, ys.max()?))
}

/// The glyph between cell `a` and the cell `b` lying `toward` from it.
fn connector(
    world: &World,
    a: Option<&RoomId>,
    toward: Direction,
    b: Option<&RoomId>,
    open: char,
) -> char {
    if let Some(exit) = a.and_then(|a| world.exit(a, toward)) {
        return if Some(exit.to) != b {
            '?'
        } else if exit.is_locked() {
            '#'
        } else {
            open
        };
    }
    match b.and_then(|b| world.exit(b, toward.opposite())) {
        Some(exit) if Some(exit.to) == a && exit.is_locked() => '#',
        Some(exit) if Some(exit.to) == a => open,
        Some(_) => '?',
        None => ' ',
    }
}

fn glyph(state: &GameState, id: &RoomId) -> char {
    if *id == state.room {
        return '@';
    }
    let up = state.world.exit(id, Direction::Up).is_some();
    let down = state.world.exit(id, Direction::Down).is_some();
    match (up, down) {
        (true, true) => '=',
        (true, false) => '<',
        (false, true) => '>',
        (false, false) => '.',
    }
}
