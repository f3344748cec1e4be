//! Graph builder: rooms, spine, extra edges, and connectivity stitching.

use infoprox_core::{Direction, PassageId, Room, RoomId, Traversal, World};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::config::{MAX_ROOMS, MIN_ROOMS};
use crate::context::GenContext;
use crate::pass::GenPass;

/// Creates rooms and wires them into a single connected graph.
#[derive(Debug, Default)]
pub struct GraphBuilder;

impl GenPass for GraphBuilder {
    fn name(&self) -> &str {
        "graph"
    }

    fn run(&mut self, ctx: &mut GenContext<'_>) {
        let n = ctx.config.room_count.clamp(MIN_ROOMS, MAX_ROOMS);
        let theme = ctx.config.theme;
        let archetypes = theme.archetypes();

        let mut ids: Vec<RoomId> = (0..n).map(|i| RoomId::new(format!("r{i}"))).collect();
        ids.shuffle(&mut *ctx.rng);

        for id in &ids {
            let arch = &archetypes[ctx.rng.random_range(0..archetypes.len())];
            let adj = arch.adjectives[ctx.rng.random_range(0..arch.adjectives.len())];
            if let Err(e) = ctx.world.add_room(Room::new(id.clone(), theme, arch, adj)) {
                warn!(room = %id, error = %e, "skipping room");
            }
        }

        // Spine: generation order, horizontal only
        for pair in ids.windows(2) {
            connect_rooms(
                ctx.world,
                ctx.rng,
                &pair[0],
                &pair[1],
                &Direction::HORIZONTAL,
            );
        }

        let extra = (n / 3).max(1);
        for _ in 0..extra {
            let (a, b) = random_pair(ctx.rng, &ids);
            if adjacent(ctx.world, &a, &b) {
                continue;
            }
            connect_rooms(ctx.world, ctx.rng, &a, &b, &Direction::HORIZONTAL);
        }

        let vertical = ctx.rng.random_range(0..=2);
        for _ in 0..vertical {
            let (a, b) = random_pair(ctx.rng, &ids);
            let dir = if ctx.rng.random_bool(0.5) {
                Direction::Up
            } else {
                Direction::Down
            };
            let blocked = ctx.world.room(&a).is_none_or(|r| r.has_exit(dir))
                || ctx
                    .world
                    .room(&b)
                    .is_none_or(|r| r.has_exit(dir.opposite()));
            if blocked || adjacent(ctx.world, &a, &b) {
                debug!(from = %a, to = %b, "vertical edge skipped");
                continue;
            }
            connect_rooms(ctx.world, ctx.rng, &a, &b, &[dir]);
        }

        let start = ctx.world.start().clone();
        let stitched = stitch(ctx.world, ctx.rng, &start, None);
        debug!(
            rooms = n,
            passages = ctx.world.passages().len(),
            stitched,
            "graph built"
        );
    }
}

/// Connect `a` to `b`, choosing a free direction on `a` from `candidates`.
///
/// The far side takes the geometric opposite if free, else a free candidate,
/// else any free direction. Returns `None` (and adds nothing) when either
/// side has no usable direction.
pub(crate) fn connect_rooms(
    world: &mut World,
    rng: &mut StdRng,
    a: &RoomId,
    b: &RoomId,
    candidates: &[Direction],
) -> Option<PassageId> {
    let free_a = world.room(a)?.free_directions(candidates);
    if free_a.is_empty() {
        debug!(from = %a, to = %b, "no free direction, edge skipped");
        return None;
    }
    let da = free_a[rng.random_range(0..free_a.len())];

    let room_b = world.room(b)?;
    let db = if !room_b.has_exit(da.opposite()) {
        da.opposite()
    } else {
        let mut free_b = room_b.free_directions(candidates);
        if free_b.is_empty() {
            free_b = room_b.free_directions(&Direction::ALL);
        }
        if free_b.is_empty() {
            debug!(from = %a, to = %b, "far side full, edge skipped");
            return None;
        }
        free_b[rng.random_range(0..free_b.len())]
    };

    world.connect(a, da, b, db).ok()
}

/// Join every room unreachable from `start` (ignoring locks, and never
/// crossing `avoid`) to the reachable part. Returns how many passages were added.
pub(crate) fn stitch(
    world: &mut World,
    rng: &mut StdRng,
    start: &RoomId,
    avoid: Option<PassageId>,
) -> usize {
    let mut added = 0;
    loop {
        let traversal = match avoid {
            Some(pid) => Traversal::Avoiding(pid),
            None => Traversal::IgnoreLocks,
        };
        let reached = world.reachable_from(start, traversal);
        let outside: Vec<RoomId> = world
            .room_ids()
            .iter()
            .filter(|id| !reached.contains(*id))
            .cloned()
            .collect();
        if outside.is_empty() {
            return added;
        }

        let joined = outside.iter().any(|x| {
            reached
                .iter()
                .any(|c| connect_rooms(world, rng, x, c, &Direction::ALL).is_some())
        });
        if !joined {
            warn!(rooms = outside.len(), "could not connect isolated rooms");
            return added;
        }
        added += 1;
    }
}

fn random_pair(rng: &mut StdRng, ids: &[RoomId]) -> (RoomId, RoomId) {
    let i = rng.random_range(0..ids.len());
    let mut j = rng.random_range(0..ids.len() - 1);
    if j >= i {
        j += 1;
    }
    (ids[i].clone(), ids[j].clone())
}

fn adjacent(world: &World, a: &RoomId, b: &RoomId) -> bool {
    world.exits(a).iter().any(|e| e.to == b)
}
