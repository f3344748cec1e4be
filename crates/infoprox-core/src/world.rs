use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};
use crate::item::Item;
use crate::passage::{Exit, Passage, PassageEnd, PassageId};
use crate::room::{Room, RoomId};
use crate::tag::{KeyTag, Lock};
use crate::theme::Theme;

/// Which passages a reachability search may cross.
#[derive(Debug, Clone, Copy)]
pub enum Traversal<'a> {
    /// Locked passages are walls, goal gate included.
    RespectLocks,
    /// Every passage is open.
    IgnoreLocks,
    /// Every passage is open except this one.
    Avoiding(PassageId),
    /// Locked passages open if one of these keys fits. The goal gate stays shut.
    WithKeys(&'a BTreeSet<KeyTag>),
}

impl Traversal<'_> {
    fn allows(&self, passage: &Passage) -> bool {
        match self {
            Self::RespectLocks => !passage.locked,
            Self::IgnoreLocks => true,
            Self::Avoiding(id) => passage.id != *id,
            Self::WithKeys(keys) => {
                !passage.locked || passage.key_tag().is_some_and(|k| keys.contains(k))
            }
        }
    }
}

/// The central world model. Owns all rooms and passages.
///
/// The shape (rooms, passages) is fixed once generation finishes; play only
/// mutates room items, seen flags, and passage lock state.
#[derive(Debug, Clone)]
pub struct World {
    /// Seed the world was generated from. Regenerating with it reproduces the world.
    pub seed: u64,
    /// Fresh seed drawn from the generator after building, for debugging.
    pub derived_seed: u64,
    /// The world's theme.
    pub theme: Theme,
    start: RoomId,
    rooms: HashMap<RoomId, Room>,
    order: Vec<RoomId>,
    passages: Vec<Passage>,
}

impl World {
    /// Create an empty world.
    pub fn new(theme: Theme, seed: u64) -> Self {
        Self {
            seed,
            derived_seed: seed,
            theme,
            start: RoomId::new(""),
            rooms: HashMap::new(),
            order: Vec::new(),
            passages: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Rooms
    // -----------------------------------------------------------------------

    /// Add a room. The first room added becomes the start room.
    pub fn add_room(&mut self, room: Room) -> CoreResult<()> {
        if self.rooms.contains_key(&room.id) {
            return Err(CoreError::DuplicateRoom(room.id.clone()));
        }
        if self.order.is_empty() {
            self.start = room.id.clone();
        }
        self.order.push(room.id.clone());
        self.rooms.insert(room.id.clone(), room);
        Ok(())
    }

    /// Replace the start room.
    pub fn set_start(&mut self, id: &RoomId) -> CoreResult<()> {
        if !self.rooms.contains_key(id) {
            return Err(CoreError::RoomNotFound(id.clone()));
        }
        self.start = id.clone();
        Ok(())
    }

    /// The room the player begins in.
    pub fn start(&self) -> &RoomId {
        &self.start
    }

    /// Get a room by ID.
    pub fn room(&self, id: &RoomId) -> Option<&Room> {
        self.rooms.get(id)
    }

    /// Get a mutable room by ID.
    pub fn room_mut(&mut self, id: &RoomId) -> Option<&mut Room> {
        self.rooms.get_mut(id)
    }

    /// Room IDs in generation order.
    pub fn room_ids(&self) -> &[RoomId] {
        &self.order
    }

    /// Rooms in generation order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.order.iter().filter_map(|id| self.rooms.get(id))
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the world has no rooms.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The goal room, if one has been chosen.
    pub fn vault(&self) -> Option<&Room> {
        self.rooms().find(|r| r.is_vault())
    }

    // -----------------------------------------------------------------------
    // Passages
    // -----------------------------------------------------------------------

    /// Connect `a` (leaving by `da`) to `b` (leaving by `db`).
    ///
    /// Fails if either room already uses the requested direction; nothing is
    /// overwritten.
    pub fn connect(
        &mut self,
        a: &RoomId,
        da: Direction,
        b: &RoomId,
        db: Direction,
    ) -> CoreResult<PassageId> {
        if a == b {
            return Err(CoreError::SelfLoop(a.clone()));
        }
        for (id, dir) in [(a, da), (b, db)] {
            let room = self
                .rooms
                .get(id)
                .ok_or_else(|| CoreError::RoomNotFound(id.clone()))?;
            if room.has_exit(dir) {
                return Err(CoreError::DirectionTaken {
                    room: id.clone(),
                    direction: dir,
                });
            }
        }

        let pid = PassageId(self.passages.len());
        self.passages.push(Passage::new(
            pid,
            PassageEnd {
                room: a.clone(),
                direction: da,
            },
            PassageEnd {
                room: b.clone(),
                direction: db,
            },
        ));
        for (id, dir) in [(a, da), (b, db)] {
            if let Some(room) = self.rooms.get_mut(id) {
                room.exits.insert(dir, pid);
            }
        }
        Ok(pid)
    }

    /// Get a passage by ID.
    pub fn passage(&self, id: PassageId) -> Option<&Passage> {
        self.passages.get(id.0)
    }

    /// All passages in creation order.
    pub fn passages(&self) -> &[Passage] {
        &self.passages
    }

    /// Lock a passage. Both of its exits become locked.
    pub fn lock_passage(&mut self, id: PassageId, lock: Lock) {
        if let Some(p) = self.passages.get_mut(id.0) {
            p.locked = true;
            p.lock = Some(lock);
        }
    }

    /// Set a passage's lock flag. Returns true if the flag changed.
    pub fn set_locked(&mut self, id: PassageId, locked: bool) -> bool {
        match self.passages.get_mut(id.0) {
            Some(p) if p.locked != locked => {
                p.locked = locked;
                true
            }
            _ => false,
        }
    }

    // -----------------------------------------------------------------------
    // Exits
    // -----------------------------------------------------------------------

    /// The exit leaving `room` by `direction`.
    pub fn exit(&self, room: &RoomId, direction: Direction) -> Option<Exit<'_>> {
        let pid = *self.rooms.get(room)?.exits.get(&direction)?;
        let passage = self.passage(pid)?;
        let far = passage.other_end(room, direction)?;
        Some(Exit {
            direction,
            to: &far.room,
            passage,
        })
    }

    /// Every exit of `room`, in canonical direction order.
    pub fn exits(&self, room: &RoomId) -> Vec<Exit<'_>> {
        let Some(r) = self.rooms.get(room) else {
            return Vec::new();
        };
        r.exits
            .keys()
            .filter_map(|dir| self.exit(room, *dir))
            .collect()
    }

    /// The far side of the exit leaving `room` by `direction`.
    pub fn mirror(&self, room: &RoomId, direction: Direction) -> Option<&PassageEnd> {
        let pid = *self.rooms.get(room)?.exits.get(&direction)?;
        self.passage(pid)?.other_end(room, direction)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Rooms reachable from `from` by breadth-first search under `traversal`.
    pub fn reachable_from(&self, from: &RoomId, traversal: Traversal<'_>) -> BTreeSet<RoomId> {
        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        if !self.rooms.contains_key(from) {
            return visited;
        }

        visited.insert(from.clone());
        queue.push_back(from.clone());

        while let Some(current) = queue.pop_front() {
            for exit in self.exits(&current) {
                if traversal.allows(exit.passage) && !visited.contains(exit.to) {
                    visited.insert(exit.to.clone());
                    queue.push_back(exit.to.clone());
                }
            }
        }

        visited
    }

    /// The first room, in generation order, holding an item that matches `pred`.
    pub fn find_item(&self, pred: impl Fn(&Item) -> bool) -> Option<&RoomId> {
        self.rooms()
            .find(|r| r.items.iter().any(&pred))
            .map(|r| &r.id)
    }

    /// Every room, in generation order, holding an item that matches `pred`.
    pub fn rooms_with_item(&self, pred: impl Fn(&Item) -> bool) -> Vec<&RoomId> {
        self.rooms()
            .filter(|r| r.items.iter().any(&pred))
            .map(|r| &r.id)
            .collect()
    }
}
