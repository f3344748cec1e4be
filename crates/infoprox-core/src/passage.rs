use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::room::RoomId;
use crate::tag::{KeyTag, Lock};

/// Index of a passage within its world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PassageId(pub usize);

impl fmt::Display for PassageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// One side of a passage: the room and the direction it leaves by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassageEnd {
    /// The room on this side.
    pub room: RoomId,
    /// The exit direction from that room.
    pub direction: Direction,
}

/// An undirected connection between two rooms.
///
/// Both exits of a doorway share this record, so there is exactly one lock
/// flag per connection.
#[derive(Debug, Clone)]
pub struct Passage {
    /// Handle into the world's passage list.
    pub id: PassageId,
    ends: [PassageEnd; 2],
    /// Whether the passage is currently barred.
    pub locked: bool,
    /// What opens it. Kept after unlocking so the world remembers its doors.
    pub lock: Option<Lock>,
    /// Optional text shown for the doorway.
    pub description: Option<String>,
}

impl Passage {
    /// Create an open passage.
    pub fn new(id: PassageId, a: PassageEnd, b: PassageEnd) -> Self {
        Self {
            id,
            ends: [a, b],
            locked: false,
            lock: None,
            description: None,
        }
    }

    /// Both ends.
    pub fn ends(&self) -> &[PassageEnd; 2] {
        &self.ends
    }

    /// Returns true if the passage touches `room`.
    pub fn touches(&self, room: &RoomId) -> bool {
        self.ends.iter().any(|e| &e.room == room)
    }

    /// The end leaving `room` by `direction`.
    pub fn end_at(&self, room: &RoomId, direction: Direction) -> Option<&PassageEnd> {
        self.ends
            .iter()
            .find(|e| &e.room == room && e.direction == direction)
    }

    /// The opposite end to the one leaving `room` by `direction`.
    pub fn other_end(&self, room: &RoomId, direction: Direction) -> Option<&PassageEnd> {
        let [a, b] = &self.ends;
        if &a.room == room && a.direction == direction {
            Some(b)
        } else if &b.room == room && b.direction == direction {
            Some(a)
        } else {
            None
        }
    }

    /// Returns true if locked behind the goal gate.
    pub fn is_goal(&self) -> bool {
        matches!(self.lock, Some(Lock::Goal))
    }

    /// The key tag, if locked with an ordinary key.
    pub fn key_tag(&self) -> Option<&KeyTag> {
        self.lock.as_ref().and_then(Lock::key_tag)
    }
}

/// A borrowed view of one exit: a passage seen from one of its rooms.
#[derive(Debug, Clone, Copy)]
pub struct Exit<'w> {
    /// The direction taken from the current room.
    pub direction: Direction,
    /// The room on the far side.
    pub to: &'w RoomId,
    /// The shared passage record.
    pub passage: &'w Passage,
}

impl Exit<'_> {
    /// Whether the exit is barred.
    pub fn is_locked(&self) -> bool {
        self.passage.locked
    }

    /// The lock kind, if any.
    pub fn lock(&self) -> Option<&Lock> {
        self.passage.lock.as_ref()
    }

    /// The key tag, if this exit is keyed.
    pub fn key_tag(&self) -> Option<&KeyTag> {
        self.passage.key_tag()
    }

    /// Returns true if the exit is the goal gate.
    pub fn is_goal(&self) -> bool {
        self.passage.is_goal()
    }
}
