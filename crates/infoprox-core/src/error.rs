use crate::direction::Direction;
use crate::room::RoomId;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or querying a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The requested room ID does not exist in the world.
    #[error("room not found: {0}")]
    RoomNotFound(RoomId),

    /// A room with the same ID already exists.
    #[error("room already exists: {0}")]
    DuplicateRoom(RoomId),

    /// The room already has an exit in that direction.
    #[error("room {room} already has an exit {direction}")]
    DirectionTaken {
        /// The room whose direction slot is occupied.
        room: RoomId,
        /// The occupied direction.
        direction: Direction,
    },

    /// A passage cannot connect a room to itself.
    #[error("cannot connect {0} to itself")]
    SelfLoop(RoomId),

    /// A tag string did not match any known encoding.
    #[error("invalid tag: \"{0}\"")]
    InvalidTag(String),

    /// A theme name did not match any known theme.
    #[error("unknown theme: \"{0}\" (expected fantasy, scifi, or horror)")]
    UnknownTheme(String),
}
