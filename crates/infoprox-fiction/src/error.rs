//! Error types for the fiction engine.
//!
//! Player mistakes never reach these types; they come back as ordinary
//! response text. Only the save/load boundary can fail.

use infoprox_core::{Direction, RoomId};
use thiserror::Error;

/// Result type for fiction operations.
pub type FictionResult<T> = Result<T, FictionError>;

/// Errors that can occur while saving or restoring a game.
#[derive(Debug, Error)]
pub enum FictionError {
    /// Reading or writing a save file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A save file is not valid JSON or does not match the snapshot shape.
    #[error("malformed save: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot names a room the regenerated world does not have.
    #[error("save refers to unknown room: {0}")]
    UnknownRoom(RoomId),

    /// A snapshot names an exit the regenerated world does not have.
    #[error("save refers to unknown exit {direction} in {room}")]
    UnknownExit {
        /// The room the exit should leave from.
        room: RoomId,
        /// The missing direction.
        direction: Direction,
    },
}
