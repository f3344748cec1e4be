//! Text-adventure play engine for Infoprox.
//!
//! Turns free-text player input into actions against a generated world.
//! The [`parser`] maps a line to a [`Command`], the [`actions`] resolve it
//! against the [`GameState`], and the [`narrator`] and [`map`] render what
//! the player sees. [`FictionSession`] ties these together and owns the
//! save/load boundary via [`Snapshot`].

/// One function per player verb.
pub mod actions;
/// Error types for the fiction engine.
pub mod error;
/// ASCII map rendering.
pub mod map;
/// Descriptive text generation.
pub mod narrator;
/// Command parsing and item resolution.
pub mod parser;
/// Interactive fiction session management.
pub mod session;
/// Save files.
pub mod snapshot;
/// Player and game state.
pub mod state;

#[cfg(test)]
mod fixtures;

pub use error::{FictionError, FictionResult};
pub use parser::{Command, parse_command};
pub use session::FictionSession;
pub use snapshot::Snapshot;
pub use state::GameState;
