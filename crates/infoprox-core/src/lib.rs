//! Core types for Infoprox: rooms, passages, items, and the world model.
//!
//! This crate defines the data model the world generator produces and the
//! fiction engine plays on. It has no notion of commands or randomness; you
//! can build a [`World`] by hand for tests.

/// Canonical exit directions.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Items that lie in rooms or ride in the inventory.
pub mod item;
/// Passages (doorways shared by two rooms) and exit views.
pub mod passage;
/// Rooms and room identifiers.
pub mod room;
/// Structured item and lock tags.
pub mod tag;
/// Themes, archetype tables, and item templates.
pub mod theme;
/// The central world model that owns rooms and passages.
pub mod world;

/// Re-export direction type.
pub use direction::Direction;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export item type.
pub use item::Item;
/// Re-export passage types.
pub use passage::{Exit, Passage, PassageEnd, PassageId};
/// Re-export room types.
pub use room::{Room, RoomId};
/// Re-export tag types.
pub use tag::{ItemTag, KeyTag, Lock};
/// Re-export theme types.
pub use theme::{Archetype, ArtifactSpec, ItemTemplate, Theme};
/// Re-export world model types.
pub use world::{Traversal, World};
