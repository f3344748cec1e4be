//! Narrator: descriptive text generation.

mod templates;

pub use templates::{and_join, banner, flavor_line, help_text, room_text};
