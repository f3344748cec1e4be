//! Command parsing and item resolution.

mod command;
mod resolver;

pub use command::{Command, normalize, parse_command, suggest_verb};
pub use resolver::{find_item, suggest_item};
