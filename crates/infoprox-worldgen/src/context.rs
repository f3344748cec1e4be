use infoprox_core::{KeyTag, PassageId, RoomId, World};
use rand::rngs::StdRng;

use crate::config::GenConfig;

/// Decisions made by earlier passes that later passes build on.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    /// The goal room.
    pub vault: Option<RoomId>,
    /// The passage locked behind the goal gate.
    pub goal: Option<PassageId>,
    /// Ordinary key tags, in the order they were created.
    pub keys: Vec<KeyTag>,
}

/// Mutable context passed to each pass during generation.
pub struct GenContext<'a> {
    /// The world under construction.
    pub world: &'a mut World,
    /// The single random source for the whole run.
    pub rng: &'a mut StdRng,
    /// Shared decisions.
    pub layout: &'a mut Layout,
    /// The run's configuration.
    pub config: &'a GenConfig,
}
