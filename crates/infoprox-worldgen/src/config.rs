use infoprox_core::Theme;

/// Fewest rooms a world may have.
pub const MIN_ROOMS: usize = 8;
/// Most rooms a world may have.
pub const MAX_ROOMS: usize = 15;

/// Configuration for a world generation run.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// RNG seed. `None` draws a fresh one; the world records what was used.
    pub seed: Option<u64>,
    /// Number of rooms, always within [`MIN_ROOMS`, `MAX_ROOMS`].
    pub room_count: usize,
    /// Theme selecting archetype tables, keys, and artifacts.
    pub theme: Theme,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            seed: None,
            room_count: 10,
            theme: Theme::Fantasy,
        }
    }
}

impl GenConfig {
    /// Set the RNG seed for deterministic generation.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the RNG seed if one is given.
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the room count (clamped to 8-15).
    pub fn with_room_count(mut self, count: usize) -> Self {
        self.room_count = count.clamp(MIN_ROOMS, MAX_ROOMS);
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}
