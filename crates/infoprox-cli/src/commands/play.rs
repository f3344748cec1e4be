//! Start a new game on a freshly generated world.

use infoprox_fiction::FictionSession;
use infoprox_worldgen::{GenConfig, generate};

pub fn run(config: &GenConfig) -> Result<(), String> {
    let world = generate(config);
    super::run_session(FictionSession::new(world), false)
}
