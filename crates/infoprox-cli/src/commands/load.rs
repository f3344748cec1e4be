//! Resume a saved game.

use std::path::Path;

use infoprox_fiction::{FictionSession, Snapshot};

pub fn run(file: &Path) -> Result<(), String> {
    let state = Snapshot::read(file)
        .and_then(Snapshot::restore)
        .map_err(|e| format!("cannot load {}: {e}", file.display()))?;
    super::run_session(FictionSession::from_state(state), true)
}
