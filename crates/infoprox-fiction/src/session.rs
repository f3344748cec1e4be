//! Interactive fiction session management.

use std::path::Path;

use infoprox_core::World;
use infoprox_worldgen::audit_from;
use tracing::debug;

use crate::actions;
use crate::error::FictionResult;
use crate::map;
use crate::narrator::help_text;
use crate::parser::{Command, parse_command, suggest_verb};
use crate::snapshot::Snapshot;
use crate::state::GameState;

/// Save file used when `save` or `load` names none.
pub const DEFAULT_SAVE: &str = "save.json";

/// An interactive fiction session.
///
/// Owns the game state and turns raw input lines into response text.
#[derive(Debug)]
pub struct FictionSession {
    state: GameState,
    finished: bool,
}

impl FictionSession {
    /// Start a new game in `world`.
    pub fn new(world: World) -> Self {
        Self::from_state(GameState::new(world))
    }

    /// Resume from an existing state, e.g. a restored snapshot.
    pub fn from_state(state: GameState) -> Self {
        Self {
            state,
            finished: false,
        }
    }

    /// The game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access to the game state.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// True once the player has quit.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The first description shown, without spending a turn.
    pub fn opening(&mut self) -> String {
        actions::look(&mut self.state)
    }

    /// Process one line of player input and return the response.
    ///
    /// Every line costs a turn, even ones that are not understood. A `load`
    /// line is charged on top of the restored turn count.
    pub fn process(&mut self, input: &str) -> FictionResult<String> {
        let command = parse_command(input);
        let loading = matches!(command, Command::Load { .. });
        self.state.turns += 1;
        debug!(verb = command.verb(), turn = self.state.turns, "command");
        let reply = self.execute(command)?;
        if loading {
            self.state.turns += 1;
        }
        Ok(reply)
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> FictionResult<String> {
        let state = &mut self.state;
        let reply = match command {
            Command::Go { direction } => actions::go(state, direction),
            Command::Look => actions::look(state),
            Command::Examine { item } => actions::examine(state, &item),
            Command::Read { item } => actions::read(state, &item),
            Command::Take { item } => actions::take(state, &item),
            Command::Drop { item } => actions::drop(state, &item),
            Command::Inventory => actions::inventory(state),
            Command::Use { item, target } => actions::use_item(state, &item, &target),
            Command::Map { all } => map::render(state, all),
            Command::Score => actions::score(state),
            Command::Help { topic } => help_text(topic.as_deref()),
            Command::Save { file } => {
                let path = file.unwrap_or_else(|| DEFAULT_SAVE.to_string());
                Snapshot::capture(state).write(Path::new(&path))?;
                format!("Game saved to {path}.")
            }
            Command::Load { file } => {
                let path = file.unwrap_or_else(|| DEFAULT_SAVE.to_string());
                *state = Snapshot::read(Path::new(&path))?.restore()?;
                format!("Game loaded from {path}.\n{}", actions::look(state))
            }
            Command::Quit => {
                self.finished = true;
                format!("Score: {} Turns: {}", state.score, state.turns)
            }
            Command::Debug => debug_report(state),
            Command::Unknown { input } => match suggest_verb(&input) {
                Some(verb) => format!("I don't understand that. Did you mean '{verb}'?"),
                None => "I don't understand that.".to_string(),
            },
        };
        Ok(reply)
    }
}

fn debug_report(state: &GameState) -> String {
    let world = &state.world;
    let report = audit_from(world, &state.room, &state.inventory);
    format!(
        "Seed {} (derived {}), theme {}, {} rooms. You are in {}.\n{report}",
        world.seed,
        world.derived_seed,
        world.theme,
        world.len(),
        state.room
    )
}
