//! Game driver: asks each seat's agent for moves until someone wins.

use serde::{Deserialize, Serialize};

use crate::core::{ActionRecord, ConfigError, GameConfig, GameError, GameRng, GameState};
use crate::rules::{GameResult, GameView};

use super::agent::Agent;

/// Configuration for running games.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Maximum moves per game (to prevent endless games).
    pub max_moves: usize,

    /// Keep an `ActionRecord` for every applied move.
    pub record_history: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            max_moves: 5_000,
            record_history: true,
        }
    }
}

impl RunnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_moves(mut self, max: usize) -> Self {
        self.max_moves = max;
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }
}

/// Result of a finished run.
#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub result: GameResult,

    /// Moves applied.
    pub moves: usize,

    pub final_state: GameState,

    /// Applied moves in order (empty unless history is recorded).
    pub history: Vec<ActionRecord>,
}

/// Why a run could not complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunError {
    /// The game could not be dealt.
    Config(ConfigError),
    /// One agent per seat is required.
    AgentCount { expected: usize, found: usize },
    /// An agent returned a move the rules rejected.
    Game(GameError),
}

impl From<ConfigError> for RunError {
    fn from(err: ConfigError) -> Self {
        RunError::Config(err)
    }
}

impl From<GameError> for RunError {
    fn from(err: GameError) -> Self {
        RunError::Game(err)
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunError::Config(err) => write!(f, "Invalid configuration: {}", err),
            RunError::AgentCount { expected, found } => {
                write!(f, "Expected {} agents, got {}", expected, found)
            }
            RunError::Game(err) => write!(f, "Agent move rejected: {}", err),
        }
    }
}

impl std::error::Error for RunError {}

/// Runs games between agents.
#[derive(Clone, Debug, Default)]
pub struct GameRunner {
    config: RunnerConfig,
}

impl GameRunner {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Deal a game from `seed` and play it out.
    pub fn play(
        &self,
        game: GameConfig,
        agents: &mut [Box<dyn Agent>],
        seed: u64,
    ) -> Result<RunOutcome, RunError> {
        let mut rng = GameRng::new(seed);
        let state = GameState::new(game, &mut rng)?;
        self.run(state, agents, &mut rng)
    }

    /// Play `state` out: observe for the current seat, ask its agent, apply.
    ///
    /// Agents draw from a fork of `rng`, so their choices never disturb the
    /// cards dealt by the game. A seat whose agent has no move, or hitting
    /// the move cap, ends the game as a draw.
    pub fn run(
        &self,
        mut state: GameState,
        agents: &mut [Box<dyn Agent>],
        rng: &mut GameRng,
    ) -> Result<RunOutcome, RunError> {
        let expected = state.player_count();
        if agents.len() != expected {
            return Err(RunError::AgentCount {
                expected,
                found: agents.len(),
            });
        }

        let mut agent_rng = rng.fork();
        let mut history = Vec::new();
        let mut moves = 0;
        let mut sequence = 0;

        while moves < self.config.max_moves && state.winner().is_none() {
            let player = state.current_player();
            let view = state.observe();
            let Some(mv) = agents[player.index()].choose_move(&view, &mut agent_rng) else {
                break;
            };

            if self.config.record_history {
                let description = mv.describe(&state);
                history.push(ActionRecord::new(player, mv, description, state.turn_number(), sequence));
            }

            state = state.apply(&mv, rng)?;
            moves += 1;
            sequence = if mv.ends_turn() { 0 } else { sequence + 1 };
        }

        let result = match state.winner() {
            Some(winner) => GameResult::Winner(winner),
            None => GameResult::Draw,
        };

        Ok(RunOutcome {
            result,
            moves,
            final_state: state,
            history,
        })
    }
}
