//! Playing a Round
//!
//! Configuration -> board generation -> win evaluation -> reward composition.
//! Each play owns its randomness source; nothing else is shared between plays.

use tracing::{debug, info_span};

use crate::core::hash::to_hex;
use crate::core::rng::{DeterministicRng, RandomSource};
use crate::game::board::{generate, Board};
use crate::game::config::{ConfigError, GameConfig};
use crate::game::result::GameResult;
use crate::game::reward::compute_reward;
use crate::game::win::evaluate_wins;

/// Play one round for `bet`, drawing from `rng`.
///
/// # Errors
///
/// Only configuration problems fail a play; they are detected before any draw.
pub fn play<R: RandomSource + ?Sized>(config: &GameConfig, bet: u64, rng: &mut R) -> Result<GameResult, ConfigError> {
    let span = info_span!("play", bet);
    let _guard = span.enter();

    let board = generate(config, rng)?;
    debug!(digest = %to_hex(&board.digest()), "board ready");

    let tally = evaluate_wins(&board, config);
    Ok(compute_reward(&board, &tally, bet, config))
}

/// Play one round with a [`DeterministicRng`] seeded from `seed`.
pub fn play_with_seed(config: &GameConfig, bet: u64, seed: u64) -> Result<GameResult, ConfigError> {
    play(config, bet, &mut DeterministicRng::new(seed))
}

/// Regenerate the board a seeded play produced.
pub fn replay_board(config: &GameConfig, seed: u64) -> Result<Board, ConfigError> {
    generate(config, &mut DeterministicRng::new(seed))
}

/// Check that `matrix` is the grid a play seeded with `seed` would show.
pub fn verify_board(config: &GameConfig, seed: u64, matrix: &[Vec<String>]) -> Result<bool, ConfigError> {
    let board = replay_board(config, seed)?;
    Ok(board.matrix() == matrix)
}

// =============================================================================
// TESTS
// =============================================================================
