//! Game Logic Module
//!
//! All scratch game rules. Deterministic given a randomness source.
//!
//! ## Module Structure
//!
//! - `config`: Rules model, JSON loading and validation
//! - `board`: Weighted board generation and bonus placement
//! - `win`: Same-symbol and linear win matching
//! - `reward`: Multiplier composition and bonus effects
//! - `result`: Output artifact
//! - `play`: End-to-end round and replay verification

pub mod config;
pub mod board;
pub mod win;
pub mod reward;
pub mod result;
pub mod play;

// Re-export key types
pub use config::{GameConfig, ConfigError, SymbolConfig, SymbolKind, BonusImpact, WinCombination, WinRule, Coordinate};
pub use board::{Board, CellPosition, generate, weighted_pick};
pub use win::{WinTally, AreaOutcome, evaluate_wins, count_same_symbol_wins, count_linear_wins};
pub use reward::compute_reward;
pub use result::GameResult;
pub use play::{play, play_with_seed, replay_board, verify_board};
