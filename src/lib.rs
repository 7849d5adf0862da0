//! # Scratch Game Engine
//!
//! Simulates a single play of a matrix scratch card: weighted board
//! generation, win evaluation and payout composition.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     SCRATCH GAME                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - RandomSource + Xorshift128+ PRNG          │
//! │  └── hash.rs     - Board digests for verification            │
//! │                                                              │
//! │  game/           - Game logic (deterministic)                │
//! │  ├── config.rs   - Rules model, loading, validation          │
//! │  ├── board.rs    - Weighted board generation                 │
//! │  ├── win.rs      - Same-symbol and linear matching           │
//! │  ├── reward.rs   - Multipliers and bonus effects             │
//! │  ├── result.rs   - Output artifact                           │
//! │  └── play.rs     - End-to-end round, replay                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Randomness is injected: a play draws only from the [`RandomSource`] it is
//! handed. Given the same config and seed, [`play_with_seed`] produces the
//! same board and result on any platform.
//!
//! ## Example
//!
//! ```
//! use scratch_game::{play_with_seed, GameConfig};
//!
//! let config = GameConfig::from_json_str(r#"{
//!     "symbols": {
//!         "A": { "reward_multiplier": 1, "type": "standard" },
//!         "+50": { "extra": 50, "type": "bonus", "impact": "extra_bonus" }
//!     },
//!     "probabilities": {
//!         "standard_symbols": [{ "column": 0, "row": 0, "symbols": { "A": 1 } }],
//!         "bonus_symbols": { "symbols": { "+50": 1 } }
//!     },
//!     "win_combinations": {
//!         "same_symbol_5_times": {
//!             "reward_multiplier": 2, "when": "same_symbols", "count": 5, "group": "same_symbols"
//!         }
//!     }
//! }"#).unwrap();
//!
//! let result = play_with_seed(&config, 100, 42).unwrap();
//! assert_eq!(result.reward, 250);
//! assert_eq!(result.applied_bonus_symbol.as_deref(), Some("+50"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::{DeterministicRng, RandomSource};
pub use crate::game::config::{ConfigError, GameConfig};
pub use crate::game::board::{Board, CellPosition};
pub use crate::game::result::GameResult;
pub use crate::game::play::{play, play_with_seed, replay_board, verify_board};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Grid height when the config omits `rows`.
pub const DEFAULT_ROWS: u32 = 3;

/// Grid width when the config omits `columns`.
pub const DEFAULT_COLUMNS: u32 = 3;
