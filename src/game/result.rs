//! Game Result
//!
//! The sole output of a play. Field names follow the published JSON shape.

use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

/// Outcome of one play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// The generated grid, rows of columns.
    pub matrix: Vec<Vec<String>>,

    /// Bet-scaled reward, truncated to an integer.
    pub reward: u64,

    /// Winning symbol to the combination names applied to it.
    pub applied_winning_combinations: BTreeMap<String, Vec<String>>,

    /// Bonus symbol whose effect changed the reward, if any.
    pub applied_bonus_symbol: Option<String>,
}

impl GameResult {
    /// Whether the play paid out.
    pub fn is_win(&self) -> bool {
        self.reward > 0
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

// =============================================================================
// TESTS
// =============================================================================
