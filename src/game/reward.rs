//! Reward Composition
//!
//! Turns a [`WinTally`] into the final [`GameResult`]:
//!
//! ```text
//! symbol reward = bet * symbol.reward_multiplier * product(group multipliers)
//! total         = sum(symbol rewards), then the bonus effect if total > 0
//! reward        = trunc(total)
//! ```

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::game::board::Board;
use crate::game::config::{BonusImpact, GameConfig};
use crate::game::result::GameResult;
use crate::game::win::WinTally;

/// Names of the combinations behind a symbol's winning group multipliers.
///
/// Every combination whose group is among `groups` with exactly the recorded
/// multiplier is listed, in config order, so tied combinations all appear.
pub fn applied_combinations(groups: &BTreeMap<String, f64>, config: &GameConfig) -> Vec<String> {
    config
        .win_combinations
        .iter()
        .filter(|(_, combination)| groups.get(&combination.group) == Some(&combination.reward_multiplier))
        .map(|(name, _)| name.clone())
        .collect()
}

/// Apply the bonus symbol to a pre-bonus total.
///
/// Returns the new total and whether the bonus took effect. Nothing happens
/// unless `total > 0`.
pub fn apply_bonus(total: f64, bonus_symbol: &str, config: &GameConfig) -> (f64, bool) {
    if total <= 0.0 {
        return (0.0, false);
    }

    let Some(bonus) = config.symbol(bonus_symbol) else {
        warn!(symbol = bonus_symbol, "bonus symbol missing from the symbol table");
        return (total, false);
    };

    match &bonus.impact {
        Some(BonusImpact::MultiplyReward) => (total * bonus.reward_multiplier, true),
        Some(BonusImpact::ExtraBonus) => (total + bonus.extra.unwrap_or(0.0), true),
        Some(BonusImpact::Miss) | Some(BonusImpact::Other(_)) | None => (total, false),
    }
}

/// Compose the reward for `bet` and assemble the result.
///
/// Arithmetic runs in `f64`, so bets above 2^53 lose precision. A total past
/// `u64::MAX` is capped at `u64::MAX`.
pub fn compute_reward(board: &Board, tally: &WinTally, bet: u64, config: &GameConfig) -> GameResult {
    let mut total = 0.0;
    let mut applied_winning_combinations = BTreeMap::new();

    for (symbol, groups) in tally.winners() {
        let Some(symbol_config) = config.symbol(symbol) else {
            continue;
        };

        let combined: f64 = groups.values().product();
        total += bet as f64 * symbol_config.reward_multiplier * combined;

        applied_winning_combinations.insert(symbol.to_string(), applied_combinations(groups, config));
    }

    let (total, bonus_applied) = apply_bonus(total, board.bonus_symbol(), config);
    if !total.is_finite() || total >= u64::MAX as f64 {
        warn!(total, "reward exceeds u64 range, capped");
    }
    let reward = total.trunc() as u64;
    let applied_bonus_symbol = (bonus_applied && reward > 0).then(|| board.bonus_symbol().to_string());

    debug!(
        reward,
        winners = applied_winning_combinations.len(),
        bonus = applied_bonus_symbol.as_deref().unwrap_or("none"),
        "reward composed"
    );

    GameResult {
        matrix: board.matrix().to_vec(),
        reward,
        applied_winning_combinations,
        applied_bonus_symbol,
    }
}

// =============================================================================
// TESTS
// =============================================================================
