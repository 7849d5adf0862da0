//! Win Evaluation
//!
//! Two matching passes feed one accumulator ([`WinTally`]):
//! - `same_symbols`: a standard symbol occurs at least `count` times
//! - `linear_symbols`: every position of a covered area holds one symbol
//!
//! Per symbol, each group keeps only its highest multiplier, across both
//! passes. Bonus symbols and symbols missing from the symbol table never score.

use std::collections::BTreeMap;

use tracing::debug;

use crate::game::board::Board;
use crate::game::config::{Coordinate, GameConfig, WinCombination, WinRule};

/// Per-symbol, per-group winning multipliers.
///
/// Every standard symbol on the board has an entry, possibly empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WinTally {
    slots: BTreeMap<String, BTreeMap<String, f64>>,
}

impl WinTally {
    /// Empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `symbol` has an entry, even without wins.
    pub fn seed(&mut self, symbol: &str) {
        if !self.slots.contains_key(symbol) {
            self.slots.insert(symbol.to_string(), BTreeMap::new());
        }
    }

    /// Offer `multiplier` for `symbol` in `group`.
    ///
    /// The larger multiplier is kept; on a tie the existing one stays.
    /// Returns whether the slot changed.
    pub fn record(&mut self, symbol: &str, group: &str, multiplier: f64) -> bool {
        let groups = self.slots.entry(symbol.to_string()).or_default();
        match groups.get_mut(group) {
            Some(current) if multiplier > *current => {
                *current = multiplier;
                true
            }
            Some(_) => false,
            None => {
                groups.insert(group.to_string(), multiplier);
                true
            }
        }
    }

    /// Group multipliers of a symbol.
    pub fn groups(&self, symbol: &str) -> Option<&BTreeMap<String, f64>> {
        self.slots.get(symbol)
    }

    /// All entries, including symbols without wins.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, f64>)> {
        self.slots.iter().map(|(symbol, groups)| (symbol.as_str(), groups))
    }

    /// Entries with at least one winning group.
    pub fn winners(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, f64>)> {
        self.iter().filter(|(_, groups)| !groups.is_empty())
    }

    /// Whether no symbol won anything.
    pub fn is_empty(&self) -> bool {
        self.winners().next().is_none()
    }
}

/// Result of checking one covered area against the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AreaOutcome<'a> {
    /// All positions hold this symbol.
    Matched(&'a str),
    /// A position lies outside the grid.
    OutOfBounds(Coordinate),
    /// Positions hold different symbols.
    Mismatch,
    /// The area lists no positions.
    Empty,
}

/// Check a covered area. Out-of-bounds positions disqualify the area.
pub fn check_area<'a>(board: &'a Board, area: &[Coordinate]) -> AreaOutcome<'a> {
    let (rows, columns) = (board.rows(), board.columns());
    let mut common: Option<&'a str> = None;

    for &coordinate in area {
        let Some((row, column)) = coordinate.to_cell(rows, columns) else {
            return AreaOutcome::OutOfBounds(coordinate);
        };
        let Some(symbol) = board.symbol_at(row, column) else {
            return AreaOutcome::OutOfBounds(coordinate);
        };
        match common {
            None => common = Some(symbol),
            Some(first) if first != symbol => return AreaOutcome::Mismatch,
            Some(_) => {}
        }
    }

    common.map_or(AreaOutcome::Empty, AreaOutcome::Matched)
}

/// Occurrences of each standard symbol on the board.
pub fn count_symbols(board: &Board, config: &GameConfig) -> BTreeMap<String, u32> {
    let mut counts = BTreeMap::new();
    for symbol in board.symbols().filter(|s| config.is_standard(s)) {
        *counts.entry(symbol.to_string()).or_insert(0) += 1;
    }
    counts
}

/// What win combinations are evaluated against.
pub struct WinContext<'a> {
    /// The generated board.
    pub board: &'a Board,
    /// Game rules.
    pub config: &'a GameConfig,
    /// Standard-symbol occurrences on the board.
    pub counts: BTreeMap<String, u32>,
}

impl<'a> WinContext<'a> {
    /// Count the board once for all combinations.
    pub fn new(board: &'a Board, config: &'a GameConfig) -> Self {
        Self {
            board,
            config,
            counts: count_symbols(board, config),
        }
    }

    /// A tally seeded with every standard symbol on the board.
    pub fn seeded_tally(&self) -> WinTally {
        let mut tally = WinTally::new();
        for symbol in self.counts.keys() {
            tally.seed(symbol);
        }
        tally
    }

    fn run(&self, tally: &mut WinTally, select: impl Fn(&WinRule) -> bool) {
        for (name, combination) in &self.config.win_combinations {
            if select(&combination.rule) {
                combination.apply(name, self, tally);
            }
        }
    }
}

impl WinCombination {
    /// Evaluate this combination, recording every symbol it qualifies.
    pub fn apply(&self, name: &str, ctx: &WinContext<'_>, tally: &mut WinTally) {
        match &self.rule {
            WinRule::SameSymbols { count } => {
                for (symbol, _) in ctx.counts.iter().filter(|&(_, &n)| n >= *count) {
                    tally.record(symbol, &self.group, self.reward_multiplier);
                }
            }
            WinRule::LinearSymbols { covered_areas } => {
                for area in covered_areas {
                    match check_area(ctx.board, area) {
                        AreaOutcome::Matched(symbol) if ctx.config.is_standard(symbol) => {
                            tally.record(symbol, &self.group, self.reward_multiplier);
                        }
                        AreaOutcome::Matched(symbol) => {
                            debug!(combination = name, symbol, "area matched a non-scoring symbol");
                        }
                        AreaOutcome::OutOfBounds(coordinate) => {
                            debug!(combination = name, %coordinate, "covered area outside the grid");
                        }
                        AreaOutcome::Mismatch | AreaOutcome::Empty => {}
                    }
                }
            }
        }
    }
}

/// Count-based pass: record every `same_symbols` combination met by a symbol.
pub fn count_same_symbol_wins(board: &Board, config: &GameConfig, tally: &mut WinTally) {
    WinContext::new(board, config).run(tally, |rule| matches!(rule, WinRule::SameSymbols { .. }));
}

/// Shape-based pass: record every `linear_symbols` area fully covered by one symbol.
pub fn count_linear_wins(board: &Board, config: &GameConfig, tally: &mut WinTally) {
    WinContext::new(board, config).run(tally, |rule| matches!(rule, WinRule::LinearSymbols { .. }));
}

/// Evaluate every win combination over a fresh, seeded tally.
pub fn evaluate_wins(board: &Board, config: &GameConfig) -> WinTally {
    let ctx = WinContext::new(board, config);
    let mut tally = ctx.seeded_tally();
    ctx.run(&mut tally, |_| true);
    tally
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::CellPosition;
    use serde_json::json;

    fn config(win_combinations: serde_json::Value) -> GameConfig {
        let doc = json!({
            "symbols": {
                "A": { "reward_multiplier": 5, "type": "standard" },
                "B": { "reward_multiplier": 3, "type": "standard" },
                "+500": { "extra": 500, "type": "bonus", "impact": "extra_bonus" }
            },
            "probabilities": {
                "standard_symbols": [{ "column": 0, "row": 0, "symbols": { "A": 1 } }],
                "bonus_symbols": { "symbols": { "+500": 1 } }
            },
            "win_combinations": win_combinations
        });
        GameConfig::from_json_str(&doc.to_string()).unwrap()
    }

    fn board(rows: &[&[&str]], bonus: CellPosition) -> Board {
        let matrix: Vec<Vec<String>> = rows
            .iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect();
        let symbol = matrix[bonus.row][bonus.column].clone();
        Board::new(matrix, symbol, bonus)
    }

    #[test]
    fn test_tally_keeps_max_and_ties_keep_existing() {
        let mut tally = WinTally::new();

        assert!(tally.record("A", "g", 2.0));
        assert!(!tally.record("A", "g", 1.5));
        assert!(!tally.record("A", "g", 2.0));
        assert!(tally.record("A", "g", 3.0));
        assert!(tally.record("A", "h", 1.0));

        let groups = tally.groups("A").unwrap();
        assert_eq!(groups["g"], 3.0);
        assert_eq!(groups["h"], 1.0);
    }

    #[test]
    fn test_seeded_symbols_without_wins() {
        let mut tally = WinTally::new();
        tally.seed("A");
        tally.seed("A");

        assert!(tally.is_empty());
        assert_eq!(tally.iter().count(), 1);
        assert_eq!(tally.winners().count(), 0);
    }

    #[test]
    fn test_count_symbols_excludes_bonus_and_unknown() {
        let config = config(json!({}));
        let board = board(
            &[&["A", "A", "B"], &["Z", "+500", "A"]],
            CellPosition::new(1, 1),
        );

        let counts = count_symbols(&board, &config);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["A"], 3);
        assert_eq!(counts["B"], 1);
    }

    #[test]
    fn test_same_symbols_group_exclusivity() {
        let config = config(json!({
            "three": { "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same" },
            "four": { "reward_multiplier": 1.5, "when": "same_symbols", "count": 4, "group": "same" },
            "five": { "reward_multiplier": 2, "when": "same_symbols", "count": 5, "group": "same" }
        }));
        let board = board(
            &[&["A", "A", "A"], &["A", "B", "B"], &["B", "+500", "A"]],
            CellPosition::new(2, 1),
        );

        let tally = evaluate_wins(&board, &config);

        // A x5 -> best of {1, 1.5, 2}; B x3 -> only "three"
        assert_eq!(tally.groups("A").unwrap()["same"], 2.0);
        assert_eq!(tally.groups("B").unwrap()["same"], 1.0);
        assert!(tally.groups("+500").is_none());
    }

    #[test]
    fn test_below_threshold_no_win() {
        let config = config(json!({
            "three": { "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same" }
        }));
        let board = board(&[&["A", "B"], &["B", "+500"]], CellPosition::new(1, 1));

        let tally = evaluate_wins(&board, &config);
        assert!(tally.is_empty());
        assert!(tally.groups("A").unwrap().is_empty());
    }

    #[test]
    fn test_check_area_outcomes() {
        let board = board(
            &[&["A", "A", "A"], &["B", "A", "B"], &["B", "+500", "A"]],
            CellPosition::new(2, 1),
        );

        let row0 = [Coordinate::new(0, 0), Coordinate::new(1, 0), Coordinate::new(2, 0)];
        assert_eq!(check_area(&board, &row0), AreaOutcome::Matched("A"));

        let diagonal = [Coordinate::new(0, 0), Coordinate::new(1, 1), Coordinate::new(2, 2)];
        assert_eq!(check_area(&board, &diagonal), AreaOutcome::Matched("A"));

        let row1 = [Coordinate::new(0, 1), Coordinate::new(1, 1)];
        assert_eq!(check_area(&board, &row1), AreaOutcome::Mismatch);

        let outside = [Coordinate::new(0, 0), Coordinate::new(0, 5)];
        assert_eq!(check_area(&board, &outside), AreaOutcome::OutOfBounds(Coordinate::new(0, 5)));

        let negative = [Coordinate::new(-1, 0)];
        assert_eq!(check_area(&board, &negative), AreaOutcome::OutOfBounds(Coordinate::new(-1, 0)));

        assert_eq!(check_area(&board, &[]), AreaOutcome::Empty);
    }

    #[test]
    fn test_out_of_bounds_area_never_qualifies() {
        let config = config(json!({
            "column_with_row_5": {
                "reward_multiplier": 5, "when": "linear_symbols", "group": "vertical",
                "covered_areas": [["0:0", "0:1", "0:5"]]
            }
        }));
        let board = board(
            &[&["A", "A", "A"], &["A", "A", "A"], &["A", "A", "+500"]],
            CellPosition::new(2, 2),
        );

        let tally = evaluate_wins(&board, &config);
        assert!(tally.is_empty());
    }

    #[test]
    fn test_linear_best_area_per_group() {
        let config = config(json!({
            "horizontal": {
                "reward_multiplier": 2, "when": "linear_symbols", "group": "horizontal",
                "covered_areas": [["0:0", "1:0", "2:0"], ["0:1", "1:1", "2:1"]]
            },
            "diagonal": {
                "reward_multiplier": 5, "when": "linear_symbols", "group": "diagonal",
                "covered_areas": [["0:0", "1:1", "2:2"]]
            }
        }));
        let board = board(
            &[&["A", "A", "A"], &["B", "B", "B"], &["+500", "B", "A"]],
            CellPosition::new(2, 0),
        );

        let tally = evaluate_wins(&board, &config);

        let a = tally.groups("A").unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a["horizontal"], 2.0);

        let b = tally.groups("B").unwrap();
        assert_eq!(b["horizontal"], 2.0);
        assert!(!b.contains_key("diagonal"));
    }

    #[test]
    fn test_linear_ignores_non_scoring_symbols() {
        let config = config(json!({
            "single_cell": {
                "reward_multiplier": 3, "when": "linear_symbols", "group": "single",
                "covered_areas": [["1:1"], ["0:0"]]
            }
        }));
        let board = board(&[&["Z", "A"], &["A", "+500"]], CellPosition::new(1, 1));

        let tally = evaluate_wins(&board, &config);
        assert!(tally.is_empty());
        assert!(tally.groups("Z").is_none());
    }

    #[test]
    fn test_groups_shared_across_both_kinds() {
        let config = config(json!({
            "five": { "reward_multiplier": 2, "when": "same_symbols", "count": 5, "group": "shared" },
            "top_row": {
                "reward_multiplier": 4, "when": "linear_symbols", "group": "shared",
                "covered_areas": [["0:0", "1:0", "2:0"]]
            },
            "left_column": {
                "reward_multiplier": 1.5, "when": "linear_symbols", "group": "shared",
                "covered_areas": [["0:0", "0:1", "0:2"]]
            }
        }));
        let board = board(
            &[&["A", "A", "A"], &["A", "A", "B"], &["A", "B", "+500"]],
            CellPosition::new(2, 2),
        );

        let tally = evaluate_wins(&board, &config);
        let groups = tally.groups("A").unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups["shared"], 4.0);
    }

    #[test]
    fn test_passes_can_run_separately() {
        let config = config(json!({
            "three": { "reward_multiplier": 1, "when": "same_symbols", "count": 3, "group": "same" },
            "top_row": {
                "reward_multiplier": 2, "when": "linear_symbols", "group": "horizontal",
                "covered_areas": [["0:0", "1:0", "2:0"]]
            }
        }));
        let board = board(
            &[&["A", "A", "A"], &["B", "B", "+500"]],
            CellPosition::new(1, 2),
        );

        let mut same_only = WinContext::new(&board, &config).seeded_tally();
        count_same_symbol_wins(&board, &config, &mut same_only);
        assert_eq!(same_only.groups("A").unwrap().len(), 1);

        let mut linear_only = WinContext::new(&board, &config).seeded_tally();
        count_linear_wins(&board, &config, &mut linear_only);
        assert_eq!(linear_only.groups("A").unwrap()["horizontal"], 2.0);
        assert!(!linear_only.groups("A").unwrap().contains_key("same"));
    }
}
