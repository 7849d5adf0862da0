use proptest::prelude::*;
use serde_json::json;

use scratch_game::game::config::WeightTable;
use scratch_game::game::{evaluate_wins, generate, weighted_pick};
use scratch_game::{play_with_seed, DeterministicRng, GameConfig};

fn grid_config(rows: u32, columns: u32) -> GameConfig {
    let doc = json!({
        "rows": rows,
        "columns": columns,
        "symbols": {
            "A": { "reward_multiplier": 1, "type": "standard" },
            "B": { "reward_multiplier": 2, "type": "standard" },
            "5x": { "reward_multiplier": 5, "type": "bonus", "impact": "multiply_reward" },
            "MISS": { "type": "bonus", "impact": "miss" }
        },
        "probabilities": {
            "standard_symbols": [{ "column": 0, "row": 0, "symbols": { "A": 3, "B": 2 } }],
            "bonus_symbols": { "symbols": { "5x": 1, "MISS": 1 } }
        }
    });
    GameConfig::from_json_str(&doc.to_string()).unwrap()
}

proptest! {
    #[test]
    fn sampled_symbol_is_in_table(
        weights in prop::collection::vec(0u32..20, 1..8),
        seed in any::<u64>(),
    ) {
        prop_assume!(weights.iter().any(|&w| w > 0));

        let table: WeightTable = weights
            .iter()
            .enumerate()
            .map(|(i, &w)| (format!("S{i}"), w))
            .collect();
        let mut rng = DeterministicRng::new(seed);

        let picked = weighted_pick(&table, &mut rng).unwrap();
        prop_assert!(table.get(picked).is_some_and(|&w| w > 0));
    }

    #[test]
    fn board_has_one_bonus_cell(rows in 1u32..7, columns in 1u32..7, seed in any::<u64>()) {
        let config = grid_config(rows, columns);
        let board = generate(&config, &mut DeterministicRng::new(seed)).unwrap();

        prop_assert_eq!(board.rows(), rows as usize);
        prop_assert_eq!(board.columns(), columns as usize);

        let bonus_cells = board.symbols().filter(|s| !config.is_standard(s)).count();
        prop_assert_eq!(bonus_cells, 1);

        let cell = board.bonus_cell();
        prop_assert_eq!(board.symbol_at(cell.row, cell.column), Some(board.bonus_symbol()));
    }

    #[test]
    fn no_win_means_no_reward(rows in 1u32..5, columns in 1u32..5, seed in any::<u64>(), bet in 0u64..100_000) {
        // no combinations at all: bonuses never pay on their own
        let config = grid_config(rows, columns);
        let result = play_with_seed(&config, bet, seed).unwrap();

        prop_assert_eq!(result.reward, 0);
        prop_assert!(result.applied_winning_combinations.is_empty());
        prop_assert_eq!(result.applied_bonus_symbol, None);
    }

    #[test]
    fn groups_compose_multiplicatively(a in 1u32..20, b in 1u32..20, bet in 1u64..10_000, seed in any::<u64>()) {
        let doc = json!({
            "symbols": {
                "A": { "reward_multiplier": 1, "type": "standard" },
                "MISS": { "type": "bonus", "impact": "miss" }
            },
            "probabilities": {
                "standard_symbols": [{ "column": 0, "row": 0, "symbols": { "A": 1 } }],
                "bonus_symbols": { "symbols": { "MISS": 1 } }
            },
            "win_combinations": {
                "same_symbol_5_times": { "reward_multiplier": a, "when": "same_symbols", "count": 5, "group": "same_symbols" },
                "same_symbols_vertically": {
                    "reward_multiplier": b, "when": "linear_symbols", "group": "vertically_linear_symbols",
                    "covered_areas": [["0:0", "0:1", "0:2"], ["1:0", "1:1", "1:2"], ["2:0", "2:1", "2:2"]]
                }
            }
        });
        let config = GameConfig::from_json_str(&doc.to_string()).unwrap();
        let board = generate(&config, &mut DeterministicRng::new(seed)).unwrap();

        // at least two columns escape the bonus cell
        let tally = evaluate_wins(&board, &config);
        prop_assert_eq!(tally.groups("A").map(|g| g.len()), Some(2));

        let result = play_with_seed(&config, bet, seed).unwrap();
        prop_assert_eq!(result.reward, bet * u64::from(a) * u64::from(b));
        prop_assert_eq!(result.applied_bonus_symbol, None);
        prop_assert_eq!(result.applied_winning_combinations["A"].len(), 2);
    }

    #[test]
    fn seed_replays_identically(seed in any::<u64>(), bet in 0u64..1_000) {
        let config = grid_config(3, 3);
        prop_assert_eq!(
            play_with_seed(&config, bet, seed).unwrap(),
            play_with_seed(&config, bet, seed).unwrap()
        );
    }
}
