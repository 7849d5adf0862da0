//! Game Configuration
//!
//! In-memory rules of a scratch game: grid shape, symbol table, per-cell
//! probability tables and win combinations. Loaded once from JSON, validated,
//! then shared read-only by every play.
//!
//! Maps use `IndexMap` so iteration follows document order. Weighted sampling
//! walks symbols in that order, and applied combinations are reported in it.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::warn;

use crate::{DEFAULT_COLUMNS, DEFAULT_ROWS};

/// Symbol name to integer weight.
pub type WeightTable = IndexMap<String, u32>;

// =============================================================================
// ERRORS
// =============================================================================

/// Configuration errors. Fatal for a play: raised before any randomness is drawn.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// Config document is malformed or misses required fields.
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rows or columns resolved to zero.
    #[error("grid dimensions must be positive (rows={rows}, columns={columns})")]
    InvalidDimensions {
        /// Configured rows.
        rows: u32,
        /// Configured columns.
        columns: u32,
    },

    /// `probabilities.standard_symbols` is empty, so no cell can be sampled.
    #[error("no standard symbol probabilities configured")]
    NoStandardProbabilities,

    /// A probability table sums to zero.
    #[error("probability table {table} has zero total weight")]
    EmptyProbabilityTable {
        /// Which table.
        table: String,
    },

    /// Symbol `type` is neither `standard` nor `bonus`.
    #[error("unknown symbol type {raw:?}")]
    UnknownSymbolKind {
        /// The rejected value.
        raw: String,
    },

    /// Win combination `when` is neither `same_symbols` nor `linear_symbols`.
    #[error("unknown win combination rule {raw:?}")]
    UnknownWinRule {
        /// The rejected value.
        raw: String,
    },

    /// A win combination lacks the field its rule needs.
    #[error("{when} win combination is missing {field}")]
    MissingRuleField {
        /// Rule kind.
        when: &'static str,
        /// Missing field.
        field: &'static str,
    },

    /// Covered area entry is not `"column:row"`.
    #[error("invalid covered area coordinate {raw:?}, expected \"column:row\"")]
    InvalidCoordinate {
        /// The rejected value.
        raw: String,
    },
}

// =============================================================================
// SYMBOLS
// =============================================================================

/// Role of a symbol on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum SymbolKind {
    /// Takes part in pattern matching.
    Standard,
    /// Placed on exactly one cell; modifies the final reward.
    Bonus,
}

impl TryFrom<String> for SymbolKind {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if raw.eq_ignore_ascii_case("standard") {
            Ok(SymbolKind::Standard)
        } else if raw.eq_ignore_ascii_case("bonus") {
            Ok(SymbolKind::Bonus)
        } else {
            Err(ConfigError::UnknownSymbolKind { raw })
        }
    }
}

/// Effect of a bonus symbol on a winning reward.
///
/// Unknown values are kept as `Other` and leave the reward untouched, like `Miss`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BonusImpact {
    /// Reward is multiplied by the symbol's `reward_multiplier`.
    MultiplyReward,
    /// The symbol's flat `extra` is added to the reward.
    ExtraBonus,
    /// No effect.
    Miss,
    /// Unrecognized impact; no effect.
    Other(String),
}

impl From<String> for BonusImpact {
    fn from(raw: String) -> Self {
        if raw.eq_ignore_ascii_case("multiply_reward") {
            BonusImpact::MultiplyReward
        } else if raw.eq_ignore_ascii_case("extra_bonus") {
            BonusImpact::ExtraBonus
        } else if raw.eq_ignore_ascii_case("miss") {
            BonusImpact::Miss
        } else {
            BonusImpact::Other(raw)
        }
    }
}

impl From<BonusImpact> for String {
    fn from(impact: BonusImpact) -> Self {
        match impact {
            BonusImpact::MultiplyReward => "multiply_reward".to_string(),
            BonusImpact::ExtraBonus => "extra_bonus".to_string(),
            BonusImpact::Miss => "miss".to_string(),
            BonusImpact::Other(raw) => raw,
        }
    }
}

fn default_reward_multiplier() -> f64 {
    1.0
}

/// Entry of the symbol table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SymbolConfig {
    /// Per-symbol multiplier against the bet (standard) or the reward (bonus).
    #[serde(default = "default_reward_multiplier")]
    pub reward_multiplier: f64,

    /// Standard or bonus.
    #[serde(rename = "type")]
    pub kind: SymbolKind,

    /// Flat amount added by an `extra_bonus` symbol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<f64>,

    /// Bonus effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<BonusImpact>,
}

// =============================================================================
// PROBABILITIES
// =============================================================================

/// Weights for the standard symbol of one cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellProbability {
    /// Column index.
    pub column: u32,
    /// Row index.
    pub row: u32,
    /// Symbol weights, in sampling order.
    pub symbols: WeightTable,
}

/// Weights for the bonus symbol, independent of position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusProbability {
    /// Symbol weights, in sampling order.
    #[serde(default)]
    pub symbols: WeightTable,
}

/// All probability tables of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probabilities {
    /// Per-cell tables. The first entry is the fallback for unlisted cells.
    #[serde(default)]
    pub standard_symbols: Vec<CellProbability>,

    /// Bonus symbol table.
    #[serde(default)]
    pub bonus_symbols: BonusProbability,
}

impl Probabilities {
    /// Index cell tables by `(column, row)`.
    ///
    /// When a coordinate is listed twice the later entry wins.
    pub fn cell_index(&self) -> BTreeMap<(u32, u32), &WeightTable> {
        self.standard_symbols
            .iter()
            .map(|cell| ((cell.column, cell.row), &cell.symbols))
            .collect()
    }

    /// Fallback table for cells without an entry of their own.
    pub fn default_cell(&self) -> Option<&WeightTable> {
        self.standard_symbols.first().map(|cell| &cell.symbols)
    }
}

/// Sum of all weights in a table.
pub fn total_weight(table: &WeightTable) -> u64 {
    table.values().map(|&w| w as u64).sum()
}

// =============================================================================
// WIN COMBINATIONS
// =============================================================================

/// A `(column, row)` position referenced by a covered area.
///
/// Signed so that negative positions parse; they are simply never on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    /// Column index.
    pub column: i64,
    /// Row index.
    pub row: i64,
}

impl Coordinate {
    /// Create a coordinate.
    pub const fn new(column: i64, row: i64) -> Self {
        Self { column, row }
    }

    /// Parse the `"column:row"` form.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidCoordinate { raw: raw.to_string() };
        let (column, row) = raw.split_once(':').ok_or_else(invalid)?;
        let column = column.trim().parse().map_err(|_| invalid())?;
        let row = row.trim().parse().map_err(|_| invalid())?;
        Ok(Self { column, row })
    }

    /// `(row, column)` grid indices, or `None` outside `rows x columns`.
    pub fn to_cell(self, rows: usize, columns: usize) -> Option<(usize, usize)> {
        let row = usize::try_from(self.row).ok().filter(|&r| r < rows)?;
        let column = usize::try_from(self.column).ok().filter(|&c| c < columns)?;
        Some((row, column))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.column, self.row)
    }
}

impl TryFrom<String> for Coordinate {
    type Error = ConfigError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<Coordinate> for String {
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_string()
    }
}

/// How a win combination qualifies, selected by the `when` field.
///
/// `when` is matched case-insensitively, like symbol `type` and `impact`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "when", rename_all = "snake_case")]
pub enum WinRule {
    /// A standard symbol occurs at least `count` times anywhere on the board.
    SameSymbols {
        /// Occurrence threshold.
        count: u32,
    },
    /// Every position of a covered area holds the same symbol.
    LinearSymbols {
        /// Candidate shapes; any one qualifying area is enough.
        covered_areas: Vec<Vec<Coordinate>>,
    },
}

/// A named way to win.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWinCombination")]
pub struct WinCombination {
    /// Multiplier applied to the symbol's reward.
    pub reward_multiplier: f64,

    /// Exclusivity slot: per symbol, only the best combination of a group counts.
    pub group: String,

    /// Qualification rule.
    #[serde(flatten)]
    pub rule: WinRule,
}

/// Document form of a win combination, before `when` selects the rule.
#[derive(Deserialize)]
struct RawWinCombination {
    reward_multiplier: f64,
    group: String,
    when: String,
    #[serde(default)]
    count: Option<u32>,
    #[serde(default)]
    covered_areas: Option<Vec<Vec<Coordinate>>>,
}

impl TryFrom<RawWinCombination> for WinCombination {
    type Error = ConfigError;

    fn try_from(raw: RawWinCombination) -> Result<Self, Self::Error> {
        let rule = if raw.when.eq_ignore_ascii_case("same_symbols") {
            let count = raw.count.ok_or(ConfigError::MissingRuleField {
                when: "same_symbols",
                field: "count",
            })?;
            WinRule::SameSymbols { count }
        } else if raw.when.eq_ignore_ascii_case("linear_symbols") {
            let covered_areas = raw.covered_areas.ok_or(ConfigError::MissingRuleField {
                when: "linear_symbols",
                field: "covered_areas",
            })?;
            WinRule::LinearSymbols { covered_areas }
        } else {
            return Err(ConfigError::UnknownWinRule { raw: raw.when });
        };

        Ok(Self {
            reward_multiplier: raw.reward_multiplier,
            group: raw.group,
            rule,
        })
    }
}

// =============================================================================
// GAME CONFIG
// =============================================================================

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

/// Complete rules of a scratch game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Grid width.
    #[serde(default = "default_columns")]
    pub columns: u32,

    /// Grid height.
    #[serde(default = "default_rows")]
    pub rows: u32,

    /// Symbol table.
    pub symbols: IndexMap<String, SymbolConfig>,

    /// Sampling tables.
    pub probabilities: Probabilities,

    /// Named win combinations.
    #[serde(default)]
    pub win_combinations: IndexMap<String, WinCombination>,
}

impl GameConfig {
    /// Parse and validate a JSON document.
    ///
    /// Stale symbol references are logged and tolerated.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;

        for symbol in config.unknown_symbols() {
            warn!(symbol, "symbol referenced by config is missing from the symbol table");
        }

        Ok(config)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check everything a play needs before it draws any randomness.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.probabilities.standard_symbols.is_empty() {
            return Err(ConfigError::NoStandardProbabilities);
        }

        for cell in &self.probabilities.standard_symbols {
            if total_weight(&cell.symbols) == 0 {
                return Err(ConfigError::EmptyProbabilityTable {
                    table: format!("standard_symbols[{}:{}]", cell.column, cell.row),
                });
            }
        }

        if total_weight(&self.probabilities.bonus_symbols.symbols) == 0 {
            return Err(ConfigError::EmptyProbabilityTable {
                table: "bonus_symbols".to_string(),
            });
        }

        Ok(())
    }

    /// Look up a symbol.
    pub fn symbol(&self, name: &str) -> Option<&SymbolConfig> {
        self.symbols.get(name)
    }

    /// Whether `name` is a known standard symbol.
    pub fn is_standard(&self, name: &str) -> bool {
        matches!(self.symbol(name), Some(s) if s.kind == SymbolKind::Standard)
    }

    /// Grid dimensions as `(rows, columns)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows as usize, self.columns as usize)
    }

    /// Symbols named by probability tables but absent from the symbol table.
    pub fn unknown_symbols(&self) -> Vec<&str> {
        let probabilities = &self.probabilities;
        let mut unknown: Vec<&str> = probabilities
            .standard_symbols
            .iter()
            .flat_map(|cell| cell.symbols.keys())
            .chain(probabilities.bonus_symbols.symbols.keys())
            .filter(|name| !self.symbols.contains_key(name.as_str()))
            .map(String::as_str)
            .collect();
        unknown.sort_unstable();
        unknown.dedup();
        unknown
    }
}

// =============================================================================
// TESTS
// =============================================================================
