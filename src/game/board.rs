//! Board Generation
//!
//! Fills a `rows x columns` grid by weighted sampling, one draw per cell,
//! then places a single independently sampled bonus symbol on a random cell.
//!
//! Draw order is fixed: cells row-major, bonus symbol, bonus row, bonus column.
//! Replaying a seed therefore reproduces the board exactly.

use serde::{Serialize, Deserialize};
use tracing::debug;
#[cfg(feature = "debug-tracing")]
use tracing::trace;

use crate::core::hash::{Digest, StateHasher};
use crate::core::rng::RandomSource;
use crate::game::config::{total_weight, ConfigError, GameConfig, WeightTable};

/// A `(row, column)` position on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub column: usize,
}

impl CellPosition {
    /// Create a position.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// A generated grid. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    matrix: Vec<Vec<String>>,
    bonus_symbol: String,
    bonus_cell: CellPosition,
}

impl Board {
    /// Assemble a board from an explicit grid.
    ///
    /// `matrix` is rows of columns; `bonus_cell` should hold `bonus_symbol`.
    pub fn new(matrix: Vec<Vec<String>>, bonus_symbol: impl Into<String>, bonus_cell: CellPosition) -> Self {
        Self {
            matrix,
            bonus_symbol: bonus_symbol.into(),
            bonus_cell,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.matrix.len()
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    /// Rows of columns.
    pub fn matrix(&self) -> &[Vec<String>] {
        &self.matrix
    }

    /// The sampled bonus symbol.
    pub fn bonus_symbol(&self) -> &str {
        &self.bonus_symbol
    }

    /// Where the bonus symbol was placed.
    pub fn bonus_cell(&self) -> CellPosition {
        self.bonus_cell
    }

    /// Symbol at a cell, `None` outside the grid.
    pub fn symbol_at(&self, row: usize, column: usize) -> Option<&str> {
        self.matrix.get(row)?.get(column).map(String::as_str)
    }

    /// Every symbol, row-major.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.matrix.iter().flatten().map(String::as_str)
    }

    /// Consume the board, returning its grid.
    pub fn into_matrix(self) -> Vec<Vec<String>> {
        self.matrix
    }

    /// Digest of the grid and bonus placement.
    pub fn digest(&self) -> Digest {
        let mut hasher = StateHasher::for_board();
        hasher.update_u64(self.rows() as u64);
        hasher.update_u64(self.columns() as u64);
        for symbol in self.symbols() {
            hasher.update_str(symbol);
        }
        hasher.update_u64(self.bonus_cell.row as u64);
        hasher.update_u64(self.bonus_cell.column as u64);
        hasher.update_str(&self.bonus_symbol);
        hasher.finalize()
    }
}

/// Draw one symbol from a weight table.
///
/// Draws `d` uniformly from `[1, total]` and returns the first symbol, in table
/// order, whose cumulative weight reaches `d`. Each symbol is picked with
/// probability `weight / total`. Returns `None` only for a zero-weight table,
/// in which case nothing is drawn.
pub fn weighted_pick<'a, R: RandomSource + ?Sized>(table: &'a WeightTable, rng: &mut R) -> Option<&'a str> {
    let total = total_weight(table);
    if total == 0 {
        return None;
    }

    let draw = rng.next_in_range(1, total);
    let mut cumulative = 0u64;
    table
        .iter()
        .find(|&(_, &weight)| {
            cumulative += weight as u64;
            cumulative >= draw
        })
        .map(|(symbol, _)| symbol.as_str())
}

/// Generate a board for one play.
///
/// Cells without their own probability entry use the first configured entry.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the config cannot be played. Validation runs
/// first, so a failing play consumes no randomness.
pub fn generate<R: RandomSource + ?Sized>(config: &GameConfig, rng: &mut R) -> Result<Board, ConfigError> {
    config.validate()?;

    let (rows, columns) = config.dimensions();
    let probabilities = &config.probabilities;
    let cells = probabilities.cell_index();
    let fallback = probabilities
        .default_cell()
        .ok_or(ConfigError::NoStandardProbabilities)?;

    let mut matrix = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut line = Vec::with_capacity(columns);
        for column in 0..columns {
            let table = cells
                .get(&(column as u32, row as u32))
                .copied()
                .unwrap_or(fallback);
            let symbol = weighted_pick(table, rng).ok_or_else(|| ConfigError::EmptyProbabilityTable {
                table: format!("standard_symbols[{column}:{row}]"),
            })?;

            #[cfg(feature = "debug-tracing")]
            trace!(row, column, symbol, "cell drawn");

            line.push(symbol.to_string());
        }
        matrix.push(line);
    }

    let bonus_symbol = weighted_pick(&probabilities.bonus_symbols.symbols, rng)
        .ok_or_else(|| ConfigError::EmptyProbabilityTable {
            table: "bonus_symbols".to_string(),
        })?
        .to_string();

    let bonus_cell = CellPosition::new(
        rng.next_below(rows as u64) as usize,
        rng.next_below(columns as u64) as usize,
    );
    matrix[bonus_cell.row][bonus_cell.column] = bonus_symbol.clone();

    debug!(
        rows,
        columns,
        bonus = %bonus_symbol,
        bonus_row = bonus_cell.row,
        bonus_column = bonus_cell.column,
        "board generated"
    );

    Ok(Board::new(matrix, bonus_symbol, bonus_cell))
}

// =============================================================================
// TESTS
// =============================================================================
