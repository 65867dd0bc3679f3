//! N×N tile storage and line addressing.
//!
//! Cells are addressed by `(column, row)` and stored flat at
//! `column * N + row`, so [`GridState::flatten`] is the storage itself.

use super::error::GameError;
use super::types::{Direction, Seed, Tile};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Square grid of tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridState {
    dimension: usize,
    /// Column-major cells: `cells[column * dimension + row]`.
    cells: Vec<Tile>,
}

impl GridState {
    /// Creates an empty grid of `dimension × dimension` cells.
    #[instrument]
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            cells: vec![0; dimension * dimension],
        }
    }

    /// Builds a grid from its flattened form (`column * N + row`).
    ///
    /// # Errors
    ///
    /// Returns [`GameError::LineLength`] if `cells.len()` is not a square of
    /// `dimension`.
    pub fn from_cells(dimension: usize, cells: Vec<Tile>) -> Result<Self, GameError> {
        let expected = dimension * dimension;
        if cells.len() != expected {
            return Err(GameError::LineLength {
                expected,
                actual: cells.len(),
            });
        }
        Ok(Self { dimension, cells })
    }

    /// Grid dimension N.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of addressable cells (N²).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Flat index for `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] if either coordinate is `>= N`.
    pub fn index_of(&self, column: usize, row: usize) -> Result<usize, GameError> {
        GameError::check_range(column, self.dimension)?;
        GameError::check_range(row, self.dimension)?;
        Ok(column * self.dimension + row)
    }

    /// Returns the tile at `(column, row)`.
    pub fn get(&self, column: usize, row: usize) -> Result<Tile, GameError> {
        let index = self.index_of(column, row)?;
        Ok(self.cells[index])
    }

    /// Stores `value` at `(column, row)` verbatim.
    pub fn set(&mut self, column: usize, row: usize, value: Tile) -> Result<(), GameError> {
        let index = self.index_of(column, row)?;
        self.cells[index] = value;
        Ok(())
    }

    /// Returns the tile at a flat index.
    pub fn get_index(&self, index: usize) -> Result<Tile, GameError> {
        GameError::check_range(index, self.cells.len())?;
        Ok(self.cells[index])
    }

    /// Stores `value` at a flat index.
    pub fn set_index(&mut self, index: usize, value: Tile) -> Result<(), GameError> {
        GameError::check_range(index, self.cells.len())?;
        self.cells[index] = value;
        Ok(())
    }

    /// Places a seed tile.
    pub fn place(&mut self, seed: Seed) -> Result<(), GameError> {
        self.set_index(seed.index, seed.value)
    }

    /// Returns the row (`Left`/`Right`) or column (`Up`/`Down`) numbered
    /// `line`, ordered wall-first for `direction`.
    ///
    /// For `Right`, element 0 is column N-1; for `Down`, element 0 is row N-1.
    #[instrument(skip(self), fields(dimension = self.dimension))]
    pub fn extract_line(&self, direction: Direction, line: usize) -> Result<Vec<Tile>, GameError> {
        GameError::check_range(line, self.dimension)?;
        Ok(self.read_line(direction, line))
    }

    /// Writes a wall-first line back into the grid; inverse of
    /// [`extract_line`](Self::extract_line).
    #[instrument(skip(self, values), fields(dimension = self.dimension))]
    pub fn write_line(
        &mut self,
        direction: Direction,
        line: usize,
        values: &[Tile],
    ) -> Result<(), GameError> {
        GameError::check_range(line, self.dimension)?;
        if values.len() != self.dimension {
            return Err(GameError::LineLength {
                expected: self.dimension,
                actual: values.len(),
            });
        }
        self.store_line(direction, line, values);
        Ok(())
    }

    /// All tiles in flat order, length N².
    pub fn flatten(&self) -> Vec<Tile> {
        self.cells.clone()
    }

    /// Sets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
    }

    /// Flat indices of empty cells, ascending.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, value)| **value == 0)
            .map(|(index, _)| index)
            .collect()
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|value| **value != 0).count()
    }

    /// Largest tile on the grid (0 when empty).
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|value| u64::from(*value)).sum()
    }

    /// Flat index of the `offset`-th cell of `line`, counted from the wall.
    fn line_cell(&self, direction: Direction, line: usize, offset: usize) -> usize {
        let n = self.dimension;
        let along = if direction.toward_high_end() {
            n - 1 - offset
        } else {
            offset
        };
        let (column, row) = if direction.is_horizontal() {
            (along, line)
        } else {
            (line, along)
        };
        column * n + row
    }

    /// Reads a line assumed to be in range.
    pub(super) fn read_line(&self, direction: Direction, line: usize) -> Vec<Tile> {
        (0..self.dimension)
            .map(|offset| self.cells[self.line_cell(direction, line, offset)])
            .collect()
    }

    /// Writes a line assumed to be in range and of length N.
    pub(super) fn store_line(&mut self, direction: Direction, line: usize, values: &[Tile]) {
        for (offset, value) in values.iter().enumerate() {
            let index = self.line_cell(direction, line, offset);
            self.cells[index] = *value;
        }
    }

    /// Formats the grid with row 0 on top, one row per line.
    pub fn display(&self) -> String {
        let width = self.max_tile().to_string().len().max(1);
        (0..self.dimension)
            .map(|row| {
                (0..self.dimension)
                    .map(|column| match self.cells[column * self.dimension + row] {
                        0 => format!("{:>width$}", ".", width = width),
                        value => format!("{:>width$}", value, width = width),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::new(super::types::DEFAULT_DIMENSION)
    }
}
