//! Board logic for a grid-based mine-clearing puzzle.
//!
//! A [`GameSession`] owns a [`Grid`] of [`Cell`]s, places mines on the first reveal so that the
//! opening move is always safe, cascades reveals over empty regions and decides victory or defeat.
//! Every state change is queued as an [`Event`] for whatever presents the board.

#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use grid::*;
pub use session::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod event;
mod generator;
mod grid;
mod session;
mod types;

/// Largest exclusion zone around the opening move: the cell itself plus eight neighbors.
pub const MAX_OPENING_CELLS: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub columns: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        Self {
            rows,
            columns,
            mines,
        }
    }

    pub fn new(rows: Coord, columns: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(rows, columns, mines);
        config.validate()?;
        Ok(config)
    }

    /// Forces arbitrary input into a valid configuration, for sliders and free-form settings.
    pub fn clamped(rows: Coord, columns: Coord, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let columns = columns.clamp(1, Coord::MAX);
        let mines = mines.min(mult(rows, columns) - 1);
        Self::new_unchecked(rows, columns, mines)
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 || self.columns < 1 {
            return Err(GameError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }

        let cells = self.total_cells();
        if self.mines >= cells {
            return Err(GameError::InvalidMineCount {
                mines: self.mines,
                cells,
            });
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.columns)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Whether the mines still fit when the full 3x3 opening is kept clear, wherever the first
    /// click lands.
    pub const fn guarantees_opening(&self) -> bool {
        self.mines < self.total_cells().saturating_sub(MAX_OPENING_CELLS)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}
