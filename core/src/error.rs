use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid dimensions {rows}x{columns}, rows and columns must be at least 1")]
    InvalidDimensions { rows: Coord, columns: Coord },
    #[error("Too many mines, requested {mines} but the grid only has {cells} cells")]
    InvalidMineCount { mines: CellCount, cells: CellCount },
    #[error("Not enough room for {mines} mines, only {available} candidate cells")]
    InsufficientSpace {
        mines: CellCount,
        available: CellCount,
    },
    #[error("Coordinates ({row}, {column}) are out of bounds")]
    OutOfBounds { row: Coord, column: Coord },
}

pub type Result<T> = core::result::Result<T, GameError>;
