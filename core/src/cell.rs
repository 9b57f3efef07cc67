use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

impl CellState {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

/// One grid position.
///
/// Neighbors are stored as coordinates into the owning [`Grid`], they are filled in once when the
/// grid is built and never change afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    is_mine: bool,
    state: CellState,
    adjacent_mines: u8,
    neighbors: SmallVec<[Coord2; 8]>,
}

impl Cell {
    pub(crate) fn new(coords: Coord2) -> Self {
        Self {
            coords,
            is_mine: false,
            state: CellState::Hidden,
            adjacent_mines: 0,
            neighbors: SmallVec::new(),
        }
    }

    pub fn coords(&self) -> Coord2 {
        self.coords
    }

    pub fn row(&self) -> Coord {
        self.coords.0
    }

    pub fn column(&self) -> Coord {
        self.coords.1
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    /// Number of mined neighbors. Only meaningful once mines have been placed.
    pub fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
    }

    pub fn neighbors(&self) -> &[Coord2] {
        &self.neighbors
    }

    pub(crate) fn connect(&mut self, neighbors: impl IntoIterator<Item = Coord2>) {
        debug_assert!(self.neighbors.is_empty(), "neighbors are connected once");
        self.neighbors.extend(neighbors);
    }

    pub(crate) fn set_mine(&mut self, is_mine: bool) {
        self.is_mine = is_mine;
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub(crate) fn set_adjacent_mine_count(&mut self, count: u8) {
        self.adjacent_mines = count;
    }
}
