use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owns every [`Cell`] of a board together with the 8-neighbor adjacency between them.
///
/// The shape is fixed at construction, only the cells themselves mutate afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    pub fn build(rows: Coord, columns: Coord) -> Result<Self> {
        if rows < 1 || columns < 1 {
            return Err(GameError::InvalidDimensions { rows, columns });
        }

        let cells = Array2::from_shape_fn(
            (usize::from(rows), usize::from(columns)),
            |(row, column)| Cell::new((row as Coord, column as Coord)),
        );
        let mut grid = Self { cells };
        grid.connect_neighbors();
        log::trace!("Built {}x{} grid", rows, columns);
        Ok(grid)
    }

    fn connect_neighbors(&mut self) {
        let size = self.size();
        for cell in self.cells.iter_mut() {
            cell.connect(NeighborIter::new(cell.coords(), size));
        }
    }

    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn columns(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, columns) = self.size();
        if coords.0 < rows && coords.1 < columns {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                row: coords.0,
                column: coords.1,
            })
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    pub fn neighbors(&self, coords: Coord2) -> Result<&[Coord2]> {
        Ok(self.cell_at(coords)?.neighbors())
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Recomputes every cell's adjacent mine count from the current mine layout.
    pub(crate) fn count_adjacent_mines(&mut self) {
        let counts: Vec<u8> = self
            .cells
            .iter()
            .map(|cell| {
                cell.neighbors()
                    .iter()
                    .filter(|&&pos| self[pos].is_mine())
                    .count() as u8
            })
            .collect();

        for (cell, count) in self.cells.iter_mut().zip(counts) {
            cell.set_adjacent_mine_count(count);
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Grid {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
