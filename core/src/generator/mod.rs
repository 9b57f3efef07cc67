use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy for distributing mines over a [`Grid`] once the opening move is known.
pub trait MinePlacer {
    /// Picks `count` distinct cells out of `candidates`.
    ///
    /// `candidates` is in row-major order and holds at least `count` entries.
    fn select(&mut self, candidates: Vec<Coord2>, count: usize) -> Vec<Coord2>;

    /// Places `count` mines on cells outside of `excluded` and refreshes every adjacent mine count.
    fn place(
        &mut self,
        grid: &mut Grid,
        excluded: &BTreeSet<Coord2>,
        count: CellCount,
    ) -> Result<BTreeSet<Coord2>> {
        let candidates: Vec<Coord2> = grid
            .iter()
            .map(Cell::coords)
            .filter(|coords| !excluded.contains(coords))
            .collect();

        let available = candidates.len() as CellCount;
        if count > available {
            return Err(GameError::InsufficientSpace {
                mines: count,
                available,
            });
        }

        let mines: BTreeSet<Coord2> = self
            .select(candidates, count.into())
            .into_iter()
            .filter(|coords| !excluded.contains(coords))
            .collect();

        // double check mine count
        if mines.len() != usize::from(count) {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                mines.len(),
                count
            );
        }

        for &coords in &mines {
            grid[coords].set_mine(true);
        }
        grid.count_adjacent_mines();

        log::debug!(
            "Placed {} mines, {} cells kept clear",
            mines.len(),
            excluded.len()
        );
        Ok(mines)
    }
}

/// The cell at `coords` plus all of its neighbors.
pub fn exclusion_zone(grid: &Grid, coords: Coord2) -> Result<BTreeSet<Coord2>> {
    let mut zone: BTreeSet<Coord2> = grid.neighbors(coords)?.iter().copied().collect();
    zone.insert(coords);
    Ok(zone)
}
