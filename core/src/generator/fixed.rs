use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;

/// Places mines from a predetermined layout, for curated boards and reproducible scenarios.
///
/// Layout cells that fall inside the opening's exclusion zone are skipped, the shortfall is made
/// up from the remaining candidates in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedMinePlacer {
    layout: BTreeSet<Coord2>,
}

impl FixedMinePlacer {
    pub fn new(layout: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            layout: layout.into_iter().collect(),
        }
    }

    pub fn layout(&self) -> &BTreeSet<Coord2> {
        &self.layout
    }
}

impl MinePlacer for FixedMinePlacer {
    fn select(&mut self, candidates: Vec<Coord2>, count: usize) -> Vec<Coord2> {
        let mut selected: Vec<Coord2> = self
            .layout
            .iter()
            .copied()
            .filter(|coords| candidates.binary_search(coords).is_ok())
            .take(count)
            .collect();

        if selected.len() < self.layout.len().min(count) {
            log::debug!(
                "{} layout mines fell inside the opening, topping up",
                self.layout.len().min(count) - selected.len()
            );
        }

        for coords in candidates {
            if selected.len() >= count {
                break;
            }
            if !self.layout.contains(&coords) {
                selected.push(coords);
            }
        }

        selected
    }
}
