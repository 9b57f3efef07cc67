use alloc::collections::{BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Which cells the player has opened and flagged so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    revealed: BTreeSet<Coord2>,
    correct_flags: BTreeSet<Coord2>,
    incorrect_flags: BTreeSet<Coord2>,
}

impl Ledger {
    /// Safe cells revealed by the player. Never contains a mine.
    pub fn revealed(&self) -> &BTreeSet<Coord2> {
        &self.revealed
    }

    pub fn correct_flags(&self) -> &BTreeSet<Coord2> {
        &self.correct_flags
    }

    pub fn incorrect_flags(&self) -> &BTreeSet<Coord2> {
        &self.incorrect_flags
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed.len() as CellCount
    }

    pub fn flag_count(&self) -> CellCount {
        (self.correct_flags.len() + self.incorrect_flags.len()) as CellCount
    }

    /// Re-sorts flags placed before the mines existed, which were all filed as incorrect.
    pub(crate) fn classify_flags(&mut self, mines: &BTreeSet<Coord2>) {
        let found: BTreeSet<Coord2> = self.incorrect_flags.intersection(mines).copied().collect();
        for coords in found {
            self.incorrect_flags.remove(&coords);
            self.correct_flags.insert(coords);
        }
    }
}

/// Per-cell reveal/flag state machine.
///
/// The engine does not know about session phases or outcomes: callers only hand it cells that
/// are valid for the current game, it applies the transition, keeps the [`Ledger`] in sync and
/// records every change in the [`EventQueue`] in the order it happens.
pub struct RevealEngine<'a> {
    grid: &'a mut Grid,
    ledger: &'a mut Ledger,
    events: &'a mut EventQueue,
}

impl<'a> RevealEngine<'a> {
    pub fn new(grid: &'a mut Grid, ledger: &'a mut Ledger, events: &'a mut EventQueue) -> Self {
        Self {
            grid,
            ledger,
            events,
        }
    }

    /// Reveals a hidden cell, cascading over zero-count regions. Flagged and revealed cells are
    /// left alone.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = &self.grid[coords];

        match (cell.state(), cell.is_mine()) {
            (CellState::Hidden, true) => {
                self.detonate(coords);
                RevealOutcome::HitMine
            }
            (CellState::Hidden, false) => {
                if self.open(coords) == 0 {
                    self.flood(coords);
                }
                RevealOutcome::Revealed
            }
            _ => RevealOutcome::NoChange,
        }
    }

    /// Opens a mine, regardless of what the player marked on it. A flag on the mine is lifted
    /// first, with the usual `Unflagged` and `FlagCountChanged` events.
    pub fn detonate(&mut self, coords: Coord2) {
        if self.ledger.correct_flags.remove(&coords) {
            self.events.push(Event::Unflagged {
                cell: coords,
                is_mine: true,
            });
            self.events.push(Event::FlagCountChanged {
                total: self.ledger.flag_count(),
            });
        }
        self.grid[coords].set_state(CellState::Revealed);
        log::debug!("Mine detonated at {:?}", coords);
        self.events.push(Event::Detonated { cell: coords });
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let is_mine = self.grid[coords].is_mine();

        match self.grid[coords].state() {
            CellState::Hidden => {
                self.grid[coords].set_state(CellState::Flagged);
                if is_mine {
                    self.ledger.correct_flags.insert(coords);
                } else {
                    self.ledger.incorrect_flags.insert(coords);
                }
                self.events.push(Event::Flagged {
                    cell: coords,
                    is_mine,
                });
            }
            CellState::Flagged => {
                self.grid[coords].set_state(CellState::Hidden);
                self.ledger.correct_flags.remove(&coords);
                self.ledger.incorrect_flags.remove(&coords);
                self.events.push(Event::Unflagged {
                    cell: coords,
                    is_mine,
                });
            }
            CellState::Revealed => return MarkOutcome::NoChange,
        }

        self.events.push(Event::FlagCountChanged {
            total: self.ledger.flag_count(),
        });
        MarkOutcome::Changed
    }

    /// Shows the full layout once the game is over: every mine except `skip` is reported,
    /// unflagged ones are force-revealed, then every wrong flag is reported.
    pub fn expose_mines(&mut self, mines: &BTreeSet<Coord2>, skip: Option<Coord2>) {
        for &coords in mines.iter().filter(|&&coords| Some(coords) != skip) {
            let flagged = self.grid[coords].state().is_flagged();
            if !flagged {
                self.grid[coords].set_state(CellState::Revealed);
            }
            self.events.push(Event::MineExposed {
                cell: coords,
                flagged,
            });
        }

        for &coords in &self.ledger.incorrect_flags {
            self.events.push(Event::FalseFlag { cell: coords });
        }
    }

    fn open(&mut self, coords: Coord2) -> u8 {
        let cell = &mut self.grid[coords];
        cell.set_state(CellState::Revealed);
        let adjacent_mines = cell.adjacent_mine_count();

        self.ledger.revealed.insert(coords);
        self.events.push(Event::Revealed {
            cell: coords,
            adjacent_mines,
        });
        adjacent_mines
    }

    fn flood(&mut self, coords: Coord2) {
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit: VecDeque<_> = self.hidden_neighbors(coords).collect();
        log::trace!(
            "Starting flood-fill from {:?}, initial neighbors: {:?}",
            coords,
            to_visit
        );

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let cell = &self.grid[visit_coords];
            if !cell.state().is_hidden() || cell.is_mine() {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            if self.open(visit_coords) == 0 {
                to_visit.extend(
                    self.hidden_neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    fn hidden_neighbors(&self, coords: Coord2) -> impl Iterator<Item = Coord2> + '_ {
        self.grid[coords]
            .neighbors()
            .iter()
            .copied()
            .filter(|&pos| self.grid[pos].state().is_hidden())
    }
}
