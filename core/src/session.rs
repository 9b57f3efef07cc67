use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Where the session stands with respect to mine placement.
///
/// Valid transitions:
/// - NotStarted -> Placing -> Playing
/// - Placing -> NotStarted, only when placement fails
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No cell revealed yet, mines do not exist.
    #[default]
    NotStarted,
    /// The first reveal is distributing mines.
    Placing,
    /// Mines are placed.
    Playing,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}

impl Outcome {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// One game from the first click to victory or defeat.
///
/// Mines are placed lazily on the first reveal, keeping the clicked cell and its neighbors clear.
/// Every state change is recorded as an [`Event`], which the presentation layer collects with
/// [`GameSession::drain_events`].
#[derive(Clone, Debug)]
pub struct GameSession<P = RandomMinePlacer> {
    config: GameConfig,
    grid: Grid,
    phase: Phase,
    outcome: Outcome,
    mines: BTreeSet<Coord2>,
    ledger: Ledger,
    events: EventQueue,
    detonated: Option<Coord2>,
    placer: P,
}

impl GameSession {
    /// Starts a session whose layout is derived from `seed` and the first revealed cell.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_placer(config, RandomMinePlacer::new(seed))
    }
}

impl<P: MinePlacer> GameSession<P> {
    pub fn with_placer(config: GameConfig, placer: P) -> Result<Self> {
        config.validate()?;
        let grid = Grid::build(config.rows, config.columns)?;
        log::debug!(
            "New session {}x{} with {} mines",
            config.rows,
            config.columns,
            config.mines
        );

        Ok(Self {
            config,
            grid,
            phase: Phase::NotStarted,
            outcome: Outcome::InProgress,
            mines: BTreeSet::new(),
            ledger: Ledger::default(),
            events: EventQueue::new(),
            detonated: None,
            placer,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        self.grid.cell_at(coords)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_finished()
    }

    /// Mined cells, empty until the first reveal.
    pub fn mines(&self) -> &BTreeSet<Coord2> {
        &self.mines
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn revealed_count(&self) -> CellCount {
        self.ledger.revealed_count()
    }

    pub fn flag_count(&self) -> CellCount {
        self.ledger.flag_count()
    }

    /// Mines not accounted for by a flag, negative when the player placed too many.
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.ledger.flag_count() as isize)
    }

    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Takes every event recorded since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.outcome.is_finished() || !self.grid[coords].state().is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if matches!(self.phase, Phase::NotStarted) {
            self.place_mines(coords)?;
        }

        let outcome =
            RevealEngine::new(&mut self.grid, &mut self.ledger, &mut self.events).reveal(coords);

        Ok(match outcome {
            RevealOutcome::HitMine => {
                self.detonated = Some(coords);
                self.defeat();
                RevealOutcome::HitMine
            }
            RevealOutcome::Revealed => {
                if self.check_victory() {
                    RevealOutcome::Won
                } else {
                    RevealOutcome::Revealed
                }
            }
            outcome => outcome,
        })
    }

    /// Flags a hidden cell or unflags a flagged one. Ignored after the game ended.
    ///
    /// Flags placed before the first reveal are reported with `is_mine: false`, since no mines
    /// exist yet, and are sorted into correct and incorrect once the mines are placed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.outcome.is_finished() {
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = RevealEngine::new(&mut self.grid, &mut self.ledger, &mut self.events)
            .toggle_flag(coords);
        if outcome.has_update() {
            self.check_victory();
        }
        Ok(outcome)
    }

    /// Gives up: detonates a remaining mine and runs the defeat sequence.
    pub fn quit(&mut self) -> RevealOutcome {
        if !matches!(self.phase, Phase::Playing) || self.outcome.is_finished() {
            return RevealOutcome::NoChange;
        }

        let target = self
            .mines
            .iter()
            .copied()
            .find(|&coords| !self.grid[coords].state().is_flagged())
            .or_else(|| self.mines.first().copied());
        let Some(coords) = target else {
            return RevealOutcome::NoChange;
        };

        log::debug!("Player quit");
        RevealEngine::new(&mut self.grid, &mut self.ledger, &mut self.events).detonate(coords);
        self.detonated = Some(coords);
        self.defeat();
        RevealOutcome::HitMine
    }

    fn place_mines(&mut self, first: Coord2) -> Result<()> {
        let zone = exclusion_zone(&self.grid, first)?;
        self.phase = Phase::Placing;

        let placed = match self.placer.place(&mut self.grid, &zone, self.config.mines) {
            Err(GameError::InsufficientSpace { .. }) => {
                log::warn!("Cannot keep the opening clear, only the first cell will be safe");
                self.placer
                    .place(&mut self.grid, &BTreeSet::from([first]), self.config.mines)
            }
            placed => placed,
        };

        match placed {
            Ok(mines) => {
                self.mines = mines;
                self.ledger.classify_flags(&self.mines);
                self.phase = Phase::Playing;
                self.events.push(Event::Initialized);
                Ok(())
            }
            Err(err) => {
                self.phase = Phase::NotStarted;
                Err(err)
            }
        }
    }

    fn check_victory(&mut self) -> bool {
        if self.outcome.is_finished() {
            return false;
        }

        let all_safe_revealed = self.ledger.revealed_count() == self.config.safe_cells();
        if all_safe_revealed && self.ledger.incorrect_flags().is_empty() {
            self.outcome = Outcome::Victory;
            log::debug!("Victory");
            self.events.push(Event::Victory);
            RevealEngine::new(&mut self.grid, &mut self.ledger, &mut self.events)
                .expose_mines(&self.mines, None);
            true
        } else {
            false
        }
    }

    fn defeat(&mut self) {
        if self.outcome.is_finished() {
            return;
        }

        self.outcome = Outcome::Defeat;
        log::debug!("Defeat, triggered at {:?}", self.detonated);
        self.events.push(Event::Defeat);

        RevealEngine::new(&mut self.grid, &mut self.ledger, &mut self.events)
            .expose_mines(&self.mines, self.detonated);
    }
}
