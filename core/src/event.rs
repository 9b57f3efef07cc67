use alloc::collections::VecDeque;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// State change notification for the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Mines were just placed, the grid is playable.
    Initialized,
    Revealed {
        cell: Coord2,
        adjacent_mines: u8,
    },
    Flagged {
        cell: Coord2,
        is_mine: bool,
    },
    Unflagged {
        cell: Coord2,
        is_mine: bool,
    },
    /// The losing cell.
    Detonated { cell: Coord2 },
    Victory,
    Defeat,
    /// A mine shown after defeat, `flagged` tells whether the player had found it.
    MineExposed { cell: Coord2, flagged: bool },
    /// A flag that turned out to sit on a safe cell, reported after defeat.
    FalseFlag { cell: Coord2 },
    FlagCountChanged { total: CellCount },
}

/// Ordered buffer of [`Event`]s, appended by the session and drained by the collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, event: Event) {
        log::trace!("Event: {:?}", event);
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Takes every pending event, oldest first.
    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}
