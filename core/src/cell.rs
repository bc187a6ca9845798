use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell, independent of its content.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    Questioned,
}

impl CellState {
    /// Secondary-click transition table: Hidden -> Flagged -> Questioned -> Hidden.
    ///
    /// Revealed cells have no transition.
    pub const fn next_mark(self) -> Option<Self> {
        use CellState::*;
        match self {
            Hidden => Some(Flagged),
            Flagged => Some(Questioned),
            Questioned => Some(Hidden),
            Revealed => None,
        }
    }

    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// A single mark change, reported so the owner can keep its flag counter in sync.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MarkTransition {
    pub from: CellState,
    pub to: CellState,
}

impl MarkTransition {
    /// Change to the number of flagged cells caused by this transition.
    pub const fn flag_delta(self) -> i8 {
        match (self.from, self.to) {
            (CellState::Flagged, CellState::Flagged) => 0,
            (_, CellState::Flagged) => 1,
            (CellState::Flagged, _) => -1,
            _ => 0,
        }
    }

    pub fn has_update(self) -> bool {
        self.from != self.to
    }
}

/// Grid of `CellState` parallel to a `Board`, Hidden everywhere when created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    states: Array2<CellState>,
}

impl Visibility {
    pub fn new(size: Coord2) -> Self {
        Self {
            states: Array2::default(size.to_nd_index()),
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.states)
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self[coords]
    }

    pub(crate) fn set(&mut self, coords: Coord2, state: CellState) {
        self.states[coords.to_nd_index()] = state;
    }

    /// Advances the mark cycle on `coords`, a Revealed cell stays as it is.
    pub fn toggle_mark(&mut self, coords: Coord2) -> MarkTransition {
        let from = self[coords];
        let to = from.next_mark().unwrap_or(from);
        self.set(coords, to);
        MarkTransition { from, to }
    }

    pub fn count(&self, state: CellState) -> CellCount {
        self.states.iter().filter(|&&cell| cell == state).count() as CellCount
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.states.iter_neighbors(coords)
    }

    pub fn indexed_iter(&self) -> impl Iterator<Item = (Coord2, CellState)> + '_ {
        self.states
            .indexed_iter()
            .map(|((x, y), &state)| ((x as Coord, y as Coord), state))
    }
}

impl Index<Coord2> for Visibility {
    type Output = CellState;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.states[coords.to_nd_index()]
    }
}
