use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// A cell as the player sees it, content only once revealed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Questioned,
    Revealed(CellContent),
}

impl CellView {
    pub const fn new(state: CellState, content: CellContent) -> Self {
        match state {
            CellState::Hidden => Self::Hidden,
            CellState::Flagged => Self::Flagged,
            CellState::Questioned => Self::Questioned,
            CellState::Revealed => Self::Revealed(content),
        }
    }
}

/// Where the renderer draws the end-of-game affordances; clicks inside are reported back as pointer events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub restart: Rect,
    pub exit: Rect,
}

/// Read-only copy of everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub cells: Array2<CellView>,
    pub status: GameStatus,
    pub remaining_mines: isize,
    pub elapsed: Duration,
    pub triggered_mine: Option<Coord2>,
    pub controls: Option<Controls>,
}

impl Snapshot {
    pub fn from_session<C: Clock>(session: &Session<C>) -> Self {
        let size = session.size();
        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            session.cell_view((x as Coord, y as Coord))
        });

        Self {
            size,
            cells,
            status: session.status(),
            remaining_mines: session.remaining_mines(),
            elapsed: session.elapsed(),
            triggered_mine: session.triggered_mine(),
            controls: session.controls(),
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> CellView {
        self.cells[coords.to_nd_index()]
    }

    /// Whole seconds for the timer display.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed.as_secs()
    }
}
