use core::ops::BitOr;
use std::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    Continue,
    Loss,
    Win,
}

impl RevealOutcome {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Loss | Self::Win)
    }
}

/// Used to merge outcomes, a loss always wins over anything else.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (Loss, _) => Loss,
            (_, Loss) => Loss,
            (Win, _) => Win,
            (_, Win) => Win,
            (Continue, Continue) => Continue,
        }
    }
}

/// Whether `coords` would be opened by a reveal, Revealed and Flagged cells are left alone.
pub fn is_revealable(visibility: &Visibility, coords: Coord2) -> bool {
    !matches!(visibility[coords], CellState::Revealed | CellState::Flagged)
}

/// Reveals `coords` and cascades through connected empty cells.
///
/// Only `Empty` cells propagate, and only into Hidden neighbors, so the cascade stops at the first ring of hints and
/// never crosses a flag or question mark. A mine is still marked Revealed but turns the outcome into a loss.
/// Out-of-range coordinates and cells that are not revealable are no-ops.
pub fn reveal(coords: Coord2, board: &Board, visibility: &mut Visibility) -> RevealOutcome {
    use RevealOutcome::*;

    if board.validate_coords(coords).is_err() || !is_revealable(visibility, coords) {
        return Continue;
    }

    let mut outcome = Continue;
    let mut to_visit = VecDeque::from([coords]);

    while let Some(visit_coords) = to_visit.pop_front() {
        if visibility[visit_coords].is_revealed() {
            continue;
        }
        visibility.set(visit_coords, CellState::Revealed);

        match board[visit_coords] {
            CellContent::Mine => {
                log::trace!("Revealed mine at {:?}", visit_coords);
                outcome = outcome | Loss;
            }
            CellContent::Hint(count) => {
                log::trace!("Revealed hint {} at {:?}", count, visit_coords);
            }
            CellContent::Empty => {
                to_visit.extend(
                    visibility
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| visibility[pos].is_hidden()),
                );
                log::trace!(
                    "Revealed empty cell at {:?}, queue: {}",
                    visit_coords,
                    to_visit.len()
                );
            }
        }
    }

    if outcome == Continue && is_cleared(board, visibility) {
        Win
    } else {
        outcome
    }
}

/// Every non-mine cell is something other than Hidden.
///
/// Flagged or Questioned safe cells count as cleared.
pub fn is_cleared(board: &Board, visibility: &Visibility) -> bool {
    visibility
        .indexed_iter()
        .all(|(coords, state)| board.contains_mine(coords) || !state.is_hidden())
}
