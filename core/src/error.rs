use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one column and one row")]
    InvalidSize,
    #[error("Too many mines, requested {requested} but only {capacity} cells")]
    TooManyMines { requested: CellCount, capacity: CellCount },
    #[error("Layout cell size must be positive")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_many_mines_display() {
        let err = GameError::TooManyMines {
            requested: 82,
            capacity: 81,
        };
        assert_eq!(err.to_string(), "Too many mines, requested 82 but only 81 cells");
    }
}
