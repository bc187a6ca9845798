use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds, independent of whether the player can see it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellContent {
    Mine,
    #[default]
    Empty,
    /// Number of adjacent mines, always in `1..=8`.
    Hint(u8),
}

impl CellContent {
    /// Content of a non-mine cell with `count` adjacent mines, zero is `Empty`.
    pub const fn from_count(count: u8) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Hint(count)
        }
    }

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Adjacent mine count for safe cells, `None` for mines.
    pub const fn hint(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Empty => Some(0),
            Self::Hint(count) => Some(count),
        }
    }
}

/// Mine placement plus precomputed hints for every cell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<CellContent>,
    mine_count: CellCount,
}

impl Board {
    /// Builds the board from a mine mask, each mine bumps the hint of every neighbor.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let mut counts: Array2<u8> = Array2::zeros(mine_mask.dim());
        let mut mine_count: CellCount = 0;

        for ((x, y), _) in mine_mask.indexed_iter().filter(|(_, is_mine)| **is_mine) {
            mine_count += 1;
            for pos in mine_mask.iter_neighbors((x as Coord, y as Coord)) {
                counts[pos.to_nd_index()] += 1;
            }
        }

        let cells = Array2::from_shape_fn(mine_mask.dim(), |index| {
            if mine_mask[index] {
                CellContent::Mine
            } else {
                CellContent::from_count(counts[index])
            }
        });

        Self { cells, mine_count }
    }

    /// Builds a board from an explicit mine set, duplicates collapse into one mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(size, 0)?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.cells)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.size().0, self.size().1)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn content_at(&self, coords: Coord2) -> CellContent {
        self[coords]
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// Mines around `coords`, counted directly rather than read from the stored hint.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count() as u8
    }

    /// All mine positions in column-major order.
    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, content)| content.is_mine())
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Board {
    type Output = CellContent;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
