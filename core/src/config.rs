use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated constructor, a board needs at least one cell and can be completely filled with mines.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }
        let capacity = self.total_cells();
        if self.mines > capacity {
            return Err(GameError::TooManyMines {
                requested: self.mines,
                capacity,
            });
        }
        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Preset board settings offered by the difficulty selection screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn config(self) -> GameConfig {
        use Difficulty::*;
        match self {
            Easy => GameConfig::new_unchecked((9, 9), 10),
            Medium => GameConfig::new_unchecked((16, 16), 40),
            Hard => GameConfig::new_unchecked((30, 16), 99),
        }
    }

    pub const fn label(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy",
            Medium => "Medium",
            Hard => "Hard",
        }
    }
}

/// Axis-aligned pixel rectangle, `contains` is half-open on the far edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn contains(&self, (px, py): (i32, i32)) -> bool {
        let (px, py) = (px as i64, py as i64);
        let (x, y) = (self.x as i64, self.y as i64);
        px >= x && py >= y && px < x + self.width as i64 && py < y + self.height as i64
    }
}

/// Pixel geometry the renderer draws with, used to map raw pointer positions back onto the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub cell_size: i32,
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_size: 25,
            top: 40,
            bottom: 10,
            left: 10,
            right: 10,
        }
    }
}

impl Layout {
    /// Keeps the widest board (255 cells plus both margins) well inside `i32` pixel space.
    pub const MAX_CELL_SIZE: i32 = 1 << 12;
    pub const MAX_MARGIN: i32 = 1 << 16;

    pub fn validate(&self) -> Result<()> {
        let margins = [self.top, self.bottom, self.left, self.right];
        if !(1..=Self::MAX_CELL_SIZE).contains(&self.cell_size)
            || margins
                .iter()
                .any(|margin| !(0..=Self::MAX_MARGIN).contains(margin))
        {
            return Err(GameError::InvalidLayout);
        }
        Ok(())
    }

    /// Maps a pixel position to the cell under it, `floor((pixel - margin) / cell_size)` per axis.
    ///
    /// Positions too far off the grid to subtract the margin from are simply off the grid.
    pub fn cell_at(&self, (px, py): (i32, i32), size: Coord2) -> Option<Coord2> {
        let grid_x = px.checked_sub(self.left)?.checked_div_euclid(self.cell_size)?;
        let grid_y = py.checked_sub(self.top)?.checked_div_euclid(self.cell_size)?;
        checked_coords(grid_x, grid_y, size)
    }

    /// Area covered by the grid itself, its origin is the top-left margin corner.
    pub fn board_rect(&self, (cols, rows): Coord2) -> Rect {
        Rect {
            x: self.left,
            y: self.top,
            width: i32::from(cols) * self.cell_size,
            height: i32::from(rows) * self.cell_size,
        }
    }

    fn control_height(&self) -> i32 {
        (self.top * 3 / 5).max(1)
    }

    fn control_width(&self) -> i32 {
        self.cell_size * 3
    }

    /// "Play again" affordance, left-aligned inside the top margin.
    pub fn restart_region(&self, _size: Coord2) -> Rect {
        let height = self.control_height();
        Rect {
            x: self.left,
            y: (self.top - height) / 2,
            width: self.control_width(),
            height,
        }
    }

    /// "Back to menu" affordance, right-aligned with the grid inside the top margin.
    pub fn exit_region(&self, size: Coord2) -> Rect {
        let height = self.control_height();
        let board = self.board_rect(size);
        let width = self.control_width();
        Rect {
            x: board.x + board.width - width,
            y: (self.top - height) / 2,
            width,
            height,
        }
    }
}
