use ndarray::Array2;

use super::*;

/// Uniform placement: `mines` distinct cells drawn without replacement from the whole board.
///
/// The seed is the only source of randomness, the same seed and config always produce the same board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Board {
        use rand::prelude::*;
        use rand::seq::index;

        let total_cells = usize::from(config.total_cells());
        let mut mines = usize::from(config.mines);

        if mines > total_cells {
            log::warn!(
                "Board already full, generated anyway, requested {} but only fits {}",
                mines,
                total_cells
            );
            mines = total_cells;
        }

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        let rows = usize::from(config.size.1);

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for place in index::sample(&mut rng, total_cells, mines) {
            mine_mask[[place / rows, place % rows]] = true;
        }

        let board = Board::from_mine_mask(&mine_mask);
        if usize::from(board.mine_count()) != mines {
            log::warn!(
                "Generated board count mismatch, actual: {}, requested: {}",
                board.mine_count(),
                mines
            );
        }
        log::debug!(
            "Generated {}x{} board with {} mines (seed {})",
            config.size.0,
            config.size.1,
            board.mine_count(),
            self.seed
        );
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(size: Coord2, mines: CellCount, seed: u64) -> Board {
        RandomBoardGenerator::new(seed).generate(GameConfig::new(size, mines).unwrap())
    }

    #[test]
    fn places_exact_mine_count() {
        for seed in 0..32 {
            for difficulty in Difficulty::ALL {
                let config = difficulty.config();
                let board = RandomBoardGenerator::new(seed).generate(config);
                assert_eq!(board.size(), config.size);
                assert_eq!(board.mine_count(), config.mines);
                assert_eq!(board.mine_positions().count(), usize::from(config.mines));
            }
        }
    }

    #[test]
    fn hints_agree_with_mines() {
        let board = generate((16, 16), 40, 7);
        let (cols, rows) = board.size();
        for x in 0..cols {
            for y in 0..rows {
                match board[(x, y)] {
                    CellContent::Mine => {}
                    CellContent::Empty => assert_eq!(board.adjacent_mine_count((x, y)), 0),
                    CellContent::Hint(n) => {
                        assert!((1..=8).contains(&n));
                        assert_eq!(board.adjacent_mine_count((x, y)), n);
                    }
                }
            }
        }
    }

    #[test]
    fn same_seed_same_board() {
        assert_eq!(generate((30, 16), 99, 42), generate((30, 16), 99, 42));
        assert_ne!(generate((30, 16), 99, 42), generate((30, 16), 99, 43));
    }

    #[test]
    fn boundary_mine_counts() {
        let empty = generate((5, 5), 0, 1);
        assert_eq!(empty.mine_count(), 0);
        assert!((0..5).all(|x| (0..5).all(|y| empty[(x, y)] == CellContent::Empty)));

        let full = generate((5, 5), 25, 1);
        assert_eq!(full.mine_count(), 25);
        assert_eq!(full.safe_cell_count(), 0);
    }

    #[test]
    fn overfull_config_is_clamped() {
        let board = RandomBoardGenerator::new(3).generate(GameConfig::new_unchecked((2, 2), 9));
        assert_eq!(board.mine_count(), 4);
    }

    #[test]
    fn every_cell_can_be_picked() {
        let mut seen = Array2::from_elem([3, 2], false);
        for seed in 0..200 {
            for (x, y) in generate((3, 2), 1, seed).mine_positions() {
                seen[[usize::from(x), usize::from(y)]] = true;
            }
        }
        assert!(seen.iter().all(|&hit| hit));
    }
}
