use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Draws allowed per requested mine before placement starts complaining.
const DRAWS_PER_MINE_WARNING: u32 = 64;

/// Grid of cells for one game. Indexed by `(x, y)`.
///
/// Serializable for front ends, but only ever built through the
/// constructors below so the mine count always matches the cells.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
}

impl Board {
    /// Creates an empty board of `(cols, rows)` cells, with no mines yet.
    pub fn new(size: Coord2) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let cells = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // both fit in `Coord`, the shape comes from one
            Cell::new((x as Coord, y as Coord))
        });

        Ok(Self {
            cells,
            mine_count: 0,
        })
    }

    /// Creates a board and randomly seeds it with the configured mine count.
    pub fn from_config<S: MineSource>(config: &GameConfig, source: S) -> Result<Self> {
        let mut board = Self::new(config.size())?;
        board.place_mines(config.mines, None, source)?;
        Ok(board)
    }

    /// Creates a board with mines exactly at `mine_coords`.
    ///
    /// Repeated coordinates count once.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            if !board[coords].is_mine() {
                board[coords].add_mine();
                board.mine_count += 1;
            }
        }

        Ok(board)
    }

    /// Marks `mine_count` distinct cells as mines, drawing candidates from
    /// `source` and rejecting cells that already hold a mine or equal
    /// `excluding`.
    ///
    /// At least one cell must stay safe, so `mine_count` has to be lower
    /// than the cells still free. The excluded cell is that safe cell when
    /// the rest of the board gets filled.
    ///
    /// Expected draws grow with how full the board gets; there is no hard
    /// upper bound, so keep a free cell margin on small boards.
    pub fn place_mines<S: MineSource>(
        &mut self,
        mine_count: CellCount,
        excluding: Option<Coord2>,
        mut source: S,
    ) -> Result<()> {
        let excluding = excluding.map(|coords| self.validate_coords(coords)).transpose()?;
        if mine_count == 0 || mine_count >= self.safe_cell_count() {
            return Err(GameError::InvalidMineCount);
        }

        let size = self.size();
        let warn_after = u32::from(mine_count) * DRAWS_PER_MINE_WARNING;
        let mut draws = 0u32;
        let mut placed = 0;

        while placed < mine_count {
            let coords = source.sample(size);
            debug_assert!(coords.0 < size.0 && coords.1 < size.1);
            draws += 1;
            if draws == warn_after {
                log::warn!(
                    "Mine placement still running after {} draws, {} of {} placed",
                    draws,
                    placed,
                    mine_count
                );
            }

            if Some(coords) == excluding || self[coords].is_mine() {
                continue;
            }

            self[coords].add_mine();
            placed += 1;
        }

        self.mine_count += mine_count;
        log::debug!("Placed {} mines using {} draws", mine_count, draws);
        Ok(())
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// Board size as `(cols, rows)`.
    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        // at most `Coord::MAX` squared, which fits
        self.cells.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    /// In-bounds neighbor coordinates, at most 8, in a fixed order.
    pub fn neighbors_of(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        self.neighbors_of(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Renderable state of every cell.
    pub fn snapshot(&self) -> Vec<CellView> {
        self.iter_cells().map(Cell::view).collect()
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}
