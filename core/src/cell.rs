use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single cell.
///
/// `Hidden` and `Flagged` toggle freely; `Revealed` is final for the rest of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed,
}

impl CellState {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct Cell {
    x: Coord,
    y: Coord,
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mine_count: Option<u8>,
}

impl Cell {
    pub(crate) const fn new((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            is_mine: false,
            is_revealed: false,
            is_flagged: false,
            adjacent_mine_count: None,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Only known once the cell has been revealed as safe.
    pub const fn adjacent_mine_count(&self) -> Option<u8> {
        self.adjacent_mine_count
    }

    pub const fn state(&self) -> CellState {
        if self.is_revealed {
            CellState::Revealed
        } else if self.is_flagged {
            CellState::Flagged
        } else {
            CellState::Hidden
        }
    }

    pub(crate) fn add_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn reveal(&mut self, adjacent_mines: u8) {
        debug_assert!(!self.is_flagged, "flagged cells are never revealed");
        self.is_revealed = true;
        self.adjacent_mine_count = Some(adjacent_mines);
    }

    /// Exposes a mine once the game is lost. Flags are left as they were.
    pub(crate) fn reveal_mine(&mut self) {
        debug_assert!(self.is_mine);
        self.is_revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) {
        debug_assert!(!self.is_revealed, "revealed cells cannot be flagged");
        self.is_flagged = !self.is_flagged;
    }

    /// What a render surface needs to draw this cell, hiding anything the
    /// player should not see yet.
    pub fn view(&self) -> CellView {
        CellView {
            x: self.x,
            y: self.y,
            is_revealed: self.is_revealed,
            is_flagged: self.is_flagged,
            is_mine: self.is_revealed && self.is_mine,
            adjacent_mine_count: self
                .adjacent_mine_count
                .filter(|&count| self.is_revealed && count > 0),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub x: Coord,
    pub y: Coord,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub is_mine: bool,
    pub adjacent_mine_count: Option<u8>,
}
