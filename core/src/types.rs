/// Single coordinate axis, used for board width/height and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`, where `x` is the column and `y` the row.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Positions in the 3x3 window around a cell, read row by row; 4 is the center.
const WINDOW: u8 = 9;
const CENTER: u8 = 4;

/// Iterates the in-bounds neighbors of a cell, always in the same order
/// (top-left first, bottom-right last). No wraparound at the edges.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    slot: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            slot: 0,
        }
    }

    /// Coordinates of window `slot`, if that lands on the board.
    fn at_slot(&self, slot: u8) -> Option<Coord2> {
        let (x, y) = self.center;
        let x = x.checked_add(slot % 3)?.checked_sub(1)?;
        let y = y.checked_add(slot / 3)?.checked_sub(1)?;
        (x < self.bounds.0 && y < self.bounds.1).then_some((x, y))
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.slot < WINDOW {
            let slot = self.slot;
            self.slot += 1;

            if slot != CENTER {
                if let Some(coords) = self.at_slot(slot) {
                    return Some(coords);
                }
            }
        }
        None
    }
}
