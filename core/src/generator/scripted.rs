use alloc::vec::Vec;

use super::*;

/// Replays a fixed list of positions once, then walks the board cell by cell
/// in scan order (row by row), starting over at the end.
///
/// The walk guarantees every cell is eventually offered, so placement ends
/// even when the script repeats itself or holds fewer positions than mines.
/// Scripted positions outside the requested size are wrapped back into it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptedSource {
    positions: Vec<Coord2>,
    next: usize,
    scan: u32,
}

impl ScriptedSource {
    pub fn new(positions: impl Into<Vec<Coord2>>) -> Self {
        Self {
            positions: positions.into(),
            next: 0,
            scan: 0,
        }
    }
}

impl MineSource for ScriptedSource {
    fn sample(&mut self, (size_x, size_y): Coord2) -> Coord2 {
        if let Some(&(x, y)) = self.positions.get(self.next) {
            self.next += 1;
            return (x % size_x, y % size_y);
        }

        let step = self.scan;
        self.scan = self.scan.wrapping_add(1);
        let x = step % u32::from(size_x);
        let y = (step / u32::from(size_x)) % u32::from(size_y);
        // both are reduced below a `Coord` bound
        (x as Coord, y as Coord)
    }
}
