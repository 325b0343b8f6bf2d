use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of candidate mine positions used by [`Board::place_mines`].
///
/// Every sample must fall inside `size`. Duplicates are fine, placement
/// rejects them and draws again.
pub trait MineSource {
    fn sample(&mut self, size: Coord2) -> Coord2;
}

impl<S: MineSource + ?Sized> MineSource for &mut S {
    fn sample(&mut self, size: Coord2) -> Coord2 {
        (**self).sample(size)
    }
}
