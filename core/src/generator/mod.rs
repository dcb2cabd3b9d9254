use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Decides where mines go once the first cell of a game is opened.
pub trait MinefieldGenerator {
    /// Produces a mine mask shaped like `settings`, never mining `exclude`.
    fn generate(self, settings: GameSettings, exclude: Position) -> Grid<bool>;
}

/// Number of mined neighbours for every cell of `mines`.
pub fn hints(mines: &Grid<bool>) -> Grid<u8> {
    mines.map(|_, pos| {
        mines
            .iter_neighbors(pos)
            .filter(|&neighbor| mines[neighbor])
            .count()
            .try_into()
            .unwrap()
    })
}
