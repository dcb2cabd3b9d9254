use serde::{Deserialize, Serialize};

pub use analysis::*;
pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use types::*;

mod analysis;
mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod grid;
mod types;

/// Board shape and mine count of a game.
///
/// Built through [`GameSettings::new`], which keeps the values playable instead of rejecting
/// them: at least one row and column, and at least one cell free of mines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSettings {
    pub rows: usize,
    pub columns: usize,
    pub bombs: usize,
}

impl GameSettings {
    pub const fn new_unchecked(rows: usize, columns: usize, bombs: usize) -> Self {
        Self {
            rows,
            columns,
            bombs,
        }
    }

    pub fn new(rows: usize, columns: usize, bombs: usize) -> Self {
        let rows = rows.max(1);
        let columns = columns.max(1);
        let bombs = bombs.min(rows.saturating_mul(columns) - 1);
        Self::new_unchecked(rows, columns, bombs)
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked(9, 9, 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked(16, 16, 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked(16, 30, 99)
    }

    pub const fn total_cells(&self) -> usize {
        self.rows.saturating_mul(self.columns)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bombs_are_clamped_below_board_size() {
        assert_eq!(GameSettings::new(3, 3, 9).bombs, 8);
        assert_eq!(GameSettings::new(3, 3, usize::MAX).bombs, 8);
        assert_eq!(GameSettings::new(3, 3, 4).bombs, 4);
        assert_eq!(GameSettings::new(1, 1, 1).bombs, 0);
    }

    #[test]
    fn empty_shapes_grow_to_one_cell() {
        assert_eq!(GameSettings::new(0, 0, 3), GameSettings::new_unchecked(1, 1, 0));
        assert_eq!(GameSettings::new(0, 4, 3), GameSettings::new_unchecked(1, 4, 3));
    }

    #[test]
    fn presets_are_already_clamped() {
        for preset in [
            GameSettings::beginner(),
            GameSettings::intermediate(),
            GameSettings::expert(),
        ] {
            assert_eq!(GameSettings::new(preset.rows, preset.columns, preset.bombs), preset);
        }
    }
}
