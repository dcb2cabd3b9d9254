use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// A cell address on a board, `row` counted from the top and `column` from the left.
///
/// Two positions are the same cell exactly when both coordinates match; the canonical identity
/// key is `"row_column"`, see [`Position::id`].
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Canonical identity key, `"row_column"`.
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub(crate) const fn to_nd_index(self) -> [usize; 2] {
        [self.row, self.column]
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, column): (usize, usize)) -> Self {
        Self::new(row, column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.row, self.column)
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(id: &str) -> Result<Self> {
        let (row, column) = id.split_once('_').ok_or(GameError::InvalidPositionId)?;
        let row = row.parse().map_err(|_| GameError::InvalidPositionId)?;
        let column = column.parse().map_err(|_| GameError::InvalidPositionId)?;
        Ok(Self::new(row, column))
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `center`, returning a value only when it remains inside `bounds`.
fn apply_delta(center: Position, delta: (isize, isize), bounds: (usize, usize)) -> Option<Position> {
    let (d_row, d_column) = delta;
    let (rows, columns) = bounds;

    let row = center.row.checked_add_signed(d_row)?;
    if row >= rows {
        return None;
    }

    let column = center.column.checked_add_signed(d_column)?;
    if column >= columns {
        return None;
    }

    Some(Position::new(row, column))
}

/// Moore neighbourhood of a position, clipped to the board bounds.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Position,
    bounds: (usize, usize),
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Position, bounds: (usize, usize)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_row_then_column() {
        assert_eq!(Position::new(3, 12).id(), "3_12");
        assert_eq!("3_12".parse::<Position>(), Ok(Position::new(3, 12)));
    }

    #[test]
    fn malformed_ids_are_rejected() {
        for id in ["", "3", "3_", "_4", "a_b", "-1_2", "1_2_3"] {
            assert_eq!(id.parse::<Position>(), Err(GameError::InvalidPositionId), "{id}");
        }
    }

    #[test]
    fn corner_has_three_neighbours() {
        let neighbours: Vec<_> = NeighborIter::new(Position::new(0, 0), (3, 3)).collect();
        assert_eq!(
            neighbours,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn center_has_eight_neighbours() {
        let neighbours: Vec<_> = NeighborIter::new(Position::new(1, 1), (3, 3)).collect();
        assert_eq!(neighbours.len(), 8);
        assert!(!neighbours.contains(&Position::new(1, 1)));
    }

    #[test]
    fn single_cell_has_no_neighbours() {
        assert_eq!(NeighborIter::new(Position::new(0, 0), (1, 1)).count(), 0);
    }
}
