use core::ops::{Index, Range};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Rectangular store addressed by [`Position`].
///
/// Every transformation (`map`, `set`) leaves the receiver untouched and hands back a grid with
/// its own backing store, so a grid can be shared freely between snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid<T> {
    cells: Array2<T>,
}

impl Grid<()> {
    /// Placeholder of the given shape, to be filled by a first [`Grid::map`].
    pub fn initial(rows: usize, columns: usize) -> Result<Self> {
        check_shape(rows, columns)?;
        Ok(Self::from_elem(rows, columns, ()))
    }
}

impl<T> Grid<T> {
    /// Builds a grid from its rows, which must be non-empty and all of the same length.
    pub fn from_rows(source: Vec<Vec<T>>) -> Result<Self> {
        let rows = source.len();
        let columns = source.first().map_or(0, Vec::len);
        check_shape(rows, columns)?;

        if let Some((row, found)) = source
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != columns)
        {
            return Err(DimensionError::Ragged {
                row,
                expected: columns,
                found,
            }
            .into());
        }

        let flat: Vec<T> = source.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((rows, columns), flat)
            .expect("row lengths were checked against the shape");
        Ok(Self { cells })
    }

    pub(crate) fn from_elem(rows: usize, columns: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            cells: Array2::from_elem((rows, columns), value),
        }
    }

    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    /// `(rows, columns)`
    pub fn shape(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn row_indices(&self) -> Range<usize> {
        0..self.rows()
    }

    pub fn column_indices(&self) -> Range<usize> {
        0..self.columns()
    }

    /// Every position of this grid exactly once, in row-major order.
    pub fn all_positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let columns = self.columns();
        self.row_indices()
            .flat_map(move |row| (0..columns).map(move |column| Position::new(row, column)))
    }

    /// Positions paired with their values, in the order of [`Grid::all_positions`].
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        self.cells
            .indexed_iter()
            .map(|((row, column), value)| (Position::new(row, column), value))
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows() && pos.column < self.columns()
    }

    pub fn same_shape<U>(&self, other: &Grid<U>) -> bool {
        self.shape() == other.shape()
    }

    /// Value at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` lies outside this grid; positions must come from a grid of the same shape.
    pub fn get(&self, pos: Position) -> &T {
        self.check_contains(pos);
        &self.cells[pos.to_nd_index()]
    }

    /// Copy of this grid with `value` stored at `pos`.
    ///
    /// # Panics
    ///
    /// If `pos` lies outside this grid.
    pub fn set(&self, pos: Position, value: T) -> Self
    where
        T: Clone,
    {
        let mut next = self.clone();
        next.replace(pos, value);
        next
    }

    /// New grid of the same shape holding `f(value, position)` for every cell.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(&T, Position) -> U,
    {
        let cells = Array2::from_shape_fn(self.shape(), |(row, column)| {
            f(&self.cells[[row, column]], Position::new(row, column))
        });
        Grid { cells }
    }

    pub fn count<F>(&self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        self.cells.iter().filter(|&value| predicate(value)).count()
    }

    /// The up to eight positions surrounding `pos` that lie inside this grid.
    pub fn neighbours(&self, pos: Position) -> SmallVec<[Position; 8]> {
        self.iter_neighbors(pos).collect()
    }

    pub(crate) fn iter_neighbors(&self, pos: Position) -> NeighborIter {
        self.check_contains(pos);
        NeighborIter::new(pos, self.shape())
    }

    /// In-place write, reserved for values the crate has not published yet.
    pub(crate) fn replace(&mut self, pos: Position, value: T) -> T {
        self.check_contains(pos);
        core::mem::replace(&mut self.cells[pos.to_nd_index()], value)
    }

    fn check_contains(&self, pos: Position) {
        assert!(
            self.contains(pos),
            "position {} outside of {}x{} grid",
            pos,
            self.rows(),
            self.columns()
        );
    }
}

impl<T> Index<Position> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Position) -> &Self::Output {
        self.get(pos)
    }
}

fn check_shape(rows: usize, columns: usize) -> core::result::Result<(), DimensionError> {
    if rows == 0 {
        Err(DimensionError::NoRows)
    } else if columns == 0 {
        Err(DimensionError::NoColumns)
    } else {
        Ok(())
    }
}
