use thiserror::Error;

/// Reasons a rectangular grid could not be built from its source rows.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("Grid needs at least one row")]
    NoRows,
    #[error("Grid needs at least one column")]
    NoColumns,
    #[error("Row {row} has {found} columns, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid grid dimensions: {0}")]
    Dimension(#[from] DimensionError),
    #[error("Invalid position id")]
    InvalidPositionId,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout is {found:?}, board is {expected:?}")]
    LayoutShape {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Mine layout has {found} mines, board expects {expected}")]
    MineCount { expected: usize, found: usize },
}

pub type Result<T> = core::result::Result<T, GameError>;
