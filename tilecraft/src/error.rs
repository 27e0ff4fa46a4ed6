//! Errors raised while building grids and maps.
//!
//! Lookups, searches and autotiling never fail; only construction and
//! loading report errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must have at least one column and one row (got {columns}x{rows})")]
    EmptyDimensions { columns: usize, rows: usize },
    #[error("cell size must be finite and positive (got {width}x{height})")]
    InvalidCellSize { width: f32, height: f32 },
    #[error("grid of {columns}x{rows} cells is too large to index")]
    TooLarge { columns: usize, rows: usize },
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("flat map data needs a 4-value header, got {0} values")]
    MissingHeader(usize),
    #[error("map declares {expected} cells but {actual} were supplied")]
    CellCountMismatch { expected: usize, actual: usize },
    #[error("failed to parse map JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),
}
