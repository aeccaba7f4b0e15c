use std::io;

use thiserror::Error;

use crate::grid::GridSize;

/// Failure to find a free cell for food or an obstacle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum PlacementError {
    #[error("no free cell left on the {width}x{height} board")]
    NoFreeCell { width: u16, height: u16 },
}

impl PlacementError {
    #[must_use]
    pub fn no_free_cell(bounds: GridSize) -> Self {
        Self::NoFreeCell {
            width: bounds.width,
            height: bounds.height,
        }
    }
}

/// The high-score store could not be read or written.
///
/// Never fatal: the session keeps running without persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("score store unavailable: {0}")]
    Unavailable(#[from] io::Error),
    #[error("score store contains malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Rejected game configuration.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must be between {min}x{min} and {max}x{max} cells, got {width}x{height}")]
    GridSize {
        width: u16,
        height: u16,
        min: u16,
        max: u16,
    },
    #[error("start position ({x}, {y}) lies outside the grid")]
    OriginOutOfBounds { x: i32, y: i32 },
    #[error("tick interval must be at least {min} ms, got {got} ms")]
    TickInterval { got: u64, min: u64 },
    #[error("{requested} obstacles do not fit on a board with {free} free cells")]
    TooManyObstacles { requested: usize, free: usize },
}
