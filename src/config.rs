use crate::error::ConfigError;
use crate::grid::{Direction, GridSize, Position};

/// Default board width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 30;

/// Default board height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Where a fresh snake starts when it fits on the board.
pub const DEFAULT_ORIGIN: Position = Position::new(10, 10);

/// Heading of a fresh snake.
pub const DEFAULT_HEADING: Direction = Direction::Right;

/// Smallest and largest accepted board edge.
pub const MIN_GRID_EDGE: u16 = 4;
pub const MAX_GRID_EDGE: u16 = 200;

/// Base tick interval in milliseconds (20 ticks per second).
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 30;

/// How much faster each level ticks.
pub const LEVEL_SPEEDUP_MS: u64 = 2;

/// Score granted per food.
pub const POINTS_PER_FOOD: u32 = 10;

/// Score needed per level increase.
pub const POINTS_PER_LEVEL: u32 = 50;

/// Length of the persisted ranking.
pub const MAX_HIGH_SCORES: usize = 5;

/// Terminal columns drawn per grid cell, so cells look roughly square.
pub const CELL_COLUMNS: u16 = 2;

/// Render loop sleep between frames.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Validated settings for one game session.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameConfig {
    pub bounds: GridSize,
    pub origin: Position,
    pub heading: Direction,
    pub obstacle_count: usize,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_bounds(GridSize {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        })
    }
}

impl GameConfig {
    /// Settings for a board of `bounds`, keeping [`DEFAULT_ORIGIN`] when it
    /// fits and centring the snake otherwise.
    #[must_use]
    pub fn for_bounds(bounds: GridSize) -> Self {
        let origin = if bounds.contains(DEFAULT_ORIGIN) {
            DEFAULT_ORIGIN
        } else {
            Position::new(i32::from(bounds.width / 2), i32::from(bounds.height / 2))
        };

        Self {
            bounds,
            origin,
            heading: DEFAULT_HEADING,
            obstacle_count: 0,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
        }
    }

    /// Checks the settings and returns them unchanged when valid.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let GridSize { width, height } = self.bounds;
        let edge_range = MIN_GRID_EDGE..=MAX_GRID_EDGE;
        if !edge_range.contains(&width) || !edge_range.contains(&height) {
            return Err(ConfigError::GridSize {
                width,
                height,
                min: MIN_GRID_EDGE,
                max: MAX_GRID_EDGE,
            });
        }

        if !self.bounds.contains(self.origin) {
            return Err(ConfigError::OriginOutOfBounds {
                x: self.origin.x,
                y: self.origin.y,
            });
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickInterval {
                got: self.tick_interval_ms,
                min: MIN_TICK_INTERVAL_MS,
            });
        }

        // The origin, the cell ahead of it and one cell for food stay free.
        let free = self.bounds.total_cells().saturating_sub(3);
        if self.obstacle_count > free {
            return Err(ConfigError::TooManyObstacles {
                requested: self.obstacle_count,
                free,
            });
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigError;
    use crate::grid::{GridSize, Position};

    use super::{DEFAULT_ORIGIN, GameConfig};

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default().validated().expect("defaults are valid");
        assert_eq!(config.origin, DEFAULT_ORIGIN);
    }

    #[test]
    fn small_boards_centre_the_origin() {
        let config = GameConfig::for_bounds(GridSize {
            width: 8,
            height: 6,
        });

        assert_eq!(config.origin, Position::new(4, 3));
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let result = GameConfig::for_bounds(GridSize {
            width: 2,
            height: 10,
        })
        .validated();

        assert!(matches!(result, Err(ConfigError::GridSize { width: 2, .. })));
    }

    #[test]
    fn obstacle_count_must_leave_room() {
        let mut config = GameConfig::for_bounds(GridSize {
            width: 4,
            height: 4,
        });
        config.obstacle_count = 14;

        assert_eq!(
            config.validated(),
            Err(ConfigError::TooManyObstacles {
                requested: 14,
                free: 13
            })
        );
    }

    #[test]
    fn origin_outside_grid_is_rejected() {
        let mut config = GameConfig::default();
        config.origin = Position::new(-1, 3);

        assert!(matches!(
            config.validated(),
            Err(ConfigError::OriginOutOfBounds { x: -1, y: 3 })
        ));
    }
}
