use std::collections::HashSet;

use log::warn;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{GameConfig, POINTS_PER_FOOD, POINTS_PER_LEVEL};
use crate::error::PlacementError;
use crate::food::{place_food, place_obstacles};
use crate::grid::{Direction, GridSize, Position};
use crate::snake::{Collision, HeadingChange, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    /// Waiting for the first start after launch or a restart.
    Idle,
    Running,
    GameOver,
}

/// Why the last game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
    Obstacle,
    /// The snake covers every free cell, so no food can be placed.
    BoardFilled,
}

impl From<Collision> for DeathReason {
    fn from(collision: Collision) -> Self {
        match collision {
            Collision::Wall => Self::Wall,
            Collision::Body => Self::SelfCollision,
            Collision::Obstacle => Self::Obstacle,
        }
    }
}

/// What a single call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game is not running; nothing changed.
    Idle,
    Moved,
    Ate,
    GameOver(DeathReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub obstacles: HashSet<Position>,
    pub score: u32,
    pub level: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    layout: HashSet<Position>,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates an idle game, seeding from the configuration when it carries a seed.
    pub fn new(config: GameConfig) -> Result<Self, PlacementError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, PlacementError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, PlacementError> {
        let reserved: HashSet<Position> =
            [config.origin, config.origin.offset(config.heading)].into();
        let layout = place_obstacles(&mut rng, config.bounds, config.obstacle_count, &reserved)?;

        let mut state = Self {
            snake: Snake::new(config.origin, config.heading),
            food: config.origin,
            obstacles: layout.clone(),
            score: 0,
            level: 1,
            tick_count: 0,
            status: GameStatus::Idle,
            death_reason: None,
            layout,
            config,
            rng,
        };
        state.food = state.next_food()?;
        Ok(state)
    }

    /// Moves from `Idle` to `Running`; does nothing in any other state.
    pub fn start(&mut self) {
        if self.status == GameStatus::Idle {
            self.status = GameStatus::Running;
        }
    }

    /// Resets snake, food, score and level and returns to `Idle`.
    ///
    /// The obstacle layout of the session is restored rather than re-rolled.
    pub fn restart(&mut self) -> Result<(), PlacementError> {
        self.snake = Snake::new(self.config.origin, self.config.heading);
        self.obstacles = self.layout.clone();
        self.score = 0;
        self.level = 1;
        self.tick_count = 0;
        self.status = GameStatus::Idle;
        self.death_reason = None;
        self.food = self.next_food()?;
        Ok(())
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Collisions are checked against the position the step would produce
    /// before the step is committed, so a losing move never leaves the board.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Idle;
        }

        if let Some(collision) = self
            .snake
            .projected_collision(self.config.bounds, &self.obstacles)
        {
            return self.end(collision.into());
        }

        self.snake.step();
        self.tick_count += 1;

        if self.snake.head() != self.food {
            return TickOutcome::Moved;
        }

        self.score += POINTS_PER_FOOD;
        self.level = level_for_score(self.score);
        self.snake.request_grow();

        match self.next_food() {
            Ok(food) => {
                self.food = food;
                TickOutcome::Ate
            }
            Err(error) => {
                warn!("{error}; ending game with score {}", self.score);
                self.end(DeathReason::BoardFilled)
            }
        }
    }

    /// Latches a heading for the next tick; ignored unless running.
    pub fn request_heading(&mut self, direction: Direction) -> Option<HeadingChange> {
        if self.status != GameStatus::Running {
            return None;
        }

        Some(self.snake.request_heading(direction))
    }

    /// Every cell the next food must avoid.
    #[must_use]
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.snake
            .segments()
            .copied()
            .chain(self.obstacles.iter().copied())
            .collect()
    }

    /// Snake segments behind the head, as seen by the autoplay heuristic.
    #[must_use]
    pub fn body_minus_head(&self) -> HashSet<Position> {
        self.snake.segments().skip(1).copied().collect()
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.config.bounds
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    fn next_food(&mut self) -> Result<Position, PlacementError> {
        let occupied = self.occupied_cells();
        place_food(&mut self.rng, self.config.bounds, &occupied)
    }

    fn end(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        TickOutcome::GameOver(reason)
    }
}

/// Level reached at `score`, starting from 1.
#[must_use]
pub fn level_for_score(score: u32) -> u32 {
    1 + score / POINTS_PER_LEVEL
}
