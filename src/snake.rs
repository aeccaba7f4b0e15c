use std::collections::{HashSet, VecDeque};

use crate::grid::{Direction, GridSize, Position};

/// Result of asking the snake to change heading.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum HeadingChange {
    Accepted,
    /// The request was the exact reverse of the current heading and was dropped.
    IgnoredReversal,
}

/// What the head ran into.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    Wall,
    Body,
    Obstacle,
}

/// Mutable snake state: body segments plus latched heading and growth flag.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
    pending_heading: Direction,
    grow_pending: bool,
}

impl Snake {
    /// Creates a one-cell snake at `start` moving in `heading`.
    #[must_use]
    pub fn new(start: Position, heading: Direction) -> Self {
        Self::from_segments(vec![start], heading)
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when `segments` is empty.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        assert!(!segments.is_empty(), "snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            heading,
            pending_heading: heading,
            grow_pending: false,
        }
    }

    /// Commits the pending heading and advances one cell.
    ///
    /// Bounds and collisions are not checked here.
    pub fn step(&mut self) {
        self.heading = self.pending_heading;
        let next_head = self.head().offset(self.heading);

        self.body.push_front(next_head);
        if !self.grow_pending {
            let _ = self.body.pop_back();
        }
        self.grow_pending = false;
    }

    /// Keeps the tail on the next step.
    pub fn request_grow(&mut self) {
        self.grow_pending = true;
    }

    /// Latches `direction` for the next step unless it reverses the current heading.
    pub fn request_heading(&mut self, direction: Direction) -> HeadingChange {
        if direction == self.heading.opposite() {
            return HeadingChange::IgnoredReversal;
        }

        self.pending_heading = direction;
        HeadingChange::Accepted
    }

    /// Checks the current head against the walls, the rest of the body and `obstacles`.
    #[must_use]
    pub fn check_collision(&self, bounds: GridSize, obstacles: &HashSet<Position>) -> bool {
        let head = self.head();
        if !bounds.contains(head) {
            return true;
        }

        let body: HashSet<Position> = self.body.iter().skip(1).copied().collect();
        body.contains(&head) || obstacles.contains(&head)
    }

    /// Returns the collision the next `step` would produce, without moving.
    ///
    /// When the snake is not growing the tail cell is vacated by the same
    /// step, so moving into it is allowed.
    #[must_use]
    pub fn projected_collision(
        &self,
        bounds: GridSize,
        obstacles: &HashSet<Position>,
    ) -> Option<Collision> {
        let next_head = self.next_head_position();
        if !bounds.contains(next_head) {
            return Some(Collision::Wall);
        }

        let remaining = if self.grow_pending {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(remaining).any(|segment| *segment == next_head) {
            return Some(Collision::Body);
        }

        if obstacles.contains(&next_head) {
            return Some(Collision::Obstacle);
        }

        None
    }

    /// Returns the head position after the next step.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().offset(self.pending_heading)
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    #[must_use]
    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    #[must_use]
    pub fn grow_pending(&self) -> bool {
        self.grow_pending
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &Position> + ExactSizeIterator {
        self.body.iter()
    }
}
