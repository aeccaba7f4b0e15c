//! Greedy one-step autoplay.
//!
//! The heuristic walks toward the food along the axis with the larger
//! distance and only looks one cell ahead. It does not search, so it can trap
//! itself.

use std::collections::HashSet;

use crate::grid::{Direction, GridSize, Position};

/// Chooses the next heading for an autoplaying snake.
///
/// Returns `None` when every neighbouring cell is blocked; the snake then
/// has no safe move left.
#[must_use]
pub fn next_heading(
    head: Position,
    food: Position,
    obstacles: &HashSet<Position>,
    bounds: GridSize,
    body_minus_head: &HashSet<Position>,
) -> Option<Direction> {
    let blocked = |cell: Position| {
        !bounds.contains(cell) || obstacles.contains(&cell) || body_minus_head.contains(&cell)
    };

    let greedy = greedy_direction(head, food);
    if !blocked(head.offset(greedy)) {
        return Some(greedy);
    }

    Direction::ALL
        .into_iter()
        .find(|direction| !blocked(head.offset(*direction)))
}

/// Ties go to the vertical axis; with the food straight above or on the head
/// the vertical branch resolves to `Up`.
fn greedy_direction(head: Position, food: Position) -> Direction {
    let dx = food.x - head.x;
    let dy = food.y - head.y;

    if dx.abs() > dy.abs() {
        if dx > 0 { Direction::Right } else { Direction::Left }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
