use std::collections::HashSet;

use rand::Rng;

use crate::error::PlacementError;
use crate::grid::{GridSize, Position};

/// Random draws attempted before falling back to enumerating free cells.
pub const MAX_SAMPLING_ATTEMPTS: usize = 64;

/// Picks a uniformly random in-bounds cell that is not in `occupied`.
///
/// Rejection sampling is tried first; once it has failed
/// [`MAX_SAMPLING_ATTEMPTS`] times the free cells are enumerated instead, so
/// a nearly full board still terminates. A completely full board yields
/// [`PlacementError::NoFreeCell`].
pub fn place_food<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &HashSet<Position>,
) -> Result<Position, PlacementError> {
    if bounds.total_cells() == 0 {
        return Err(PlacementError::no_free_cell(bounds));
    }

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    let candidates: Vec<Position> = bounds
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();

    if candidates.is_empty() {
        return Err(PlacementError::no_free_cell(bounds));
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}

/// Places `count` distinct obstacles, avoiding every cell in `reserved`.
pub fn place_obstacles<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    count: usize,
    reserved: &HashSet<Position>,
) -> Result<HashSet<Position>, PlacementError> {
    let mut occupied = reserved.clone();
    let mut obstacles = HashSet::with_capacity(count);

    for _ in 0..count {
        let cell = place_food(rng, bounds, &occupied)?;
        occupied.insert(cell);
        obstacles.insert(cell);
    }

    Ok(obstacles)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::error::PlacementError;
    use crate::grid::{GridSize, Position};

    use super::{place_food, place_obstacles};

    const BOUNDS: GridSize = GridSize {
        width: 8,
        height: 6,
    };

    #[test]
    fn food_never_lands_on_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let occupied: HashSet<Position> = [
            Position::new(0, 0),
            Position::new(1, 0),
            Position::new(2, 0),
            Position::new(5, 5),
        ]
        .into();

        for _ in 0..200 {
            let food = place_food(&mut rng, BOUNDS, &occupied).expect("board has free cells");
            assert!(BOUNDS.contains(food));
            assert!(!occupied.contains(&food));
        }
    }

    #[test]
    fn single_free_cell_is_found_through_enumeration() {
        let mut rng = StdRng::seed_from_u64(3);
        let free = Position::new(6, 4);
        let occupied: HashSet<Position> = BOUNDS.cells().filter(|cell| *cell != free).collect();

        for _ in 0..20 {
            assert_eq!(place_food(&mut rng, BOUNDS, &occupied), Ok(free));
        }
    }

    #[test]
    fn full_board_reports_no_free_cell() {
        let mut rng = StdRng::seed_from_u64(5);
        let occupied: HashSet<Position> = BOUNDS.cells().collect();

        assert_eq!(
            place_food(&mut rng, BOUNDS, &occupied),
            Err(PlacementError::NoFreeCell {
                width: 8,
                height: 6
            })
        );
    }

    #[test]
    fn food_placement_holds_for_every_partial_occupancy_of_small_grid() {
        let bounds = GridSize {
            width: 3,
            height: 3,
        };
        let cells: Vec<Position> = bounds.cells().collect();
        let mut rng = StdRng::seed_from_u64(13);

        for mask in 0u32..(1 << cells.len()) {
            let occupied: HashSet<Position> = cells
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, cell)| *cell)
                .collect();

            match place_food(&mut rng, bounds, &occupied) {
                Ok(food) => {
                    assert!(occupied.len() < cells.len());
                    assert!(!occupied.contains(&food));
                }
                Err(PlacementError::NoFreeCell { .. }) => {
                    assert_eq!(occupied.len(), cells.len());
                }
            }
        }
    }

    #[test]
    fn obstacles_avoid_reserved_cells_and_are_distinct() {
        let mut rng = StdRng::seed_from_u64(21);
        let reserved: HashSet<Position> = [Position::new(4, 3), Position::new(5, 3)].into();

        let obstacles =
            place_obstacles(&mut rng, BOUNDS, 12, &reserved).expect("enough room for obstacles");

        assert_eq!(obstacles.len(), 12);
        assert!(obstacles.is_disjoint(&reserved));
    }

    #[test]
    fn too_many_obstacles_fail_instead_of_looping() {
        let mut rng = StdRng::seed_from_u64(2);
        let reserved: HashSet<Position> = [Position::new(0, 0)].into();

        let result = place_obstacles(&mut rng, BOUNDS, BOUNDS.total_cells(), &reserved);

        assert!(matches!(result, Err(PlacementError::NoFreeCell { .. })));
    }
}
