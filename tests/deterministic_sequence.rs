use std::collections::HashSet;

use neon_snake::audio::Silent;
use neon_snake::autoplay::next_heading;
use neon_snake::config::{GameConfig, MAX_HIGH_SCORES, POINTS_PER_FOOD};
use neon_snake::game::{DeathReason, GameState, GameStatus, TickOutcome};
use neon_snake::grid::{Direction, GridSize, Position};
use neon_snake::input::Command;
use neon_snake::score::MemoryStore;
use neon_snake::session::GameSession;
use neon_snake::snake::Snake;

const TEN_BY_TEN: GridSize = GridSize {
    width: 10,
    height: 10,
};

fn running_state(seed: u64) -> GameState {
    let mut state =
        GameState::new_with_seed(GameConfig::for_bounds(TEN_BY_TEN), seed).expect("board has room");
    state.start();
    state
}

#[test]
fn straight_run_reaches_the_right_edge() {
    let mut state = running_state(42);
    state.snake = Snake::new(Position::new(5, 5), Direction::Right);
    state.food = Position::new(0, 0);

    for _ in 0..4 {
        assert_eq!(state.tick(), TickOutcome::Moved);
    }

    assert_eq!(state.snake.head(), Position::new(9, 5));
    assert_eq!(state.snake.len(), 1);
    assert_eq!(state.status, GameStatus::Running);

    // One more step would leave the board.
    assert_eq!(state.tick(), TickOutcome::GameOver(DeathReason::Wall));
    assert_eq!(state.snake.head(), Position::new(9, 5));
}

#[test]
fn eating_scores_then_grows_on_following_tick() {
    let mut state = running_state(7);
    state.snake = Snake::new(Position::new(4, 5), Direction::Right);
    state.food = Position::new(5, 5);

    assert_eq!(state.tick(), TickOutcome::Ate);
    assert_eq!(state.snake.head(), Position::new(5, 5));
    assert_eq!(state.score, POINTS_PER_FOOD);
    assert_eq!(state.snake.len(), 1);
    assert!(!state.snake.occupies(state.food));

    state.food = Position::new(0, 0);
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.len(), 2);
    assert!(!state.snake.grow_pending());
}

#[test]
fn heading_off_the_left_edge_ends_the_game() {
    let mut state = running_state(3);
    state.snake = Snake::new(Position::new(0, 3), Direction::Left);

    assert_eq!(state.tick(), TickOutcome::GameOver(DeathReason::Wall));
    assert_eq!(state.status, GameStatus::GameOver);
}

#[test]
fn autoplay_prefers_the_longer_axis_and_falls_back_around_obstacles() {
    let no_body = HashSet::new();

    assert_eq!(
        next_heading(
            Position::new(0, 0),
            Position::new(5, 2),
            &HashSet::new(),
            TEN_BY_TEN,
            &no_body
        ),
        Some(Direction::Right)
    );

    let obstacles: HashSet<Position> = [Position::new(1, 0)].into();
    assert_eq!(
        next_heading(
            Position::new(0, 0),
            Position::new(5, 2),
            &obstacles,
            TEN_BY_TEN,
            &no_body
        ),
        Some(Direction::Down)
    );
}

#[test]
fn autoplay_reaches_the_first_food_without_dying() {
    let state =
        GameState::new_with_seed(GameConfig::for_bounds(TEN_BY_TEN), 99).expect("board has room");
    let mut session =
        GameSession::with_state(state, Box::new(MemoryStore::new()), Box::new(Silent));
    session.handle_command(Command::ToggleAutoplay).expect("toggle");
    session.handle_command(Command::Start).expect("start");

    let first_event = (0..200)
        .map(|_| session.tick())
        .find(|outcome| *outcome != TickOutcome::Moved);

    assert_eq!(first_event, Some(TickOutcome::Ate));
    assert_eq!(session.state().score, POINTS_PER_FOOD);
}

#[test]
fn repeated_game_overs_keep_a_bounded_sorted_ranking() {
    let state =
        GameState::new_with_seed(GameConfig::for_bounds(TEN_BY_TEN), 5).expect("board has room");
    let mut session =
        GameSession::with_state(state, Box::new(MemoryStore::new()), Box::new(Silent));

    for score in [30, 80, 10, 50, 90, 20, 70] {
        session.handle_command(Command::Start).expect("start");
        session.state_mut().score = score;
        session.state_mut().snake = Snake::new(Position::new(9, 9), Direction::Down);
        assert!(matches!(session.tick(), TickOutcome::GameOver(_)));
    }

    let scores: Vec<u32> = session
        .high_scores()
        .entries()
        .iter()
        .map(|entry| entry.score)
        .collect();
    assert_eq!(scores.len(), MAX_HIGH_SCORES);
    assert_eq!(scores, vec![90, 80, 70, 50, 30]);
}
