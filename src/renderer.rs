use std::time::Duration;

use rand::Rng;
use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::CELL_COLUMNS;
use crate::effects::{
    FOOD_COLOR, FOOD_PULSE_PERIOD_MS, GRID_COLOR, HEAD_PULSE_PERIOD_MS, NEON_PALETTE,
    OBSTACLE_COLOR, PARTICLE_COUNT, dim, palette_index, pulse, segment_brightness,
};
use crate::game::{GameState, GameStatus};
use crate::grid::{GridSize, Position};
use crate::session::GameSession;
use crate::ui::hud::{HUD_HEIGHT, SIDE_PANEL_WIDTH, render_hud, render_ranking, render_too_small};
use crate::ui::menu::{render_game_over_menu, render_start_menu};

const GLYPH_CELL: &str = "██";
const GLYPH_GRID: &str = "· ";
const GLYPH_FOOD_LARGE: &str = "◆ ";
const GLYPH_FOOD_SMALL: &str = "◇ ";
const GLYPH_PARTICLE: &str = "✦";

/// Renders the full game frame from immutable session state.
///
/// `elapsed` is wall-clock time since launch and only drives pulses.
pub fn render(frame: &mut Frame<'_>, session: &GameSession, elapsed: Duration) {
    let area = frame.area();
    let state = session.state();
    let (board_width, board_height) = board_size(state.bounds());
    let needed_width = board_width + SIDE_PANEL_WIDTH;
    let needed_height = board_height + HUD_HEIGHT;

    if area.width < needed_width || area.height < needed_height {
        render_too_small(frame, area, needed_width, needed_height);
        return;
    }

    let [_, column, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(needed_height),
        Constraint::Min(0),
    ])
    .areas(area);
    let [main_area, side_area] = Layout::horizontal([
        Constraint::Length(board_width),
        Constraint::Length(SIDE_PANEL_WIDTH),
    ])
    .flex(Flex::Center)
    .areas(column);

    let play_area = render_hud(frame, main_area, session);
    render_ranking(frame, side_area, session.high_scores());

    let block = Block::bordered()
        .title(" neon snake ")
        .border_style(Style::new().fg(NEON_PALETTE[palette_index(state.tick_count)]));
    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_grid(frame, inner, state.bounds());
    render_particles(frame, inner);
    render_obstacles(frame, inner, state);
    render_food(frame, inner, state, elapsed);
    render_snake(frame, inner, state, elapsed);

    match state.status {
        GameStatus::Idle => render_start_menu(frame, play_area, session.high_scores().best()),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            play_area,
            state.score,
            session.high_scores().best(),
            state.death_reason,
        ),
        GameStatus::Running => {}
    }
}

/// Terminal size of the bordered board for `bounds`.
#[must_use]
pub fn board_size(bounds: GridSize) -> (u16, u16) {
    (
        bounds.width.saturating_mul(CELL_COLUMNS).saturating_add(2),
        bounds.height.saturating_add(2),
    )
}

fn render_grid(frame: &mut Frame<'_>, inner: Rect, bounds: GridSize) {
    let style = Style::new().fg(GRID_COLOR);
    let buffer = frame.buffer_mut();
    for cell in bounds.cells() {
        if let Some((x, y)) = cell_to_terminal(inner, cell) {
            buffer.set_string(x, y, GLYPH_GRID, style);
        }
    }
}

/// Random sparkles; redrawn every frame and never stored.
fn render_particles(frame: &mut Frame<'_>, inner: Rect) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let mut rng = rand::thread_rng();
    let buffer = frame.buffer_mut();
    for (i, color) in NEON_PALETTE.iter().cycle().take(PARTICLE_COUNT).enumerate() {
        let x = inner.x + rng.gen_range(0..inner.width);
        let y = inner.y + rng.gen_range(0..inner.height);
        let style = Style::new().fg(dim(*color, 0.4 + 0.2 * i as f32));
        buffer.set_string(x, y, GLYPH_PARTICLE, style);
    }
}

fn render_obstacles(frame: &mut Frame<'_>, inner: Rect, state: &GameState) {
    let style = Style::new().fg(OBSTACLE_COLOR);
    let buffer = frame.buffer_mut();
    for obstacle in &state.obstacles {
        if let Some((x, y)) = cell_to_terminal(inner, *obstacle) {
            buffer.set_string(x, y, GLYPH_CELL, style);
        }
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, elapsed: Duration) {
    let Some((x, y)) = cell_to_terminal(inner, state.food) else {
        return;
    };

    let glyph = if pulse(elapsed, FOOD_PULSE_PERIOD_MS) >= 0.0 {
        GLYPH_FOOD_LARGE
    } else {
        GLYPH_FOOD_SMALL
    };
    frame
        .buffer_mut()
        .set_string(x, y, glyph, Style::new().fg(FOOD_COLOR).add_modifier(Modifier::BOLD));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, elapsed: Duration) {
    let base = NEON_PALETTE[palette_index(state.tick_count)];
    let len = state.snake.len();
    let head_flash = pulse(elapsed, HEAD_PULSE_PERIOD_MS) > 0.5;

    let buffer = frame.buffer_mut();
    // Tail first so the head is drawn on top if segments overlap.
    for (index, segment) in state.snake.segments().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, *segment) else {
            continue;
        };

        let style = if index == 0 {
            let color = if head_flash { Color::White } else { base };
            Style::new().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::new().fg(dim(base, segment_brightness(index, len)))
        };
        buffer.set_string(x, y, GLYPH_CELL, style);
    }
}

fn cell_to_terminal(inner: Rect, position: Position) -> Option<(u16, u16)> {
    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.checked_add(x_offset)?;
    let y = inner.y.checked_add(y_offset)?;
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::audio::Silent;
    use crate::config::GameConfig;
    use crate::game::GameState;
    use crate::grid::{GridSize, Position};
    use crate::score::MemoryStore;
    use crate::session::GameSession;

    use super::{board_size, cell_to_terminal, render};

    fn session(width: u16, height: u16) -> GameSession {
        let config = GameConfig::for_bounds(GridSize { width, height });
        let state = GameState::new_with_seed(config, 3).expect("board has room");
        GameSession::with_state(state, Box::new(MemoryStore::new()), Box::new(Silent))
    }

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    #[test]
    fn cells_map_to_double_width_columns() {
        let inner = Rect::new(1, 1, 20, 10);

        assert_eq!(cell_to_terminal(inner, Position::new(0, 0)), Some((1, 1)));
        assert_eq!(cell_to_terminal(inner, Position::new(3, 2)), Some((7, 3)));
        assert_eq!(cell_to_terminal(inner, Position::new(10, 0)), None);
        assert_eq!(cell_to_terminal(inner, Position::new(-1, 0)), None);
    }

    #[test]
    fn board_size_includes_border() {
        assert_eq!(
            board_size(GridSize {
                width: 10,
                height: 8
            }),
            (22, 10)
        );
    }

    #[test]
    fn start_screen_renders_without_mutating_state() {
        let session = session(10, 8);
        let before = session.state().clone();
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &session, std::time::Duration::from_millis(120)))
            .expect("draw");

        let text = rendered_text(&terminal);
        assert!(text.contains("NEON SNAKE"));
        assert!(text.contains("ranking"));
        assert_eq!(session.state().snake.head(), before.snake.head());
        assert_eq!(session.state().food, before.food);
        assert_eq!(session.state().tick_count, before.tick_count);
    }

    #[test]
    fn small_terminal_shows_notice() {
        let session = session(30, 20);
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).expect("test terminal");

        terminal
            .draw(|frame| render(frame, &session, std::time::Duration::ZERO))
            .expect("draw");

        assert!(rendered_text(&terminal).contains("Terminal too small"));
    }
}
