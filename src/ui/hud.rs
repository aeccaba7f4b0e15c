use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::effects::NEON_PALETTE;
use crate::score::HighScores;
use crate::session::GameSession;

/// Rows taken by the status line below the board.
pub const HUD_HEIGHT: u16 = 1;

/// Columns taken by the ranking panel beside the board.
pub const SIDE_PANEL_WIDTH: u16 = 26;

/// Renders the status line under `area` and returns the space left above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, session: &GameSession) -> Rect {
    let [play_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_HEIGHT)]).areas(area);

    frame.render_widget(
        Paragraph::new(status_line(session)).alignment(Alignment::Center),
        status_area,
    );

    play_area
}

fn status_line(session: &GameSession) -> Line<'static> {
    let state = session.state();
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default()
        .fg(NEON_PALETTE[0])
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![
        Span::styled("Score ", label),
        Span::styled(state.score.to_string(), value),
        Span::styled("  Level ", label),
        Span::styled(state.level.to_string(), value),
        Span::styled("  Length ", label),
        Span::styled(state.snake.len().to_string(), value),
    ];
    if session.autoplay_enabled() {
        spans.push(Span::styled(
            "  AUTO",
            Style::default()
                .fg(NEON_PALETTE[3])
                .add_modifier(Modifier::BOLD),
        ));
    }

    Line::from(spans)
}

/// Draws the top-score ranking panel.
pub fn render_ranking(frame: &mut Frame<'_>, area: Rect, high_scores: &HighScores) {
    let mut lines: Vec<Line<'_>> = high_scores
        .entries()
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            Line::from(vec![
                Span::styled(format!("{}. ", rank + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{:>5}", entry.score),
                    Style::default().fg(NEON_PALETTE[2]),
                ),
                Span::raw(format!("  {}", entry.date)),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from("No games yet").style(Style::default().fg(Color::DarkGray)));
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::bordered().title(" ranking ")),
        area,
    );
}

/// Tells the player to enlarge the terminal.
pub fn render_too_small(frame: &mut Frame<'_>, area: Rect, needed_width: u16, needed_height: u16) {
    let lines = vec![
        Line::from("Terminal too small"),
        Line::from(format!(
            "need {needed_width}x{needed_height}, have {}x{}",
            area.width, area.height
        )),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Yellow)),
        area,
    );
}
