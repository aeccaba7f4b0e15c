use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::effects::NEON_PALETTE;
use crate::game::DeathReason;

/// Draws the start screen as a centered popup.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, high_score: u32) {
    let popup = centered_popup(area, 80, 60);
    frame.render_widget(Clear, popup);

    let [title_row, body_row] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("NEON SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(NEON_PALETTE[0])
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let body = vec![
        Line::from(format!("High score: {high_score}")),
        Line::from(""),
        Line::from("[Enter]/[Space] Start"),
        Line::from("[T] Autoplay"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" start ")),
        body_row,
    );
}

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    high_score: u32,
    death_reason: Option<DeathReason>,
) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let is_best = score > 0 && score >= high_score;
    let lines = vec![
        Line::from("GAME OVER").style(Style::default().fg(NEON_PALETTE[1])),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(match death_reason {
            Some(DeathReason::Wall) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            Some(DeathReason::Obstacle) => "Cause: hit obstacle",
            Some(DeathReason::BoardFilled) => "Board full!",
            None => "",
        }),
        Line::from(if is_best { "New high score!" } else { "" }),
        Line::from(""),
        Line::from("[Enter] Play again"),
        Line::from("[R] Restart  [Q] Quit").style(Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
