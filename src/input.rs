use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::grid::Direction;

/// Discrete commands consumed by the game session and the main loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Turn(Direction),
    Start,
    Restart,
    ToggleAutoplay,
    Quit,
}

/// Waits up to `timeout` for one key press and maps it to a command.
pub fn poll_command(timeout: Duration) -> io::Result<Option<Command>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(map_key(key)),
        _ => Ok(None),
    }
}

/// Maps a key event to a command, if it is bound.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Command::Turn(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Command::Turn(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Command::Turn(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Command::Turn(Direction::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Command::Start,
        KeyCode::Char('r' | 'R') => Command::Restart,
        KeyCode::Char('t' | 'T') => Command::ToggleAutoplay,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Command::Quit,
        _ => return None,
    };

    Some(command)
}
