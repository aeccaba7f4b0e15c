use std::io::{self, Write};

use log::warn;

/// Short audible alert played when a game ends.
pub trait GameOverCue {
    fn play(&mut self);
}

/// Rings the terminal bell.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl GameOverCue for TerminalBell {
    fn play(&mut self) {
        let mut stdout = io::stdout();
        if let Err(error) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
            warn!("Failed to ring terminal bell: {error}");
        }
    }
}

/// Plays nothing (`--mute`).
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl GameOverCue for Silent {
    fn play(&mut self) {}
}
