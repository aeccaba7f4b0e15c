use std::collections::VecDeque;

use chrono::Local;
use log::{debug, info, warn};

use crate::audio::GameOverCue;
use crate::autoplay::next_heading;
use crate::config::GameConfig;
use crate::error::PlacementError;
use crate::game::{DeathReason, GameState, GameStatus, TickOutcome};
use crate::grid::Direction;
use crate::input::Command;
use crate::score::{HighScores, ScoreEntry, ScoreStore};
use crate::snake::HeadingChange;

/// The one live game plus everything that outlives a single round:
/// the ranking, its store, the game-over cue and the autoplay switch.
///
/// Heading changes are queued and only reach the snake at the start of the
/// next tick, in arrival order. With autoplay on, the heuristic's choice is
/// applied after queued turns and therefore wins.
pub struct GameSession {
    state: GameState,
    high_scores: HighScores,
    store: Box<dyn ScoreStore>,
    cue: Box<dyn GameOverCue>,
    autoplay: bool,
    turns: VecDeque<Direction>,
}

impl GameSession {
    /// Builds an idle session and loads the ranking from `store`.
    ///
    /// An unreadable store is logged and treated as an empty ranking.
    pub fn new(
        config: GameConfig,
        store: Box<dyn ScoreStore>,
        cue: Box<dyn GameOverCue>,
    ) -> Result<Self, PlacementError> {
        Ok(Self::with_state(GameState::new(config)?, store, cue))
    }

    /// Wraps an existing state, e.g. a seeded one.
    #[must_use]
    pub fn with_state(
        state: GameState,
        store: Box<dyn ScoreStore>,
        cue: Box<dyn GameOverCue>,
    ) -> Self {
        let high_scores = match store.load() {
            Ok(entries) => HighScores::from_entries(entries),
            Err(error) => {
                warn!("Failed to load high scores, continuing without them: {error}");
                HighScores::default()
            }
        };

        Self {
            state,
            high_scores,
            store,
            cue,
            autoplay: false,
            turns: VecDeque::new(),
        }
    }

    /// Applies one command. `Quit` is left to the caller.
    pub fn handle_command(&mut self, command: Command) -> Result<(), PlacementError> {
        match command {
            Command::Turn(direction) => {
                if self.state.is_running() {
                    self.turns.push_back(direction);
                }
            }
            Command::Start => match self.state.status {
                GameStatus::Idle => self.start(),
                GameStatus::GameOver => {
                    self.restart()?;
                    self.start();
                }
                GameStatus::Running => {}
            },
            Command::Restart => self.restart()?,
            Command::ToggleAutoplay => {
                self.autoplay = !self.autoplay;
                info!("Autoplay {}", if self.autoplay { "on" } else { "off" });
            }
            Command::Quit => {}
        }
        Ok(())
    }

    pub fn start(&mut self) {
        if self.state.status == GameStatus::Idle {
            self.state.start();
            info!("Game started on a {:?} board", self.state.bounds());
        }
    }

    /// Resets the round and drops any queued turns.
    pub fn restart(&mut self) -> Result<(), PlacementError> {
        self.turns.clear();
        self.state.restart()
    }

    /// Runs one simulation step, handling game over when it happens.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.is_running() {
            return TickOutcome::Idle;
        }

        for direction in self.turns.drain(..) {
            if self.state.request_heading(direction) == Some(HeadingChange::IgnoredReversal) {
                debug!("Ignored reversal to {direction:?}");
            }
        }

        if self.autoplay {
            self.steer_automatically();
        }

        let outcome = self.state.tick();
        if let TickOutcome::GameOver(reason) = outcome {
            self.finish_game(reason);
        }
        outcome
    }

    fn steer_automatically(&mut self) {
        let head = self.state.snake.head();
        // The cell behind the head is off limits even for a one-cell snake,
        // since the reversal would be dropped anyway.
        let mut body = self.state.body_minus_head();
        body.insert(head.offset(self.state.snake.heading().opposite()));
        let choice = next_heading(
            head,
            self.state.food,
            &self.state.obstacles,
            self.state.bounds(),
            &body,
        );

        match choice {
            Some(direction) => {
                let _ = self.state.request_heading(direction);
            }
            None => debug!("Autoplay has no safe move from {head:?}"),
        }
    }

    fn finish_game(&mut self, reason: DeathReason) {
        let score = self.state.score;
        info!("Game over ({reason:?}) with score {score}");

        self.cue.play();
        self.high_scores.record(ScoreEntry::new(score, today()));

        if let Err(error) = self.store.save(self.high_scores.entries()) {
            warn!("Failed to save high scores: {error}");
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    #[must_use]
    pub fn autoplay_enabled(&self) -> bool {
        self.autoplay
    }

    #[must_use]
    pub fn queued_turns(&self) -> usize {
        self.turns.len()
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
