//! Application state for the terminal front end.

use strictly_2048::{GameEvent, Score};
use tracing::debug;

/// What the renderer shows besides the grid.
#[derive(Debug, Clone)]
pub struct App {
    status_message: String,
    last_gain: Score,
    moves: usize,
    game_over: bool,
}

impl App {
    /// Creates a new application.
    pub fn new() -> Self {
        Self {
            status_message: "Starting new game...".to_string(),
            last_gain: 0,
            moves: 0,
            game_over: false,
        }
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Points gained by the last scoring move.
    pub fn last_gain(&self) -> Score {
        self.last_gain
    }

    /// Moves that changed the board this game.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// True once no move remains.
    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Handles an event from the dispatcher.
    pub fn handle_event(&mut self, event: GameEvent) {
        debug!(?event, "Handling game event");

        match event {
            GameEvent::Moved {
                direction, result, ..
            } => {
                if result.changed {
                    self.moves += 1;
                    if result.score_delta > 0 {
                        self.last_gain = result.score_delta;
                    }
                    self.status_message = format!("Moved {}", direction);
                } else {
                    self.status_message = format!("Nothing moves {}", direction);
                }
            }
            GameEvent::Restarted => {
                *self = Self::new();
                self.status_message = "New game. Use the arrow keys.".to_string();
            }
            GameEvent::GameOver { score } => {
                self.game_over = true;
                self.status_message = format!(
                    "Game over with {} points! Press 'r' to restart or 'q' to quit.",
                    score
                );
            }
            GameEvent::Rejected(reason) => {
                self.status_message = format!("Error: {}", reason);
            }
        }
    }
}
