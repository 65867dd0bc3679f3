//! Input dispatch: keys become commands, commands drive the session.
//!
//! The keyboard side only sends [`Command`]s down a channel; a single
//! [`Dispatcher`] owns the session handle and the spawner, applies each
//! command in order, and reports [`GameEvent`]s to the renderer.

use crate::games::twenty48::{Direction, GameError, MoveResult, Score, Seed, TileSpawner};
use crate::session::SessionHandle;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Abstract command produced by an input source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Slide tiles toward a direction.
    Move(Direction),
    /// Start a new game with spawned initial tiles.
    NewGame,
    /// Clear the grid and apply a fixed set of tiles.
    Reset(Vec<Seed>),
    /// Stop dispatching.
    Quit,
}

/// Maps a key code to a direction (arrow keys, WASD and vi keys).
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('h') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('l') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('k') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('j') => Some(Direction::Down),
        _ => None,
    }
}

/// Maps a key event to a command, if the key means anything.
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('r') | KeyCode::Char('n') => Some(Command::NewGame),
        code => direction_for_key(code).map(Command::Move),
    }
}

/// Messages sent from the dispatcher to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A move was applied.
    Moved {
        /// The direction played.
        direction: Direction,
        /// The move's result.
        result: MoveResult,
        /// Tiles spawned afterwards.
        spawned: Vec<Seed>,
    },
    /// The board was replaced (new game or reset).
    Restarted,
    /// No direction can change the board any more.
    GameOver {
        /// Final score.
        score: Score,
    },
    /// A command was rejected.
    Rejected(String),
}

/// Applies commands to one session, one at a time.
pub struct Dispatcher<S> {
    session: SessionHandle,
    spawner: S,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl<S: TileSpawner> Dispatcher<S> {
    /// Creates a dispatcher for `session`.
    pub fn new(
        session: SessionHandle,
        spawner: S,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            session,
            spawner,
            events,
        }
    }

    /// Applies one command. Returns `false` once the command was `Quit`.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> bool {
        let outcome = match command {
            Command::Quit => {
                info!("Quit requested");
                return false;
            }
            Command::Move(direction) => self.apply_move(direction),
            Command::NewGame => self
                .session
                .new_game(&mut self.spawner)
                .map(|_| vec![GameEvent::Restarted]),
            Command::Reset(seeds) => self
                .session
                .reset(&seeds)
                .map(|()| vec![GameEvent::Restarted]),
        };

        let events = outcome.unwrap_or_else(|e| {
            warn!(error = %e, "Command rejected");
            vec![GameEvent::Rejected(e.to_string())]
        });

        for event in events {
            if self.events.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
        true
    }

    fn apply_move(&mut self, direction: Direction) -> Result<Vec<GameEvent>, GameError> {
        let turn = self.session.play(direction, &mut self.spawner)?;
        let mut events = vec![GameEvent::Moved {
            direction,
            result: turn.result,
            spawned: turn.spawned,
        }];
        if turn.game_over {
            events.push(GameEvent::GameOver {
                score: self.session.score(),
            });
        }
        Ok(events)
    }

    /// Consumes commands until `Quit` or until every sender is dropped.
    #[instrument(skip_all)]
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<Command>) {
        info!("Dispatcher started");
        while let Some(command) = commands.recv().await {
            if !self.handle(command) {
                break;
            }
        }
        info!("Dispatcher stopped");
    }
}
