//! Game session lifecycle: at most one live session per registry.
//!
//! [`GameSession`] is the registry. [`GameSession::create`] hands out a
//! [`SessionHandle`]; creating again while a session is active returns a
//! handle to the same state. Handles are cheap to clone and serialize
//! access to their session with a mutex held for the whole operation.

use crate::config::SessionConfig;
use crate::games::twenty48::{
    Direction, GameError, GridState, MoveResult, Score, ScoreTracker, Seed, Tile, TileSpawner,
    engine, observer_running,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};
use tracing::{debug, info, instrument, warn};

/// One game in progress: the grid and its score.
#[derive(Debug)]
pub struct Session {
    grid: GridState,
    score: ScoreTracker,
}

impl Session {
    /// Creates an empty session with an `dimension × dimension` grid.
    pub fn new(dimension: usize) -> Self {
        Self {
            grid: GridState::new(dimension),
            score: ScoreTracker::new(),
        }
    }

    /// The grid.
    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    /// The score tracker.
    pub fn score(&self) -> &ScoreTracker {
        &self.score
    }

    fn place_tiles(&mut self, spawner: &mut dyn TileSpawner, count: usize) -> Vec<Seed> {
        let mut placed = Vec::with_capacity(count);
        for _ in 0..count {
            let empty = self.grid.empty_cells();
            let Some(seed) = spawner.next_tile(&empty) else {
                break;
            };
            match self.grid.place(seed) {
                Ok(()) => placed.push(seed),
                Err(e) => warn!(%seed, error = %e, "Spawner produced an unusable tile"),
            }
        }
        placed
    }
}

/// Outcome of a full turn: the move, the tiles spawned after it, and
/// whether any move remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Result of the move itself.
    pub result: MoveResult,
    /// Tiles placed after the move (empty when the move changed nothing).
    pub spawned: Vec<Seed>,
    /// True if no direction can change the grid any more.
    pub game_over: bool,
}

/// Shared access to one session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<Session>>,
}

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Locks the session. A poisoned lock is recovered: every operation
    /// leaves the grid whole before it can panic.
    fn lock(&self) -> MutexGuard<'_, Session> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Locks the session for a mutating operation, refusing calls made from
    /// inside the score observer.
    fn lock_for_update(&self) -> Result<MutexGuard<'_, Session>, GameError> {
        if observer_running() {
            warn!("Rejected session operation from inside score observer");
            return Err(GameError::Reentrant);
        }
        Ok(self.lock())
    }

    /// Slides and merges every line toward `direction`.
    ///
    /// The score observer runs after the session lock is released, so it may
    /// read the new state.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Reentrant`] when called from the score observer.
    #[instrument(skip(self))]
    pub fn move_tiles(&self, direction: Direction) -> Result<MoveResult, GameError> {
        let (result, notice) = {
            let mut session = self.lock_for_update()?;
            let Session { grid, score } = &mut *session;
            let (result, notice) = engine::record_move(grid, score, direction);
            debug!(
                changed = result.changed,
                score_delta = result.score_delta,
                total = score.current(),
                "Move completed"
            );
            (result, notice)
        };

        if let Some(notice) = notice {
            notice.deliver();
        }
        Ok(result)
    }

    /// Moves, then spawns tiles only if the move changed the grid.
    #[instrument(skip(self, spawner))]
    pub fn play(
        &self,
        direction: Direction,
        spawner: &mut dyn TileSpawner,
    ) -> Result<Turn, GameError> {
        let (turn, notice) = {
            let mut session = self.lock_for_update()?;
            let Session { grid, score } = &mut *session;
            let (result, notice) = engine::record_move(grid, score, direction);

            let spawned = if result.changed {
                let count = spawner.tiles_per_turn();
                session.place_tiles(spawner, count)
            } else {
                Vec::new()
            };

            let game_over = engine::is_game_over(&session.grid);
            if game_over {
                info!(
                    score = session.score.current(),
                    max_tile = session.grid.max_tile(),
                    "Game over"
                );
            }

            let turn = Turn {
                result,
                spawned,
                game_over,
            };
            (turn, notice)
        };

        if let Some(notice) = notice {
            notice.deliver();
        }
        Ok(turn)
    }

    /// Places up to `spawner.tiles_per_turn()` tiles.
    #[instrument(skip(self, spawner))]
    pub fn spawn(&self, spawner: &mut dyn TileSpawner) -> Result<Vec<Seed>, GameError> {
        let mut session = self.lock_for_update()?;
        let count = spawner.tiles_per_turn();
        Ok(session.place_tiles(spawner, count))
    }

    /// Clears the grid and score, then applies `seeds` in order.
    ///
    /// Every seed is checked first, so an out-of-range seed leaves the
    /// session untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::OutOfRange`] for a seed index outside the grid.
    #[instrument(skip(self, seeds), fields(seeds = seeds.len()))]
    pub fn reset(&self, seeds: &[Seed]) -> Result<(), GameError> {
        let mut session = self.lock_for_update()?;
        let cells = session.grid.cell_count();
        for seed in seeds {
            GameError::check_range(seed.index, cells).inspect_err(|_| {
                warn!(%seed, "Rejected seed outside the grid");
            })?;
        }

        session.grid.clear();
        session.score.reset();
        for seed in seeds {
            session.grid.place(*seed)?;
        }

        info!("Session reset");
        Ok(())
    }

    /// Clears the grid and score, then places the spawner's initial tiles.
    #[instrument(skip(self, spawner))]
    pub fn new_game(&self, spawner: &mut dyn TileSpawner) -> Result<Vec<Seed>, GameError> {
        let mut session = self.lock_for_update()?;
        session.grid.clear();
        session.score.reset();
        let count = spawner.initial_tiles();
        let placed = session.place_tiles(spawner, count);
        info!(tiles = placed.len(), "New game started");
        Ok(placed)
    }

    /// All tiles, flat, `index = column * N + row`.
    pub fn snapshot(&self) -> Vec<Tile> {
        self.lock().grid.flatten()
    }

    /// Copy of the grid.
    pub fn grid(&self) -> GridState {
        self.lock().grid.clone()
    }

    /// Grid dimension N.
    pub fn dimension(&self) -> usize {
        self.lock().grid.dimension()
    }

    /// Cumulative score.
    pub fn score(&self) -> Score {
        self.lock().score.current()
    }

    /// Registers the score observer, replacing any previous one.
    ///
    /// The observer runs on the thread of the move that scored, after that
    /// move has released the session. It may read the session and replace
    /// or clear itself; moves, spawns and resets issued from it fail with
    /// [`GameError::Reentrant`].
    pub fn on_score_change(&self, observer: impl FnMut(Score) + Send + 'static) {
        self.lock().score.on_change(observer);
    }

    /// Removes the score observer.
    pub fn clear_score_observer(&self) {
        self.lock().score.clear_observer();
    }

    /// True if no direction can change the grid.
    pub fn is_game_over(&self) -> bool {
        engine::is_game_over(&self.lock().grid)
    }

    /// Directions that would change the grid.
    pub fn legal_moves(&self) -> Vec<Direction> {
        engine::legal_moves(&self.lock().grid)
    }

    /// True if both handles refer to the same session.
    pub fn same_session(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Registry enforcing at most one active session.
#[derive(Debug, Default)]
pub struct GameSession {
    active: Mutex<Option<SessionHandle>>,
}

impl GameSession {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> &'static GameSession {
        static GLOBAL: OnceLock<GameSession> = OnceLock::new();
        GLOBAL.get_or_init(GameSession::new)
    }

    fn slot(&self) -> MutexGuard<'_, Option<SessionHandle>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the active session, creating it from `config` if absent.
    ///
    /// The configuration is validated before anything else happens, even
    /// when a session already exists.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Configuration`] for an unusable configuration;
    /// the registry is left as it was.
    #[instrument(skip(self, config), fields(dimension = config.dimension()))]
    pub fn create(&self, config: &SessionConfig) -> Result<SessionHandle, GameError> {
        config.validate()?;

        let mut slot = self.slot();
        if let Some(handle) = slot.as_ref() {
            debug!("Session already active, returning existing instance");
            return Ok(handle.clone());
        }

        let handle = SessionHandle::new(Session::new(*config.dimension()));
        *slot = Some(handle.clone());
        info!(surface = ?config.surface(), "Created new game session");
        Ok(handle)
    }

    /// The active session, if any.
    pub fn current(&self) -> Option<SessionHandle> {
        self.slot().clone()
    }

    /// True if a session is active.
    pub fn has_instance(&self) -> bool {
        self.slot().is_some()
    }

    /// Discards the active session. Returns whether one existed.
    ///
    /// Handles already given out keep working on the detached session, but
    /// the next [`create`](Self::create) starts fresh.
    #[instrument(skip(self))]
    pub fn destroy(&self) -> bool {
        let existed = self.slot().take().is_some();
        if existed {
            info!("Destroyed game session");
        } else {
            debug!("No session to destroy");
        }
        existed
    }
}
