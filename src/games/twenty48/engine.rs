//! Directional moves over the whole grid.
//!
//! A move processes every row (`Left`/`Right`) or every column
//! (`Up`/`Down`): each line is read wall-first, compacted, and written back.
//! Spawning and win/loss decisions are left to the caller.

use super::compactor::compact_line;
use super::grid::GridState;
use super::invariants::{InvariantSet, MoveInvariants, MoveTransition};
use super::score::{ScoreNotice, ScoreTracker};
use super::types::{Direction, MoveResult};
use tracing::{debug, instrument, warn};

/// Slides and merges every line toward `direction`, without touching score.
#[instrument(skip(grid), fields(dimension = grid.dimension()))]
pub fn shift(grid: &mut GridState, direction: Direction) -> MoveResult {
    let mut result = MoveResult::default();

    for line in 0..grid.dimension() {
        let values = grid.read_line(direction, line);
        let outcome = compact_line(&values);
        if outcome.changed {
            grid.store_line(direction, line, &outcome.values);
        }
        result.absorb(outcome.changed, outcome.score_delta);
    }

    result
}

/// Applies one move and forwards any score to `score`.
///
/// The score observer, if any, runs before this function returns.
#[instrument(skip(grid, score), fields(dimension = grid.dimension()))]
pub fn apply_move(
    grid: &mut GridState,
    score: &mut ScoreTracker,
    direction: Direction,
) -> MoveResult {
    let (result, notice) = record_move(grid, score, direction);
    if let Some(notice) = notice {
        notice.deliver();
    }
    result
}

/// Applies one move and records its score, leaving the observer call to
/// the caller.
pub(crate) fn record_move(
    grid: &mut GridState,
    score: &mut ScoreTracker,
    direction: Direction,
) -> (MoveResult, Option<ScoreNotice>) {
    let before = checks_enabled().then(|| grid.clone());

    let result = shift(grid, direction);
    debug!(changed = result.changed, score_delta = result.score_delta, "Move applied");

    if let Some(before) = before {
        assert_move_invariants(&before, grid, result);
    }

    let notice = if result.score_delta > 0 {
        score.record(result.score_delta)
    } else {
        None
    };

    (result, notice)
}

/// True if moving toward `direction` would change the grid.
pub fn can_move(grid: &GridState, direction: Direction) -> bool {
    (0..grid.dimension()).any(|line| compact_line(&grid.read_line(direction, line)).changed)
}

/// Directions that would change the grid.
pub fn legal_moves(grid: &GridState) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|direction| can_move(grid, *direction))
        .collect()
}

/// True if no direction changes the grid.
///
/// An empty grid counts as over: nothing can slide until a tile is spawned.
pub fn is_game_over(grid: &GridState) -> bool {
    !Direction::ALL.into_iter().any(|direction| can_move(grid, direction))
}

fn checks_enabled() -> bool {
    cfg!(any(debug_assertions, feature = "verification"))
}

/// Panics if a move broke tile conservation.
fn assert_move_invariants(before: &GridState, after: &GridState, result: MoveResult) {
    let transition = MoveTransition {
        before,
        after,
        result,
    };
    if let Err(violations) = MoveInvariants::check_all(&transition) {
        let descriptions = violations
            .iter()
            .map(|v| v.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        warn!(%descriptions, "Move invariant violated");
        panic!("Move invariant violated: {}", descriptions);
    }
}
