//! First-class invariants for directional moves.
//!
//! Invariants are logical properties every move must preserve. They are
//! checked after each move in debug builds and can be tested independently.

pub mod tile_count;
pub mod tile_sum;

pub use tile_count::TileCountInvariant;
pub use tile_sum::TileSumInvariant;

use super::grid::GridState;
use super::types::MoveResult;

/// The observable effect of one move: the grid before, the grid after and
/// the reported result.
#[derive(Debug, Clone, Copy)]
pub struct MoveTransition<'a> {
    /// Grid before the move.
    pub before: &'a GridState,
    /// Grid after the move.
    pub after: &'a GridState,
    /// Result reported by the engine.
    pub result: MoveResult,
}

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for 2-tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All move invariants as a composable set.
pub type MoveInvariants = (TileSumInvariant, TileCountInvariant);
