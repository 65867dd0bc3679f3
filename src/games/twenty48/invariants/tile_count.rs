//! Tile count invariant: moves only remove tiles, and only by merging.

use super::{Invariant, MoveTransition};

/// Invariant: the number of non-empty tiles never grows during a move, and a
/// move that removed no tile awarded no score.
pub struct TileCountInvariant;

impl<'a> Invariant<MoveTransition<'a>> for TileCountInvariant {
    fn holds(transition: &MoveTransition<'a>) -> bool {
        let before = transition.before.occupied_count();
        let after = transition.after.occupied_count();

        if after > before {
            return false;
        }

        let merges = before - after;
        (merges == 0) == (transition.result.score_delta == 0)
    }

    fn description() -> &'static str {
        "Tile count never grows and only merges award score"
    }
}
