//! Tile sum invariant: sliding and merging never create or destroy value.

use super::{Invariant, MoveTransition};

/// Invariant: the sum of all tiles is the same before and after a move.
///
/// A merge turns two tiles of value v into one of value 2v, so the sum is
/// conserved; only spawning adds value.
pub struct TileSumInvariant;

impl<'a> Invariant<MoveTransition<'a>> for TileSumInvariant {
    fn holds(transition: &MoveTransition<'a>) -> bool {
        transition.before.tile_sum() == transition.after.tile_sum()
    }

    fn description() -> &'static str {
        "Tile sum is conserved by a move"
    }
}
