//! Single-line compaction with pairwise merging.
//!
//! A line is given wall-first: index 0 is the edge the move slides toward.
//! Non-empty tiles slide toward index 0 in their original order; a tile
//! equal to its immediate predecessor merges into it, unless that
//! predecessor was itself produced by a merge during this pass or the
//! doubled value would not fit in a [`Tile`].

use super::types::{Score, Tile};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of compacting one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineOutcome {
    /// Compacted line, same length as the input, zero-padded.
    pub values: Vec<Tile>,
    /// Sum of the doubled values produced by merges.
    pub score_delta: Score,
    /// Whether any position differs from the input.
    pub changed: bool,
}

/// Compacts and merges one wall-first line.
///
/// ```
/// use strictly_2048::compact_line;
///
/// let outcome = compact_line(&[2, 2, 2, 2]);
/// assert_eq!(outcome.values, vec![4, 4, 0, 0]);
/// assert_eq!(outcome.score_delta, 8);
/// assert!(outcome.changed);
/// ```
#[instrument(level = "trace")]
pub fn compact_line(line: &[Tile]) -> LineOutcome {
    let mut values: Vec<Tile> = Vec::with_capacity(line.len());
    let mut last_was_merge = false;
    let mut score_delta: Score = 0;

    for &value in line.iter().filter(|value| **value != 0) {
        let merged = value.checked_mul(2);
        match (values.last_mut(), merged) {
            (Some(last), Some(merged)) if *last == value && !last_was_merge => {
                *last = merged;
                score_delta += Score::from(merged);
                last_was_merge = true;
            }
            _ => {
                values.push(value);
                last_was_merge = false;
            }
        }
    }

    values.resize(line.len(), 0);
    let changed = values.as_slice() != line;

    LineOutcome {
        values,
        score_delta,
        changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_line_unchanged() {
        let outcome = compact_line(&[0, 0, 0, 0]);
        assert_eq!(outcome.values, vec![0, 0, 0, 0]);
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_slides_over_gaps() {
        let outcome = compact_line(&[0, 0, 0, 2]);
        assert_eq!(outcome.values, vec![2, 0, 0, 0]);
        assert!(outcome.changed);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn test_no_double_merge() {
        let outcome = compact_line(&[2, 2, 2, 2]);
        assert_eq!(outcome.values, vec![4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 8);
    }

    #[test]
    fn test_merged_tile_does_not_absorb_third() {
        let outcome = compact_line(&[2, 2, 4, 0]);
        assert_eq!(outcome.values, vec![4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 4);

        let outcome = compact_line(&[4, 4, 8, 0]);
        assert_eq!(outcome.values, vec![8, 8, 0, 0]);
    }

    #[test]
    fn test_three_equal_merges_wall_pair() {
        let outcome = compact_line(&[0, 2, 2, 2]);
        assert_eq!(outcome.values, vec![4, 2, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_zeros_do_not_block_merge() {
        let outcome = compact_line(&[2, 0, 0, 2]);
        assert_eq!(outcome.values, vec![4, 0, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
    }

    #[test]
    fn test_different_values_keep_order() {
        let outcome = compact_line(&[0, 2, 0, 4]);
        assert_eq!(outcome.values, vec![2, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn test_saturated_line_unchanged() {
        let outcome = compact_line(&[2, 4, 8, 16]);
        assert_eq!(outcome.values, vec![2, 4, 8, 16]);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_non_adjacent_equal_values_do_not_merge() {
        let outcome = compact_line(&[2, 4, 2, 0]);
        assert_eq!(outcome.values, vec![2, 4, 2, 0]);
        assert!(!outcome.changed);
    }

    #[test]
    fn test_other_dimensions() {
        assert_eq!(compact_line(&[2, 2, 2]).values, vec![4, 2, 0]);
        assert_eq!(compact_line(&[8, 8, 0, 16, 16, 0]).values, vec![16, 32, 0, 0, 0, 0]);
        assert_eq!(compact_line(&[]).values, Vec::<Tile>::new());
    }

    #[test]
    fn test_top_value_never_merges() {
        let top: Tile = 1 << 31;

        let outcome = compact_line(&[top, top, 0, 0]);
        assert_eq!(outcome.values, vec![top, top, 0, 0]);
        assert_eq!(outcome.score_delta, 0);
        assert!(!outcome.changed);

        let outcome = compact_line(&[0, top, 2, 2]);
        assert_eq!(outcome.values, vec![top, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 4);
    }
}
