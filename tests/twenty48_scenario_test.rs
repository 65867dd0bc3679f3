//! End-to-end move scenarios on a 4×4 grid.
//!
//! Flat indices are `column * 4 + row`:
//!
//! ```text
//!  0  4  8 12     row 0
//!  1  5  9 13     row 1
//!  2  6 10 14     row 2
//!  3  7 11 15     row 3
//! ```
//!
//! `Up` compacts toward row 0, `Down` toward row 3, `Left` toward column 0
//! and `Right` toward column 3.

use strictly_2048::{Direction, GameSession, Seed, SessionConfig, SessionHandle};

fn seeded(seeds: &[Seed]) -> (GameSession, SessionHandle) {
    let registry = GameSession::new();
    let game = registry
        .create(&SessionConfig::new("test"))
        .expect("Valid config");
    game.reset(seeds).expect("Seeds in range");
    (registry, game)
}

#[test]
fn test_equal_starting_tiles() {
    let (_registry, game) = seeded(&[Seed::new(0, 2), Seed::new(13, 2)]);

    let flat = game.snapshot();
    assert_eq!(flat[0], 2);
    assert_eq!(flat[13], 2);

    game.move_tiles(Direction::Left).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[13], 0);
    assert_eq!(flat[1], 2);

    let result = game.move_tiles(Direction::Down).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[0], 0);
    assert_eq!(flat[1], 0);
    assert_eq!(flat[3], 4);
    assert_eq!(result.score_delta, 4);

    game.move_tiles(Direction::Right).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[3], 0);
    assert_eq!(flat[15], 4);

    game.move_tiles(Direction::Up).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[15], 0);
    assert_eq!(flat[12], 4);

    assert_eq!(game.score(), 4);
}

#[test]
fn test_different_starting_tiles() {
    let (_registry, game) = seeded(&[Seed::new(2, 4), Seed::new(8, 2)]);

    let result = game.move_tiles(Direction::Down).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[3], 4);
    assert_eq!(flat[11], 2);
    assert_eq!(result.score_delta, 0);

    game.move_tiles(Direction::Right).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[11], 4);
    assert_eq!(flat[15], 2);

    game.move_tiles(Direction::Up).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[8], 4);
    assert_eq!(flat[12], 2);

    game.move_tiles(Direction::Left).unwrap();
    let flat = game.snapshot();
    assert_eq!(flat[0], 4);
    assert_eq!(flat[4], 2);

    assert_eq!(game.score(), 0);
    assert_eq!(flat.iter().filter(|t| **t != 0).count(), 2);
}

#[test]
fn test_full_row_merges_pairwise() {
    // Row 0 holds 2 in every column.
    let (_registry, game) = seeded(&[
        Seed::new(0, 2),
        Seed::new(4, 2),
        Seed::new(8, 2),
        Seed::new(12, 2),
    ]);

    let result = game.move_tiles(Direction::Left).unwrap();

    let flat = game.snapshot();
    assert_eq!([flat[0], flat[4], flat[8], flat[12]], [4, 4, 0, 0]);
    assert_eq!(result.score_delta, 8);
}

#[test]
fn test_right_keeps_relative_order() {
    // Row 0: 4 at column 0, 2 at column 2.
    let (_registry, game) = seeded(&[Seed::new(0, 4), Seed::new(8, 2)]);

    let result = game.move_tiles(Direction::Right).unwrap();

    let flat = game.snapshot();
    assert_eq!([flat[0], flat[4], flat[8], flat[12]], [0, 0, 4, 2]);
    assert!(result.changed);
    assert_eq!(result.score_delta, 0);
}

#[test]
fn test_repeated_direction_becomes_no_op() {
    let (_registry, game) = seeded(&[Seed::new(1, 2), Seed::new(6, 8), Seed::new(14, 16)]);

    assert!(game.move_tiles(Direction::Down).unwrap().changed);
    let before = game.snapshot();
    let again = game.move_tiles(Direction::Down).unwrap();

    assert!(!again.changed);
    assert_eq!(again.score_delta, 0);
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_tile_sum_conserved_and_score_monotonic() {
    let (_registry, game) = seeded(&[
        Seed::new(0, 2),
        Seed::new(1, 2),
        Seed::new(2, 4),
        Seed::new(5, 4),
        Seed::new(9, 8),
        Seed::new(10, 8),
        Seed::new(13, 2),
        Seed::new(15, 2),
    ]);
    let sum = |flat: &[u32]| flat.iter().map(|t| u64::from(*t)).sum::<u64>();
    let initial_sum = sum(&game.snapshot());

    let mut last_score = 0;
    for direction in [
        Direction::Left,
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ] {
        let result = game.move_tiles(direction).unwrap();
        assert_eq!(sum(&game.snapshot()), initial_sum);
        assert_eq!(game.score(), last_score + result.score_delta);
        last_score = game.score();
    }
}

#[test]
fn test_five_by_five_grid() {
    let registry = GameSession::new();
    let game = registry
        .create(&SessionConfig::new("test").with_dimension(5))
        .unwrap();
    // Column 4 (indices 20..25): 2 at rows 0, 2 and 4.
    game.reset(&[Seed::new(20, 2), Seed::new(22, 2), Seed::new(24, 2)])
        .unwrap();

    let result = game.move_tiles(Direction::Down).unwrap();

    let flat = game.snapshot();
    assert_eq!(flat.len(), 25);
    assert_eq!(&flat[20..25], &[0, 0, 0, 2, 4]);
    assert_eq!(result.score_delta, 4);
}
