//! Tests for session singleton discipline, score observers and reentrancy.

use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

use strictly_2048::{
    Direction, GameError, GameSession, MoveResult, ScriptedSpawner, Seed, SessionConfig,
    SessionHandle,
};

fn config() -> SessionConfig {
    SessionConfig::new("test")
}

#[test]
fn test_two_creates_share_state() {
    let registry = GameSession::new();
    let first = registry.create(&config()).expect("Create failed");
    let second = registry.create(&config()).expect("Create failed");

    first.reset(&[Seed::new(0, 2), Seed::new(1, 2)]).unwrap();
    second.move_tiles(Direction::Up).unwrap();

    assert_eq!(first.snapshot()[0], 4);
    assert_eq!(first.score(), 4);
    assert!(first.same_session(&second));
}

#[test]
fn test_lifecycle_states() {
    let registry = GameSession::new();
    assert!(!registry.has_instance());
    assert!(registry.current().is_none());

    let handle = registry.create(&config()).unwrap();
    assert!(registry.has_instance());
    assert!(registry.current().unwrap().same_session(&handle));

    assert!(registry.destroy());
    assert!(!registry.has_instance());
}

#[test]
fn test_configuration_error_before_any_state() {
    let registry = GameSession::new();
    let bad = SessionConfig::new("").with_dimension(4);

    let err = registry.create(&bad).unwrap_err();
    assert!(matches!(err, GameError::Configuration(_)));
    assert!(err.to_string().contains("surface"));
    assert!(!registry.has_instance());
}

#[test]
fn test_global_registry_is_shared() {
    let a = GameSession::global();
    let b = GameSession::global();
    assert!(std::ptr::eq(a, b));
}

#[test]
fn test_score_observer_sees_totals() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    let totals = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&totals);
    game.on_score_change(move |total| sink.lock().unwrap().push(total));

    // Column 0 holds 2, 2, 4, 4 from row 0 down.
    game.reset(&[
        Seed::new(0, 2),
        Seed::new(1, 2),
        Seed::new(2, 4),
        Seed::new(3, 4),
    ])
    .unwrap();
    game.move_tiles(Direction::Up).unwrap();
    // Nothing merges the second time, so the observer stays quiet.
    game.move_tiles(Direction::Up).unwrap();
    game.move_tiles(Direction::Left).unwrap();

    assert_eq!(*totals.lock().unwrap(), vec![12]);
    assert_eq!(&game.snapshot()[..4], &[4, 8, 0, 0]);
}

#[test]
fn test_reset_restarts_score() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    game.reset(&[Seed::new(0, 8), Seed::new(4, 8)]).unwrap();
    game.move_tiles(Direction::Left).unwrap();
    assert_eq!(game.score(), 16);

    game.reset(&[]).unwrap();
    assert_eq!(game.score(), 0);
    assert!(game.snapshot().iter().all(|t| *t == 0));
}

#[test]
fn test_observer_cannot_move_reentrantly() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    let inner: SessionHandle = game.clone();
    let outcome = Arc::new(Mutex::new(None));
    let record = Arc::clone(&outcome);

    game.on_score_change(move |_| {
        *record.lock().unwrap() = Some(inner.move_tiles(Direction::Down));
    });
    game.reset(&[Seed::new(0, 2), Seed::new(4, 2)]).unwrap();
    game.move_tiles(Direction::Left).unwrap();

    let nested = outcome.lock().unwrap().take().expect("Observer ran");
    assert_eq!(nested, Err(GameError::Reentrant));
    // The outer move still completed and nothing else moved.
    assert_eq!(game.snapshot()[0], 4);
    assert_eq!(game.score(), 4);
}

#[test]
fn test_observer_reads_new_state() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    let inner = game.clone();
    let (tx, rx) = mpsc::channel();

    game.on_score_change(move |total| {
        let _ = tx.send((total, inner.score(), inner.snapshot(), inner.is_game_over()));
    });
    game.reset(&[Seed::new(0, 2), Seed::new(4, 2)]).unwrap();

    let mover = game.clone();
    let worker = thread::spawn(move || mover.move_tiles(Direction::Left));
    let (total, score, snapshot, game_over) = rx
        .recv_timeout(Duration::from_secs(3))
        .expect("Observer did not finish reading the session");

    let moved = worker.join().expect("Mover panicked");
    assert_eq!(
        moved,
        Ok(MoveResult {
            changed: true,
            score_delta: 4
        })
    );
    assert_eq!(total, 4);
    assert_eq!(score, 4);
    assert_eq!(snapshot[0], 4);
    assert_eq!(snapshot[4], 0);
    assert!(!game_over);
}

#[test]
fn test_observer_can_replace_itself() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    let inner = game.clone();
    let first_calls = Arc::new(Mutex::new(0));
    let second_totals = Arc::new(Mutex::new(Vec::new()));
    let (first, second) = (Arc::clone(&first_calls), Arc::clone(&second_totals));

    game.on_score_change(move |_| {
        *first.lock().unwrap() += 1;
        let sink = Arc::clone(&second);
        inner.on_score_change(move |total| sink.lock().unwrap().push(total));
    });
    // Row 0: 2 2 4 4 by column; row 1: 4 in column 0.
    game.reset(&[
        Seed::new(0, 2),
        Seed::new(4, 2),
        Seed::new(8, 4),
        Seed::new(12, 4),
        Seed::new(1, 4),
    ])
    .unwrap();
    game.move_tiles(Direction::Left).unwrap();
    game.move_tiles(Direction::Up).unwrap();

    assert_eq!(*first_calls.lock().unwrap(), 1);
    assert_eq!(*second_totals.lock().unwrap(), vec![12 + 8]);
}

#[test]
fn test_cleared_observer_is_not_called() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    let inner = game.clone();
    let calls = Arc::new(Mutex::new(0));
    let counter = Arc::clone(&calls);

    game.on_score_change(move |_| {
        *counter.lock().unwrap() += 1;
        inner.clear_score_observer();
    });
    // Rows 0 and 1 each hold 2 in columns 0 and 1.
    game.reset(&[Seed::new(0, 2), Seed::new(4, 2), Seed::new(1, 2), Seed::new(5, 2)])
        .unwrap();
    game.move_tiles(Direction::Left).unwrap();
    game.move_tiles(Direction::Up).unwrap();

    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(game.score(), 8 + 8);
}

#[test]
fn test_largest_tiles_slide_without_merging() {
    let registry = GameSession::new();
    let game = registry.create(&config()).unwrap();
    let top = 1u32 << 31;
    game.reset(&[Seed::new(0, top), Seed::new(1, top)]).unwrap();

    let up = game.move_tiles(Direction::Up).unwrap();
    let down = game.move_tiles(Direction::Down).unwrap();

    assert!(!up.changed);
    assert!(down.changed);
    assert_eq!(down.score_delta, 0);
    assert_eq!(&game.snapshot()[..4], &[0, 0, top, top]);
    assert_eq!(game.score(), 0);
}

#[test]
fn test_concurrent_moves_are_serialized() {
    let registry = GameSession::new();
    let game = registry.create(&config().with_dimension(8)).unwrap();
    let seeds: Vec<Seed> = (0..64).map(|index| Seed::new(index, 2)).collect();
    game.reset(&seeds).unwrap();

    let workers: Vec<_> = [Direction::Left, Direction::Up, Direction::Right, Direction::Down]
        .into_iter()
        .map(|direction| {
            let handle = game.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    handle.move_tiles(direction).unwrap();
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().expect("Worker panicked");
    }

    let sum: u64 = game.snapshot().iter().map(|t| u64::from(*t)).sum();
    assert_eq!(sum, 128);
}

#[test]
fn test_play_reports_game_over() {
    let registry = GameSession::new();
    let game = registry.create(&config().with_dimension(2)).unwrap();
    // Row 0: 2 at column 0. Row 1: 4 then 8.
    game.reset(&[Seed::new(0, 2), Seed::new(1, 4), Seed::new(3, 8)])
        .unwrap();
    let mut spawner = ScriptedSpawner::new([Seed::new(0, 8)]);

    let turn = game.play(Direction::Right, &mut spawner).unwrap();

    assert!(turn.result.changed);
    assert_eq!(turn.spawned, vec![Seed::new(0, 8)]);
    assert_eq!(game.snapshot(), vec![8, 4, 2, 8]);
    assert!(turn.game_over);
    assert!(game.is_game_over());
    assert!(game.legal_moves().is_empty());
}
