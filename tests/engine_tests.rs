//! Engine tests - fall scheduling, locking, scoring and game over

use std::time::Duration;

use block_arcade::core::{Event, GameState, Grid, Phase, ScriptedShapes, SpeedConfig};
use block_arcade::types::{Color, Intent, ShapeKind};

fn game_with(kind: ShapeKind) -> GameState<ScriptedShapes> {
    GameState::new(SpeedConfig::default(), ScriptedShapes::repeat(kind))
}

fn game_on(kind: ShapeKind, rows: &[&str]) -> GameState<ScriptedShapes> {
    GameState::with_grid(
        SpeedConfig::default(),
        ScriptedShapes::repeat(kind),
        Grid::from_ascii(rows, Color::Red),
    )
}

/// Stand an I bar upright over column 5 and let it land.
fn drop_bar_into_column_five(game: &mut GameState<ScriptedShapes>) {
    // Rotating at row 0 would push the top cell above the grid.
    game.update(500, false);
    assert!(game.apply(Intent::Rotate));
    assert!(game.apply(Intent::MoveRight));
    game.update(15_000, false);
}

#[test]
fn test_new_game_state() {
    let game = game_with(ShapeKind::T);
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.score(), 0);
    assert_eq!(game.level(), 1);
    assert_eq!(game.lines(), 0);
    assert!(!game.paused());
    assert_eq!(game.grid().occupied_count(), 0);

    let piece = game.active().unwrap();
    assert_eq!(piece.kind, ShapeKind::T);
    assert_eq!((piece.x, piece.y), (3, 0));
}

#[test]
fn test_moves_shift_one_column() {
    let mut game = game_with(ShapeKind::O);
    assert!(game.apply(Intent::MoveLeft));
    assert_eq!(game.active().unwrap().x, 2);
    assert!(game.apply(Intent::MoveRight));
    assert!(game.apply(Intent::MoveRight));
    assert_eq!(game.active().unwrap().x, 4);
}

#[test]
fn test_move_into_wall_is_ignored() {
    let mut game = game_with(ShapeKind::O);
    for _ in 0..3 {
        assert!(game.apply(Intent::MoveLeft));
    }
    let before = game.snapshot();
    assert!(!game.apply(Intent::MoveLeft));
    assert_eq!(game.snapshot(), before);
    assert!(game.events().is_empty());
}

#[test]
fn test_fall_waits_for_full_interval() {
    let mut game = game_with(ShapeKind::O);
    for _ in 0..31 {
        game.update(16, false);
    }
    assert_eq!(game.active().unwrap().y, 0);
    game.update(16, false);
    assert_eq!(game.active().unwrap().y, 1);
    assert_eq!(game.accumulator_ms(), 12);
}

#[test]
fn test_soft_drop_uses_fast_interval() {
    let mut game = game_with(ShapeKind::O);
    assert_eq!(game.interval_ms(true), 50);
    game.update(100, true);
    assert_eq!(game.active().unwrap().y, 2);
}

#[test]
fn test_square_locks_at_floor_and_next_spawns() {
    let mut game = game_with(ShapeKind::O);
    // 18 steps to the floor, the 19th is blocked and locks.
    game.update(500 * 19, false);

    assert!(game.grid().is_occupied(3, 18));
    assert!(game.grid().is_occupied(4, 19));
    assert_eq!(game.grid().occupied_count(), 4);
    assert_eq!(game.take_events(), vec![Event::Locked]);

    let next = game.active().unwrap();
    assert_eq!((next.x, next.y), (3, 0));
    assert_eq!(game.accumulator_ms(), 0);
}

#[test]
fn test_filling_gap_clears_one_line() {
    let mut game = game_on(ShapeKind::I, &["#####.####"]);
    drop_bar_into_column_five(&mut game);

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.grid().occupied_count(), 3);
    assert!(game.grid().is_occupied(5, 19));
    assert!(!game.grid().is_occupied(0, 19));

    let events = game.take_events();
    assert!(events.contains(&Event::Rotated));
    assert!(events.contains(&Event::Locked));
    assert!(events.contains(&Event::LinesCleared(1)));
}

#[test]
fn test_double_clear_scores_quadratically() {
    let mut game = game_on(ShapeKind::I, &["#####.####", "#####.####"]);
    drop_bar_into_column_five(&mut game);

    assert_eq!(game.lines(), 2);
    assert_eq!(game.score(), 400);
    assert_eq!(game.grid().occupied_count(), 2);
}

#[test]
fn test_pause_freezes_everything() {
    let mut game = game_with(ShapeKind::T);
    game.update(300, false);
    game.set_paused(true);
    let before = game.snapshot();
    let acc = game.accumulator_ms();

    assert!(!game.update(10_000, true));
    assert!(!game.apply(Intent::MoveLeft));
    assert!(!game.apply(Intent::Rotate));
    assert_eq!(game.snapshot(), before);
    assert_eq!(game.accumulator_ms(), acc);

    game.toggle_pause();
    game.update(200, false);
    assert_eq!(game.active().unwrap().y, 1);
}

#[test]
fn test_stacking_ends_in_single_game_over() {
    let mut game = game_with(ShapeKind::O);
    let mut events = Vec::new();
    for _ in 0..100 {
        if game.game_over() {
            break;
        }
        game.update(10_000, false);
        events.extend(game.take_events());
    }

    assert!(game.game_over());
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.active().is_none());
    let locks = events.iter().filter(|e| **e == Event::Locked).count();
    assert_eq!(locks, 10);
    let overs: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, Event::GameOver { .. }))
        .collect();
    assert_eq!(overs, vec![&Event::GameOver { score: 0 }]);

    // Terminal: nothing changes afterwards.
    let after = game.snapshot();
    assert!(!game.update(10_000, true));
    assert!(!game.apply(Intent::Rotate));
    game.set_paused(true);
    assert!(!game.paused());
    assert_eq!(game.snapshot(), after);
    assert!(game.take_events().is_empty());
}

#[test]
fn test_level_up_starts_countdown() {
    let config = SpeedConfig {
        lines_per_level: 1,
        ..SpeedConfig::default()
    }
    .with_level_up_pause(Duration::from_millis(1000));
    let mut game = GameState::with_grid(
        config,
        ScriptedShapes::repeat(ShapeKind::I),
        Grid::from_ascii(&["#####.####"], Color::Red),
    );
    drop_bar_into_column_five(&mut game);

    assert_eq!(game.level(), 2);
    assert_eq!(game.fall_interval_ms(), 450);
    assert_eq!(game.countdown_ms(), 1000);
    assert!(game.take_events().contains(&Event::LevelUp(2)));
    assert!(!game.snapshot().playable());

    // Input and gravity wait for the countdown.
    assert!(!game.apply(Intent::MoveLeft));
    game.update(999, false);
    assert_eq!(game.active().unwrap().y, 0);
    game.update(1, false);
    assert_eq!(game.countdown_ms(), 0);
    assert!(game.apply(Intent::MoveLeft));
    game.update(450, false);
    assert_eq!(game.active().unwrap().y, 1);
}

#[test]
fn test_snapshot_mirrors_state() {
    let mut game = game_on(ShapeKind::S, &["#........."]);
    game.update(500, false);
    let snap = game.snapshot();

    assert_eq!(snap.cell(0, 19), Some(Color::Red));
    assert_eq!(snap.cell(1, 19), None);
    let active = snap.active.unwrap();
    assert_eq!(active.kind, ShapeKind::S);
    assert_eq!(active.color, Color::Green);
    assert_eq!(active.y, 1);
    assert_eq!(snap.level, 1);
    assert!(snap.playable());
}

#[test]
fn test_seeded_games_are_reproducible() {
    use block_arcade::core::UniformShapes;

    let mut a = GameState::new(SpeedConfig::default(), UniformShapes::new(99));
    let mut b = GameState::new(SpeedConfig::default(), UniformShapes::new(99));
    for _ in 0..40 {
        a.update(2_000, false);
        b.update(2_000, false);
    }
    assert_eq!(a.snapshot(), b.snapshot());
}
