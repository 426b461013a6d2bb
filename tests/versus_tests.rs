//! Versus tests - two independent engines under one clock

use block_arcade::core::{
    FrameInput, Outcome, ScriptedShapes, SpeedConfig, UniformShapes, Versus,
};
use block_arcade::types::{Intent, ShapeKind, Side};

fn bars() -> Versus<ScriptedShapes> {
    Versus::new(
        SpeedConfig::default(),
        ScriptedShapes::repeat(ShapeKind::I),
        ScriptedShapes::repeat(ShapeKind::I),
    )
}

fn step(v: &mut Versus<ScriptedShapes>, ms: u32) {
    v.update(ms, FrameInput::default());
}

/// Lay a flat bar with its left end at `x` on side one.
fn drop_flat(v: &mut Versus<ScriptedShapes>, x: i8) {
    let intent = if x < 3 {
        Intent::MoveLeft
    } else {
        Intent::MoveRight
    };
    for _ in 0..(x - 3).abs() {
        assert!(v.apply(Side::One, intent));
    }
    step(v, 10_000);
}

/// Stand a bar upright in column `col` on side one.
fn drop_upright(v: &mut Versus<ScriptedShapes>, col: i8) {
    step(v, 500);
    assert!(v.apply(Side::One, Intent::Rotate));
    // Upright offsets sit in local column 1.
    for _ in 0..(col - 1 - 3) {
        assert!(v.apply(Side::One, Intent::MoveRight));
    }
    step(v, 10_000);
}

#[test]
fn test_intents_only_touch_their_side() {
    let mut v = bars();
    assert!(v.apply(Side::One, Intent::MoveLeft));
    assert_eq!(v.side(Side::One).active().unwrap().x, 2);
    assert_eq!(v.side(Side::Two).active().unwrap().x, 3);
}

#[test]
fn test_soft_drop_is_per_side() {
    let mut v = bars();
    v.update(
        100,
        FrameInput {
            one: false,
            two: true,
        },
    );
    assert_eq!(v.side(Side::One).active().unwrap().y, 0);
    assert_eq!(v.side(Side::Two).active().unwrap().y, 2);
}

#[test]
fn test_pause_applies_to_both_sides() {
    let mut v = bars();
    v.toggle_pause();
    assert!(v.paused());
    assert!(v.side(Side::One).paused() && v.side(Side::Two).paused());

    let before = (v.snapshot(Side::One), v.snapshot(Side::Two));
    step(&mut v, 5_000);
    assert!(!v.apply(Side::Two, Intent::Rotate));
    assert_eq!((v.snapshot(Side::One), v.snapshot(Side::Two)), before);
}

#[test]
fn test_match_result_after_both_sides_end() {
    let mut v = bars();

    // Side one fills the bottom four rows: flat bars over columns 0-7,
    // then upright bars in columns 8 and 9.
    for _ in 0..4 {
        drop_flat(&mut v, 0);
    }
    for _ in 0..4 {
        drop_flat(&mut v, 4);
    }
    assert_eq!(v.outcome(), None);
    drop_upright(&mut v, 8);
    drop_upright(&mut v, 9);

    assert_eq!(v.side(Side::One).lines(), 4);
    assert_eq!(v.side(Side::One).score(), 1600);
    assert_eq!(v.side(Side::Two).score(), 0);

    for _ in 0..200 {
        if v.is_over() {
            break;
        }
        assert_eq!(v.outcome(), None);
        assert_eq!(v.take_match_score(), None);
        step(&mut v, 10_000);
    }

    assert!(v.is_over());
    assert_eq!(v.outcome(), Some(Outcome::Winner(Side::One)));
    assert_eq!(v.take_match_score(), Some(1600));
    assert_eq!(v.take_match_score(), None);
}

#[test]
fn test_equal_scores_tie() {
    let mut v = Versus::new(
        SpeedConfig::default(),
        ScriptedShapes::repeat(ShapeKind::O),
        ScriptedShapes::repeat(ShapeKind::O),
    );
    for _ in 0..100 {
        if v.is_over() {
            break;
        }
        step(&mut v, 10_000);
    }
    assert_eq!(v.outcome(), Some(Outcome::Tie));
}

#[test]
fn test_new_game_resets_both_sides() {
    let mut v = Versus::seeded(SpeedConfig::default(), 7);
    for _ in 0..5 {
        v.update(10_000, FrameInput::default());
    }
    let fresh: Versus<UniformShapes> = v.new_game();
    for side in Side::BOTH {
        assert_eq!(fresh.side(side).grid().occupied_count(), 0);
        assert_eq!(fresh.side(side).score(), 0);
    }
    assert!(!fresh.is_over());
}
