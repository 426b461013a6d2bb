//! Split-board match: two independent engines updated in the same frame
//!
//! The sides share nothing. The only cross-side read happens once both are
//! over, to pick a winner and the single high score for the match.

use tracing::info;

use crate::config::SpeedConfig;
use crate::engine::GameState;
use crate::events::Event;
use crate::rng::{ShapeSource, UniformShapes};
use crate::snapshot::GameSnapshot;
use crate::types::{Intent, Side};

/// Seed offset so the two sides never draw the same sequence
const SIDE_TWO_SEED_SALT: u32 = 0x9E37_79B9;

/// Soft-drop state of each side for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct FrameInput {
    pub one: bool,
    pub two: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Winner(Side),
    Tie,
}

#[derive(Debug, Clone)]
pub struct Versus<S = UniformShapes> {
    one: GameState<S>,
    two: GameState<S>,
    paused: bool,
    result_taken: bool,
}

impl<S: ShapeSource> Versus<S> {
    pub fn new(config: SpeedConfig, one: S, two: S) -> Self {
        Self {
            one: GameState::new(config, one),
            two: GameState::new(config, two),
            paused: false,
            result_taken: false,
        }
    }

    pub fn side(&self, side: Side) -> &GameState<S> {
        match side {
            Side::One => &self.one,
            Side::Two => &self.two,
        }
    }

    fn side_mut(&mut self, side: Side) -> &mut GameState<S> {
        match side {
            Side::One => &mut self.one,
            Side::Two => &mut self.two,
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume both boards together
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        self.one.set_paused(paused);
        self.two.set_paused(paused);
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    pub fn apply(&mut self, side: Side, intent: Intent) -> bool {
        if self.paused {
            return false;
        }
        self.side_mut(side).apply(intent)
    }

    /// Update side one, then side two
    pub fn update(&mut self, elapsed_ms: u32, input: FrameInput) {
        if self.paused {
            return;
        }
        self.one.update(elapsed_ms, input.one);
        self.two.update(elapsed_ms, input.two);
    }

    pub fn is_over(&self) -> bool {
        self.one.game_over() && self.two.game_over()
    }

    /// Winner by score once both sides are over
    pub fn outcome(&self) -> Option<Outcome> {
        if !self.is_over() {
            return None;
        }
        let (a, b) = (self.one.score(), self.two.score());
        Some(if a > b {
            Outcome::Winner(Side::One)
        } else if b > a {
            Outcome::Winner(Side::Two)
        } else {
            Outcome::Tie
        })
    }

    /// The match's high score, returned once after both sides are over
    pub fn take_match_score(&mut self) -> Option<u32> {
        if self.result_taken || !self.is_over() {
            return None;
        }
        self.result_taken = true;
        let best = self.one.score().max(self.two.score());
        info!(
            p1 = self.one.score(),
            p2 = self.two.score(),
            outcome = ?self.outcome(),
            "match over"
        );
        Some(best)
    }

    pub fn take_events(&mut self, side: Side) -> Vec<Event> {
        self.side_mut(side).take_events()
    }

    pub fn snapshot(&self, side: Side) -> GameSnapshot {
        self.side(side).snapshot()
    }
}

impl<S: ShapeSource + Clone> Versus<S> {
    /// Fresh match; each side's source continues from where it stopped
    pub fn new_game(&self) -> Self {
        Self {
            one: self.one.new_game(),
            two: self.two.new_game(),
            paused: false,
            result_taken: false,
        }
    }
}

impl Versus<UniformShapes> {
    /// Derive two independent shape sources from one seed
    pub fn seeded(config: SpeedConfig, seed: u32) -> Self {
        Self::new(
            config,
            UniformShapes::new(seed),
            UniformShapes::new(seed.wrapping_add(SIDE_TWO_SEED_SALT)),
        )
    }
}
