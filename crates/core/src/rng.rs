//! RNG module - seedable shape selection
//!
//! New pieces are drawn uniformly from the seven shapes (no bag, no
//! anti-repeat). The draw goes through [`ShapeSource`] so replays and tests can
//! substitute a scripted sequence without touching the engine.
//!
//! Also provides a simple LCG so a seed fully determines a game.

use crate::types::ShapeKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of a power-of-two LCG
    /// have short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state; feeding it back to [`SimpleRng::new`] resumes
    /// the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Where the engine gets its next shape from
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniform random draw over the seven shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformShapes {
    rng: SimpleRng,
}

impl UniformShapes {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Seed that resumes this source from its current position
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for UniformShapes {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShapeSource for UniformShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }
}

/// Fixed, repeating shape sequence for deterministic replay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedShapes {
    sequence: Vec<ShapeKind>,
    cursor: usize,
}

impl ScriptedShapes {
    /// An empty sequence falls back to the seven shapes in declaration order.
    pub fn new(sequence: impl Into<Vec<ShapeKind>>) -> Self {
        let mut sequence = sequence.into();
        if sequence.is_empty() {
            sequence = ShapeKind::ALL.to_vec();
        }
        Self {
            sequence,
            cursor: 0,
        }
    }

    /// Always the same shape
    pub fn repeat(kind: ShapeKind) -> Self {
        Self::new(vec![kind])
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.sequence[self.cursor % self.sequence.len()];
        self.cursor = (self.cursor + 1) % self.sequence.len();
        kind
    }
}
