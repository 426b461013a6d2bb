//! Speed configuration and difficulty lookup
//!
//! Difficulty divides the base and soft-drop intervals: easy 1.0, medium 1.5,
//! hard 2.0. The engine only ever sees the resulting [`SpeedConfig`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::types::{
    BASE_FALL_MS, FALL_FLOOR_MS, FALL_STEP_MS, FAST_FALL_MS, LEVEL_UP_COUNTDOWN_MS,
    LINES_PER_LEVEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Speed divisor applied to interval constants
    pub fn divisor(&self) -> f64 {
        match self {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }

    /// Lenient lookup: unknown names map to medium.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or(Difficulty::Medium)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval constants consumed by the fall scheduler and level progression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpeedConfig {
    /// Fall interval at level 1
    pub base_fall_ms: u32,
    /// Fall interval while soft drop is held
    pub fast_fall_ms: u32,
    /// Interval reduction per level
    pub step_ms: u32,
    /// Interval floor
    pub floor_ms: u32,
    /// Cumulative lines per level
    pub lines_per_level: u32,
    /// Countdown after each level-up; zero disables it
    pub level_up_pause: Duration,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        Self {
            base_fall_ms: BASE_FALL_MS,
            fast_fall_ms: FAST_FALL_MS,
            step_ms: FALL_STEP_MS,
            floor_ms: FALL_FLOOR_MS,
            lines_per_level: LINES_PER_LEVEL,
            level_up_pause: Duration::ZERO,
        }
    }
}

impl SpeedConfig {
    /// Reference constants scaled by the difficulty divisor.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let scale = |ms: u32| ((ms as f64 / difficulty.divisor()) as u32).max(1);
        Self {
            base_fall_ms: scale(BASE_FALL_MS),
            fast_fall_ms: scale(FAST_FALL_MS),
            ..Self::default()
        }
    }

    /// Enable the level-up countdown with the reference duration
    pub fn with_level_up_countdown(mut self) -> Self {
        self.level_up_pause = Duration::from_millis(LEVEL_UP_COUNTDOWN_MS as u64);
        self
    }

    pub fn with_level_up_pause(mut self, pause: Duration) -> Self {
        self.level_up_pause = pause;
        self
    }

    /// Replace unusable zero values with the reference defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let or_default = |v: u32, d: u32| if v == 0 { d } else { v };
        Self {
            base_fall_ms: or_default(self.base_fall_ms, defaults.base_fall_ms),
            fast_fall_ms: or_default(self.fast_fall_ms, defaults.fast_fall_ms),
            step_ms: self.step_ms,
            floor_ms: or_default(self.floor_ms, defaults.floor_ms),
            lines_per_level: or_default(self.lines_per_level, defaults.lines_per_level),
            level_up_pause: self.level_up_pause,
        }
    }
}
