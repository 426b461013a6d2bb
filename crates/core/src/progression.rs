//! Level progression and scoring
//!
//! Level starts at 1 and is always `1 + lines / lines_per_level`. The fall
//! interval shrinks by a fixed step per level down to a floor.

use crate::config::SpeedConfig;
use crate::types::LINE_CLEAR_POINTS;

/// Points for a single clear of `lines` rows: `lines² × 100`
pub fn line_clear_score(lines: u32) -> u32 {
    lines
        .saturating_mul(lines)
        .saturating_mul(LINE_CLEAR_POINTS)
}

/// Fall interval for `level` under `config`, clamped at the floor
pub fn fall_interval_ms(config: &SpeedConfig, level: u32) -> u32 {
    let reduction = level.saturating_sub(1).saturating_mul(config.step_ms);
    config
        .base_fall_ms
        .saturating_sub(reduction)
        .max(config.floor_ms)
}

/// Level and cumulative line count for one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Progression {
    level: u32,
    lines: u32,
    fall_interval_ms: u32,
}

impl Progression {
    pub fn new(config: &SpeedConfig) -> Self {
        Self {
            level: 1,
            lines: 0,
            fall_interval_ms: fall_interval_ms(config, 1),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Level-derived interval, without soft drop
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    /// Add `cleared` rows. Returns the number of levels gained.
    ///
    /// A single large clear may cross more than one threshold; the level
    /// catches up fully so it never lags the line count.
    pub fn record(&mut self, config: &SpeedConfig, cleared: u32) -> u32 {
        self.lines = self.lines.saturating_add(cleared);
        let per_level = config.lines_per_level.max(1);
        let mut gained = 0;
        while self.lines / per_level > self.level - 1 {
            self.level += 1;
            gained += 1;
        }
        if gained > 0 {
            self.fall_interval_ms = fall_interval_ms(config, self.level);
        }
        gained
    }
}
