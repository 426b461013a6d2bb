//! Engine module - one player's grid, active piece and fall scheduler
//!
//! Each frame the host calls [`GameState::update`] with the elapsed time. The
//! fall accumulator advances by that amount; every time it crosses the current
//! interval the piece attempts one descend step. A blocked step locks the piece,
//! clears rows, updates the level and spawns the next piece, and ends the frame.
//!
//! Piece lifecycle: `Falling -> Locking -> Spawning -> Falling | GameOver`.
//! Locking and spawning complete inside a single update, so only
//! [`Phase::Falling`] and [`Phase::GameOver`] are observable between calls.

use tracing::{debug, info};

use crate::config::SpeedConfig;
use crate::events::Event;
use crate::grid::Grid;
use crate::progression::{line_clear_score, Progression};
use crate::rng::{ShapeSource, UniformShapes};
use crate::shapes::Piece;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::Intent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Falling,
    /// Terminal; no further update or intent mutates the game
    GameOver,
}

/// Complete single-player game state
#[derive(Debug, Clone)]
pub struct GameState<S = UniformShapes> {
    config: SpeedConfig,
    grid: Grid,
    active: Option<Piece>,
    source: S,
    progression: Progression,
    score: u32,
    accumulator_ms: u32,
    countdown_ms: u32,
    paused: bool,
    game_over: bool,
    /// Events since the last drain (consumed by the host)
    events: Vec<Event>,
}

impl<S: ShapeSource> GameState<S> {
    /// Create a new game on an empty grid and spawn the first piece
    pub fn new(config: SpeedConfig, source: S) -> Self {
        Self::with_grid(config, source, Grid::new())
    }

    /// Create a game on a prepared grid; the first spawn is checked against it.
    pub fn with_grid(config: SpeedConfig, source: S, grid: Grid) -> Self {
        let config = config.sanitized();
        let mut state = Self {
            config,
            grid,
            active: None,
            source,
            progression: Progression::new(&config),
            score: 0,
            accumulator_ms: 0,
            countdown_ms: 0,
            paused: false,
            game_over: false,
            events: Vec::new(),
        };
        info!(
            base_fall_ms = config.base_fall_ms,
            fast_fall_ms = config.fast_fall_ms,
            lines_per_level = config.lines_per_level,
            "game started"
        );
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &SpeedConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progression.level()
    }

    pub fn lines(&self) -> u32 {
        self.progression.lines()
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else {
            Phase::Falling
        }
    }

    pub fn accumulator_ms(&self) -> u32 {
        self.accumulator_ms
    }

    /// Remaining level-up countdown
    pub fn countdown_ms(&self) -> u32 {
        self.countdown_ms
    }

    /// Level-derived fall interval, ignoring soft drop
    pub fn fall_interval_ms(&self) -> u32 {
        self.progression.fall_interval_ms()
    }

    /// Interval consulted by the scheduler for one frame
    pub fn interval_ms(&self, soft_drop: bool) -> u32 {
        let level = self.progression.fall_interval_ms();
        if soft_drop {
            self.config.fast_fall_ms.min(level)
        } else {
            level
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.game_over {
            return;
        }
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Events recorded since the last call
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cells = *self.grid.cells();
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.level = self.progression.level();
        out.lines = self.progression.lines();
        out.paused = self.paused;
        out.game_over = self.game_over;
        out.countdown_ms = self.countdown_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Apply a player intent. Returns true if the piece changed.
    ///
    /// Rejected moves and rotations leave every bit of state untouched.
    pub fn apply(&mut self, intent: Intent) -> bool {
        if !self.accepts_input() {
            return false;
        }
        match intent {
            Intent::MoveLeft => self.try_shift(-1, 0),
            Intent::MoveRight => self.try_shift(1, 0),
            Intent::Rotate => self.try_rotate(),
        }
    }

    /// Advance the fall scheduler by `elapsed_ms`.
    ///
    /// Returns true if the piece descended or locked during this call.
    pub fn update(&mut self, elapsed_ms: u32, soft_drop: bool) -> bool {
        if self.paused || self.game_over {
            return false;
        }

        if self.countdown_ms > 0 {
            self.countdown_ms = self.countdown_ms.saturating_sub(elapsed_ms);
            return false;
        }

        if self.active.is_none() {
            return false;
        }

        let interval = self.interval_ms(soft_drop);
        self.accumulator_ms = self.accumulator_ms.saturating_add(elapsed_ms);

        let mut changed = false;
        while self.accumulator_ms >= interval {
            self.accumulator_ms -= interval;
            changed = true;
            if !self.try_shift(0, 1) {
                self.lock_active();
                // The next piece waits a full interval.
                self.accumulator_ms = 0;
                break;
            }
        }
        changed
    }

    fn accepts_input(&self) -> bool {
        !self.paused && !self.game_over && self.countdown_ms == 0
    }

    fn try_shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let moved = active.shifted(dx, dy);
        if !moved.fits(&self.grid) {
            return false;
        }
        self.active = Some(moved);
        true
    }

    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = active.rotated();
        if !rotated.fits(&self.grid) {
            return false;
        }
        self.active = Some(rotated);
        self.events.push(Event::Rotated);
        true
    }

    /// Merge the active piece, clear rows, advance the level and respawn
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.grid
            .lock_piece(&piece.coords, piece.x, piece.y, piece.color());
        self.events.push(Event::Locked);
        debug!(shape = piece.kind.as_str(), x = piece.x, y = piece.y, "piece locked");

        let cleared = self.grid.clear_lines() as u32;
        if cleared > 0 {
            self.score = self.score.saturating_add(line_clear_score(cleared));
            self.events.push(Event::LinesCleared(cleared));
            debug!(cleared, score = self.score, "lines cleared");

            let gained = self.progression.record(&self.config, cleared);
            if gained > 0 {
                let level = self.progression.level();
                self.events.push(Event::LevelUp(level));
                self.countdown_ms = pause_ms(&self.config);
                debug!(
                    level,
                    fall_interval_ms = self.progression.fall_interval_ms(),
                    "level up"
                );
            }
        }

        self.spawn_piece();
    }

    /// Draw the next shape and place it at the spawn point.
    ///
    /// A blocked spawn is the only game-over trigger.
    fn spawn_piece(&mut self) -> bool {
        let kind = self.source.next_shape();
        let piece = Piece::spawn(kind);

        if !piece.fits(&self.grid) {
            self.active = None;
            self.game_over = true;
            self.countdown_ms = 0;
            self.events.push(Event::GameOver { score: self.score });
            info!(
                score = self.score,
                level = self.progression.level(),
                lines = self.progression.lines(),
                "game over"
            );
            return false;
        }

        self.active = Some(piece);
        true
    }
}

impl<S: ShapeSource + Clone> GameState<S> {
    /// Fresh game with the same configuration.
    ///
    /// The shape source continues from its current position rather than
    /// replaying the previous game's pieces.
    pub fn new_game(&self) -> Self {
        Self::new(self.config, self.source.clone())
    }
}

impl Default for GameState<UniformShapes> {
    fn default() -> Self {
        Self::new(SpeedConfig::default(), UniformShapes::default())
    }
}

fn pause_ms(config: &SpeedConfig) -> u32 {
    u32::try_from(config.level_up_pause.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedShapes;
    use crate::types::{Color, ShapeKind};
    use std::time::Duration;

    fn squares() -> GameState<ScriptedShapes> {
        GameState::new(SpeedConfig::default(), ScriptedShapes::repeat(ShapeKind::O))
    }

    #[test]
    fn test_first_piece_spawns_at_center_top() {
        let game = squares();
        let piece = game.active().unwrap();
        assert_eq!((piece.x, piece.y), (3, 0));
        assert_eq!(game.phase(), Phase::Falling);
        assert_eq!(game.level(), 1);
        assert_eq!(game.fall_interval_ms(), 500);
    }

    #[test]
    fn test_update_accumulates_until_interval() {
        let mut game = squares();
        assert!(!game.update(499, false));
        assert_eq!(game.active().unwrap().y, 0);
        assert_eq!(game.accumulator_ms(), 499);

        assert!(game.update(1, false));
        assert_eq!(game.active().unwrap().y, 1);
        assert_eq!(game.accumulator_ms(), 0);
    }

    #[test]
    fn test_large_dt_descends_several_rows() {
        let mut game = squares();
        game.update(1250, false);
        assert_eq!(game.active().unwrap().y, 2);
        assert_eq!(game.accumulator_ms(), 250);
    }

    #[test]
    fn test_soft_drop_uses_fast_interval() {
        let mut game = squares();
        assert_eq!(game.interval_ms(true), 50);
        game.update(150, true);
        assert_eq!(game.active().unwrap().y, 3);
    }

    #[test]
    fn test_paused_update_is_bit_identical() {
        let mut game = squares();
        game.update(300, false);
        game.set_paused(true);

        let grid = game.grid().clone();
        let piece = game.active();
        let acc = game.accumulator_ms();

        assert!(!game.update(10_000, true));
        assert!(!game.apply(Intent::MoveLeft));
        assert_eq!(game.grid(), &grid);
        assert_eq!(game.active(), piece);
        assert_eq!(game.accumulator_ms(), acc);

        game.toggle_pause();
        assert!(game.update(200, false));
    }

    #[test]
    fn test_blocked_move_leaves_state() {
        let mut game = squares();
        for _ in 0..3 {
            assert!(game.apply(Intent::MoveLeft));
        }
        let before = game.active();
        assert!(!game.apply(Intent::MoveLeft));
        assert_eq!(game.active(), before);
    }

    #[test]
    fn test_rotation_records_event_only_on_success() {
        let mut game = GameState::new(SpeedConfig::default(), ScriptedShapes::repeat(ShapeKind::T));
        assert!(game.apply(Intent::Rotate));
        assert_eq!(game.take_events(), vec![Event::Rotated]);

        // The I bar standing on the left wall cannot turn back flat.
        let mut game = GameState::new(SpeedConfig::default(), ScriptedShapes::repeat(ShapeKind::I));
        game.update(500, false);
        assert!(game.apply(Intent::Rotate));
        while game.apply(Intent::MoveLeft) {}
        game.take_events();
        let before = game.active();
        assert!(!game.apply(Intent::Rotate));
        assert_eq!(game.active(), before);
        assert!(game.events().is_empty());
    }

    #[test]
    fn test_lock_spawns_next_piece_same_frame() {
        let mut game = squares();
        // 18 steps to the floor, the 19th is blocked.
        game.update(500 * 19, false);
        assert_eq!(game.grid().occupied_count(), 4);
        assert!(game.grid().is_occupied(3, 19));
        assert!(game.grid().is_occupied(4, 18));
        let next = game.active().unwrap();
        assert_eq!((next.x, next.y), (3, 0));
        assert_eq!(game.accumulator_ms(), 0);
        assert_eq!(game.take_events(), vec![Event::Locked]);
    }

    #[test]
    fn test_fill_gap_clears_one_line() {
        let grid = Grid::from_ascii(&["#####.####"], Color::Red);
        let mut game = GameState::with_grid(
            SpeedConfig::default(),
            ScriptedShapes::new(vec![ShapeKind::I]),
            grid,
        );
        // Stand the bar up over column 5; it needs one row of headroom.
        game.update(500, false);
        assert!(game.apply(Intent::Rotate));
        let piece = game.active().unwrap();
        assert_eq!(piece.cells().map(|(x, _)| x), [4, 4, 4, 4]);
        assert!(game.apply(Intent::MoveRight));

        game.update(500 * 30, false);
        assert_eq!(game.lines(), 1);
        assert_eq!(game.score(), 100);
        assert!(game.take_events().contains(&Event::LinesCleared(1)));
        // Three cells of the bar survive above the cleared row.
        assert_eq!(game.grid().occupied_count(), 3);
        assert!(game.grid().is_occupied(5, 19));
    }

    #[test]
    fn test_stacking_reaches_game_over_once() {
        let mut game = squares();
        let mut updates = 0;
        while !game.game_over() {
            game.update(500 * 30, false);
            updates += 1;
            assert!(updates < 50, "never topped out");
        }
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.active().is_none());

        let events = game.take_events();
        let overs = events
            .iter()
            .filter(|e| matches!(e, Event::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);

        let before = game.snapshot();
        let acc = game.accumulator_ms();
        assert!(!game.update(10_000, true));
        assert!(!game.apply(Intent::Rotate));
        game.set_paused(true);
        assert_eq!(game.snapshot(), before);
        assert_eq!(game.accumulator_ms(), acc);
        assert!(game.take_events().is_empty());
    }

    #[test]
    fn test_level_up_countdown_blocks_falling() {
        let config = SpeedConfig {
            lines_per_level: 1,
            level_up_pause: Duration::from_millis(1000),
            ..SpeedConfig::default()
        };
        let grid = Grid::from_ascii(&["#####.####"], Color::Red);
        let mut game = GameState::with_grid(config, ScriptedShapes::repeat(ShapeKind::I), grid);
        game.update(500, false);
        game.apply(Intent::Rotate);
        game.apply(Intent::MoveRight);
        game.update(500 * 30, false);

        assert_eq!(game.level(), 2);
        assert_eq!(game.countdown_ms(), 1000);
        assert!(game.take_events().contains(&Event::LevelUp(2)));

        assert!(!game.update(600, false));
        assert!(!game.apply(Intent::MoveLeft));
        assert_eq!(game.active().unwrap().y, 0);
        assert_eq!(game.countdown_ms(), 400);

        game.update(400, false);
        assert_eq!(game.countdown_ms(), 0);
        assert!(game.update(450, false));
        assert_eq!(game.active().unwrap().y, 1);
    }

    #[test]
    fn test_new_game_resets_progress() {
        let mut game = squares();
        game.update(500 * 30, false);
        let fresh = game.new_game();
        assert_eq!(fresh.grid().occupied_count(), 0);
        assert_eq!(fresh.score(), 0);
        assert_eq!(fresh.level(), 1);
        assert!(fresh.events().is_empty());
        assert_eq!(fresh.config(), game.config());
    }
}
