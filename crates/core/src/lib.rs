//! Core game logic - pure, deterministic, and testable
//!
//! Everything here is driven by explicit calls from a host frame loop. There is
//! no I/O, no clock and no thread; the host passes elapsed milliseconds to
//! [`GameState::update`] and drains [`Event`]s afterwards.
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 grid with collision validation, locking and line clearing
//! - [`shapes`]: the active piece and the fixed-pivot rotation transform
//! - [`rng`]: seedable shape sources (uniform and scripted)
//! - [`config`]: difficulty lookup and speed constants
//! - [`progression`]: level progression, fall interval and scoring
//! - [`engine`]: single-player state machine and fall scheduler
//! - [`versus`]: two independent engines in one match
//! - [`events`]: engine events and the sound/high-score collaborators
//! - [`snapshot`]: read-only copies for rendering
//!
//! # Game Rules
//!
//! - **Uniform draw**: each new shape is picked uniformly from the seven; no bag
//! - **Pivot rotation**: 90° clockwise about (1, 1), no wall kicks
//! - **Immediate lock**: a blocked descend step locks the piece in the same frame
//! - **Scoring**: `lines² × 100` per clear
//! - **Levels**: one level per 5 cumulative lines; interval `500 - 50·(level-1)` ms, floor 50 ms
//!
//! # Example
//!
//! ```
//! use block_arcade_core::{GameState, ScriptedShapes, SpeedConfig};
//! use block_arcade_types::{Intent, ShapeKind};
//!
//! let mut game = GameState::new(SpeedConfig::default(), ScriptedShapes::repeat(ShapeKind::T));
//!
//! assert!(game.apply(Intent::MoveRight));
//! assert!(game.apply(Intent::Rotate));
//!
//! // One full interval moves the piece down a row.
//! game.update(500, false);
//! assert_eq!(game.active().unwrap().y, 1);
//! ```

pub mod config;
pub mod engine;
pub mod events;
pub mod grid;
pub mod progression;
pub mod rng;
pub mod shapes;
pub mod snapshot;
pub mod versus;

pub use block_arcade_types as types;

// Re-export commonly used types for convenience
pub use config::{Difficulty, ParseDifficultyError, SpeedConfig};
pub use engine::{GameState, Phase};
pub use events::{Event, EventRouter, NullScores, NullSound, ScoreSink, SoundSink};
pub use grid::Grid;
pub use progression::{fall_interval_ms, line_clear_score, Progression};
pub use rng::{ScriptedShapes, ShapeSource, SimpleRng, UniformShapes};
pub use shapes::{rotate, Piece};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use versus::{FrameInput, Outcome, Versus};
