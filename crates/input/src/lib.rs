//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::Intent`]s for one player's key set, tracks the
//! held soft-drop state, and recognises the shell commands (pause, restart,
//! quit).

pub mod handler;
pub mod map;

pub use block_arcade_types as types;

pub use handler::{InputHandler, IntentBatch, MAX_INTENTS_PER_FRAME};
pub use map::{binding_for, command_for, Binding, Command, KeySet};
