//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and instead renders into a simple framebuffer that is flushed to
//! the terminal as a diff.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Views are pure functions from snapshots to a framebuffer
//! - Allow precise control over aspect ratio (2 chars wide per grid cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use block_arcade_core as core;
pub use block_arcade_types as types;

pub use fb::{palette, FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalGuard, TerminalRenderer};
