//! Block Arcade (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, integration
//! tests and benches see a single `block_arcade::{core,input,term,scores,types}`
//! API, and hosts the frame-loop [`session`].

pub use block_arcade_core as core;
pub use block_arcade_input as input;
pub use block_arcade_scores as scores;
pub use block_arcade_term as term;
pub use block_arcade_types as types;

pub mod session;
