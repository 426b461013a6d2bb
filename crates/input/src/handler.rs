//! Per-player input handler for terminal environments.
//!
//! Intents are queued on key press and drained once per frame. Soft drop is a
//! held state; terminals that never send release events get an auto-release
//! after a short quiet period, refreshed by the key's auto-repeat.

use arrayvec::ArrayVec;
use crossterm::event::KeyCode;

use crate::map::{binding_for, Binding, KeySet};
use crate::types::{Intent, SOFT_DROP_GRACE_MS};

/// Upper bound on intents kept between two drains; extra presses are dropped.
pub const MAX_INTENTS_PER_FRAME: usize = 16;

pub type IntentBatch = ArrayVec<Intent, MAX_INTENTS_PER_FRAME>;

#[derive(Debug, Clone)]
pub struct InputHandler {
    keys: KeySet,
    pending: IntentBatch,
    down_held: bool,
    since_down_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new(keys: KeySet) -> Self {
        Self {
            keys,
            pending: ArrayVec::new(),
            down_held: false,
            since_down_ms: 0,
            key_release_timeout_ms: SOFT_DROP_GRACE_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn keys(&self) -> KeySet {
        self.keys
    }

    /// Returns true if the key belongs to this handler's key set.
    pub fn handle_key_press(&mut self, code: KeyCode) -> bool {
        match binding_for(self.keys, code) {
            Some(Binding::Intent(intent)) => {
                let _ = self.pending.try_push(intent);
                true
            }
            Some(Binding::SoftDrop) => {
                self.down_held = true;
                self.since_down_ms = 0;
                true
            }
            None => false,
        }
    }

    pub fn handle_key_release(&mut self, code: KeyCode) {
        if binding_for(self.keys, code) == Some(Binding::SoftDrop) {
            self.down_held = false;
            self.since_down_ms = 0;
        }
    }

    /// Advance the auto-release timer by one frame.
    pub fn update(&mut self, elapsed_ms: u32) {
        if !self.down_held {
            return;
        }
        self.since_down_ms = self.since_down_ms.saturating_add(elapsed_ms);
        if self.since_down_ms > self.key_release_timeout_ms {
            self.down_held = false;
            self.since_down_ms = 0;
        }
    }

    pub fn soft_drop_held(&self) -> bool {
        self.down_held
    }

    /// Take the intents queued since the last drain, in press order
    pub fn drain(&mut self) -> IntentBatch {
        std::mem::take(&mut self.pending)
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.down_held = false;
        self.since_down_ms = 0;
    }
}
