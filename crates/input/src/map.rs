//! Key mapping from terminal events to intents and commands.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Which key set a handler listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySet {
    /// Arrows plus vi keys (h, j, k, l)
    Solo,
    /// Arrows only
    Arrows,
    /// W, A, S, D
    Wasd,
}

/// What one key means to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Intent(Intent),
    SoftDrop,
}

/// Shell-level commands that are not player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Pause,
    Restart,
    Quit,
}

/// Map a key to a binding within one key set.
pub fn binding_for(set: KeySet, code: KeyCode) -> Option<Binding> {
    let arrows = match code {
        KeyCode::Left => Some(Binding::Intent(Intent::MoveLeft)),
        KeyCode::Right => Some(Binding::Intent(Intent::MoveRight)),
        KeyCode::Up => Some(Binding::Intent(Intent::Rotate)),
        KeyCode::Down => Some(Binding::SoftDrop),
        _ => None,
    };

    match set {
        KeySet::Arrows => arrows,
        KeySet::Solo => arrows.or(match code {
            KeyCode::Char('h') | KeyCode::Char('H') => Some(Binding::Intent(Intent::MoveLeft)),
            KeyCode::Char('l') | KeyCode::Char('L') => Some(Binding::Intent(Intent::MoveRight)),
            KeyCode::Char('k') | KeyCode::Char('K') => Some(Binding::Intent(Intent::Rotate)),
            KeyCode::Char('j') | KeyCode::Char('J') => Some(Binding::SoftDrop),
            _ => None,
        }),
        KeySet::Wasd => match code {
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Binding::Intent(Intent::MoveLeft)),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Binding::Intent(Intent::MoveRight)),
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Binding::Intent(Intent::Rotate)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Binding::SoftDrop),
            _ => None,
        },
    }
}

/// Map keyboard input to shell commands.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        _ => None,
    }
}
