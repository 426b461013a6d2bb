use crate::shapes::Piece;
use crate::types::{Cell, Color, ShapeCoords, ShapeKind, GRID_SIZE, GRID_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub coords: ShapeCoords,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl ActiveSnapshot {
    /// Absolute grid cells covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.coords.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            coords: value.coords,
            x: value.x,
            y: value.y,
            color: value.color(),
        }
    }
}

/// Read-only view of one engine for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub cells: [Cell; GRID_SIZE],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub paused: bool,
    pub game_over: bool,
    /// Remaining level-up countdown, zero when none is running
    pub countdown_ms: u32,
}

impl GameSnapshot {
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= GRID_WIDTH as usize {
            return None;
        }
        self.cells
            .get(y * GRID_WIDTH as usize + x)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        !self.game_over && !self.paused && self.countdown_ms == 0
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: [None; GRID_SIZE],
            active: None,
            score: 0,
            level: 1,
            lines: 0,
            paused: false,
            game_over: false,
            countdown_ms: 0,
        }
    }
}
