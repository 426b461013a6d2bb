//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used by the grid game engine, its
//! terminal front-end and the high-score store. Everything here is plain data
//! with no external dependencies.
//!
//! # Grid Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: (3, 0), the local 4x4 frame origin of a new piece
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and describe the reference (easy) speed:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval (~60 FPS) |
//! | `BASE_FALL_MS` | 500 | Fall interval at level 1 |
//! | `FAST_FALL_MS` | 50 | Fall interval while soft drop is held |
//! | `FALL_STEP_MS` | 50 | Interval reduction per level |
//! | `FALL_FLOOR_MS` | 50 | Fall interval never drops below this |
//! | `LEVEL_UP_COUNTDOWN_MS` | 3000 | Optional countdown after a level-up |
//! | `SOFT_DROP_GRACE_MS` | 150 | Held soft drop decays without a repeat |
//!
//! # Examples
//!
//! ```
//! use block_arcade_types::{Color, Intent, ShapeKind, GRID_HEIGHT, GRID_WIDTH};
//!
//! let shape = ShapeKind::T;
//! assert_eq!(shape.color(), Color::Magenta);
//! assert_eq!(ShapeKind::from_str("t"), Some(shape));
//!
//! assert_eq!(Intent::from_str("rotate"), Some(Intent::Rotate));
//!
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

/// Grid width in cells (10 columns)
pub const GRID_WIDTH: u8 = 10;

/// Grid height in cells (20 rows)
pub const GRID_HEIGHT: u8 = 20;

/// Total number of cells on the grid
pub const GRID_SIZE: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;

/// Spawn column of the local frame origin (horizontal center minus two)
pub const SPAWN_X: i8 = (GRID_WIDTH / 2) as i8 - 2;

/// Spawn row of the local frame origin
pub const SPAWN_Y: i8 = 0;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1 (easy difficulty)
pub const BASE_FALL_MS: u32 = 500;

/// Fall interval while soft drop is held (easy difficulty)
pub const FAST_FALL_MS: u32 = 50;

/// Fall interval reduction per level above 1
pub const FALL_STEP_MS: u32 = 50;

/// Minimum fall interval
pub const FALL_FLOOR_MS: u32 = 50;

/// Cumulative cleared lines required per level
pub const LINES_PER_LEVEL: u32 = 5;

/// Points per clear are `lines * lines * LINE_CLEAR_POINTS`
pub const LINE_CLEAR_POINTS: u32 = 100;

/// Countdown after a level-up when the host enables it
pub const LEVEL_UP_COUNTDOWN_MS: u32 = 3000;

/// Soft drop state timeout for terminals without key-release events
pub const SOFT_DROP_GRACE_MS: u32 = 150;

/// Audio category used for every engine sound effect
pub const SOUND_CATEGORY: &str = "tetris";

/// Game name under which high scores are filed
pub const SCORE_TABLE: &str = "tetris";


/// A local cell offset inside the 4x4 piece frame, `(x, y)`
pub type Offset = (i8, i8);

/// The four cell offsets of a piece in its current orientation
pub type ShapeCoords = [Offset; 4];

/// The seven tetromino shapes
///
/// Each shape has a fixed spawn orientation and exactly one color:
/// - **I**: Cyan, horizontal bar on row 1 of the local frame
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: White
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

/// Spawn offsets, indexed by `ShapeKind as usize`
const SPAWN_COORDS: [ShapeCoords; 7] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(0, 0), (1, 0), (0, 1), (1, 1)],
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(2, 0), (0, 1), (1, 1), (2, 1)],
];

/// Cell colors, indexed by `ShapeKind as usize`
const SHAPE_COLORS: [Color; 7] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::White,
];

impl ShapeKind {
    /// All shapes in declaration order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Spawn orientation offsets
    ///
    /// ```
    /// use block_arcade_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::O.spawn_coords(), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    /// ```
    pub fn spawn_coords(self) -> ShapeCoords {
        SPAWN_COORDS[self as usize]
    }

    /// The color every cell of this shape is locked with
    pub fn color(self) -> Color {
        SHAPE_COLORS[self as usize]
    }

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use block_arcade_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("O"), Some(ShapeKind::O));
    /// assert_eq!(ShapeKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }
}

/// Color tag stored in occupied grid cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    White,
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled by a locked piece of that color
pub type Cell = Option<Color>;

/// Player intents that mutate the active piece
///
/// Soft drop is not an intent: it is sampled once per frame and passed to
/// `update`, because it only changes the fall interval for that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece 90° clockwise about the local pivot (1, 1)
    Rotate,
}

impl Intent {
    /// Parse intent from string (case-insensitive)
    ///
    /// ```
    /// use block_arcade_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "rotate" => Some(Intent::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::Rotate => "rotate",
        }
    }
}

/// One side of a two-player match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::One, Side::Two];

    /// Short player label used by the versus view ("P1" / "P2")
    pub fn label(&self) -> &'static str {
        match self {
            Side::One => "P1",
            Side::Two => "P2",
        }
    }
}
