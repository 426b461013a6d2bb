//! Shapes module - the active piece and the fixed-pivot rotation rule
//!
//! Rotation is a single pure transform: every offset is turned 90° clockwise
//! about the local pivot (1, 1). There is no kick table; a rotation that does
//! not fit is simply discarded by the caller.

use crate::grid::Grid;
use crate::types::{Color, ShapeCoords, ShapeKind, SPAWN_X, SPAWN_Y};

/// Local pivot of the 4x4 piece frame
pub const PIVOT: (i8, i8) = (1, 1);

/// Rotate offsets 90° clockwise about [`PIVOT`].
///
/// Translate by `-PIVOT`, map `(x, y) -> (y, -x)`, translate back. The result is
/// not validated against any grid.
///
/// ```
/// use block_arcade_core::shapes::rotate;
///
/// let bar = [(0, 1), (1, 1), (2, 1), (3, 1)];
/// assert_eq!(rotate(&bar), [(1, 2), (1, 1), (1, 0), (1, -1)]);
/// ```
pub fn rotate(shape: &ShapeCoords) -> ShapeCoords {
    let (px, py) = PIVOT;
    shape.map(|(x, y)| {
        let (tx, ty) = (x - px, y - py);
        let (rx, ry) = (ty, -tx);
        (rx + px, ry + py)
    })
}

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    /// Current orientation, always exactly four offsets
    pub coords: ShapeCoords,
    /// Column of the local frame origin
    pub x: i8,
    /// Row of the local frame origin
    pub y: i8,
}

impl Piece {
    /// Create a new piece at the spawn position in its spawn orientation
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            kind,
            coords: kind.spawn_coords(),
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Absolute grid cells covered by the piece
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.coords.map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// Same piece translated by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece with its offsets rotated clockwise in place
    pub fn rotated(&self) -> Self {
        Self {
            coords: rotate(&self.coords),
            ..*self
        }
    }

    /// Check the piece against the grid's collision rule
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.valid_position(&self.coords, self.x, self.y)
    }
}
