//! Pointer hit-testing: screen coordinates to board squares and back
//!
//! The interaction state machine only ever sees resolved [`Square`]s. This
//! module owns the coordinate contract every front end shares:
//!
//! ```text
//! file   = floor((x - origin_x) / tile_size)
//! rank   = floor((y - origin_y) / tile_size)
//! square = rank * 8 + file
//! ```
//!
//! so rank index 0 (rank 1) is the row nearest `origin_y`. A flipped board is
//! rotated 180 degrees: both file and rank are mirrored. Points outside the
//! 8x8 area resolve to `None` and are dropped by the state machine.

use crate::game::types::{File, Rank, Square};
use serde::{Deserialize, Serialize};

/// Board placement on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardGeometry {
    /// Left edge of the board
    pub origin_x: f32,
    /// Top edge of the board (first row of tiles)
    pub origin_y: f32,
    /// Edge length of one square
    pub tile_size: f32,
    /// Rotate the board 180 degrees
    pub flipped: bool,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            tile_size: 80.0,
            flipped: false,
        }
    }
}

/// Screen rectangle covered by one square
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl TileRect {
    /// Centre of the tile, where legal-target hints are drawn
    pub fn center(&self) -> (f32, f32) {
        let half = self.size / 2.0;
        (self.x + half, self.y + half)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.size && y >= self.y && y < self.y + self.size
    }
}

impl BoardGeometry {
    pub fn new(origin_x: f32, origin_y: f32, tile_size: f32) -> Self {
        Self {
            origin_x,
            origin_y,
            tile_size,
            flipped: false,
        }
    }

    pub fn toggle_flip(&mut self) {
        self.flipped = !self.flipped;
    }

    /// Resolve a pointer position to a square
    ///
    /// Returns `None` for points off the board, non-finite coordinates, or a
    /// degenerate geometry (tile size not positive).
    pub fn square_at(&self, x: f32, y: f32) -> Option<Square> {
        if !(self.tile_size.is_finite() && self.tile_size > 0.0) {
            return None;
        }
        let file = Self::tile_index(x - self.origin_x, self.tile_size)?;
        let rank = Self::tile_index(y - self.origin_y, self.tile_size)?;

        let square = Square::from_coords(File::new(file)?, Rank::new(rank)?);
        Some(if self.flipped { square.rotate() } else { square })
    }

    /// Column or row index of an offset, if it lands on the board
    fn tile_index(offset: f32, tile_size: f32) -> Option<u8> {
        let index = (offset / tile_size).floor();
        // NaN fails both comparisons
        if (0.0..8.0).contains(&index) {
            Some(index as u8)
        } else {
            None
        }
    }

    /// Screen rectangle of `square`, honouring the flip
    pub fn square_rect(&self, square: Square) -> TileRect {
        let square = if self.flipped { square.rotate() } else { square };
        TileRect {
            x: self.origin_x + f32::from(square.file().index()) * self.tile_size,
            y: self.origin_y + f32::from(square.rank().index()) * self.tile_size,
            size: self.tile_size,
        }
    }

    /// Where the legal-move hint for `square` is drawn
    pub fn hint_center(&self, square: Square) -> (f32, f32) {
        self.square_rect(square).center()
    }
}
