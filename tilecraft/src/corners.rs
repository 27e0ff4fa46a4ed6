//! Corner-based terrain painting.
//!
//! Every cell stores four corner bits. Painting a cell fills or clears all of
//! its corners and stamps the corners its neighbors share with it, so the
//! sprite of each cell follows from its own 4-bit value.

use crate::grid::{Direction, Grid};

pub const TOP_LEFT: u8 = 8;
pub const TOP_RIGHT: u8 = 4;
pub const BOTTOM_LEFT: u8 = 2;
pub const BOTTOM_RIGHT: u8 = 1;

/// All four corners.
pub const FULL: u8 = TOP_LEFT | TOP_RIGHT | BOTTOM_LEFT | BOTTOM_RIGHT;

/// First sprite of the 16-tile corner strip on the terrain sheet.
pub const DEFAULT_SPRITE_OFFSET: u32 = 48;

/// Corners of the neighbor in `direction` that touch the painted cell.
fn shared_corners(direction: Direction) -> u8 {
    match direction {
        Direction::North => BOTTOM_LEFT | BOTTOM_RIGHT,
        Direction::NorthEast => BOTTOM_LEFT,
        Direction::East => TOP_LEFT | BOTTOM_LEFT,
        Direction::SouthEast => TOP_LEFT,
        Direction::South => TOP_LEFT | TOP_RIGHT,
        Direction::SouthWest => TOP_RIGHT,
        Direction::West => TOP_RIGHT | BOTTOM_RIGHT,
        Direction::NorthWest => BOTTOM_RIGHT,
    }
}

/// Per-cell corner bits for one grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CornerMap {
    corners: Vec<u8>,
    sprite_offset: u32,
}

impl CornerMap {
    /// Create a map with every corner clear.
    pub fn new(grid: &Grid) -> Self {
        Self {
            corners: vec![0; grid.len()],
            sprite_offset: DEFAULT_SPRITE_OFFSET,
        }
    }

    /// Override the sprite index of the all-clear tile.
    #[must_use]
    pub fn with_sprite_offset(mut self, offset: u32) -> Self {
        self.sprite_offset = offset;
        self
    }

    /// Corner bits of a cell, or `None` if the index is out of range.
    pub fn corners(&self, index: usize) -> Option<u8> {
        self.corners.get(index).copied()
    }

    /// Fill (`solid = true`) or clear every corner of the cell at `index`
    /// and the matching corners of its neighbors.
    ///
    /// Returns `false` if the index is outside the grid.
    pub fn paint(&mut self, grid: &Grid, index: usize, solid: bool) -> bool {
        if index >= grid.len() || index >= self.corners.len() {
            return false;
        }
        self.corners[index] = if solid { FULL } else { 0 };
        for direction in Direction::ALL {
            let Some(neighbor) = grid.neighbor_index(index, direction) else {
                continue;
            };
            let Some(bits) = self.corners.get_mut(neighbor) else {
                continue;
            };
            let shared = shared_corners(direction);
            if solid {
                *bits |= shared;
            } else {
                *bits &= !shared;
            }
        }
        true
    }

    /// Sprite index of the cell at `index`: its corner value plus the
    /// sprite offset.
    pub fn sprite_index(&self, index: usize) -> Option<u32> {
        self.corners(index).map(|bits| self.sprite_offset + bits as u32)
    }

    /// Sprite indices for every cell.
    pub fn sprite_indices(&self) -> Vec<u32> {
        self.corners
            .iter()
            .map(|&bits| self.sprite_offset + bits as u32)
            .collect()
    }
}
