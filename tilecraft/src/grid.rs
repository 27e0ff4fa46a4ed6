//! Grid addressing for tile-based games.
//!
//! Maps between linear cell indices, (row, column) pairs and pixel
//! coordinates, and resolves the eight compass neighbors of a cell with
//! independent horizontal and vertical wrapping.

use serde::{Deserialize, Serialize};

use crate::error::GridError;
use crate::math::Vec2;

/// One of the eight compass directions around a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
    NorthEast,
    SouthEast,
    SouthWest,
    NorthWest,
}

impl Direction {
    /// All directions, orthogonal ones first.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    /// The four directions that share a row or column with the origin cell.
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Autotile weight of this direction (N=1, NE=2, E=4 ... NW=128).
    pub fn bit(self) -> u8 {
        match self {
            Direction::North => 1,
            Direction::NorthEast => 2,
            Direction::East => 4,
            Direction::SouthEast => 8,
            Direction::South => 16,
            Direction::SouthWest => 32,
            Direction::West => 64,
            Direction::NorthWest => 128,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast
                | Direction::SouthEast
                | Direction::SouthWest
                | Direction::NorthWest
        )
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthEast => Direction::NorthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::NorthWest => Direction::SouthEast,
        }
    }

    /// Vertical and horizontal unit steps, applied in that order.
    fn steps(self) -> (Option<Step>, Option<Step>) {
        match self {
            Direction::North => (Some(Step::North), None),
            Direction::East => (None, Some(Step::East)),
            Direction::South => (Some(Step::South), None),
            Direction::West => (None, Some(Step::West)),
            Direction::NorthEast => (Some(Step::North), Some(Step::East)),
            Direction::SouthEast => (Some(Step::South), Some(Step::East)),
            Direction::SouthWest => (Some(Step::South), Some(Step::West)),
            Direction::NorthWest => (Some(Step::North), Some(Step::West)),
        }
    }
}

#[derive(Clone, Copy)]
enum Step {
    North,
    East,
    South,
    West,
}

/// Geometric descriptor of a single grid position.
///
/// Cells are derived on demand and never stored by the grid. `x`/`y` is the
/// top-left pixel of the cell, origin offset included.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x: f32,
    pub y: f32,
    pub index: usize,
    pub row: usize,
    pub column: usize,
    pub width: f32,
    pub height: f32,
}

impl Cell {
    /// Top-left corner of the cell in pixels.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Center of the cell in pixels.
    pub fn center(&self) -> Vec2 {
        self.position() + Vec2::new(self.width, self.height) * 0.5
    }
}

/// Cell topology of a rectangular tile map.
///
/// Cells are addressed row-major: `index = row * columns + column`.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cell_width: f32,
    cell_height: f32,
    origin: Vec2,
    wrap_horizontal: bool,
    wrap_vertical: bool,
}

impl Grid {
    /// Create a grid with the given dimensions and cell size.
    ///
    /// # Arguments
    /// * `columns` - Grid width in cells
    /// * `rows` - Grid height in cells
    /// * `cell_width` - Width of each cell in pixels
    /// * `cell_height` - Height of each cell in pixels
    ///
    /// Wrapping starts disabled on both axes and the origin sits at (0, 0).
    pub fn new(
        columns: usize,
        rows: usize,
        cell_width: f32,
        cell_height: f32,
    ) -> Result<Self, GridError> {
        if columns == 0 || rows == 0 {
            return Err(GridError::EmptyDimensions { columns, rows });
        }
        if columns.checked_mul(rows).is_none() {
            return Err(GridError::TooLarge { columns, rows });
        }
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(cell_width) || !valid(cell_height) {
            return Err(GridError::InvalidCellSize {
                width: cell_width,
                height: cell_height,
            });
        }
        Ok(Self {
            columns,
            rows,
            cell_width,
            cell_height,
            origin: Vec2::ZERO,
            wrap_horizontal: false,
            wrap_vertical: false,
        })
    }

    /// Override the pixel position of the grid's top-left corner.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    /// Override the wrap policy.
    #[must_use]
    pub fn with_wrap(mut self, horizontal: bool, vertical: bool) -> Self {
        self.set_wrap(horizontal, vertical);
        self
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Width of the whole grid in pixels.
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_width
    }

    /// Height of the whole grid in pixels.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn wraps_horizontally(&self) -> bool {
        self.wrap_horizontal
    }

    pub fn wraps_vertically(&self) -> bool {
        self.wrap_vertical
    }

    /// Set the wrap policy for each axis.
    pub fn set_wrap(&mut self, horizontal: bool, vertical: bool) {
        self.wrap_horizontal = horizontal;
        self.wrap_vertical = vertical;
    }

    /// Apply the same wrap flag to both axes.
    pub fn set_wrap_both(&mut self, wrap: bool) {
        self.set_wrap(wrap, wrap);
    }

    /// Flip the wrap flag of both axes.
    pub fn toggle_wrap(&mut self) {
        self.wrap_horizontal = !self.wrap_horizontal;
        self.wrap_vertical = !self.wrap_vertical;
    }

    /// Look up a cell by linear index.
    /// Returns `None` if the index is outside `[0, len)`.
    pub fn cell_by_index(&self, index: usize) -> Option<Cell> {
        if index >= self.len() {
            return None;
        }
        Some(self.make_cell(index / self.columns, index % self.columns))
    }

    /// Look up the cell containing a pixel coordinate.
    /// Returns `None` if the point lies outside the grid's pixel extent.
    pub fn cell_by_point(&self, x: f32, y: f32) -> Option<Cell> {
        let local_x = x - self.origin.x;
        let local_y = y - self.origin.y;
        // Negated comparisons so NaN falls outside.
        if !(local_x >= 0.0 && local_x < self.width()) {
            return None;
        }
        if !(local_y >= 0.0 && local_y < self.height()) {
            return None;
        }
        let column = axis_slot(x, self.origin.x, self.cell_width, self.columns);
        let row = axis_slot(y, self.origin.y, self.cell_height, self.rows);
        Some(self.make_cell(row, column))
    }

    /// Look up the cell containing a pixel position.
    pub fn cell_at(&self, point: Vec2) -> Option<Cell> {
        self.cell_by_point(point.x, point.y)
    }

    /// Resolve the neighbor of `cell` in the given direction.
    ///
    /// Diagonals are composed from a vertical step followed by a horizontal
    /// one. Returns `None` when a step leaves the grid on an axis that does
    /// not wrap.
    pub fn neighbor(&self, cell: &Cell, direction: Direction) -> Option<Cell> {
        self.neighbor_index(cell.index, direction)
            .and_then(|index| self.cell_by_index(index))
    }

    /// Index-only variant of [`Grid::neighbor`].
    pub fn neighbor_index(&self, index: usize, direction: Direction) -> Option<usize> {
        if index >= self.len() {
            return None;
        }
        let (vertical, horizontal) = direction.steps();
        let mut current = index;
        for step in [vertical, horizontal].into_iter().flatten() {
            current = self.step(current, step)?;
        }
        Some(current)
    }

    /// Existing neighbors of a cell, in [`Direction::ALL`] order.
    /// Only the four orthogonal directions are visited unless
    /// `allow_diagonal` is set.
    pub fn neighbors<'a>(
        &'a self,
        cell: &Cell,
        allow_diagonal: bool,
    ) -> impl Iterator<Item = (Direction, Cell)> + 'a {
        let index = cell.index;
        let directions: &'static [Direction] = if allow_diagonal {
            &Direction::ALL
        } else {
            &Direction::ORTHOGONAL
        };
        directions.iter().filter_map(move |&direction| {
            self.neighbor_index(index, direction)
                .and_then(|n| self.cell_by_index(n))
                .map(|neighbor| (direction, neighbor))
        })
    }

    /// Iterate over every cell in index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.len()).map(move |index| self.make_cell(index / self.columns, index % self.columns))
    }

    fn make_cell(&self, row: usize, column: usize) -> Cell {
        Cell {
            x: self.origin.x + column as f32 * self.cell_width,
            y: self.origin.y + row as f32 * self.cell_height,
            index: row * self.columns + column,
            row,
            column,
            width: self.cell_width,
            height: self.cell_height,
        }
    }

    fn step(&self, index: usize, step: Step) -> Option<usize> {
        let size = self.len();
        let columns = self.columns;
        match step {
            Step::North => {
                if index >= columns {
                    Some(index - columns)
                } else if self.wrap_vertical {
                    Some(index + size - columns)
                } else {
                    None
                }
            }
            Step::South => {
                if index + columns < size {
                    Some(index + columns)
                } else if self.wrap_vertical {
                    Some(index + columns - size)
                } else {
                    None
                }
            }
            Step::East => {
                if (index + 1) % columns != 0 {
                    Some(index + 1)
                } else if self.wrap_horizontal {
                    Some(index + 1 - columns)
                } else {
                    None
                }
            }
            Step::West => {
                if index % columns != 0 {
                    Some(index - 1)
                } else if self.wrap_horizontal {
                    Some(index + columns - 1)
                } else {
                    None
                }
            }
        }
    }
}

/// Slot along one axis containing `value`, measured against the same edges
/// `make_cell` reports so point and index lookups agree.
fn axis_slot(value: f32, origin: f32, size: f32, count: usize) -> usize {
    let edge = |slot: usize| origin + slot as f32 * size;
    let mut slot = (((value - origin) / size).floor() as usize).min(count - 1);
    while slot + 1 < count && edge(slot + 1) <= value {
        slot += 1;
    }
    while slot > 0 && edge(slot) > value {
        slot -= 1;
    }
    slot
}
