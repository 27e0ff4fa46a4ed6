//! Serializable configuration for maps and searches.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, MapError};
use crate::grid::Grid;
use crate::math::Vec2;
use crate::pathfinding::StepCostMode;

/// Options for a pathfinding search.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Expand all eight neighbors instead of the four orthogonal ones.
    pub allow_diagonal: bool,
    pub step_costs: StepCostMode,
}

impl SearchConfig {
    /// Enable or disable diagonal movement.
    #[must_use]
    pub fn with_diagonal(mut self, allow_diagonal: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self
    }

    /// Override how step costs are chosen.
    #[must_use]
    pub fn with_step_costs(mut self, step_costs: StepCostMode) -> Self {
        self.step_costs = step_costs;
        self
    }
}

/// Description of a land/water map: grid geometry plus one value per cell
/// (0 = water, anything else = land).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub columns: usize,
    pub rows: usize,
    pub cell_width: f32,
    pub cell_height: f32,
    pub origin: Vec2,
    pub wrap_horizontal: bool,
    pub wrap_vertical: bool,
    pub cells: Vec<u32>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 8,
            cell_width: 32.0,
            cell_height: 32.0,
            origin: Vec2::ZERO,
            wrap_horizontal: false,
            wrap_vertical: false,
            cells: Vec::new(),
        }
    }
}

impl MapConfig {
    /// Parse the flat layout `[columns, rows, cell_width, cell_height, cells...]`.
    pub fn from_flat(data: &[u32]) -> Result<Self, MapError> {
        let [columns, rows, cell_width, cell_height, cells @ ..] = data else {
            return Err(MapError::MissingHeader(data.len()));
        };
        Ok(Self {
            columns: *columns as usize,
            rows: *rows as usize,
            cell_width: *cell_width as f32,
            cell_height: *cell_height as f32,
            cells: cells.to_vec(),
            ..Self::default()
        })
    }

    /// Parse a map description from JSON.
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this map description to JSON.
    pub fn to_json(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Override the wrap policy.
    #[must_use]
    pub fn with_wrap(mut self, horizontal: bool, vertical: bool) -> Self {
        self.wrap_horizontal = horizontal;
        self.wrap_vertical = vertical;
        self
    }

    /// Build the grid described by this configuration.
    pub fn grid(&self) -> Result<Grid, GridError> {
        Ok(Grid::new(self.columns, self.rows, self.cell_width, self.cell_height)?
            .with_origin(self.origin)
            .with_wrap(self.wrap_horizontal, self.wrap_vertical))
    }
}
