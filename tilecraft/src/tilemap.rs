//! Land/water tile map: a grid plus per-cell terrain state and sprites.
//!
//! `TileMap` is the session object a game keeps around; it owns the tile
//! states and hands them to the stateless [`Autotiler`] and [`PathFinder`].

use std::path::Path;

use crate::autotile::{Autotiler, MaskRule, RawMask};
use crate::config::{MapConfig, SearchConfig};
use crate::error::MapError;
use crate::grid::Grid;
use crate::pathfinding::PathFinder;

/// Terrain state of a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub is_land: bool,
    /// Sprite index chosen by the autotiler.
    pub sprite: u32,
    /// Traversal cost when the tile is land.
    pub move_cost: f32,
}

impl Tile {
    pub fn land() -> Self {
        Self {
            is_land: true,
            sprite: 0,
            move_cost: 1.0,
        }
    }

    pub fn water() -> Self {
        Self {
            is_land: false,
            ..Self::land()
        }
    }

    /// Cost handed to the pathfinder; water is impassable.
    pub fn traversal_cost(&self) -> f32 {
        if self.is_land {
            self.move_cost
        } else {
            0.0
        }
    }
}

/// Grid of land and water tiles with autotiled sprites.
#[derive(Clone, Debug)]
pub struct TileMap<R = RawMask> {
    grid: Grid,
    tiles: Vec<Tile>,
    autotiler: Autotiler<R>,
}

impl TileMap<RawMask> {
    /// Build a map from its configuration using the raw 8-bit sprite table.
    pub fn from_config(config: &MapConfig) -> Result<Self, MapError> {
        Self::with_autotiler(config, Autotiler::edge())
    }

    /// Build a map from the flat layout
    /// `[columns, rows, cell_width, cell_height, cells...]`.
    pub fn from_flat(data: &[u32]) -> Result<Self, MapError> {
        Self::from_config(&MapConfig::from_flat(data)?)
    }

    /// Build a map from a JSON [`MapConfig`].
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Self::from_config(&MapConfig::from_json(json)?)
    }

    /// Load a JSON [`MapConfig`] from disk.
    pub fn load_from_file(path: &Path) -> Result<Self, MapError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

impl<R: MaskRule> TileMap<R> {
    /// Build a map that uses the given autotiler.
    ///
    /// Cells valued 0 become water, anything else land.
    pub fn with_autotiler(config: &MapConfig, autotiler: Autotiler<R>) -> Result<Self, MapError> {
        let grid = config.grid()?;
        if config.cells.len() != grid.len() {
            return Err(MapError::CellCountMismatch {
                expected: grid.len(),
                actual: config.cells.len(),
            });
        }
        let tiles = config
            .cells
            .iter()
            .map(|&value| if value == 0 { Tile::water() } else { Tile::land() })
            .collect();
        let mut map = Self {
            grid,
            tiles,
            autotiler,
        };
        map.refresh_all();
        Ok(map)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable grid access, e.g. to change wrapping. Call
    /// [`TileMap::refresh_all`] afterwards, since wrapping changes which
    /// cells neighbor each other.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn autotiler(&self) -> &Autotiler<R> {
        &self.autotiler
    }

    /// Tile at `index`, or `None` if out of range.
    pub fn terrain(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Change a cell's terrain and recompute the sprites it affects.
    /// Returns `false` if the index is out of range.
    pub fn set_land(&mut self, index: usize, is_land: bool) -> bool {
        let Some(tile) = self.tiles.get_mut(index) else {
            return false;
        };
        if tile.is_land == is_land {
            return true;
        }
        tile.is_land = is_land;
        self.refresh_around(index);
        true
    }

    /// Flip a cell between land and water.
    pub fn toggle(&mut self, index: usize) -> bool {
        let Some(is_land) = self.tiles.get(index).map(|t| t.is_land) else {
            return false;
        };
        self.set_land(index, !is_land)
    }

    /// Set the land traversal cost of a cell.
    pub fn set_move_cost(&mut self, index: usize, cost: f32) -> bool {
        match self.tiles.get_mut(index) {
            Some(tile) => {
                tile.move_cost = cost;
                true
            }
            None => false,
        }
    }

    /// Recompute every sprite.
    pub fn refresh_all(&mut self) {
        let land: Vec<bool> = self.tiles.iter().map(|t| t.is_land).collect();
        let sprites = self.autotiler.sprites(&self.grid, |i| land[i]);
        for (tile, sprite) in self.tiles.iter_mut().zip(sprites) {
            tile.sprite = sprite;
        }
        log::debug!(
            "autotiled {}x{} map ({} land cells)",
            self.grid.columns(),
            self.grid.rows(),
            land.iter().filter(|&&l| l).count()
        );
    }

    fn refresh_around(&mut self, index: usize) {
        let updates =
            self.autotiler
                .neighborhood_sprites(&self.grid, |i| self.tiles[i].is_land, index);
        for (cell, sprite) in updates {
            self.tiles[cell].sprite = sprite;
        }
    }

    /// Sprite index of every cell.
    pub fn sprite_indices(&self) -> Vec<u32> {
        self.tiles.iter().map(|t| t.sprite).collect()
    }

    /// Traversal cost of every cell; water cells are impassable.
    pub fn movement_costs(&self) -> Vec<f32> {
        self.tiles.iter().map(Tile::traversal_cost).collect()
    }

    /// Shortest land path between two cells.
    pub fn find_path(&self, start: usize, goal: usize, allow_diagonal: bool) -> Vec<usize> {
        let costs = self.movement_costs();
        PathFinder::new(SearchConfig::default().with_diagonal(allow_diagonal))
            .find_path(&self.grid, start, goal, Some(&costs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autotile::sprites;
    use crate::error::GridError;

    #[rustfmt::skip]
    const ISLAND: [u32; 4 + 5 * 4] = [
        5, 4, 32, 32,
        0, 0, 0, 0, 0,
        0, 1, 1, 1, 0,
        0, 1, 1, 1, 0,
        0, 0, 0, 0, 0,
    ];

    #[test]
    fn island_sprites() {
        let map = TileMap::from_flat(&ISLAND).unwrap();
        let ids = map.sprite_indices();
        assert_eq!(ids[6], sprites::TOP);
        // Top-left water corner sees only SE land.
        assert_eq!(ids[0], sprites::CORNER_SE);
        // Water above the island's middle sees land SW, S and SE.
        assert_eq!(ids[2], sprites::SIDE_S);
        assert_eq!(ids[5], sprites::SIDE_E);
        assert_eq!(map.terrain(5).map(|t| t.is_land), Some(false));
        assert!(map.terrain(20).is_none());
    }

    #[test]
    fn rejects_wrong_cell_count() {
        let err = TileMap::from_flat(&[2, 2, 32, 32, 1, 1, 1]).unwrap_err();
        assert!(matches!(
            err,
            MapError::CellCountMismatch {
                expected: 4,
                actual: 3
            }
        ));
        assert!(matches!(
            TileMap::from_flat(&[0, 2, 32, 32]),
            Err(MapError::Grid(_))
        ));
    }

    #[test]
    fn rejects_oversized_json_map() {
        let json = r#"{ "columns": 4294967296, "rows": 4294967296, "cells": [0] }"#;
        assert!(matches!(
            TileMap::from_json(json),
            Err(MapError::Grid(GridError::TooLarge { .. }))
        ));
    }

    #[test]
    fn edits_match_a_full_refresh() {
        let mut map = TileMap::from_flat(&ISLAND).unwrap();
        assert!(map.toggle(12));
        assert!(map.set_land(0, true));
        assert!(map.set_land(0, true));
        assert!(!map.set_land(99, true));
        assert!(!map.toggle(99));

        let incremental = map.sprite_indices();
        map.refresh_all();
        assert_eq!(incremental, map.sprite_indices());
        // The new pond is open only to the south.
        assert_eq!(map.terrain(12).map(|t| t.sprite), Some(sprites::SIDE_N_E_W));
    }

    #[test]
    fn blob_autotiler() {
        let config = MapConfig::from_flat(&ISLAND).unwrap();
        let map = TileMap::with_autotiler(&config, Autotiler::blob()).unwrap();
        assert_eq!(map.terrain(0).map(|t| t.sprite), Some(sprites::CORNER_SE));
        assert_eq!(map.terrain(6).map(|t| t.sprite), Some(sprites::TOP));
    }

    #[test]
    fn paths_stay_on_land() {
        let mut map = TileMap::from_flat(&ISLAND).unwrap();
        assert_eq!(map.find_path(6, 8, false), vec![6, 7, 8]);
        assert!(map.find_path(6, 0, true).is_empty());

        assert!(map.set_move_cost(7, 5.0));
        assert!(!map.set_move_cost(42, 5.0));
        assert_eq!(map.find_path(6, 8, false), vec![6, 11, 12, 13, 8]);
        assert_eq!(map.movement_costs()[0], 0.0);
    }

    #[test]
    fn wrap_change_needs_refresh() {
        let mut map = TileMap::from_flat(&[3, 1, 32, 32, 1, 0, 0]).unwrap();
        assert_eq!(map.terrain(2).map(|t| t.sprite), Some(sprites::BASE));
        map.grid_mut().set_wrap(true, false);
        map.refresh_all();
        assert_eq!(map.terrain(2).map(|t| t.sprite), Some(sprites::SIDE_E));
    }
}
