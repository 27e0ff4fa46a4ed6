//! Tilecraft - grid addressing, A* pathfinding and terrain autotiling for
//! tile-based 2D games.

pub mod autotile;
pub mod config;
pub mod corners;
pub mod error;
pub mod grid;
pub mod math;
pub mod pathfinding;
pub mod tilemap;

pub use crate::autotile::{
    compute_mask, map_mask_to_sprite_index, sprites, Autotiler, MaskRule, RawMask, SpriteTable,
    SuppressedCorners, BLOB_TABLE, EDGE_TABLE,
};
pub use crate::config::{MapConfig, SearchConfig};
pub use crate::corners::CornerMap;
pub use crate::error::{GridError, MapError};
pub use crate::grid::{Cell, Direction, Grid};
pub use crate::math::Vec2;
pub use crate::pathfinding::{
    find_path, find_path_between_points, Node, NodeStatus, PathFinder, Search, StepCostMode,
};
pub use crate::tilemap::{Tile, TileMap};
