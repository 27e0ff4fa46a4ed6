//! Terrain autotiling.
//!
//! A cell of the open terrain type (water, lower layer) looks at its eight
//! neighbors and records which of them are solid (land, upper layer) in an
//! 8-bit mask:
//!
//! ```text
//! NW(128)  N(1)  NE(2)
//!  W(64)    *    E(4)
//! SW(32)  S(16)  SE(8)
//! ```
//!
//! A [`MaskRule`] then normalizes the raw mask and a [`SpriteTable`] maps the
//! result onto the sprite sheet. Solid cells skip sampling and always use the
//! table's interior sprite.

use crate::grid::{Direction, Grid};

/// Mask reported for solid cells, which are never sampled.
pub const INTERIOR_MASK: u8 = u8::MAX;

/// Sprite indices of the 6x8 terrain sheet.
pub mod sprites {
    pub const TOP: u32 = 0;
    pub const SIDE_E_W: u32 = 1;
    pub const SIDE_N_S_W: u32 = 2;
    pub const SIDE_N_E_S: u32 = 3;
    pub const SIDE_N_E_W: u32 = 4;
    pub const SIDE_N_CORNER_SW: u32 = 5;
    pub const SIDE_N_W: u32 = 6;
    pub const CORNER_NE_NW: u32 = 7;
    pub const SIDE_N_E: u32 = 8;
    pub const SIDE_N_E_S_W: u32 = 9;
    pub const SIDE_E_S_W: u32 = 10;
    pub const SIDE_N_CORNER_SE: u32 = 11;
    pub const CORNER_SW_NW: u32 = 12;
    pub const BASE: u32 = 13;
    pub const CORNER_NE_SE: u32 = 14;
    pub const SIDE_N_S: u32 = 15;
    pub const CORNER_SE: u32 = 16;
    pub const CORNER_SW: u32 = 17;
    pub const SIDE_S_W: u32 = 18;
    pub const CORNER_SE_SW: u32 = 19;
    pub const SIDE_E_S: u32 = 20;
    pub const SIDE_S_CORNER_NW: u32 = 21;
    pub const CORNER_NE: u32 = 22;
    pub const CORNER_NW: u32 = 23;
    pub const SIDE_N_W_CORNER_SE: u32 = 24;
    pub const SIDE_N_CORNER_SE_SW: u32 = 25;
    pub const SIDE_N_E_CORNER_SW: u32 = 26;
    pub const SIDE_S_CORNER_NE: u32 = 27;
    pub const SIDE_N: u32 = 28;
    pub const SIDE_E: u32 = 29;
    pub const SIDE_W_CORNER_NE_SE: u32 = 30;
    pub const CORNER_NE_SE_SW_NW: u32 = 31;
    pub const SIDE_E_CORNER_SW_NW: u32 = 32;
    pub const SIDE_W_CORNER_SE: u32 = 33;
    pub const SIDE_S: u32 = 34;
    pub const SIDE_W: u32 = 35;
    pub const SIDE_S_W_CORNER_NE: u32 = 36;
    pub const SIDE_S_CORNER_NE_NW: u32 = 37;
    pub const SIDE_E_S_CORNER_NW: u32 = 38;
    pub const SIDE_W_CORNER_NE: u32 = 39;
    pub const SIDE_E_CORNER_SW: u32 = 40;
    pub const SIDE_E_CORNER_NW: u32 = 41;
    pub const CORNER_NE_SW: u32 = 42;
    pub const CORNER_SE_NW: u32 = 43;
    pub const CORNER_NE_SE_NW: u32 = 44;
    pub const CORNER_NE_SW_NW: u32 = 45;
    pub const CORNER_SE_SW_NW: u32 = 46;
    pub const CORNER_NE_SE_SW: u32 = 47;
}

/// Normalizes a raw neighbor mask before table lookup.
pub trait MaskRule {
    fn apply(&self, raw: u8) -> u8;
}

/// Keeps all eight bits as sampled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawMask;

impl MaskRule for RawMask {
    fn apply(&self, raw: u8) -> u8 {
        raw
    }
}

/// Drops a corner bit whenever either orthogonal side next to that corner is
/// solid, leaving at most 47 distinct masks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuppressedCorners;

/// Each corner with its two adjacent orthogonal sides.
const CORNERS: [(Direction, Direction, Direction); 4] = [
    (Direction::NorthEast, Direction::North, Direction::East),
    (Direction::SouthEast, Direction::South, Direction::East),
    (Direction::SouthWest, Direction::South, Direction::West),
    (Direction::NorthWest, Direction::North, Direction::West),
];

impl MaskRule for SuppressedCorners {
    fn apply(&self, raw: u8) -> u8 {
        CORNERS
            .iter()
            .filter(|(_, a, b)| raw & (a.bit() | b.bit()) != 0)
            .fold(raw, |mask, (corner, _, _)| mask & !corner.bit())
    }
}

/// Mask-to-sprite lookup for one sprite sheet layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpriteTable {
    slots: [Option<u32>; 256],
    interior: u32,
    fallback: u32,
}

impl SpriteTable {
    /// Build a table from `(mask, sprite)` pairs. Masks without a pair map
    /// to `fallback`; solid cells use `interior`.
    pub const fn from_pairs(pairs: &[(u8, u32)], interior: u32, fallback: u32) -> Self {
        let mut slots = [None; 256];
        let mut i = 0;
        while i < pairs.len() {
            slots[pairs[i].0 as usize] = Some(pairs[i].1);
            i += 1;
        }
        Self {
            slots,
            interior,
            fallback,
        }
    }

    /// Sprite for a mask, or `None` if the table has no entry for it.
    pub fn get(&self, mask: u8) -> Option<u32> {
        self.slots[mask as usize]
    }

    /// Sprite for a mask, falling back to the ambiguous sprite.
    pub fn sprite(&self, mask: u8) -> u32 {
        self.get(mask).unwrap_or(self.fallback)
    }

    pub fn interior(&self) -> u32 {
        self.interior
    }

    pub fn fallback(&self) -> u32 {
        self.fallback
    }

    /// Number of masks with an explicit entry.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw 8-bit masks of the 6x8 terrain sheet. Mask 0 has no entry.
const EDGE_PAIRS: [(u8, u32); 255] = [
    (1, 28), (2, 22), (3, 28), (4, 29), (5, 8), (6, 29), (7, 8), (8, 16),
    (9, 11), (10, 14), (11, 11), (12, 29), (13, 8), (14, 29), (15, 8), (16, 34),
    (17, 15), (18, 27), (19, 15), (20, 20), (21, 3), (22, 20), (23, 3), (24, 34),
    (25, 15), (26, 27), (27, 15), (28, 20), (29, 3), (30, 20), (31, 3), (32, 17),
    (33, 5), (34, 42), (35, 5), (36, 40), (37, 26), (38, 40), (39, 26), (40, 19),
    (41, 25), (42, 47), (43, 25), (44, 40), (45, 26), (46, 40), (47, 26), (48, 34),
    (49, 15), (50, 27), (51, 15), (52, 20), (53, 3), (54, 20), (55, 3), (56, 34),
    (57, 15), (58, 27), (59, 15), (60, 20), (61, 3), (62, 20), (63, 3), (64, 35),
    (65, 6), (66, 39), (67, 6), (68, 1), (69, 4), (70, 1), (71, 4), (72, 33),
    (73, 24), (74, 39), (75, 24), (76, 1), (77, 4), (78, 1), (79, 4), (80, 18),
    (81, 2), (82, 36), (83, 2), (84, 10), (85, 9), (86, 10), (87, 9), (88, 18),
    (89, 2), (90, 36), (91, 2), (92, 10), (93, 9), (94, 10), (95, 9), (96, 35),
    (97, 6), (98, 39), (99, 6), (100, 1), (101, 4), (102, 1), (103, 4), (104, 33),
    (105, 24), (106, 30), (107, 24), (108, 1), (109, 4), (110, 1), (111, 4), (112, 18),
    (113, 2), (114, 36), (115, 2), (116, 10), (117, 9), (118, 10), (119, 9), (120, 18),
    (121, 2), (122, 36), (123, 2), (124, 10), (125, 9), (126, 10), (127, 9), (128, 23),
    (129, 28), (130, 7), (131, 28), (132, 41), (133, 8), (134, 41), (135, 8), (136, 43),
    (137, 11), (138, 44), (139, 11), (140, 41), (141, 8), (142, 41), (143, 8), (144, 21),
    (145, 15), (146, 37), (147, 15), (148, 38), (149, 3), (150, 38), (151, 3), (152, 21),
    (153, 15), (154, 37), (155, 15), (156, 38), (157, 3), (158, 38), (159, 3), (160, 12),
    (161, 5), (162, 45), (163, 5), (164, 32), (165, 26), (166, 32), (167, 26), (168, 46),
    (169, 25), (170, 31), (171, 25), (172, 32), (173, 26), (174, 32), (175, 26), (176, 21),
    (177, 15), (178, 37), (179, 15), (180, 38), (181, 3), (182, 38), (183, 3), (184, 21),
    (185, 15), (186, 37), (187, 15), (188, 38), (189, 3), (190, 38), (191, 3), (192, 35),
    (193, 6), (194, 39), (195, 6), (196, 1), (197, 4), (198, 1), (199, 4), (200, 33),
    (201, 24), (202, 30), (203, 24), (204, 1), (205, 4), (206, 1), (207, 4), (208, 18),
    (209, 2), (210, 36), (211, 2), (212, 10), (213, 9), (214, 10), (215, 9), (216, 18),
    (217, 2), (218, 36), (219, 2), (220, 10), (221, 9), (222, 10), (223, 9), (224, 35),
    (225, 6), (226, 39), (227, 6), (228, 1), (229, 4), (230, 1), (231, 4), (232, 33),
    (233, 24), (234, 30), (235, 24), (236, 1), (237, 4), (238, 1), (239, 4), (240, 18),
    (241, 2), (242, 36), (243, 2), (244, 10), (245, 9), (246, 10), (247, 9), (248, 18),
    (249, 2), (250, 36), (251, 2), (252, 10), (253, 9), (254, 10), (255, 9),
];

/// Corner-suppressed masks of the 6x8 terrain sheet.
const BLOB_PAIRS: [(u8, u32); 47] = [
    (0, sprites::BASE),
    (1, sprites::SIDE_N),
    (2, sprites::CORNER_NE),
    (4, sprites::SIDE_E),
    (5, sprites::SIDE_N_E),
    (8, sprites::CORNER_SE),
    (9, sprites::SIDE_N_CORNER_SE),
    (10, sprites::CORNER_NE_SE),
    (16, sprites::SIDE_S),
    (17, sprites::SIDE_N_S),
    (18, sprites::SIDE_S_CORNER_NE),
    (20, sprites::SIDE_E_S),
    (21, sprites::SIDE_N_E_S),
    (32, sprites::CORNER_SW),
    (33, sprites::SIDE_N_CORNER_SW),
    (34, sprites::CORNER_NE_SW),
    (36, sprites::SIDE_E_CORNER_SW),
    (37, sprites::SIDE_N_E_CORNER_SW),
    (40, sprites::CORNER_SE_SW),
    (41, sprites::SIDE_N_CORNER_SE_SW),
    (42, sprites::CORNER_NE_SE_SW),
    (64, sprites::SIDE_W),
    (65, sprites::SIDE_N_W),
    (66, sprites::SIDE_W_CORNER_NE),
    (68, sprites::SIDE_E_W),
    (69, sprites::SIDE_N_E_W),
    (72, sprites::SIDE_W_CORNER_SE),
    (73, sprites::SIDE_N_W_CORNER_SE),
    (74, sprites::SIDE_W_CORNER_NE_SE),
    (80, sprites::SIDE_S_W),
    (81, sprites::SIDE_N_S_W),
    (82, sprites::SIDE_S_W_CORNER_NE),
    (84, sprites::SIDE_E_S_W),
    (85, sprites::SIDE_N_E_S_W),
    (128, sprites::CORNER_NW),
    (130, sprites::CORNER_NE_NW),
    (132, sprites::SIDE_E_CORNER_NW),
    (136, sprites::CORNER_SE_NW),
    (138, sprites::CORNER_NE_SE_NW),
    (144, sprites::SIDE_S_CORNER_NW),
    (146, sprites::SIDE_S_CORNER_NE_NW),
    (148, sprites::SIDE_E_S_CORNER_NW),
    (160, sprites::CORNER_SW_NW),
    (162, sprites::CORNER_NE_SW_NW),
    (164, sprites::SIDE_E_CORNER_SW_NW),
    (168, sprites::CORNER_SE_SW_NW),
    (170, sprites::CORNER_NE_SE_SW_NW),
];

/// Lookup for raw masks; pair with [`RawMask`].
pub static EDGE_TABLE: SpriteTable =
    SpriteTable::from_pairs(&EDGE_PAIRS, sprites::TOP, sprites::BASE);

/// Lookup for corner-suppressed masks; pair with [`SuppressedCorners`].
pub static BLOB_TABLE: SpriteTable =
    SpriteTable::from_pairs(&BLOB_PAIRS, sprites::TOP, sprites::BASE);

/// Computes autotile masks and sprites over a grid.
///
/// The autotiler holds no tile state; callers pass a solidity predicate on
/// every call and decide when to recompute.
#[derive(Clone, Debug)]
pub struct Autotiler<R = RawMask> {
    rule: R,
    table: SpriteTable,
}

impl Autotiler<RawMask> {
    /// Raw masks looked up in [`EDGE_TABLE`].
    pub fn edge() -> Self {
        Self::new(RawMask, EDGE_TABLE.clone())
    }
}

impl Autotiler<SuppressedCorners> {
    /// Corner-suppressed masks looked up in [`BLOB_TABLE`].
    pub fn blob() -> Self {
        Self::new(SuppressedCorners, BLOB_TABLE.clone())
    }
}

impl Default for Autotiler<RawMask> {
    fn default() -> Self {
        Self::edge()
    }
}

impl<R: MaskRule> Autotiler<R> {
    pub fn new(rule: R, table: SpriteTable) -> Self {
        Self { rule, table }
    }

    pub fn table(&self) -> &SpriteTable {
        &self.table
    }

    /// Neighbor mask of the cell at `index` with this autotiler's rule
    /// applied. Solid cells report [`INTERIOR_MASK`].
    pub fn compute_mask(&self, grid: &Grid, is_solid: impl Fn(usize) -> bool, index: usize) -> u8 {
        if index < grid.len() && is_solid(index) {
            return INTERIOR_MASK;
        }
        self.rule.apply(compute_mask(grid, is_solid, index))
    }

    /// Table lookup; unmapped masks fall back to the ambiguous sprite.
    pub fn map_mask_to_sprite_index(&self, mask: u8) -> u32 {
        self.table.sprite(mask)
    }

    /// Sprite index of the cell at `index`.
    pub fn sprite_for(&self, grid: &Grid, is_solid: impl Fn(usize) -> bool, index: usize) -> u32 {
        if index < grid.len() && is_solid(index) {
            return self.table.interior();
        }
        self.map_mask_to_sprite_index(self.compute_mask(grid, is_solid, index))
    }

    /// Sprite indices for every cell of the grid.
    pub fn sprites(&self, grid: &Grid, is_solid: impl Fn(usize) -> bool) -> Vec<u32> {
        (0..grid.len())
            .map(|index| self.sprite_for(grid, &is_solid, index))
            .collect()
    }

    /// Sprites of `index` and its eight neighbors, as `(cell, sprite)` pairs.
    /// Empty if `index` is outside the grid.
    pub fn neighborhood_sprites(
        &self,
        grid: &Grid,
        is_solid: impl Fn(usize) -> bool,
        index: usize,
    ) -> Vec<(usize, u32)> {
        if index >= grid.len() {
            return Vec::new();
        }
        std::iter::once(index)
            .chain(Direction::ALL.iter().filter_map(|&d| grid.neighbor_index(index, d)))
            .map(|cell| {
                let sprite = self.sprite_for(grid, &is_solid, cell);
                log::trace!("autotile cell {} -> sprite {}", cell, sprite);
                (cell, sprite)
            })
            .collect()
    }

    /// Recompute the sprites of `index` and its eight neighbors in place.
    ///
    /// Produces the same values as [`Autotiler::sprites`] for those cells.
    pub fn refresh_around(
        &self,
        grid: &Grid,
        is_solid: impl Fn(usize) -> bool,
        index: usize,
        sprites: &mut [u32],
    ) {
        for (cell, sprite) in self.neighborhood_sprites(grid, is_solid, index) {
            if let Some(slot) = sprites.get_mut(cell) {
                *slot = sprite;
            }
        }
    }
}

/// Raw neighbor mask of the cell at `index`, before any [`MaskRule`].
///
/// Solid cells report [`INTERIOR_MASK`]; an index outside the grid reports
/// 0. Neighbors that do not exist count as open terrain. Solid cells take
/// the table's interior sprite, so use [`Autotiler::sprite_for`] rather than
/// feeding their mask to [`map_mask_to_sprite_index`].
pub fn compute_mask(grid: &Grid, is_solid: impl Fn(usize) -> bool, index: usize) -> u8 {
    if index >= grid.len() {
        return 0;
    }
    if is_solid(index) {
        return INTERIOR_MASK;
    }
    Direction::ALL
        .iter()
        .filter(|&&direction| {
            grid.neighbor_index(index, direction)
                .is_some_and(|neighbor| is_solid(neighbor))
        })
        .fold(0, |mask, direction| mask | direction.bit())
}

/// Sprite index for a raw mask in [`EDGE_TABLE`].
///
/// Only meaningful for open cells: [`INTERIOR_MASK`] maps to the enclosed
/// sprite here, while [`Autotiler::sprite_for`] gives solid cells
/// [`sprites::TOP`].
pub fn map_mask_to_sprite_index(mask: u8) -> u32 {
    EDGE_TABLE.sprite(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn grid(columns: usize, rows: usize) -> Grid {
        Grid::new(columns, rows, 32.0, 32.0).unwrap()
    }

    /// Parses rows of `#` (solid) and `.` (open) into a flag per cell.
    fn terrain(rows: &[&str]) -> Vec<bool> {
        rows.iter().flat_map(|row| row.chars().map(|c| c == '#')).collect()
    }

    #[test]
    fn tables_are_complete() {
        assert_eq!(EDGE_TABLE.len(), 255);
        assert_eq!(EDGE_TABLE.get(0), None);
        assert_eq!(BLOB_TABLE.len(), 47);
        assert!(!BLOB_TABLE.is_empty());

        let edge: HashSet<_> = (0..=255u8).map(|m| EDGE_TABLE.sprite(m)).collect();
        let blob: HashSet<_> = (0..=255u8).filter_map(|m| BLOB_TABLE.get(m)).collect();
        assert!(edge.len() <= 48);
        assert_eq!(blob.len(), 47);
        assert!(!blob.contains(&sprites::TOP));
    }

    #[test]
    fn suppression_output_is_always_mapped() {
        for raw in 0..=255u8 {
            let mask = SuppressedCorners.apply(raw);
            assert!(BLOB_TABLE.get(mask).is_some(), "mask {raw} reduced to {mask}");
        }
    }

    #[test]
    fn suppression_rule() {
        // NE survives alone, disappears next to N or E.
        assert_eq!(SuppressedCorners.apply(2), 2);
        assert_eq!(SuppressedCorners.apply(1 | 2), 1);
        assert_eq!(SuppressedCorners.apply(4 | 2), 4);
        assert_eq!(SuppressedCorners.apply(255), 85);
        assert_eq!(SuppressedCorners.apply(2 | 8 | 32 | 128), 170);
        assert_eq!(RawMask.apply(255), 255);
    }

    #[test]
    fn redundant_corners_do_not_change_the_sprite() {
        let blob = Autotiler::blob();
        for mask in 0..=255u8 {
            for (corner, a, b) in CORNERS {
                let sides = a.bit() | b.bit();
                if mask & sides != sides {
                    continue;
                }
                let with = mask | corner.bit();
                let without = mask & !corner.bit();
                assert_eq!(
                    map_mask_to_sprite_index(with),
                    map_mask_to_sprite_index(without),
                    "edge table, mask {mask}"
                );
                assert_eq!(
                    blob.map_mask_to_sprite_index(SuppressedCorners.apply(with)),
                    blob.map_mask_to_sprite_index(SuppressedCorners.apply(without)),
                    "blob table, mask {mask}"
                );
            }
        }
    }

    #[test]
    fn edge_and_blob_tables_agree_but_for_one_entry() {
        let blob = Autotiler::blob();
        let differing: Vec<u8> = (1..=255u8)
            .filter(|&m| {
                map_mask_to_sprite_index(m)
                    != blob.map_mask_to_sprite_index(SuppressedCorners.apply(m))
            })
            .collect();
        // West side with both eastern corners: the raw sheet keeps only NE.
        assert_eq!(differing, vec![74]);
        assert_eq!(map_mask_to_sprite_index(74), sprites::SIDE_W_CORNER_NE);
        assert_eq!(blob.map_mask_to_sprite_index(74), sprites::SIDE_W_CORNER_NE_SE);
    }

    #[test]
    fn interior_cells_ignore_position() {
        let grid = grid(8, 6);
        let land = vec![true; grid.len()];
        let edge = Autotiler::edge().sprites(&grid, |i| land[i]);
        let blob = Autotiler::blob().sprites(&grid, |i| land[i]);
        assert!(edge.iter().chain(&blob).all(|&sprite| sprite == sprites::TOP));
        assert_eq!(compute_mask(&grid, |i| land[i], 20), INTERIOR_MASK);
        // The bare mask lookup treats 255 as enclosed water, not interior.
        assert_eq!(map_mask_to_sprite_index(INTERIOR_MASK), sprites::SIDE_N_E_S_W);
        assert_eq!(Autotiler::edge().sprite_for(&grid, |i| land[i], 20), sprites::TOP);
    }

    #[test]
    fn lone_water_among_land_is_enclosed() {
        let grid = grid(8, 6);
        let mut land = vec![true; grid.len()];
        land[19] = false;
        assert_eq!(compute_mask(&grid, |i| land[i], 19), 255);
        assert_eq!(Autotiler::blob().compute_mask(&grid, |i| land[i], 19), 85);
        assert_eq!(Autotiler::edge().sprite_for(&grid, |i| land[i], 19), sprites::SIDE_N_E_S_W);
        assert_eq!(Autotiler::blob().sprite_for(&grid, |i| land[i], 19), sprites::SIDE_N_E_S_W);
    }

    #[test]
    fn open_water_uses_base() {
        let grid = grid(8, 6);
        let water = vec![false; grid.len()];
        assert_eq!(compute_mask(&grid, |i| water[i], 19), 0);
        assert_eq!(Autotiler::edge().sprite_for(&grid, |i| water[i], 19), sprites::BASE);
        assert_eq!(Autotiler::blob().sprite_for(&grid, |i| water[i], 19), sprites::BASE);
    }

    #[test]
    fn samples_each_direction() {
        let grid = grid(3, 3);
        let land = terrain(&[
            "##.", //
            "...", //
            "..#",
        ]);
        // Center: N and NW and SE solid.
        assert_eq!(compute_mask(&grid, |i| land[i], 4), 1 | 128 | 8);
        assert_eq!(map_mask_to_sprite_index(1 | 128 | 8), sprites::SIDE_N_CORNER_SE);
        assert_eq!(Autotiler::blob().compute_mask(&grid, |i| land[i], 4), 1 | 8);
        // Off-grid neighbors count as open.
        assert_eq!(compute_mask(&grid, |i| land[i], 2), 64);
        assert_eq!(compute_mask(&grid, |i| land[i], 99), 0);
    }

    #[test]
    fn sampling_follows_wrap() {
        let land = terrain(&[
            "#...", //
            "....",
        ]);
        let flat = grid(4, 2);
        assert_eq!(compute_mask(&flat, |i| land[i], 3), 0);
        let wrapped = grid(4, 2).with_wrap(true, false);
        assert_eq!(compute_mask(&wrapped, |i| land[i], 3), 4);
        assert_eq!(compute_mask(&wrapped, |i| land[i], 7), 2);
    }

    #[test]
    fn incremental_refresh_matches_full_refresh() {
        let grid = grid(6, 5);
        let mut land = terrain(&[
            "......", //
            ".##...", //
            ".##.#.", //
            "....#.", //
            "......",
        ]);
        let tiler = Autotiler::blob();
        let mut sprites = tiler.sprites(&grid, |i| land[i]);
        for &edit in &[9, 14, 0, 29, 21, 9] {
            land[edit] = !land[edit];
            tiler.refresh_around(&grid, |i| land[i], edit, &mut sprites);
            assert_eq!(sprites, tiler.sprites(&grid, |i| land[i]), "after editing {edit}");
        }
    }

    #[test]
    fn neighborhood_covers_cell_and_existing_neighbors() {
        let grid = grid(6, 5);
        let land = vec![false; grid.len()];
        let tiler = Autotiler::edge();

        let inner: Vec<usize> = tiler
            .neighborhood_sprites(&grid, |i| land[i], 14)
            .into_iter()
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(inner, vec![14, 8, 15, 20, 13, 9, 21, 19, 7]);

        let corner = tiler.neighborhood_sprites(&grid, |i| land[i], 0);
        assert_eq!(corner.len(), 4);
        assert!(tiler.neighborhood_sprites(&grid, |i| land[i], 30).is_empty());
    }
}
