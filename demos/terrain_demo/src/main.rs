use std::path::PathBuf;

use anyhow::{Context, Result};
use tilecraft::{CornerMap, MapConfig, TileMap};
use tracing_subscriber::EnvFilter;

#[rustfmt::skip]
const DEFAULT_MAP: &[&str] = &[
    "............",
    "..####......",
    ".######..##.",
    ".##..###.##.",
    ".##...#####.",
    "..###.####..",
    "...#.....#..",
    "............",
];

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn default_config() -> MapConfig {
    MapConfig {
        columns: DEFAULT_MAP[0].len(),
        rows: DEFAULT_MAP.len(),
        cells: DEFAULT_MAP
            .iter()
            .flat_map(|row| row.chars().map(|c| u32::from(c == '#')))
            .collect(),
        ..MapConfig::default()
    }
}

fn print_sprites(map: &TileMap) {
    let columns = map.grid().columns();
    for row in map.sprite_indices().chunks(columns) {
        let line: Vec<String> = row.iter().map(|id| format!("{id:>3}")).collect();
        println!("{}", line.join(""));
    }
}

/// Pixel length of a path, measured between consecutive cell centers.
fn path_length(map: &TileMap, path: &[usize]) -> f32 {
    path.windows(2)
        .filter_map(|pair| {
            let from = map.grid().cell_by_index(pair[0])?;
            let to = map.grid().cell_by_index(pair[1])?;
            Some(from.center().distance(to.center()))
        })
        .sum()
}

fn main() -> Result<()> {
    init_logging();

    let config = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading map {}", path.display()))?;
            MapConfig::from_json(&json).with_context(|| format!("parsing map {}", path.display()))?
        }
        None => default_config(),
    };
    let mut map = TileMap::from_config(&config).context("building tile map")?;
    log::info!(
        "loaded {}x{} map",
        map.grid().columns(),
        map.grid().rows()
    );

    println!("Sprite indices:");
    print_sprites(&map);

    let land: Vec<usize> = (0..map.grid().len())
        .filter(|&i| map.terrain(i).is_some_and(|t| t.is_land))
        .collect();
    if let (Some(&start), Some(&goal)) = (land.first(), land.last()) {
        for diagonal in [false, true] {
            let path = map.find_path(start, goal, diagonal);
            if path.is_empty() {
                log::warn!("no land route from {} to {}", start, goal);
            } else {
                println!(
                    "Path {start} -> {goal} (diagonal: {diagonal}, {:.1}px): {path:?}",
                    path_length(&map, &path)
                );
            }
        }
    }

    // Flood the first land cell and show how the neighborhood re-tiles.
    if let Some(&first) = land.first() {
        map.toggle(first);
        println!("After flooding cell {first}:");
        print_sprites(&map);
    }

    let mut corners = CornerMap::new(map.grid());
    for &index in &land {
        corners.paint(map.grid(), index, true);
    }
    println!("Corner sprites:");
    for row in corners.sprite_indices().chunks(map.grid().columns()) {
        let line: Vec<String> = row.iter().map(|id| format!("{id:>3}")).collect();
        println!("{}", line.join(""));
    }

    Ok(())
}
