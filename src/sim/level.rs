//! Static level map
//!
//! The catalogue of every tile in the scrollable world. Built once before the
//! first tick and never mutated; the camera controller reads it to decide
//! which tiles to materialize.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GROUND_COLUMNS, GROUND_ROWS, GROUND_START_COLUMN};
use crate::settings::Settings;

/// Errors raised while loading a level map
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("malformed level map: {0}")]
    Json(#[from] serde_json::Error),
    #[error("tile {index} at x={x} lies outside the scrollable world [0, {width}]")]
    TileOutOfBounds { index: usize, x: f32, width: f32 },
    #[error("tile {index} has a non-finite y ({y})")]
    NonFiniteTile { index: usize, y: f32 },
}

/// Tile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Diggable earth; consumed when the hero pushes into it
    Ground,
    /// Indestructible border plate
    MetalBorder,
}

/// Index of a tile in its `LevelMap`
pub type TileId = usize;

/// A tile definition in absolute-world coordinates (tile center)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileSpec {
    pub x: f32,
    pub y: f32,
    pub kind: TileKind,
}

impl TileSpec {
    pub fn new(x: f32, y: f32, kind: TileKind) -> Self {
        Self { x, y, kind }
    }
}

/// Immutable tile catalogue, ordered by absolute x
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LevelMap {
    tiles: Vec<TileSpec>,
}

impl LevelMap {
    /// Build a map from tiles in any order. Tiles are stably sorted by x so
    /// band queries are a binary search.
    pub fn new(mut tiles: Vec<TileSpec>) -> Self {
        tiles.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { tiles }
    }

    /// The reference world: metal borders around the scrollable area and a
    /// solid block of ground to dig through.
    pub fn standard(settings: &Settings) -> Self {
        let tile = settings.tile_size;
        let half = tile / 2.0;
        let columns = (settings.scrollable_width / tile) as u32;
        let rows = (settings.visible_height / tile) as u32;

        let mut tiles = Vec::new();

        // Top and bottom rows
        for i in 0..columns {
            let x = i as f32 * tile + half;
            tiles.push(TileSpec::new(x, half, TileKind::MetalBorder));
            tiles.push(TileSpec::new(
                x,
                settings.visible_height - half,
                TileKind::MetalBorder,
            ));
        }

        // Left and right columns
        for j in 0..rows {
            let y = j as f32 * tile + half;
            tiles.push(TileSpec::new(half, y, TileKind::MetalBorder));
            tiles.push(TileSpec::new(
                settings.scrollable_width - half,
                y,
                TileKind::MetalBorder,
            ));
        }

        for i in 0..GROUND_COLUMNS {
            for j in 0..GROUND_ROWS {
                let x = (i + GROUND_START_COLUMN) as f32 * tile + half;
                let y = half + tile * (j + 1) as f32;
                tiles.push(TileSpec::new(x, y, TileKind::Ground));
            }
        }

        let map = Self::new(tiles);
        log::info!(
            "Standard level: {} tiles ({} ground)",
            map.len(),
            map.ground_count()
        );
        map
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let raw: LevelMap = serde_json::from_str(json)?;
        Ok(Self::new(raw.tiles))
    }

    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check every tile lies inside the scrollable world
    pub fn validate(&self, scrollable_width: f32) -> Result<(), LevelError> {
        for (index, tile) in self.tiles.iter().enumerate() {
            if !(0.0..=scrollable_width).contains(&tile.x) {
                return Err(LevelError::TileOutOfBounds {
                    index,
                    x: tile.x,
                    width: scrollable_width,
                });
            }
            if !tile.y.is_finite() {
                return Err(LevelError::NonFiniteTile { index, y: tile.y });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, id: TileId) -> Option<&TileSpec> {
        self.tiles.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileSpec)> {
        self.tiles.iter().enumerate()
    }

    /// Tiles whose absolute x falls in the half-open band `[lo, hi)`
    pub fn tiles_in_band(&self, lo: f32, hi: f32) -> impl Iterator<Item = (TileId, &TileSpec)> {
        let start = self.tiles.partition_point(|t| t.x < lo);
        let end = self.tiles.partition_point(|t| t.x < hi).max(start);
        (start..end).map(move |id| (id, &self.tiles[id]))
    }

    pub fn ground_count(&self) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.kind == TileKind::Ground)
            .count()
    }
}
