//! Live platform registry
//!
//! Materialized tiles, positioned in viewport space. The camera controller
//! decides membership; locomotion shifts them all when the world scrolls.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::level::{TileId, TileKind, TileSpec};

/// A tile that currently exists in the simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformInstance {
    /// Source tile in the level map
    pub tile: TileId,
    pub kind: TileKind,
    /// Absolute-world x of the source tile (never changes)
    pub world_x: f32,
    /// Current viewport-space box
    pub bounds: Aabb,
}

impl PlatformInstance {
    /// Materialize a tile given the current horizontal scroll offset
    pub fn from_spec(tile: TileId, spec: &TileSpec, half: Vec2, scroll_offset: f32) -> Self {
        Self {
            tile,
            kind: spec.kind,
            world_x: spec.x,
            bounds: Aabb::new(Vec2::new(spec.x - scroll_offset, spec.y), half),
        }
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.bounds.center
    }
}

/// Live platforms, kept sorted by tile id for deterministic iteration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformSet {
    instances: Vec<PlatformInstance>,
}

impl PlatformSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlatformInstance> {
        self.instances.iter()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.find(tile).is_ok()
    }

    pub fn get(&self, tile: TileId) -> Option<&PlatformInstance> {
        self.find(tile).ok().map(|i| &self.instances[i])
    }

    /// Add an instance; returns false if its tile is already live
    pub fn insert(&mut self, instance: PlatformInstance) -> bool {
        match self.find(instance.tile) {
            Ok(_) => false,
            Err(i) => {
                self.instances.insert(i, instance);
                true
            }
        }
    }

    pub fn remove(&mut self, tile: TileId) -> Option<PlatformInstance> {
        self.find(tile).ok().map(|i| self.instances.remove(i))
    }

    /// Drop every instance failing the predicate; returns how many went
    pub fn retain(&mut self, keep: impl FnMut(&PlatformInstance) -> bool) -> usize {
        let before = self.instances.len();
        self.instances.retain(keep);
        before - self.instances.len()
    }

    /// Shift every live platform horizontally (the scrolling illusion)
    pub fn translate_all(&mut self, dx: f32) {
        for instance in &mut self.instances {
            instance.bounds.center.x += dx;
        }
    }

    /// First platform (lowest tile id) containing a viewport-space point
    pub fn probe(&self, point: Vec2) -> Option<&PlatformInstance> {
        self.instances
            .iter()
            .find(|p| p.bounds.contains_point(point))
    }

    fn find(&self, tile: TileId) -> Result<usize, usize> {
        self.instances.binary_search_by_key(&tile, |p| p.tile)
    }
}
