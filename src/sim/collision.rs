//! Collision primitives for tile geometry
//!
//! Everything in the world is an axis-aligned box. Two queries matter:
//! point probes (is this pixel inside a tile?) and box contact (are two
//! boxes overlapping by more than a shared edge?).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    /// Half-open point test: the top and left edges belong to the box, the
    /// bottom and right edges do not. A probe sitting exactly on a tile's
    /// upper surface therefore hits it.
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Strict overlap: boxes that only share an edge are not touching
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half + other.half;
        delta.x < reach.x && delta.y < reach.y
    }

    /// Y coordinate that puts a box of `half_height` flush on top of this one
    #[inline]
    pub fn resting_y(&self, half_height: f32) -> f32 {
        self.top() - half_height
    }
}
