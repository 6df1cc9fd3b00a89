//! Axis-aligned overlap tests
//!
//! Every entity is a box described by its center and full size, so two boxes
//! intersect when the center distance on each axis is under half their summed
//! extents on that axis. Touching edges do not count.

use glam::Vec2;

/// Axis-aligned box in center + size form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Bottom edge (screen space, y grows downward)
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.size / 2.0
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        overlap(self, other)
    }
}

/// Strict AABB intersection
#[inline]
pub fn overlap(a: &Aabb, b: &Aabb) -> bool {
    let d = (a.center - b.center).abs() * 2.0;
    let extent = a.size + b.size;
    d.x < extent.x && d.y < extent.y
}
