//! Screen-space geometry for the runner
//!
//! Screen coordinates: x grows to the right, y grows downward. "Above" means a
//! smaller y.
//!
//! Two shapes cover every hazard and support:
//! - `Aabb`: axis-aligned rectangle (player, platforms, pillars)
//! - `SpikeTriangle`: isosceles triangle standing on a surface, apex up

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Open-interval overlap on the x axis (touching edges do not count)
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// Open-interval overlap on the y axis
    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.max.y > other.min.y && self.min.y < other.max.y
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// A spike in world space: base on `base_y`, spanning `[left, left + width]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpikeTriangle {
    pub left: f32,
    pub base_y: f32,
    pub width: f32,
    pub height: f32,
}

impl SpikeTriangle {
    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Slope of the rising (left) edge, in pixels of height per pixel of width
    #[inline]
    pub fn slope(&self) -> f32 {
        self.height / (self.width / 2.0)
    }

    /// Y of the spike's outline at world x.
    ///
    /// The left half follows the rising edge from the left base corner, the
    /// right half the falling edge down to the right base corner. Outside the
    /// span the outline is the base itself.
    pub fn surface_y_at(&self, x: f32) -> f32 {
        let rel = (x - self.left).clamp(0.0, self.width);
        let half = self.width / 2.0;
        if rel <= half {
            self.base_y - rel * self.slope()
        } else {
            self.base_y - (self.width - rel) * self.slope()
        }
    }
}
