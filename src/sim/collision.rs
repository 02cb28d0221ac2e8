//! Overlap tests for the reference stage
//!
//! The actor is a circle, everything else is an axis-aligned box. Only
//! overlap is computed; no penetration resolution beyond the ground clamp.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box stored as centre and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }
}

/// Check whether a circle overlaps a box
///
/// Touching edges count as overlap so a resting actor keeps its ground contact.
pub fn circle_overlaps_aabb(center: Vec2, radius: f32, aabb: &Aabb) -> bool {
    let closest = aabb.closest_point(center);
    (center - closest).length_squared() <= radius * radius
}

/// Vertical push that lifts a circle out of a box it sinks into from above
///
/// Returns `None` when the circle does not overlap or sits below the box top.
pub fn rest_on_top(center: Vec2, radius: f32, aabb: &Aabb) -> Option<f32> {
    if !circle_overlaps_aabb(center, radius, aabb) {
        return None;
    }
    let top = aabb.max().y;
    if center.y < top {
        // Centre inside or below the box: push all the way up
        return Some(top + radius - center.y);
    }
    let penetration = top + radius - center.y;
    (penetration > 0.0).then_some(penetration)
}
