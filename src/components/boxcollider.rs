use bevy_ecs::prelude::Component;
use nalgebra::Vector3;

/// Axis-aligned box collider, positioned relative to the entity's
/// [`MapPosition`](super::mapposition::MapPosition).
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vector3<f32>,
    pub offset: Vector3<f32>,
}

/// Where a swept segment first enters a box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentHit {
    /// Distance from the segment origin to the entry point.
    pub distance: f32,
    /// Entry point in world space.
    pub point: Vector3<f32>,
}

impl BoxCollider {
    /// Create a BoxCollider with given extents, min corner at the entity position.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            size: Vector3::new(width, height, depth),
            offset: Vector3::zeros(),
        }
    }

    /// Create a BoxCollider with given extents centered on the entity position.
    pub fn centered(width: f32, height: f32, depth: f32) -> Self {
        let collider = Self::new(width, height, depth);
        collider.with_offset(-collider.size * 0.5)
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vector3<f32>) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vector3<f32>) -> (Vector3<f32>, Vector3<f32>) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.inf(&p1), p0.sup(&p1))
    }

    /// Slab test of the segment `origin + direction * t`, `t ∈ [0, max_distance]`.
    ///
    /// `direction` must be normalized. A segment that starts inside the box
    /// hits at distance 0.
    pub fn intersect_segment(
        &self,
        position: Vector3<f32>,
        origin: Vector3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<SegmentHit> {
        let (min, max) = self.aabb(position);
        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;

        for axis in 0..3 {
            let d = direction[axis];
            let o = origin[axis];
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: must already lie between its planes.
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (min[axis] - o) * inv;
            let mut t1 = (max[axis] - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_enter = t_enter.max(t0);
            t_exit = t_exit.min(t1);
            if t_enter > t_exit {
                return None;
            }
        }

        Some(SegmentHit {
            distance: t_enter,
            point: origin + direction * t_enter,
        })
    }
}
