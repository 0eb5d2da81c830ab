//! Axis-aligned boxes and the light's trigger capsule
//!
//! Occluders are treated as axis-aligned bounding boxes. The light's trigger
//! volume is a capsule whose axis runs along +z (the light always faces the
//! wall).

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box stored as center + half-extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    /// Half-size along each axis (never negative)
    pub extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, extents: Vec3) -> Self {
        Self {
            center,
            extents: extents.abs(),
        }
    }

    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self::new((min + max) / 2.0, (max - min) / 2.0)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Closest point inside the box to `p`
    pub fn closest_point(&self, p: Vec3) -> Vec3 {
        p.clamp(self.min(), self.max())
    }
}

/// Capsule along the z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    /// Center of the capsule in world space
    pub center: Vec3,
    pub radius: f32,
    /// Total length including the hemispherical caps
    pub height: f32,
}

impl Capsule {
    /// The inner segment the capsule is swept around (z range)
    pub fn segment(&self) -> (Vec3, Vec3) {
        let half = (self.height / 2.0 - self.radius).max(0.0);
        (
            self.center - Vec3::Z * half,
            self.center + Vec3::Z * half,
        )
    }

    /// Overlap test against a box (the host physics side of the trigger)
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let (a, b) = self.segment();
        // Distance to the axis line is constant in xy, so the nearest axis point
        // is the segment z nearest the box center.
        let axis_point = Vec3::new(a.x, a.y, aabb.center.z.clamp(a.z, b.z));
        let box_point = aabb.closest_point(axis_point);
        box_point.distance(axis_point) <= self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_min_max() {
        let aabb = Aabb::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(aabb.min(), Vec3::new(0.5, 1.0, 1.5));
        assert_eq!(aabb.max(), Vec3::new(1.5, 3.0, 4.5));
        assert_eq!(Aabb::from_min_max(aabb.min(), aabb.max()), aabb);
    }

    #[test]
    fn test_capsule_aabb_overlap() {
        let capsule = Capsule {
            center: Vec3::new(0.0, 0.0, 0.0),
            radius: 1.0,
            height: 10.0,
        };
        // Box straddling the rim
        let near = Aabb::new(Vec3::new(1.4, 0.0, 2.0), Vec3::splat(0.5));
        assert!(capsule.intersects_aabb(&near));
        // Box well off to the side
        let far = Aabb::new(Vec3::new(3.0, 0.0, 2.0), Vec3::splat(0.5));
        assert!(!capsule.intersects_aabb(&far));
        // Box beyond the end cap
        let beyond = Aabb::new(Vec3::new(0.0, 0.0, 7.0), Vec3::splat(0.5));
        assert!(!capsule.intersects_aabb(&beyond));
        // Long box whose center is past the cap but overlaps it
        let long = Aabb::new(Vec3::new(0.0, 0.0, 6.0), Vec3::new(0.5, 0.5, 2.0));
        assert!(capsule.intersects_aabb(&long));
    }
}
