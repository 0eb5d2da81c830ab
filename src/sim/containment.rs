//! Footprint containment tests
//!
//! Two questions decide what happens to a shadow collider:
//! - is the shadow swallowed by the lit circle on the wall? (then there is
//!   nothing to stand on and the collider is switched off)
//! - does the light fully wrap the occluder at its own depth? (then the light
//!   casts a fresh, perspective-scaled shadow of it)

use glam::Vec2;

use super::bounds::Aabb;
use super::projection::LightState;

/// The lit circle on the wall plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub center: Vec2,
    pub radius: f32,
}

impl Footprint {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Footprint of the light on the wall
    pub fn at_wall(light: &LightState) -> Self {
        Self::at_depth(light, light.wall_distance)
    }

    /// Footprint of the light at an arbitrary depth
    pub fn at_depth(light: &LightState, z: f32) -> Self {
        Self {
            center: light.position.truncate(),
            radius: light.wall_footprint_radius(z),
        }
    }

    /// Closest point on or inside the circle; `p` itself when already inside
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let offset = p - self.center;
        if offset.length() <= self.radius {
            p
        } else {
            self.center + offset.normalize_or_zero() * self.radius
        }
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.closest_point(p) == p
    }
}

/// True when both corners of the shadow box sit inside the lit circle
///
/// Depth is ignored: the corners are flattened onto the light's plane.
pub fn is_wholly_contained(footprint: &Footprint, shadow: &Aabb) -> bool {
    footprint.contains(shadow.max().truncate()) && footprint.contains(shadow.min().truncate())
}

/// True when the cone, measured at the occluder's near face, covers the
/// occluder's min and max corners
pub fn casts_fresh_shadow(light: &LightState, bounds: &Aabb) -> bool {
    let near_z = bounds.min().z;
    let hit_radius = light.wall_footprint_radius(near_z);
    let hit_pos = light.position.truncate();

    let min = bounds.min().truncate();
    let max = bounds.max().truncate();
    hit_pos.distance(min) <= hit_radius && hit_pos.distance(max) <= hit_radius
}
