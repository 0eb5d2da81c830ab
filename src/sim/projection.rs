//! Light cone projection math
//!
//! Everything here is a pure function of the light's pose and the scene
//! constants. The light looks down +z at a wall sitting at `wall_distance`.
//! Depths are z coordinates; "distance" always means a z difference measured
//! from the light.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::lerp;
use crate::settings::Settings;

/// Pose and cone parameters of the movable spot light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightState {
    pub position: Vec3,
    /// Apex angle of the spot cone in degrees
    pub spot_angle: f32,
    /// Depth (z) of the wall plane
    pub wall_distance: f32,
    /// Distance from the wall at which the de-rating is fully applied
    pub max_distance: f32,
    /// Radius multiplier at `max_distance`
    pub radius_scaling_factor: f32,
}

impl LightState {
    pub fn new(position: Vec3, settings: &Settings) -> Self {
        Self {
            position,
            spot_angle: settings.spot_angle,
            wall_distance: settings.wall_distance,
            max_distance: settings.max_distance,
            radius_scaling_factor: settings.radius_scaling_factor,
        }
    }

    #[inline]
    pub fn half_angle_radians(&self) -> f32 {
        (self.spot_angle / 2.0).to_radians()
    }

    /// Distance from the light to the wall plane
    #[inline]
    pub fn distance_to_wall(&self) -> f32 {
        self.wall_distance - self.position.z
    }

    /// Radius de-rating for the current distance to the wall
    pub fn radius_falloff(&self) -> f32 {
        lerp(
            1.0,
            self.radius_scaling_factor,
            self.distance_to_wall() / self.max_distance,
        )
    }

    /// Radius of the lit circle at depth `hit_z`
    ///
    /// Used both at the wall and at an occluder's near face, so the two
    /// always agree.
    pub fn wall_footprint_radius(&self, hit_z: f32) -> f32 {
        let dist_to_hit = hit_z - self.position.z;
        dist_to_hit * self.half_angle_radians().tan() * self.radius_falloff()
    }

    /// Point on the light axis at depth `z`
    #[inline]
    pub fn axis_point(&self, z: f32) -> Vec3 {
        Vec3::new(self.position.x, self.position.y, z)
    }

    /// Project a box onto the wall, centre and half-extents relative to the
    /// light axis. The box centre depth is used for the whole box.
    ///
    /// Callers must only pass boxes whose centre is in front of the light.
    pub fn project_bounds(&self, bounds: &Aabb) -> ProjectedBounds {
        let z_dist = bounds.center.z - self.position.z;
        let dist_to_wall = self.distance_to_wall();
        debug_assert!(z_dist > 0.0, "projecting a box that is not in front of the light");

        let light_xy = self.position.truncate();
        let center_offset = bounds.center.truncate() - light_xy;
        let max_offset = bounds.max().truncate() - light_xy;

        let center = Vec2::new(
            project_extent(center_offset.x, z_dist, dist_to_wall),
            project_extent(center_offset.y, z_dist, dist_to_wall),
        );
        let max = Vec2::new(
            project_extent(max_offset.x, z_dist, dist_to_wall),
            project_extent(max_offset.y, z_dist, dist_to_wall),
        );

        ProjectedBounds {
            center,
            extents: max - center,
        }
    }

    /// How much a box's x/y half-extents grow when projected onto the wall
    pub fn scale_factors(&self, bounds: &Aabb) -> Vec2 {
        let projected = self.project_bounds(bounds);
        Vec2::new(
            ratio_or_one(projected.extents.x, bounds.extents.x),
            ratio_or_one(projected.extents.y, bounds.extents.y),
        )
    }

    /// Horizontal offset on the wall, relative to the light, of the shadow of
    /// a point at `x` whose near face is `dist_to_obj` in front of the light
    pub fn hit_offset_x(&self, x: f32, dist_to_obj: f32) -> f32 {
        let hit_angle = ((x - self.position.x) / dist_to_obj).atan();
        self.distance_to_wall() * hit_angle
    }
}

/// Shadow rectangle on the wall, relative to the light axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedBounds {
    pub center: Vec2,
    pub extents: Vec2,
}

/// Project an offset from the light axis at `depth_from_light` onto the wall
/// at `wall_distance_from_light`, using the angle the light ray makes
#[inline]
pub fn project_extent(offset: f32, depth_from_light: f32, wall_distance_from_light: f32) -> f32 {
    wall_distance_from_light * (offset / depth_from_light).atan()
}

#[inline]
fn ratio_or_one(projected: f32, original: f32) -> f32 {
    if original.abs() <= f32::EPSILON {
        1.0
    } else {
        projected / original
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn light_at(z: f32, spot_angle: f32, falloff: f32) -> LightState {
        LightState {
            position: Vec3::new(0.0, 0.0, z),
            spot_angle,
            wall_distance: 5.0,
            max_distance: 9.0,
            radius_scaling_factor: falloff,
        }
    }

    #[test]
    fn test_footprint_radius_reference() {
        let light = light_at(0.0, 30.0, 1.0);
        let r = light.wall_footprint_radius(5.0);
        assert!((r - 5.0 * 15.0_f32.to_radians().tan()).abs() < 1e-6);
        assert!((r - 1.340).abs() < 1e-3);
    }

    #[test]
    fn test_footprint_falloff_clamped() {
        // 9 units from the wall: full de-rating
        let light = light_at(-4.0, 30.0, 0.8);
        assert!((light.radius_falloff() - 0.8).abs() < 1e-6);

        // Beyond max distance the factor does not keep shrinking
        let far = light_at(-10.0, 30.0, 0.8);
        assert!((far.radius_falloff() - 0.8).abs() < 1e-6);

        // At the wall no de-rating at all
        let close = light_at(5.0, 30.0, 0.8);
        assert!((close.radius_falloff() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_footprint_at_object_depth_is_smaller() {
        let light = light_at(0.0, 40.0, 0.8);
        assert!(light.wall_footprint_radius(2.0) < light.wall_footprint_radius(5.0));
        assert_eq!(light.wall_footprint_radius(0.0), 0.0);
    }

    #[test]
    fn test_project_extent() {
        // 45 degree ray lands a quarter turn along a wall 2 units away
        let projected = project_extent(1.0, 1.0, 2.0);
        assert!((projected - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(project_extent(0.0, 3.0, 5.0), 0.0);
        assert!(project_extent(-1.0, 1.0, 2.0) < 0.0);
    }

    #[test]
    fn test_scale_factors_on_axis() {
        let light = light_at(0.0, 30.0, 1.0);
        let bounds = Aabb::new(Vec3::new(0.0, 0.0, 2.5), Vec3::splat(0.5));
        let factors = light.scale_factors(&bounds);
        let expected = 5.0 * (0.5_f32 / 2.5).atan() / 0.5;
        assert!((factors.x - expected).abs() < 1e-5);
        assert!((factors.y - expected).abs() < 1e-5);
        // Closer to the light means a bigger shadow
        let closer = Aabb::new(Vec3::new(0.0, 0.0, 1.0), Vec3::splat(0.5));
        assert!(light.scale_factors(&closer).x > factors.x);
    }

    #[test]
    fn test_scale_factors_flat_box() {
        let light = light_at(0.0, 30.0, 1.0);
        let flat = Aabb::new(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(light.scale_factors(&flat).y, 1.0);
    }

    #[test]
    fn test_projected_center_offset() {
        let light = light_at(0.0, 30.0, 1.0);
        let bounds = Aabb::new(Vec3::new(1.0, 0.0, 2.5), Vec3::splat(0.25));
        let projected = light.project_bounds(&bounds);
        assert!((projected.center.x - 5.0 * (1.0_f32 / 2.5).atan()).abs() < 1e-6);
        assert!(projected.extents.x > 0.0);
    }

    #[test]
    fn test_hit_offset_x() {
        let light = LightState {
            position: Vec3::new(2.0, 1.0, -1.0),
            ..light_at(0.0, 30.0, 1.0)
        };
        assert_eq!(light.hit_offset_x(2.0, 3.0), 0.0);
        let offset = light.hit_offset_x(3.0, 3.0);
        assert!((offset - 6.0 * (1.0_f32 / 3.0).atan()).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_footprint_monotone_in_wall_distance(
            d1 in 0.0f32..20.0,
            extra in 0.0f32..10.0,
            spot_angle in 1.0f32..170.0,
            falloff in 0.5f32..1.5,
        ) {
            let near = light_at(5.0 - d1, spot_angle, falloff);
            let far = light_at(5.0 - d1 - extra, spot_angle, falloff);
            let r_near = near.wall_footprint_radius(5.0);
            let r_far = far.wall_footprint_radius(5.0);
            prop_assert!(r_far >= r_near - 1e-4 * r_near.abs().max(1.0));
        }

        #[test]
        fn prop_footprint_never_negative_in_front(
            light_z in -10.0f32..4.9,
            spot_angle in 1.0f32..170.0,
        ) {
            let light = light_at(light_z, spot_angle, 0.8);
            prop_assert!(light.wall_footprint_radius(5.0) >= 0.0);
        }
    }
}
