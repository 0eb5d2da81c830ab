//! Trigger volume fitting
//!
//! The light carries a capsule trigger, in the local space of the transform it
//! hangs under. Every frame the capsule is widened to the footprint radius at
//! the wall and slid along z so it always spans the whole stage, whatever the
//! light's depth.

use glam::Vec3;

use super::bounds::Capsule;
use super::projection::LightState;
use crate::consts::{COLLIDER_CENTER_BIAS, COLLIDER_START_CENTER_Z};
use crate::lerp;

/// Local-space capsule trigger attached to the light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerVolume {
    pub radius: f32,
    /// Local length along z
    pub height: f32,
    /// Local z of the capsule centre, relative to the light
    pub center_z: f32,
}

/// Keeps the light's trigger volume matched to the cone
#[derive(Debug, Clone, Copy)]
pub struct VolumeFitter {
    /// Scale of the transform the light hangs under
    parent_scale: Vec3,
    volume: TriggerVolume,
}

impl VolumeFitter {
    /// `collider_length` is a world length; it is converted into the parent's
    /// local space once here
    pub fn new(collider_length: f32, parent_scale: Vec3) -> Self {
        Self {
            parent_scale,
            volume: TriggerVolume {
                radius: 0.0,
                height: collider_length / parent_scale.z,
                center_z: COLLIDER_START_CENTER_Z,
            },
        }
    }

    /// Resize and re-centre the volume for the current light pose
    pub fn fit(&mut self, light: &LightState) -> TriggerVolume {
        let length = self.volume.height;
        self.volume.radius = light.wall_footprint_radius(light.wall_distance) / self.parent_scale.x;
        self.volume.center_z = lerp(
            -length / 2.0,
            length / 2.0,
            light.distance_to_wall() / (length * self.parent_scale.z),
        ) + COLLIDER_CENTER_BIAS;
        self.volume
    }

    pub fn volume(&self) -> TriggerVolume {
        self.volume
    }

    /// The trigger as a world-space capsule along +z
    pub fn world_capsule(&self, light: &LightState) -> Capsule {
        Capsule {
            center: light.position + Vec3::Z * self.volume.center_z * self.parent_scale.z,
            radius: self.volume.radius * self.parent_scale.x,
            height: self.volume.height * self.parent_scale.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_at(z: f32) -> LightState {
        LightState {
            position: Vec3::new(0.0, 1.0, z),
            spot_angle: 30.0,
            wall_distance: 5.0,
            max_distance: 9.0,
            radius_scaling_factor: 0.8,
        }
    }

    #[test]
    fn test_radius_compensates_parent_scale() {
        let light = light_at(0.0);
        let mut fitter = VolumeFitter::new(10.0, Vec3::new(2.0, 1.0, 1.0));
        let volume = fitter.fit(&light);
        assert!((volume.radius * 2.0 - light.wall_footprint_radius(5.0)).abs() < 1e-6);
        assert!(
            (fitter.world_capsule(&light).radius - light.wall_footprint_radius(5.0)).abs() < 1e-6
        );
    }

    #[test]
    fn test_local_length_uses_parent_depth_scale() {
        let fitter = VolumeFitter::new(10.0, Vec3::new(1.0, 1.0, 2.0));
        assert_eq!(fitter.volume().height, 5.0);
        assert_eq!(fitter.volume().center_z, COLLIDER_START_CENTER_Z);
    }

    #[test]
    fn test_world_span_tracks_wall_not_light() {
        // Wherever the light sits, the capsule ends half a unit behind the wall
        let mut fitter = VolumeFitter::new(10.0, Vec3::ONE);
        for z in [-4.0, -1.0, 0.0, 2.5, 4.0] {
            let light = light_at(z);
            fitter.fit(&light);
            let capsule = fitter.world_capsule(&light);
            let far_end = capsule.center.z + capsule.height / 2.0;
            assert!((far_end - 5.5).abs() < 1e-5, "light z {}: far end {}", z, far_end);
        }
    }

    #[test]
    fn test_capsule_follows_light_xy() {
        let mut fitter = VolumeFitter::new(10.0, Vec3::ONE);
        let light = LightState {
            position: Vec3::new(3.0, -2.0, 1.0),
            ..light_at(1.0)
        };
        fitter.fit(&light);
        let capsule = fitter.world_capsule(&light);
        assert_eq!(capsule.center.x, 3.0);
        assert_eq!(capsule.center.y, -2.0);
    }
}
