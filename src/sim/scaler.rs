//! Distance-based shadow auto-scaler
//!
//! Runs for every movable occluder (and the player) before the light does.
//! The further an object is from the wall, the bigger its shadow gets. While
//! the light is projecting an object's shadow it takes over the 2D collider
//! and this scaler leaves it alone.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::scene::{ObjectId, Scene, SceneObject};
use crate::lerp;
use crate::settings::Settings;

/// Who writes the 2D shadow collider's scale and x position this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ScalingAuthority {
    /// Distance-based auto-scaling
    #[default]
    AutoScaled,
    /// The light's perspective projection
    ProjectionControlled,
}

/// Auto-scaler attached to one object with a caster/cut shadow pair
#[derive(Debug, Clone)]
pub struct ShadowScaler {
    pub owner: ObjectId,
    /// 3D proxy that casts the rendered shadow
    pub caster: ObjectId,
    /// 2D shadow collider on the wall
    pub cut: ObjectId,
    pub is_player: bool,
    /// Caster position relative to the owner, as authored
    caster_offset: Vec3,
    shadow_max_size: f32,
    max_distance: f32,
    wall_distance: f32,
    /// Depth the cut collider is pinned to
    stuck_z: f32,
    authority: ScalingAuthority,
}

impl ShadowScaler {
    /// Attach a scaler and move the cut collider onto the shadow plane
    pub fn new(
        scene: &mut Scene,
        owner: ObjectId,
        caster: ObjectId,
        cut: ObjectId,
        is_player: bool,
        settings: &Settings,
    ) -> Self {
        let stuck_z = settings.shadow_plane_depth;
        let owner_pos = scene.get(owner).map(|o| o.position).unwrap_or_default();
        let caster_offset = scene
            .get(caster)
            .map(|c| c.position - owner_pos)
            .unwrap_or_default();
        scene.set_position(cut, Vec3::new(owner_pos.x, owner_pos.y, stuck_z));

        Self {
            owner,
            caster,
            cut,
            is_player,
            caster_offset,
            shadow_max_size: settings.shadow_max_size,
            max_distance: settings.max_distance,
            wall_distance: settings.wall_distance,
            stuck_z,
            authority: ScalingAuthority::AutoScaled,
        }
    }

    /// Uniform shadow scale for an object at its current depth
    pub fn scale_by_distance(&self, owner: &SceneObject) -> f32 {
        let t = (self.wall_distance - owner.position.z - owner.scale.z / 2.0) / self.max_distance;
        lerp(1.0, self.shadow_max_size, t)
    }

    /// Per-step update, before the light's frame
    pub fn fixed_update(&self, scene: &mut Scene) {
        let Some(owner) = scene.get(self.owner) else {
            return;
        };
        let owner_pos = owner.position;
        let s = self.scale_by_distance(owner);
        let Some(caster_depth_scale) = scene.get(self.caster).map(|c| c.scale.z) else {
            return;
        };
        let shadow_scale = Vec3::new(s, s, caster_depth_scale);

        // No transform propagation: carry the caster along with its owner
        if let Some(caster) = scene.get_mut(self.caster) {
            caster.position = owner_pos + self.caster_offset;
            caster.scale = if self.is_player {
                Vec3::splat(s)
            } else {
                shadow_scale
            };
        }

        // The cut hangs under its owner: depth is pinned and y always follows.
        // Scale and x belong to whoever holds authority.
        if let Some(cut) = scene.get_mut(self.cut) {
            cut.position.z = self.stuck_z;
            cut.position.y = owner_pos.y;
            if self.authority == ScalingAuthority::AutoScaled {
                cut.scale = shadow_scale;
                cut.position.x = owner_pos.x;
            }
        }
    }

    /// Hand the cut collider to the light
    pub fn disable_auto_scale(&mut self) {
        if self.authority != ScalingAuthority::ProjectionControlled {
            log::trace!("{}: projection takes scaling authority", self.owner);
        }
        self.authority = ScalingAuthority::ProjectionControlled;
    }

    /// Give the cut collider back to the auto-scaler
    pub fn enable_auto_scale(&mut self) {
        if self.authority != ScalingAuthority::AutoScaled {
            log::trace!("{}: scaling authority returned to auto-scaler", self.owner);
        }
        self.authority = ScalingAuthority::AutoScaled;
    }

    pub fn is_auto_scale_enabled(&self) -> bool {
        self.authority == ScalingAuthority::AutoScaled
    }

    pub fn authority(&self) -> ScalingAuthority {
        self.authority
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(z: f32) -> (Scene, ShadowScaler) {
        let mut scene = Scene::new();
        let owner = scene.add_box(
            "Crate",
            None,
            Vec3::new(1.0, 0.5, z),
            Vec3::ONE,
            Vec3::splat(0.5),
        );
        let caster = scene.add_box(
            "Shadow",
            Some(owner),
            Vec3::new(1.0, 0.5, z),
            Vec3::new(1.0, 1.0, 0.3),
            Vec3::splat(0.5),
        );
        let cut = scene.add_box("Shadow 2D", Some(owner), Vec3::ZERO, Vec3::ONE, Vec3::splat(0.5));
        let scaler = ShadowScaler::new(&mut scene, owner, caster, cut, false, &Settings::default());
        (scene, scaler)
    }

    #[test]
    fn test_cut_pinned_to_shadow_plane() {
        let (scene, scaler) = rig(2.0);
        let cut = scene.get(scaler.cut).unwrap();
        assert_eq!(cut.position, Vec3::new(1.0, 0.5, Settings::default().shadow_plane_depth));
    }

    #[test]
    fn test_scale_grows_with_distance() {
        let (scene, scaler) = rig(4.5);
        // Touching the wall: unscaled
        let at_wall = scaler.scale_by_distance(scene.get(scaler.owner).unwrap());
        assert!((at_wall - 1.0).abs() < 1e-6);

        let (scene, scaler) = rig(-4.5);
        // (5 + 4.5 - 0.5) / 9 = 1 -> full size
        let far = scaler.scale_by_distance(scene.get(scaler.owner).unwrap());
        assert!((far - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fixed_update_respects_authority() {
        let (mut scene, mut scaler) = rig(0.5);
        scaler.fixed_update(&mut scene);
        let expected = scaler.scale_by_distance(scene.get(scaler.owner).unwrap());
        let cut = scene.get(scaler.cut).unwrap().clone();
        assert_eq!(cut.scale, Vec3::new(expected, expected, 0.3));
        assert_eq!(scene.get(scaler.caster).unwrap().scale, Vec3::new(expected, expected, 0.3));

        // Projection owns the cut: scale and x stay where the light put them
        scaler.disable_auto_scale();
        assert!(!scaler.is_auto_scale_enabled());
        scene.get_mut(scaler.cut).unwrap().scale = Vec3::new(3.0, 3.0, 0.3);
        scene.get_mut(scaler.cut).unwrap().position.x = -2.0;
        scene.get_mut(scaler.owner).unwrap().position.y = 1.5;
        scaler.fixed_update(&mut scene);
        let cut = scene.get(scaler.cut).unwrap();
        assert_eq!(cut.scale, Vec3::new(3.0, 3.0, 0.3));
        assert_eq!(cut.position.x, -2.0);
        assert_eq!(cut.position.y, 1.5);

        scaler.enable_auto_scale();
        assert_eq!(scaler.authority(), ScalingAuthority::AutoScaled);
        scaler.fixed_update(&mut scene);
        assert_eq!(scene.get(scaler.cut).unwrap().position.x, 1.0);
    }

    #[test]
    fn test_caster_follows_owner() {
        let (mut scene, scaler) = rig(2.0);
        // Caster authored a quarter unit above its owner
        scene.set_position(scaler.caster, Vec3::new(1.0, 0.75, 2.0));
        let scaler = ShadowScaler::new(
            &mut scene,
            scaler.owner,
            scaler.caster,
            scaler.cut,
            false,
            &Settings::default(),
        );

        scene.set_position(scaler.owner, Vec3::new(-2.0, 1.0, 0.5));
        scaler.fixed_update(&mut scene);
        assert_eq!(scene.get(scaler.caster).unwrap().position, Vec3::new(-2.0, 1.25, 0.5));
    }

    #[test]
    fn test_player_caster_scales_in_depth() {
        let (mut scene, mut scaler) = rig(0.5);
        scaler.is_player = true;
        scaler.fixed_update(&mut scene);
        let s = scaler.scale_by_distance(scene.get(scaler.owner).unwrap());
        assert_eq!(scene.get(scaler.caster).unwrap().scale, Vec3::splat(s));
        // The cut keeps the caster's previous depth scale
        assert_eq!(scene.get(scaler.cut).unwrap().scale.z, 0.3);
    }
}
