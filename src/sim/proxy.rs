//! Shadow proxy controller
//!
//! Decides, per tracked object and per frame, what the object's 2D cut
//! collider looks like. Everything is re-derived from current positions every
//! frame; the only state carried between frames is the scaling authority.

use glam::Vec3;
use serde::Serialize;

use super::bounds::Aabb;
use super::containment::{Footprint, casts_fresh_shadow, is_wholly_contained};
use super::projection::LightState;
use super::rig::{Rig, ShadowRole};
use super::scene::{ObjectId, Scene};

/// Which branch an object went through this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProxyAction {
    /// Player or unrecognised object, left untouched
    Exempt,
    /// Behind the light: only the cut's enabled flag is refreshed
    Behind,
    /// In front and fully wrapped by the cone: perspective-scaled shadow
    Projected,
    /// In front but not wrapped: shadow handed back to its defaults
    Released,
}

/// Result of updating one tracked object
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProxyOutcome {
    pub object: ObjectId,
    pub action: ProxyAction,
    /// Cut collider enabled flag after the update (None when untouched)
    pub cut_enabled: Option<bool>,
}

/// Per-frame shadow proxy logic for one light pose
pub struct ShadowProxyController<'a> {
    light: &'a LightState,
    footprint: Footprint,
}

impl<'a> ShadowProxyController<'a> {
    pub fn new(light: &'a LightState) -> Self {
        Self {
            light,
            footprint: Footprint::at_wall(light),
        }
    }

    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Route one tracked object to the behind / in-front handling
    pub fn update_object(&self, id: ObjectId, scene: &mut Scene, rig: &mut Rig) -> ProxyOutcome {
        let role = rig.role(id);
        let Some(position) = scene.get(id).map(|o| o.position) else {
            return exempt(id);
        };

        let action = match role {
            ShadowRole::Player | ShadowRole::Inert => return exempt(id),
            _ if position.z <= self.light.position.z => self.behind_light(id, role, scene, rig),
            ShadowRole::Movable { caster, cut } => self.movable_in_front(id, caster, cut, scene, rig),
            ShadowRole::Stationary { cut } => self.stationary_in_front(id, cut, scene),
        };

        let outcome = ProxyOutcome {
            object: id,
            action,
            cut_enabled: role.cut().and_then(|cut| scene.collider_enabled(cut)),
        };
        log::trace!("{} -> {:?} (cut enabled: {:?})", id, action, outcome.cut_enabled);
        outcome
    }

    /// Whether the light already floods the whole shadow collider
    pub fn is_wholly_contained(&self, shadow: &Aabb) -> bool {
        is_wholly_contained(&self.footprint, shadow)
    }

    fn behind_light(&self, id: ObjectId, role: ShadowRole, scene: &mut Scene, rig: &mut Rig) -> ProxyAction {
        if let ShadowRole::Movable { .. } = role {
            if let Some(scaler) = rig.scaler_mut(id) {
                scaler.enable_auto_scale();
            }
        }
        if let Some(cut) = role.cut() {
            self.refresh_cut_enabled(cut, scene);
        }
        ProxyAction::Behind
    }

    fn movable_in_front(
        &self,
        id: ObjectId,
        caster: ObjectId,
        cut: ObjectId,
        scene: &mut Scene,
        rig: &mut Rig,
    ) -> ProxyAction {
        // Re-enable first so a previously swallowed shadow is re-evaluated
        scene.set_collider_enabled(cut, true);

        let (Some(obj), Some(caster_obj)) = (scene.get(id), scene.get(caster)) else {
            return ProxyAction::Released;
        };
        let obj_bounds = obj.bounds();
        let obj_x = obj.position.x;
        let caster_scale = caster_obj.scale;
        let caster_bounds = caster_obj.bounds();
        let caster_x = caster_obj.position.x;
        // The caster is what gets projected, so it must be in front as well
        let caster_in_front = caster_bounds.center.z > self.light.position.z;

        if caster_in_front && casts_fresh_shadow(self.light, &obj_bounds) {
            let dist_to_obj = obj_bounds.min().z - self.light.position.z;
            if let Some(scaler) = rig.scaler_mut(id) {
                scaler.disable_auto_scale();
            }

            let factors = self.light.scale_factors(&caster_bounds);
            // Depth scale is held so the cut never grows along the light axis
            let shadow_scale = Vec3::new(
                caster_scale.x * factors.x,
                caster_scale.y * factors.y,
                caster_scale.z,
            );
            let shadow_x = self.light.position.x + self.light.hit_offset_x(obj_x, dist_to_obj);

            if let Some(cut_obj) = scene.get_mut(cut) {
                cut_obj.scale = shadow_scale;
                cut_obj.position.x = shadow_x;
            }
            ProxyAction::Projected
        } else {
            // Scale is reset by the auto-scaler on its next update
            if let Some(scaler) = rig.scaler_mut(id) {
                scaler.enable_auto_scale();
            }
            if let Some(cut_obj) = scene.get_mut(cut) {
                cut_obj.position.x = caster_x;
            }
            self.refresh_cut_enabled(cut, scene);
            ProxyAction::Released
        }
    }

    fn stationary_in_front(&self, id: ObjectId, cut: ObjectId, scene: &mut Scene) -> ProxyAction {
        scene.set_collider_enabled(cut, true);

        let (Some(obj), Some(cut_obj)) = (scene.get(id), scene.get(cut)) else {
            return ProxyAction::Released;
        };
        let obj_bounds = obj.bounds();
        let obj_position = obj.position;
        let obj_scale = obj.scale;
        let cut_depth_scale = cut_obj.scale.z;

        if casts_fresh_shadow(self.light, &obj_bounds) {
            let dist_to_obj = obj_bounds.min().z - self.light.position.z;
            let factors = self.light.scale_factors(&obj_bounds);
            let shadow_scale = Vec3::new(
                obj_scale.x * factors.x,
                obj_scale.y * factors.y,
                cut_depth_scale,
            );
            let shadow_x = self.light.position.x + self.light.hit_offset_x(obj_position.x, dist_to_obj);

            if let Some(cut_obj) = scene.get_mut(cut) {
                cut_obj.scale = shadow_scale;
                // Raise by the growth in half-height so the shadow stays grounded
                let grown = cut_obj.bounds().extents.y - obj_bounds.extents.y;
                cut_obj.position.x = shadow_x;
                cut_obj.position.y = obj_position.y + grown;
            }
            ProxyAction::Projected
        } else {
            if let Some(cut_obj) = scene.get_mut(cut) {
                cut_obj.scale = obj_scale;
                cut_obj.position.x = obj_position.x;
                cut_obj.position.y = obj_position.y;
            }
            self.refresh_cut_enabled(cut, scene);
            ProxyAction::Released
        }
    }

    /// A shadow flooded by the light has nothing to stand on
    fn refresh_cut_enabled(&self, cut: ObjectId, scene: &mut Scene) {
        if let Some(bounds) = scene.get(cut).map(|c| c.bounds()) {
            scene.set_collider_enabled(cut, !self.is_wholly_contained(&bounds));
        }
    }
}

fn exempt(id: ObjectId) -> ProxyOutcome {
    ProxyOutcome {
        object: id,
        action: ProxyAction::Exempt,
        cut_enabled: None,
    }
}
