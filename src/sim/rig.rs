//! One-time resolution of the authored scene into typed shadow roles
//!
//! The diorama is authored with naming conventions: movable occluders live
//! under one container with their caster and cut as child 0 and child 1,
//! stationary occluders live under another container and find their cut
//! collider by name in a sibling container. All of that is walked once here
//! and every frame afterwards works from the cached ids.

use std::collections::{BTreeMap, HashMap};

use super::scaler::ShadowScaler;
use super::scene::{ObjectId, Scene, SceneObject};
use crate::error::{Result, ShadowError};
use crate::settings::Settings;

/// What the light does with an object it overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowRole {
    /// Never mutated (reserved for future light/player interaction)
    Player,
    /// Movable occluder with its own caster/cut pair and auto-scaler
    Movable { caster: ObjectId, cut: ObjectId },
    /// Fixed scenery with a cut collider in the shadow collider container
    Stationary { cut: ObjectId },
    /// Parentless or unrecognised objects (including shadow proxies)
    Inert,
}

impl ShadowRole {
    /// Cut collider this role drives, if any
    pub fn cut(&self) -> Option<ObjectId> {
        match *self {
            ShadowRole::Movable { cut, .. } | ShadowRole::Stationary { cut } => Some(cut),
            ShadowRole::Player | ShadowRole::Inert => None,
        }
    }
}

/// Resolved roles for every object plus the auto-scalers they own
#[derive(Debug, Clone, Default)]
pub struct Rig {
    roles: HashMap<ObjectId, ShadowRole>,
    /// Auto-scalers keyed by owning object (ordered for deterministic updates)
    pub scalers: BTreeMap<ObjectId, ShadowScaler>,
    /// Floor and wall; never tracked
    pub exempt: Vec<ObjectId>,
    pub player: Option<ObjectId>,
}

impl Rig {
    /// Walk the scene and resolve every shadow reference, failing on the first
    /// broken one
    pub fn resolve(scene: &mut Scene, settings: &Settings) -> Result<Self> {
        let mut rig = Rig::default();
        let mut pending_scalers = Vec::new();

        for obj in scene.iter() {
            if settings.exempt_names.iter().any(|n| *n == obj.name) {
                rig.exempt.push(obj.id);
                continue;
            }

            let role = if obj.name == settings.player_name {
                rig.player = Some(obj.id);
                if let Some((caster, cut)) = shadow_pair(obj) {
                    pending_scalers.push((obj.id, caster, cut, true));
                }
                ShadowRole::Player
            } else {
                match scene.parent_name(obj.id) {
                    None => ShadowRole::Inert,
                    Some(parent) if parent == settings.movable_parent_name => {
                        let (caster, cut) = resolve_movable(scene, obj)?;
                        pending_scalers.push((obj.id, caster, cut, false));
                        ShadowRole::Movable { caster, cut }
                    }
                    Some(parent) if parent == settings.stationary_parent_name => ShadowRole::Stationary {
                        cut: resolve_stationary(scene, obj, settings)?,
                    },
                    Some(_) => ShadowRole::Inert,
                }
            };
            rig.roles.insert(obj.id, role);
        }

        for name in &settings.exempt_names {
            if scene.find_by_name(name).is_none() {
                log::warn!("Exempt object '{}' not found in scene", name);
            }
        }

        for (owner, caster, cut, is_player) in pending_scalers {
            let scaler = ShadowScaler::new(scene, owner, caster, cut, is_player, settings);
            rig.scalers.insert(owner, scaler);
        }

        log::info!(
            "Resolved shadow rig: {} movable, {} stationary, {} exempt",
            rig.roles
                .values()
                .filter(|r| matches!(r, ShadowRole::Movable { .. }))
                .count(),
            rig.roles
                .values()
                .filter(|r| matches!(r, ShadowRole::Stationary { .. }))
                .count(),
            rig.exempt.len()
        );

        Ok(rig)
    }

    pub fn role(&self, id: ObjectId) -> ShadowRole {
        self.roles.get(&id).copied().unwrap_or(ShadowRole::Inert)
    }

    pub fn scaler(&self, id: ObjectId) -> Option<&ShadowScaler> {
        self.scalers.get(&id)
    }

    pub fn scaler_mut(&mut self, id: ObjectId) -> Option<&mut ShadowScaler> {
        self.scalers.get_mut(&id)
    }
}

/// Caster and cut children in their fixed slots
fn shadow_pair(obj: &SceneObject) -> Option<(ObjectId, ObjectId)> {
    match obj.children.as_slice() {
        [caster, cut, ..] => Some((*caster, *cut)),
        _ => None,
    }
}

fn resolve_movable(scene: &Scene, obj: &SceneObject) -> Result<(ObjectId, ObjectId)> {
    let caster = *obj
        .children
        .first()
        .ok_or_else(|| ShadowError::MissingShadowProxy {
            occluder: obj.name.clone(),
            slot: "3D caster",
        })?;
    let cut = *obj
        .children
        .get(1)
        .ok_or_else(|| ShadowError::MissingShadowProxy {
            occluder: obj.name.clone(),
            slot: "2D cut",
        })?;
    require_collider(scene, cut)?;
    Ok((caster, cut))
}

fn resolve_stationary(scene: &Scene, obj: &SceneObject, settings: &Settings) -> Result<ObjectId> {
    let container_name = &settings.stationary_shadow_parent_name;
    let container = obj
        .parent
        .and_then(|p| scene.get(p))
        .and_then(|p| p.parent)
        .and_then(|grandparent| scene.find_child(grandparent, container_name))
        .ok_or_else(|| ShadowError::MissingShadowContainer {
            occluder: obj.name.clone(),
            container: container_name.clone(),
        })?;
    let cut = scene
        .find_child(container, &obj.name)
        .ok_or_else(|| ShadowError::MissingShadowCollider {
            occluder: obj.name.clone(),
            container: container_name.clone(),
        })?;
    require_collider(scene, cut)?;
    Ok(cut)
}

fn require_collider(scene: &Scene, id: ObjectId) -> Result<()> {
    let obj = scene.require(id)?;
    match obj.collider {
        Some(_) => Ok(()),
        None => Err(ShadowError::MissingCollider(obj.name.clone())),
    }
}
