//! Shadow world state
//!
//! Everything the light needs between frames: the scene, the light pose, the
//! resolved rig, the tracked set and the trigger volume. Host callbacks land
//! here; the per-frame pass lives in [`tick`](super::tick).

use std::collections::BTreeSet;

use glam::Vec3;

use super::bounds::Capsule;
use super::containment::{Footprint, is_wholly_contained};
use super::projection::LightState;
use super::rig::Rig;
use super::scene::{ObjectId, Scene};
use super::tracker::IntersectionTracker;
use super::volume::{TriggerVolume, VolumeFitter};
use crate::error::{Result, ShadowError};
use crate::settings::Settings;

/// A scene lit by one movable cone light
#[derive(Debug, Clone)]
pub struct ShadowWorld {
    pub settings: Settings,
    pub scene: Scene,
    pub(crate) light: LightState,
    pub(crate) rig: Rig,
    pub(crate) tracker: IntersectionTracker,
    pub(crate) fitter: VolumeFitter,
    /// Raw trigger contacts seen by the last overlap sync (exempt ones included)
    contacts: BTreeSet<ObjectId>,
    /// Frames simulated so far
    pub frame: u64,
}

impl ShadowWorld {
    /// Validate settings, resolve the rig and fit the trigger volume
    pub fn new(mut scene: Scene, light_position: Vec3, settings: Settings) -> Result<Self> {
        settings.validate()?;
        let rig = Rig::resolve(&mut scene, &settings)?;
        let tracker = IntersectionTracker::new(rig.exempt.clone());
        let light = LightState::new(light_position, &settings);
        let mut fitter = VolumeFitter::new(settings.collider_length, settings.light_parent_scale);
        fitter.fit(&light);

        log::info!(
            "Shadow world ready: {} objects, light at {}, wall at z={}",
            scene.len(),
            light_position,
            settings.wall_distance
        );

        Ok(Self {
            settings,
            scene,
            light,
            rig,
            tracker,
            fitter,
            contacts: BTreeSet::new(),
            frame: 0,
        })
    }

    pub fn light(&self) -> &LightState {
        &self.light
    }

    /// Move the light (gameplay input)
    pub fn set_light_position(&mut self, position: Vec3) {
        self.light.position = position;
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    pub fn tracker(&self) -> &IntersectionTracker {
        &self.tracker
    }

    /// Trigger volume as last fitted
    pub fn trigger_volume(&self) -> TriggerVolume {
        self.fitter.volume()
    }

    /// Trigger volume in world space for the current light pose
    pub fn trigger_capsule(&self) -> Capsule {
        self.fitter.world_capsule(&self.light)
    }

    /// Trigger enter callback
    pub fn on_overlap_start(&mut self, id: ObjectId) {
        if self.tracker.on_enter(id) {
            log::debug!("{} entered the light", id);
        }
    }

    /// Trigger exit callback
    pub fn on_overlap_end(&mut self, id: ObjectId) {
        if self.tracker.on_exit(id) {
            log::debug!("{} left the light", id);
        }
    }

    /// Stand-in for the host physics step: overlap every collider with the
    /// trigger capsule and deliver enter/exit callbacks for the changes
    pub fn sync_trigger_overlaps(&mut self) {
        let capsule = self.trigger_capsule();
        let overlapping: BTreeSet<ObjectId> = self
            .scene
            .iter()
            .filter(|o| o.collider.is_some_and(|c| c.enabled))
            .filter(|o| capsule.intersects_aabb(&o.bounds()))
            .map(|o| o.id)
            .collect();

        let ended: Vec<_> = self.contacts.difference(&overlapping).copied().collect();
        let started: Vec<_> = overlapping.difference(&self.contacts).copied().collect();
        for id in ended {
            self.on_overlap_end(id);
        }
        for id in started {
            self.on_overlap_start(id);
        }
        self.contacts = overlapping;
    }

    /// Footprint radius of the light at depth `depth`
    pub fn wall_footprint_radius(&self, depth: f32) -> f32 {
        self.light.wall_footprint_radius(depth)
    }

    /// Whether the light floods the given shadow collider entirely
    pub fn is_wholly_contained(&self, shadow: ObjectId) -> Result<bool> {
        let bounds = self.scene.require(shadow)?.bounds();
        Ok(is_wholly_contained(&Footprint::at_wall(&self.light), &bounds))
    }

    /// Cut collider enabled flag for an occluder
    pub fn cut_enabled(&self, occluder: ObjectId) -> Result<bool> {
        let cut = self
            .rig
            .role(occluder)
            .cut()
            .ok_or(ShadowError::MissingObject(occluder))?;
        self.scene
            .collider_enabled(cut)
            .ok_or(ShadowError::MissingObject(cut))
    }
}
