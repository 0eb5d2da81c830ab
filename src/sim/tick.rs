//! Per-frame update
//!
//! Frame order: auto-scalers, trigger volume fit, then the proxy pass over the
//! tracked set. Overlap callbacks must already have been delivered; the
//! tracked set is only read here.

use serde::Serialize;

use super::proxy::{ProxyOutcome, ShadowProxyController};
use super::state::ShadowWorld;
use super::volume::TriggerVolume;

/// What happened during one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Footprint radius at the wall
    pub footprint_radius: f32,
    #[serde(skip)]
    pub volume: TriggerVolume,
    /// One entry per tracked object, in tracking order
    pub outcomes: Vec<ProxyOutcome>,
}

/// Advance the shadow world by one frame
pub fn tick(world: &mut ShadowWorld) -> FrameReport {
    world.frame += 1;

    for scaler in world.rig.scalers.values() {
        scaler.fixed_update(&mut world.scene);
    }

    let volume = world.fitter.fit(&world.light);

    let controller = ShadowProxyController::new(&world.light);
    let mut outcomes = Vec::with_capacity(world.tracker.len());
    for id in world.tracker.iter() {
        outcomes.push(controller.update_object(id, &mut world.scene, &mut world.rig));
    }

    log::debug!(
        "Frame {}: footprint r={:.3}, {} tracked",
        world.frame,
        controller.footprint().radius,
        outcomes.len()
    );

    FrameReport {
        frame: world.frame,
        footprint_radius: controller.footprint().radius,
        volume,
        outcomes,
    }
}
