//! Shadow simulation module
//!
//! All per-frame shadow logic lives here. This module must stay pure and
//! frame-stepped:
//! - No engine handles, only object ids and the scene store
//! - Everything re-derived from current positions each frame
//! - Stable iteration order (tracking order, scaler order by id)

pub mod bounds;
pub mod containment;
pub mod projection;
pub mod proxy;
pub mod rig;
pub mod scaler;
pub mod scene;
pub mod state;
pub mod tick;
pub mod tracker;
pub mod volume;

pub use bounds::{Aabb, Capsule};
pub use containment::{Footprint, casts_fresh_shadow, is_wholly_contained};
pub use projection::{LightState, ProjectedBounds, project_extent};
pub use proxy::{ProxyAction, ProxyOutcome, ShadowProxyController};
pub use rig::{Rig, ShadowRole};
pub use scaler::{ScalingAuthority, ShadowScaler};
pub use scene::{Collider, ObjectId, Scene, SceneObject};
pub use state::ShadowWorld;
pub use tick::{FrameReport, tick};
pub use tracker::IntersectionTracker;
pub use volume::{TriggerVolume, VolumeFitter};
