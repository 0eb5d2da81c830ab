//! Shadow Cut - cut-out shadows cast by a movable cone light
//!
//! Core modules:
//! - `sim`: Per-frame projection, containment and shadow proxy simulation
//! - `settings`: Author-time scene configuration
//! - `gizmos`: Debug overlay geometry (footprint circle and rays)
//! - `error`: Configuration and scene resolution errors

pub mod error;
pub mod gizmos;
pub mod settings;
pub mod sim;

pub use error::{Result, ShadowError};
pub use settings::Settings;
pub use sim::{ShadowWorld, tick};

/// Scene configuration defaults
pub mod consts {
    /// Depth (z) of the back wall the shadows land on
    pub const WALL_DISTANCE: f32 = 5.0;
    /// Largest distance the light can be pulled away from the wall
    pub const MAX_DISTANCE: f32 = 9.0;
    /// Radius de-rating applied at maximum distance (spot lights under-fill the
    /// geometric cone the further they get from the wall)
    pub const RADIUS_SCALING_FACTOR: f32 = 0.8;
    /// Length of the light's trigger capsule (full stage depth)
    pub const COLLIDER_LENGTH: f32 = 10.0;
    /// Initial local z of the trigger capsule centre
    pub const COLLIDER_START_CENTER_Z: f32 = -5.0;
    /// Constant local z bias applied after re-centering the trigger capsule
    pub const COLLIDER_CENTER_BIAS: f32 = 0.5;
    /// Default spot light apex angle (degrees)
    pub const SPOT_ANGLE: f32 = 30.0;

    /// Auto-scaler: largest 2D shadow scale (object at max distance)
    pub const SHADOW_MAX_SIZE: f32 = 2.0;

    /// Container and object names used when resolving the scene rig
    pub const MOVABLE_PARENT_NAME: &str = "Shadow Enhanced Objects";
    pub const STATIONARY_PARENT_NAME: &str = "Diorama";
    pub const STATIONARY_SHADOW_PARENT_NAME: &str = "Shadow Colliders";
    pub const PLAYER_NAME: &str = "Player";
    pub const TERRAIN_NAME: &str = "Grassy Terrain";
    pub const WALL_NAME: &str = "Wall";
}

/// Linear interpolation with `t` clamped to [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * clamp01(t)
}

/// Clamp to [0, 1]
#[inline]
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}
