//! Scene settings
//!
//! Author-time configuration, fixed per scene. Loaded from a JSON file by the
//! native binary, defaults match the shipped diorama.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, ShadowError};

/// Shadow light settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Light ===
    /// Spot light apex angle in degrees (the cone half-angle is half of this)
    pub spot_angle: f32,
    /// Depth (z) of the back wall
    pub wall_distance: f32,
    /// Maximum distance of the light from the wall
    pub max_distance: f32,
    /// Footprint radius multiplier reached at `max_distance`
    pub radius_scaling_factor: f32,

    // === Trigger volume ===
    /// World length of the light's trigger capsule
    pub collider_length: f32,
    /// Scale of the transform the light hangs under
    pub light_parent_scale: Vec3,

    // === Auto-scaler ===
    /// 2D shadow scale reached at `max_distance` from the wall
    pub shadow_max_size: f32,
    /// Depth the 2D shadow colliders are pinned to
    pub shadow_plane_depth: f32,

    // === Scene names ===
    pub movable_parent_name: String,
    pub stationary_parent_name: String,
    pub stationary_shadow_parent_name: String,
    pub player_name: String,
    /// Objects that are never tracked (floor, wall)
    pub exempt_names: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spot_angle: SPOT_ANGLE,
            wall_distance: WALL_DISTANCE,
            max_distance: MAX_DISTANCE,
            radius_scaling_factor: RADIUS_SCALING_FACTOR,

            collider_length: COLLIDER_LENGTH,
            light_parent_scale: Vec3::ONE,

            shadow_max_size: SHADOW_MAX_SIZE,
            shadow_plane_depth: WALL_DISTANCE,

            movable_parent_name: MOVABLE_PARENT_NAME.to_string(),
            stationary_parent_name: STATIONARY_PARENT_NAME.to_string(),
            stationary_shadow_parent_name: STATIONARY_SHADOW_PARENT_NAME.to_string(),
            player_name: PLAYER_NAME.to_string(),
            exempt_names: vec![TERRAIN_NAME.to_string(), WALL_NAME.to_string()],
        }
    }
}

impl Settings {
    /// Reject values the projection math cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.spot_angle > 0.0 && self.spot_angle < 180.0) {
            return Err(ShadowError::InvalidSettings(format!(
                "spot_angle must be in (0, 180) degrees, got {}",
                self.spot_angle
            )));
        }
        if self.max_distance <= 0.0 {
            return Err(ShadowError::InvalidSettings(format!(
                "max_distance must be positive, got {}",
                self.max_distance
            )));
        }
        if self.collider_length <= 0.0 {
            return Err(ShadowError::InvalidSettings(format!(
                "collider_length must be positive, got {}",
                self.collider_length
            )));
        }
        if self.light_parent_scale.x <= 0.0 || self.light_parent_scale.z <= 0.0 {
            return Err(ShadowError::InvalidSettings(format!(
                "light_parent_scale must be positive on x and z, got {}",
                self.light_parent_scale
            )));
        }
        if self.radius_scaling_factor <= 0.0 {
            log::warn!(
                "radius_scaling_factor {} collapses the footprint at max distance",
                self.radius_scaling_factor
            );
        }
        Ok(())
    }

    /// Parse and validate settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
