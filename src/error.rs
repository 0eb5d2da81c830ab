//! Error types for Shadow Cut
//!
//! Only scene resolution and settings loading can fail. Once a
//! [`ShadowWorld`](crate::ShadowWorld) exists every frame is infallible.

use thiserror::Error;

use crate::sim::ObjectId;

#[derive(Error, Debug)]
pub enum ShadowError {
    #[error("Unknown scene object: {0}")]
    MissingObject(ObjectId),

    #[error("Movable occluder '{occluder}' has no {slot} shadow child")]
    MissingShadowProxy { occluder: String, slot: &'static str },

    #[error("Stationary occluder '{occluder}' has no sibling container named '{container}'")]
    MissingShadowContainer { occluder: String, container: String },

    #[error("No shadow collider named '{occluder}' under '{container}'")]
    MissingShadowCollider { occluder: String, container: String },

    #[error("Shadow proxy '{0}' has no collider")]
    MissingCollider(String),

    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Settings parse error: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ShadowError>;
