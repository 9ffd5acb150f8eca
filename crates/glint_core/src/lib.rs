//! Glint Core - scene building blocks shared by the renderer and its front ends.
//!
//! This crate provides:
//!
//! - **Shading inputs**: `Color`, `Surface`, `Light`
//! - **Scene files**: `SceneDescription`, a serde model of a scene that can be
//!   loaded from JSON
//!
//! # Example
//!
//! ```ignore
//! use glint_core::SceneDescription;
//!
//! let desc = SceneDescription::load("scenes/checkerboard.json")?;
//! println!("{} objects, {} lights", desc.objects.len(), desc.lights.len());
//! ```

pub mod color;
pub mod description;
pub mod light;
pub mod surface;

// Re-export commonly used types
pub use color::Color;
pub use description::{
    CameraDescription, LightDescription, ObjectDescription, SceneDescription, SceneError,
    SceneResult,
};
pub use light::Light;
pub use surface::Surface;
