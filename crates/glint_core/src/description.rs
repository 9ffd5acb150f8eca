//! Serializable scene descriptions.
//!
//! A `SceneDescription` is plain data: vectors are `[x, y, z]` arrays and
//! primitives name their surface instead of holding it. The renderer turns a
//! description into a runtime scene once the names are resolved.

use std::collections::HashMap;
use std::path::Path;

use glint_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, Light, Surface};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown surface: {0}")]
    UnknownSurface(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Camera placement and output resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraDescription {
    pub position: [f64; 3],
    pub look_at: [f64; 3],
    pub width: u32,
    pub height: u32,
    /// Scale applied to the camera's right/up vectors; wider is a wider view.
    #[serde(default = "default_fov_scale")]
    pub fov_scale: f64,
}

fn default_fov_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: [f64; 3],
    #[serde(default = "default_light_color")]
    pub color: Color,
}

fn default_light_color() -> Color {
    Color::WHITE
}

impl LightDescription {
    pub fn to_light(&self) -> Light {
        Light::new(Vec3::from_array(self.position), self.color)
    }
}

/// One entry of the scene's object list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectDescription {
    Plane {
        normal: [f64; 3],
        point: [f64; 3],
        surface: String,
    },
    Sphere {
        center: [f64; 3],
        radius: f64,
        surface: String,
    },
    Polygon {
        vertices: Vec<[f64; 3]>,
        normal: [f64; 3],
        surface: String,
    },
    /// Axis-aligned cube with its minimum corner at `offset`.
    Cube {
        size: f64,
        offset: [f64; 3],
        surface: String,
    },
}

impl ObjectDescription {
    /// Name of the surface this object refers to.
    pub fn surface(&self) -> &str {
        match self {
            ObjectDescription::Plane { surface, .. }
            | ObjectDescription::Sphere { surface, .. }
            | ObjectDescription::Polygon { surface, .. }
            | ObjectDescription::Cube { surface, .. } => surface,
        }
    }
}

/// A complete scene: camera, named surfaces, lights and objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    pub camera: CameraDescription,

    /// Surfaces defined by this file; these shadow presets of the same name.
    #[serde(default)]
    pub surfaces: HashMap<String, Surface>,

    #[serde(default)]
    pub lights: Vec<LightDescription>,

    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a description from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let desc = Self::from_json_str(&text)?;
        log::info!(
            "Loaded scene {:?}: {} objects, {} lights, {} custom surfaces",
            path,
            desc.objects.len(),
            desc.lights.len(),
            desc.surfaces.len()
        );
        Ok(desc)
    }

    /// Find a surface by name, checking this file's table before the presets.
    pub fn resolve_surface(&self, name: &str) -> SceneResult<Surface> {
        self.surfaces
            .get(name)
            .cloned()
            .or_else(|| Surface::preset(name))
            .ok_or_else(|| SceneError::UnknownSurface(name.to_string()))
    }

    /// Check every object's surface name resolves.
    pub fn validate(&self) -> SceneResult<()> {
        for object in &self.objects {
            self.resolve_surface(object.surface())?;
        }
        Ok(())
    }

    /// The stock scene: a checkerboard floor under a red unit cube, lit by a
    /// single white light and viewed from above at 600x600.
    pub fn demo() -> Self {
        Self {
            camera: CameraDescription {
                position: [6.0, 3.0, 6.0],
                look_at: [0.0, 0.0, 0.0],
                width: 600,
                height: 600,
                fov_scale: 1.5,
            },
            surfaces: HashMap::new(),
            lights: vec![LightDescription {
                position: [8.0, 4.0, 8.0],
                color: Color::WHITE,
            }],
            objects: vec![
                ObjectDescription::Plane {
                    normal: [0.0, 1.0, 0.0],
                    point: [0.0, -0.5, 0.0],
                    surface: "checkerboard".to_string(),
                },
                ObjectDescription::Cube {
                    size: 1.0,
                    offset: [0.0, 0.0, 0.0],
                    surface: "red".to_string(),
                },
            ],
        }
    }
}
