//! Models: construction-time helpers that expand into several primitives.

use std::sync::Arc;

use glint_core::Surface;
use glint_math::Vec3;

use crate::{Polygon, RenderError, RenderResult, SceneObject};

/// Something that can be flattened into scene primitives.
///
/// A model has no identity once added; the scene only keeps its objects.
pub trait Model {
    fn objects(&self) -> RenderResult<Vec<SceneObject>>;
}

/// An axis-aligned cube made of six square polygons with outward normals.
#[derive(Debug, Clone)]
pub struct Cube {
    size: f64,
    offset: Vec3,
    surface: Arc<Surface>,
}

impl Cube {
    /// Create a cube of edge length `size` whose minimum corner is `offset`.
    pub fn new(size: f64, offset: Vec3, surface: Arc<Surface>) -> RenderResult<Self> {
        if !(size > 0.0 && size.is_finite()) {
            return Err(RenderError::DegenerateGeometry(format!(
                "cube size must be positive, got {}",
                size
            )));
        }
        Ok(Self {
            size,
            offset,
            surface,
        })
    }
}

impl Model for Cube {
    fn objects(&self) -> RenderResult<Vec<SceneObject>> {
        let s = self.size;
        let corner = |x: f64, y: f64, z: f64| Vec3::new(x, y, z) + self.offset;

        let faces = [
            // Front (z = 0)
            (
                [
                    corner(0.0, 0.0, 0.0),
                    corner(0.0, s, 0.0),
                    corner(s, s, 0.0),
                    corner(s, 0.0, 0.0),
                ],
                Vec3::NEG_Z,
            ),
            // Back (z = s)
            (
                [corner(0.0, 0.0, s), corner(s, 0.0, s), corner(s, s, s), corner(0.0, s, s)],
                Vec3::Z,
            ),
            // Left (x = 0)
            (
                [
                    corner(0.0, 0.0, 0.0),
                    corner(0.0, 0.0, s),
                    corner(0.0, s, s),
                    corner(0.0, s, 0.0),
                ],
                Vec3::NEG_X,
            ),
            // Right (x = s)
            (
                [corner(s, 0.0, 0.0), corner(s, s, 0.0), corner(s, s, s), corner(s, 0.0, s)],
                Vec3::X,
            ),
            // Bottom (y = 0)
            (
                [
                    corner(0.0, 0.0, 0.0),
                    corner(s, 0.0, 0.0),
                    corner(s, 0.0, s),
                    corner(0.0, 0.0, s),
                ],
                Vec3::NEG_Y,
            ),
            // Top (y = s)
            (
                [corner(0.0, s, 0.0), corner(0.0, s, s), corner(s, s, s), corner(s, s, 0.0)],
                Vec3::Y,
            ),
        ];

        faces
            .into_iter()
            .map(|(vertices, normal)| {
                Polygon::new(vertices.to_vec(), normal, Arc::clone(&self.surface)).map(Into::into)
            })
            .collect()
    }
}
