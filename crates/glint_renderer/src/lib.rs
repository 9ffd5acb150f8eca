//! Glint Renderer - recursive ray tracing on the CPU.
//!
//! Direct illumination with hard shadows plus mirror reflection, bounded by
//! a maximum recursion depth. Intersection is a linear scan over the scene.

mod band;
mod camera;
mod error;
mod intersection;
mod model;
mod object;
mod plane;
mod polygon;
mod renderer;
mod scene;
mod sphere;
mod tracer;

pub use band::{generate_bands, render_band, BandResult, RowBand, DEFAULT_BAND_HEIGHT};
pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use intersection::{Intersection, EPSILON};
pub use model::{Cube, Model};
pub use object::SceneObject;
pub use plane::Plane;
pub use polygon::Polygon;
pub use renderer::{render, render_parallel, CancelToken, ImageBuffer, PixelSink};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tracer::{RenderConfig, TraceStats, Tracer, SURFACE_OFFSET};

/// Re-export shared types so callers need only this crate.
pub use glint_core::{Color, Light, Surface};
pub use glint_math::{Ray, Vec3};
