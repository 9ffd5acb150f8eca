use glint_core::SceneError;
use glint_math::MathError;
use thiserror::Error;

/// Errors raised while building a scene or producing an image.
///
/// Tracing itself never fails: geometry that would make it produce NaN is
/// rejected when the scene is built.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Render cancelled")]
    Cancelled,
}

pub type RenderResult<T> = Result<T, RenderError>;
