//! Camera for primary ray generation.

use glint_math::{unit, Ray, Vec3};

use crate::{RenderError, RenderResult};

/// Reference vector crossed with the view direction to find "right".
const DOWN: Vec3 = Vec3::NEG_Y;

/// Used instead of `DOWN` when looking straight up or down.
const FALLBACK_REFERENCE: Vec3 = Vec3::NEG_Z;

/// Squared cross-product length below which forward counts as parallel to `DOWN`.
const PARALLEL_EPSILON: f64 = 1e-12;

/// A pinhole camera with an orthonormal forward/right/up basis.
///
/// Right and up are scaled by `fov_scale`; larger values widen the view.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    fov_scale: f64,
    width: u32,
    height: u32,
}

impl Camera {
    /// Create a camera at `position` looking at `look_at`, rendering
    /// `width` x `height` pixels.
    pub fn new(position: Vec3, look_at: Vec3, width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }

        let forward = unit(look_at - position).map_err(|_| {
            RenderError::DegenerateGeometry(format!(
                "camera position {} equals its look-at target",
                position
            ))
        })?;

        let reference = if forward.cross(DOWN).length_squared() < PARALLEL_EPSILON {
            log::debug!(
                "Camera forward {} is vertical, using {} as reference",
                forward,
                FALLBACK_REFERENCE
            );
            FALLBACK_REFERENCE
        } else {
            DOWN
        };

        let right = unit(forward.cross(reference))?;
        let up = unit(forward.cross(right))?;

        Ok(Self {
            position,
            forward,
            right,
            up,
            fov_scale: 1.0,
            width,
            height,
        })
    }

    /// Set the field-of-view scale applied to right/up.
    pub fn with_fov_scale(mut self, fov_scale: f64) -> RenderResult<Self> {
        if !(fov_scale > 0.0 && fov_scale.is_finite()) {
            return Err(RenderError::DegenerateGeometry(format!(
                "camera fov scale must be positive, got {}",
                fov_scale
            )));
        }
        self.fov_scale = fov_scale;
        Ok(self)
    }

    /// Change the output resolution, keeping the view.
    pub fn with_resolution(mut self, width: u32, height: u32) -> RenderResult<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidResolution { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right * self.fov_scale
    }

    pub fn up(&self) -> Vec3 {
        self.up * self.fov_scale
    }

    pub fn fov_scale(&self) -> f64 {
        self.fov_scale
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Unit direction of the ray through pixel (x, y).
    ///
    /// Pixel y grows downwards while world up grows upwards, hence the flip.
    pub fn direction_for_pixel(&self, x: u32, y: u32) -> Vec3 {
        let w = self.width as f64;
        let h = self.height as f64;
        let rx = (x as f64 - w / 2.0) / (2.0 * w);
        let ry = -(y as f64 - h / 2.0) / (2.0 * h);

        // |rx|, |ry| <= 1/4 and the basis is orthogonal, so this is never zero
        (self.forward + rx * self.right() + ry * self.up()).normalize()
    }

    /// The primary ray from the camera through pixel (x, y).
    pub fn primary_ray(&self, x: u32, y: u32) -> Ray {
        Ray::new(self.position, self.direction_for_pixel(x, y))
    }
}
