//! Sphere primitive for ray tracing.

use std::sync::Arc;

use glint_core::Surface;
use glint_math::{Ray, Vec3};

use crate::intersection::HIT_RANGE;
use crate::{RenderError, RenderResult};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    pub surface: Arc<Surface>,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f64, surface: Arc<Surface>) -> RenderResult<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(RenderError::DegenerateGeometry(format!(
                "sphere radius must be positive, got {}",
                radius
            )));
        }
        Ok(Self {
            center,
            radius,
            surface,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Distance to the nearest root of |O + tD - C|² = r² ahead of the ray.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f64> {
        let oc = self.center - ray.origin;
        let a = ray.direction.length_squared();
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !HIT_RANGE.surrounds(root) {
            root = (h + sqrtd) / a;
            if !HIT_RANGE.surrounds(root) {
                return None;
            }
        }
        Some(root)
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal(&self, p: Vec3) -> Vec3 {
        (p - self.center) / self.radius
    }
}
