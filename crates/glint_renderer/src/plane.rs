//! Infinite plane primitive.

use std::sync::Arc;

use glint_core::Surface;
use glint_math::{unit, Ray, Vec3};

use crate::intersection::HIT_RANGE;
use crate::RenderResult;

/// Rays whose direction is this close to perpendicular to the normal are
/// treated as parallel to the plane.
pub(crate) const PARALLEL_EPSILON: f64 = 1e-9;

/// An infinite plane through `point` with unit normal `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    normal: Vec3,
    point: Vec3,
    pub surface: Arc<Surface>,
}

impl Plane {
    /// Create a new plane. The normal is normalized; a zero normal is an error.
    pub fn new(normal: Vec3, point: Vec3, surface: Arc<Surface>) -> RenderResult<Self> {
        Ok(Self {
            normal: unit(normal)?,
            point,
            surface,
        })
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Distance along `ray` to the plane, if it is ahead of the ray.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f64> {
        plane_distance(self.normal, self.point, ray)
    }
}

/// Ray/plane distance shared with polygons.
pub(crate) fn plane_distance(normal: Vec3, point: Vec3, ray: &Ray) -> Option<f64> {
    let denom = normal.dot(ray.direction);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let distance = (normal.dot(point) - normal.dot(ray.origin)) / denom;
    HIT_RANGE.surrounds(distance).then_some(distance)
}
