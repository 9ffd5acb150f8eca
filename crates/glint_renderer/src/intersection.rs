//! Ray hits and the shared hit-distance threshold.

use std::cmp::Ordering;

use glint_math::{Interval, Ray, Vec3};

use crate::SceneObject;

/// Hits closer than this are ignored so a ray leaving a surface does not
/// find the surface it started on.
pub const EPSILON: f64 = 1e-4;

/// Range of distances accepted by every primitive.
pub(crate) const HIT_RANGE: Interval = Interval::new(EPSILON, f64::INFINITY);

/// A successful ray/primitive test.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// The ray that produced the hit
    pub ray: Ray,
    /// Distance along the ray, always inside `HIT_RANGE`
    pub distance: f64,
    /// The primitive that was hit
    pub object: &'a SceneObject,
}

impl<'a> Intersection<'a> {
    /// World-space hit point.
    pub fn position(&self) -> Vec3 {
        self.ray.at(self.distance)
    }
}

/// Intersections compare by distance only; nearer is less.
impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}

impl PartialOrd for Intersection<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.distance.partial_cmp(&other.distance)
    }
}
