//! The closed set of primitives a scene can hold.

use glint_core::Surface;
use glint_math::{Ray, Vec3};

use crate::{Intersection, Plane, Polygon, Sphere};

/// A primitive in the scene.
///
/// Dispatch is a `match` per query rather than a trait object, so adding a
/// kind means handling it everywhere.
#[derive(Debug, Clone)]
pub enum SceneObject {
    Plane(Plane),
    Sphere(Sphere),
    Polygon(Polygon),
}

impl SceneObject {
    /// Nearest hit of `ray` with this primitive beyond `EPSILON`.
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let distance = match self {
            SceneObject::Plane(plane) => plane.hit_distance(ray),
            SceneObject::Sphere(sphere) => sphere.hit_distance(ray),
            SceneObject::Polygon(polygon) => polygon.hit_distance(ray),
        }?;

        Some(Intersection {
            ray: *ray,
            distance,
            object: self,
        })
    }

    /// Unit surface normal at `p`.
    ///
    /// Planes and polygons return their fixed normal; spheres point outward.
    pub fn normal(&self, p: Vec3) -> Vec3 {
        match self {
            SceneObject::Plane(plane) => plane.normal(),
            SceneObject::Sphere(sphere) => sphere.normal(p),
            SceneObject::Polygon(polygon) => polygon.normal(),
        }
    }

    pub fn surface(&self) -> &Surface {
        match self {
            SceneObject::Plane(plane) => &plane.surface,
            SceneObject::Sphere(sphere) => &sphere.surface,
            SceneObject::Polygon(polygon) => &polygon.surface,
        }
    }
}

impl From<Plane> for SceneObject {
    fn from(plane: Plane) -> Self {
        SceneObject::Plane(plane)
    }
}

impl From<Sphere> for SceneObject {
    fn from(sphere: Sphere) -> Self {
        SceneObject::Sphere(sphere)
    }
}

impl From<Polygon> for SceneObject {
    fn from(polygon: Polygon) -> Self {
        SceneObject::Polygon(polygon)
    }
}
