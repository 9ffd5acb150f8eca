//! Planar convex polygon primitive.

use std::sync::Arc;

use glint_core::Surface;
use glint_math::{unit, Ray, Vec3};

use crate::plane::plane_distance;
use crate::{RenderError, RenderResult};

/// Signed edge areas within this of zero count as on the edge.
const EDGE_EPSILON: f64 = 1e-9;

/// A convex polygon given as an ordered vertex loop and an explicit normal.
///
/// The vertices may wind either way around the normal.
#[derive(Debug, Clone)]
pub struct Polygon {
    vertices: Vec<Vec3>,
    normal: Vec3,
    pub surface: Arc<Surface>,
}

impl Polygon {
    /// Create a new polygon from at least three vertices.
    pub fn new(vertices: Vec<Vec3>, normal: Vec3, surface: Arc<Surface>) -> RenderResult<Self> {
        if vertices.len() < 3 {
            return Err(RenderError::DegenerateGeometry(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        Ok(Self {
            vertices,
            normal: unit(normal)?,
            surface,
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance to the polygon's plane, if the hit lies inside the loop.
    pub fn hit_distance(&self, ray: &Ray) -> Option<f64> {
        let distance = plane_distance(self.normal, self.vertices[0], ray)?;
        self.contains(ray.at(distance)).then_some(distance)
    }

    /// Edge-side test for a point already on the polygon's plane.
    ///
    /// The point is inside when it lies on the same side of every edge.
    fn contains(&self, p: Vec3) -> bool {
        let mut has_positive = false;
        let mut has_negative = false;

        let n = self.vertices.len();
        for i in 0..n {
            let a = self.vertices[i];
            let b = self.vertices[(i + 1) % n];
            let side = (b - a).cross(p - a).dot(self.normal);

            if side > EDGE_EPSILON {
                has_positive = true;
            } else if side < -EDGE_EPSILON {
                has_negative = true;
            }

            if has_positive && has_negative {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square(reversed: bool) -> Polygon {
        let mut vertices = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        if reversed {
            vertices.reverse();
        }
        Polygon::new(vertices, Vec3::new(0.0, 0.0, -1.0), Arc::new(Surface::white())).unwrap()
    }

    #[test]
    fn test_polygon_hit_inside() {
        for reversed in [false, true] {
            let square = unit_square(reversed);
            let ray = Ray::new(Vec3::new(0.25, 0.75, -2.0), Vec3::Z);
            let d = square.hit_distance(&ray).unwrap();
            assert!((d - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_polygon_miss_outside() {
        for reversed in [false, true] {
            let square = unit_square(reversed);
            for (x, y) in [(1.5, 0.5), (-0.1, 0.5), (0.5, 1.2), (2.0, 2.0)] {
                let ray = Ray::new(Vec3::new(x, y, -2.0), Vec3::Z);
                assert!(square.hit_distance(&ray).is_none(), "({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_polygon_hit_from_behind() {
        let square = unit_square(false);
        let ray = Ray::new(Vec3::new(0.5, 0.5, 3.0), Vec3::NEG_Z);
        assert!(square.hit_distance(&ray).is_some());
    }

    #[test]
    fn test_polygon_triangle() {
        let triangle = Polygon::new(
            vec![Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)],
            Vec3::Z,
            Arc::new(Surface::white()),
        )
        .unwrap();

        // Above the diagonal is inside, below is outside
        let inside = Ray::new(Vec3::new(0.2, 0.8, 1.0), Vec3::NEG_Z);
        let outside = Ray::new(Vec3::new(0.8, 0.2, 1.0), Vec3::NEG_Z);
        assert!(triangle.hit_distance(&inside).is_some());
        assert!(triangle.hit_distance(&outside).is_none());
    }

    #[test]
    fn test_degenerate_polygons_rejected() {
        let two = vec![Vec3::ZERO, Vec3::X];
        assert!(Polygon::new(two, Vec3::Z, Arc::new(Surface::white())).is_err());

        let three = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(Polygon::new(three, Vec3::ZERO, Arc::new(Surface::white())).is_err());
    }
}
