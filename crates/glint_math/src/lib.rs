//! Glint math types.
//!
//! Vectors are double precision; everything else in the workspace builds on
//! the `Vec3` alias exported here.

// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

/// 3D vector used for points, directions and normals.
pub type Vec3 = DVec3;

mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

use thiserror::Error;

/// Errors from vector operations that have no defined result.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize zero-length or non-finite vector {0:?}")]
    ZeroLength(Vec3),
}

/// Normalize `v` to unit length.
///
/// Fails instead of returning NaN components when `v` has zero length.
pub fn unit(v: Vec3) -> Result<Vec3, MathError> {
    v.try_normalize().ok_or(MathError::ZeroLength(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_unit_has_length_one() {
        let samples = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-2.0, 0.5, 7.0),
            Vec3::new(1e-6, 0.0, -1e-6),
            Vec3::new(1e6, 1e6, 1e6),
        ];

        for v in samples {
            let u = unit(v).unwrap();
            assert!((u.length() - 1.0).abs() < 1e-12, "{:?} -> {:?}", v, u);
            // Direction is preserved
            assert!(u.dot(v) > 0.0);
        }
    }

    #[test]
    fn test_unit_zero_vector_fails() {
        assert_eq!(unit(Vec3::ZERO), Err(MathError::ZeroLength(Vec3::ZERO)));
        assert!(unit(Vec3::new(f64::NAN, 0.0, 1.0)).is_err());
    }
}
