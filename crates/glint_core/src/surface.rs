//! Surface descriptions.
//!
//! A surface answers "what does this material look like at point P". Colors
//! and reflectiveness may vary with position (the checkerboard); the
//! shininess exponent does not.

use glint_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::Color;

/// How light interacts with a primitive, as a function of hit position.
///
/// Surfaces are shared read-only between every primitive that uses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Surface {
    /// The same response everywhere.
    Solid {
        diffuse: Color,
        specular: Color,
        reflectiveness: f64,
        roughness: f64,
    },
    /// Unit cells on the X-Z plane alternating between two responses.
    ///
    /// A cell is odd when `floor(x) + floor(z)` is odd.
    Checkerboard {
        odd: Color,
        even: Color,
        specular: Color,
        odd_reflectiveness: f64,
        even_reflectiveness: f64,
        roughness: f64,
    },
}

impl Surface {
    /// White and black tiles; the black tiles are the more mirror-like.
    pub fn checkerboard() -> Self {
        Surface::Checkerboard {
            odd: Color::WHITE,
            even: Color::BLACK,
            specular: Color::WHITE,
            odd_reflectiveness: 0.1,
            even_reflectiveness: 0.7,
            roughness: 150.0,
        }
    }

    pub fn shiny() -> Self {
        Surface::Solid {
            diffuse: Color::WHITE,
            specular: Color::GRAY,
            reflectiveness: 0.6,
            roughness: 50.0,
        }
    }

    /// A non-reflective surface of the given color.
    pub fn matte(diffuse: Color) -> Self {
        Surface::Solid {
            diffuse,
            specular: Color::GRAY,
            reflectiveness: 0.0,
            roughness: 50.0,
        }
    }

    pub fn red() -> Self {
        Self::matte(Color::new(1.0, 0.0, 0.0))
    }

    pub fn green() -> Self {
        Self::matte(Color::new(0.0, 1.0, 0.0))
    }

    pub fn white() -> Self {
        Self::matte(Color::WHITE)
    }

    /// Look up one of the built-in surfaces by name.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "checkerboard" => Some(Self::checkerboard()),
            "shiny" => Some(Self::shiny()),
            "red" => Some(Self::red()),
            "green" => Some(Self::green()),
            "white" => Some(Self::white()),
            _ => None,
        }
    }

    pub fn diffuse(&self, p: Vec3) -> Color {
        match self {
            Surface::Solid { diffuse, .. } => *diffuse,
            Surface::Checkerboard { odd, even, .. } => {
                if is_odd_cell(p) {
                    *odd
                } else {
                    *even
                }
            }
        }
    }

    pub fn specular(&self, _p: Vec3) -> Color {
        match self {
            Surface::Solid { specular, .. } | Surface::Checkerboard { specular, .. } => *specular,
        }
    }

    /// Fraction of the reflected ray's color added at `p`, in [0, 1].
    pub fn reflectiveness(&self, p: Vec3) -> f64 {
        match self {
            Surface::Solid { reflectiveness, .. } => *reflectiveness,
            Surface::Checkerboard {
                odd_reflectiveness,
                even_reflectiveness,
                ..
            } => {
                if is_odd_cell(p) {
                    *odd_reflectiveness
                } else {
                    *even_reflectiveness
                }
            }
        }
    }

    /// Specular exponent. Larger values give tighter highlights.
    pub fn roughness(&self) -> f64 {
        match self {
            Surface::Solid { roughness, .. } | Surface::Checkerboard { roughness, .. } => {
                *roughness
            }
        }
    }
}

fn is_odd_cell(p: Vec3) -> bool {
    let cell = (p.x.floor() + p.z.floor()) as i64;
    cell.rem_euclid(2) != 0
}
