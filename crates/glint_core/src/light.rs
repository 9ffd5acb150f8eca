use glint_math::Vec3;

use crate::Color;

/// A point light. Intensity does not fall off with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Color,
}

impl Light {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }

    /// A white light at `position`.
    pub fn white(position: Vec3) -> Self {
        Self::new(position, Color::WHITE)
    }
}
