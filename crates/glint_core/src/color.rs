//! RGB color values.
//!
//! Channels are unclamped while light is accumulated and only clamped to
//! [0, 1] when converted to 8-bit output.

use std::ops::{Add, AddAssign, Mul};

use glint_math::Interval;
use serde::{Deserialize, Serialize};

/// An RGB color with real-valued channels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5);

    /// Returned for rays that leave the scene without hitting anything.
    pub const BACKGROUND: Color = Color::BLACK;

    /// Starting value when accumulating light at a surface point.
    pub const DEFAULT: Color = Color::BLACK;

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Convert to 8-bit channels, clamping each channel to [0, 1] first.
    pub fn to_rgb8(self) -> [u8; 3] {
        let channel = |c: f64| (Interval::UNIT.clamp(c) * 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b)]
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

/// Component-wise product, used to tint light by a surface color.
impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, k: f64) -> Color {
        Color::new(self.r * k, self.g * k, self.b * k)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, c: Color) -> Color {
        c * self
    }
}

impl From<[f64; 3]> for Color {
    fn from([r, g, b]: [f64; 3]) -> Self {
        Color::new(r, g, b)
    }
}

impl From<Color> for [f64; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}
