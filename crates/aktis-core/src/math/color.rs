// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the `LinearRgba` color type and associated operations.

use crate::math::saturate;
use std::ops::{Add, Mul};

/// Represents a color in a **linear RGBA** color space using `f32` components.
///
/// Ray contributions arrive from the tracer as linear fractions of the final
/// pixel color, so the whole visualization pipeline stays in linear space and
/// leaves gamma correction to the host renderer.
///
/// `#[repr(C)]` ensures a consistent memory layout, which is important when
/// passing color data to graphics APIs.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white (`[1.0, 1.0, 1.0, 1.0]`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`[0.0, 0.0, 0.0, 1.0]`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque magenta (`[1.0, 0.0, 1.0, 1.0]`).
    pub const MAGENTA: Self = Self::rgb(1.0, 0.0, 1.0);

    /// Creates a new `LinearRgba` with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `LinearRgba` (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Returns a new color with the same RGB components but a different alpha.
    #[inline]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Returns a copy with every component clamped to `[0.0, 1.0]`.
    ///
    /// The tracer is only *supposed* to hand over channels in range; clamping
    /// here keeps quantized material lookups in bounds regardless.
    #[inline]
    pub fn saturate(&self) -> Self {
        Self {
            r: saturate(self.r),
            g: saturate(self.g),
            b: saturate(self.b),
            a: saturate(self.a),
        }
    }

    /// Linearly interpolates between two colors.
    /// The factor `t` is clamped to `[0.0, 1.0]`.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        let t = saturate(t);
        Self {
            r: start.r + (end.r - start.r) * t,
            g: start.g + (end.g - start.g) * t,
            b: start.b + (end.b - start.b) * t,
            a: start.a + (end.a - start.a) * t,
        }
    }
}

impl Default for LinearRgba {
    /// Returns opaque white by default.
    #[inline]
    fn default() -> Self {
        Self::WHITE
    }
}

impl Add for LinearRgba {
    type Output = Self;
    /// Adds two colors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            r: self.r + rhs.r,
            g: self.g + rhs.g,
            b: self.b + rhs.b,
            a: self.a + rhs.a,
        }
    }
}

impl Mul<f32> for LinearRgba {
    type Output = Self;
    /// Multiplies all components by a scalar.
    #[inline]
    fn mul(self, scalar: f32) -> Self::Output {
        Self {
            r: self.r * scalar,
            g: self.g * scalar,
            b: self.b * scalar,
            a: self.a * scalar,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    fn color_approx_eq(a: LinearRgba, b: LinearRgba) -> bool {
        approx_eq(a.r, b.r) && approx_eq(a.g, b.g) && approx_eq(a.b, b.b) && approx_eq(a.a, b.a)
    }

    #[test]
    fn with_alpha_replaces_only_alpha() {
        let c = LinearRgba::rgb(0.2, 0.4, 0.6).with_alpha(0.5);
        assert!(color_approx_eq(c, LinearRgba::new(0.2, 0.4, 0.6, 0.5)));
    }

    #[test]
    fn saturate_clamps_out_of_range_channels() {
        let c = LinearRgba::new(1.4, -0.2, 0.5, 2.0).saturate();
        assert!(color_approx_eq(c, LinearRgba::new(1.0, 0.0, 0.5, 1.0)));
    }

    #[test]
    fn lerp_midpoint() {
        let mid = LinearRgba::lerp(LinearRgba::BLACK, LinearRgba::WHITE, 0.5);
        assert!(color_approx_eq(mid, LinearRgba::rgb(0.5, 0.5, 0.5)));
    }

    #[test]
    fn lerp_clamps_factor() {
        let over = LinearRgba::lerp(LinearRgba::BLACK, LinearRgba::WHITE, 2.0);
        assert!(color_approx_eq(over, LinearRgba::WHITE));
    }

    #[test]
    fn arithmetic() {
        let c = LinearRgba::new(0.2, 0.3, 0.4, 0.5);
        let doubled = c * 2.0;
        assert!(color_approx_eq(doubled, LinearRgba::new(0.4, 0.6, 0.8, 1.0)));

        let sum = c + c;
        assert!(color_approx_eq(sum, doubled));
    }

    #[test]
    fn default_is_white() {
        assert_eq!(LinearRgba::default(), LinearRgba::WHITE);
    }
}
