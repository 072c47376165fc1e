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

//! Provides the mathematical primitives the visualization core is built on.
//!
//! This is deliberately small: a 3-D vector for ray geometry, a linear RGBA
//! color, a 2-D screen extent, and a handful of scalar helpers. Everything a
//! host engine needs beyond that (matrices, quaternions, projections) lives
//! on the host's side of the collaborator traits.

// --- Fundamental Constants ---

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

// --- Declare Sub-Modules ---

pub mod color;
pub mod dimension;
pub mod vector;

// --- Re-export Principal Types ---

pub use self::color::LinearRgba;
pub use self::dimension::Extent2D;
pub use self::vector::Vec3;

// --- Utility Functions ---

/// Compares two floats for approximate equality with an explicit epsilon.
///
/// # Examples
///
/// ```
/// use aktis_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Compares two floats for approximate equality with the default [`EPSILON`].
///
/// # Examples
///
/// ```
/// use aktis_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

/// Clamps a floating-point value to the `[0.0, 1.0]` range.
///
/// # Examples
///
/// ```
/// use aktis_core::math::saturate;
/// assert_eq!(saturate(1.5), 1.0);
/// assert_eq!(saturate(-0.5), 0.0);
/// ```
#[inline]
pub fn saturate(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

/// Linearly interpolates between `start` and `end` by the unclamped factor `t`.
///
/// # Examples
///
/// ```
/// use aktis_core::math::lerp;
/// assert_eq!(lerp(0.0, 10.0, 0.25), 2.5);
/// ```
#[inline]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturate_clamps_both_ends() {
        assert_eq!(saturate(-1.0), 0.0);
        assert_eq!(saturate(0.42), 0.42);
        assert_eq!(saturate(2.0), 1.0);
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert!(approx_eq(lerp(1.0, 3.0, 0.0), 1.0));
        assert!(approx_eq(lerp(1.0, 3.0, 1.0), 3.0));
        assert!(approx_eq(lerp(1.0, 3.0, 0.25), 1.5));
    }
}
