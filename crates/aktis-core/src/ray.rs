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

//! Defines the per-ray data handed over by the tracer.

use crate::error::CoreError;
use crate::math::{LinearRgba, Vec3};

/// The semantic role a ray plays inside its tree.
///
/// Tracers that speak a raw wire format should decode their kind codes with
/// [`RayKind::from_code`]; codes this crate does not recognize survive as
/// [`RayKind::Unknown`] so the draw loop can degrade to an error material
/// instead of halting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RayKind {
    /// A ray that left the scene without hitting anything.
    NoHit,
    /// A reflection bounce off a surface.
    Reflect,
    /// A refraction bounce through a surface.
    Refract,
    /// A ray that hit a surface and shades it directly.
    Normal,
    /// A shadow feeler that was blocked before reaching a light.
    Shadow,
    /// A shadow feeler that reached a light.
    Light,
    /// A kind code this crate does not recognize. Drawn with the error
    /// material; never a reason to stop the frame loop.
    Unknown(u8),
}

impl RayKind {
    /// Decodes a raw producer kind code.
    ///
    /// ## Returns
    /// The matching [`RayKind`], or [`CoreError::UnknownRayKind`] for codes
    /// outside the recognized range. Callers that prefer to keep drawing can
    /// fall back to `RayKind::Unknown(code)`.
    pub fn from_code(code: u8) -> Result<Self, CoreError> {
        match code {
            0 => Ok(Self::NoHit),
            1 => Ok(Self::Reflect),
            2 => Ok(Self::Refract),
            3 => Ok(Self::Normal),
            4 => Ok(Self::Shadow),
            5 => Ok(Self::Light),
            other => Err(CoreError::UnknownRayKind(other)),
        }
    }

    /// Returns `true` for rays that left the scene without hitting anything.
    #[inline]
    pub fn is_no_hit(&self) -> bool {
        matches!(self, Self::NoHit)
    }
}

/// A single ray as produced by the tracer, immutable for the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    /// The semantic role of this ray.
    pub kind: RayKind,
    /// The fraction of the final pixel color this ray contributes, in `[0, 1]`.
    pub contribution: f32,
    /// The color this ray contributes to the pixel, channels in `[0, 1]`.
    pub color: LinearRgba,
    /// The world-space start point of the ray.
    pub origin: Vec3,
    /// The world-space direction of the ray (unit length by convention).
    pub direction: Vec3,
    /// The geometric length of the ray, or `None` for rays that never hit
    /// anything and are drawn at the configured infinite draw length.
    pub length: Option<f32>,
}

impl Ray {
    /// Creates a ray with an explicit geometric length.
    pub fn new(
        kind: RayKind,
        contribution: f32,
        color: LinearRgba,
        origin: Vec3,
        direction: Vec3,
        length: f32,
    ) -> Self {
        Self {
            kind,
            contribution,
            color,
            origin,
            direction,
            length: Some(length),
        }
    }

    /// Creates a ray without an intersection, drawn at the infinite length.
    pub fn infinite(
        kind: RayKind,
        contribution: f32,
        color: LinearRgba,
        origin: Vec3,
        direction: Vec3,
    ) -> Self {
        Self {
            kind,
            contribution,
            color,
            origin,
            direction,
            length: None,
        }
    }

    /// The length this ray is drawn at, substituting `infinite_length` for
    /// rays that never intersected anything.
    #[inline]
    pub fn draw_length(&self, infinite_length: f32) -> f32 {
        self.length.unwrap_or(infinite_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_code_round_trips_known_kinds() {
        assert_eq!(RayKind::from_code(0).unwrap(), RayKind::NoHit);
        assert_eq!(RayKind::from_code(1).unwrap(), RayKind::Reflect);
        assert_eq!(RayKind::from_code(2).unwrap(), RayKind::Refract);
        assert_eq!(RayKind::from_code(3).unwrap(), RayKind::Normal);
        assert_eq!(RayKind::from_code(4).unwrap(), RayKind::Shadow);
        assert_eq!(RayKind::from_code(5).unwrap(), RayKind::Light);
    }

    #[test]
    fn from_code_rejects_unrecognized_codes() {
        match RayKind::from_code(17) {
            Err(CoreError::UnknownRayKind(17)) => {}
            other => panic!("expected UnknownRayKind(17), got {other:?}"),
        }
    }

    #[test]
    fn draw_length_substitutes_the_infinite_length() {
        let hit = Ray::new(
            RayKind::Normal,
            1.0,
            LinearRgba::WHITE,
            Vec3::ZERO,
            Vec3::Z,
            4.0,
        );
        assert_eq!(hit.draw_length(10.0), 4.0);

        let miss = Ray::infinite(RayKind::NoHit, 0.0, LinearRgba::BLACK, Vec3::ZERO, Vec3::Z);
        assert_eq!(miss.draw_length(10.0), 10.0);
    }
}
