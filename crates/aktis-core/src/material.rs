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

//! Defines the visual material attached to a drawn ray.

use crate::math::LinearRgba;

/// The immutable visual description of how one ray is shaded.
///
/// Entries are created once by the material resolver, shared as
/// `Arc<RayMaterial>` across every frame and every node that quantizes to the
/// same key, and never destroyed for the lifetime of the process. Hosts
/// translate this into whatever their renderer calls a material.
#[derive(Debug, Clone, PartialEq)]
pub struct RayMaterial {
    /// The base color of the material.
    pub color: LinearRgba,
    /// The ambient intensity in `(0, 1]`; transparent variants fade with it.
    pub ambient: f32,
    /// Whether the material is drawn with alpha blending.
    pub translucent: bool,
}

impl RayMaterial {
    /// Creates an opaque material of the given color.
    pub fn opaque(color: LinearRgba) -> Self {
        Self {
            color,
            ambient: 1.0,
            translucent: false,
        }
    }

    /// Creates a translucent material of the given color and ambient level.
    pub fn transparent(color: LinearRgba, ambient: f32) -> Self {
        Self {
            color,
            ambient,
            translucent: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_translucency() {
        let opaque = RayMaterial::opaque(LinearRgba::WHITE);
        assert!(!opaque.translucent);
        assert_eq!(opaque.ambient, 1.0);

        let transparent = RayMaterial::transparent(LinearRgba::WHITE, 0.3);
        assert!(transparent.translucent);
        assert_eq!(transparent.ambient, 0.3);
    }
}
