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

//! Maps abstract ray semantics to cached visual materials.
//!
//! Two orthogonal axes decide a ray's material: whether it is translucent
//! (transparency enabled and contribution at or below the threshold) and
//! whether it is colored by kind or by its contributed pixel color.
//!
//! The kind-keyed set is small and always needed, so it is built eagerly at
//! construction: one opaque material per kind plus [`TRANSPARENCY_RANGE`]
//! translucent variants. The color-keyed set is combinatorially large
//! ([`COLOR_LEVELS`]³ opaque, times [`TRANSPARENCY_RANGE`] translucent), so
//! entries materialize lazily on first access in a sparse hash-keyed cache
//! bounded by the combinations actually used. Once created, an entry is
//! immutable and lives for the rest of the process.

use aktis_core::math::saturate;
use aktis_core::{LinearRgba, RayKind, RayMaterial, RaySettings};
use std::collections::HashMap;
use std::sync::Arc;

/// The number of discrete transparency levels per material family.
pub const TRANSPARENCY_RANGE: usize = 50;

/// The number of discrete quantization levels per color channel.
pub const COLOR_LEVELS: usize = 18;

const COLOR_STEP: f32 = 1.0 / (COLOR_LEVELS as f32 - 1.0);

/// Quantizes a `[0, 1]` value into one of `levels` buckets, round-to-nearest.
#[inline]
fn quantize(value: f32, levels: usize) -> usize {
    (saturate(value) * (levels - 1) as f32).round() as usize
}

/// The ambient intensity of transparency level `index`.
#[inline]
fn ambient_for_level(index: usize) -> f32 {
    (index + 1) as f32 * (1.0 / TRANSPARENCY_RANGE as f32)
}

/// One ray kind's eagerly built material family.
struct KindMaterials {
    opaque: Arc<RayMaterial>,
    /// Empty for kinds that are never drawn translucent (no-hit rays).
    transparent: Vec<Arc<RayMaterial>>,
}

impl KindMaterials {
    fn new(color: LinearRgba, with_transparency: bool) -> Self {
        let opaque = Arc::new(RayMaterial::opaque(color));
        let transparent = if with_transparency {
            (0..TRANSPARENCY_RANGE)
                .map(|i| Arc::new(RayMaterial::transparent(color, ambient_for_level(i))))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            opaque,
            transparent,
        }
    }
}

/// Resolves `(kind, contribution, color)` to a shared, cached material.
pub struct MaterialResolver {
    no_hit: KindMaterials,
    reflect: KindMaterials,
    refract: KindMaterials,
    normal: KindMaterials,
    shadow: KindMaterials,
    light: KindMaterials,
    error: Arc<RayMaterial>,
    color_opaque: HashMap<[u8; 3], Arc<RayMaterial>>,
    color_transparent: HashMap<[u8; 4], Arc<RayMaterial>>,
}

impl MaterialResolver {
    /// Builds the resolver, eagerly generating the kind-keyed families.
    pub fn new() -> Self {
        Self {
            // No-hit rays keep their opaque look even below the transparency
            // threshold; they carry no contribution worth fading by.
            no_hit: KindMaterials::new(LinearRgba::rgb(0.5, 0.5, 0.5), false),
            reflect: KindMaterials::new(LinearRgba::rgb(0.2, 0.6, 1.0), true),
            refract: KindMaterials::new(LinearRgba::rgb(0.7, 0.3, 1.0), true),
            normal: KindMaterials::new(LinearRgba::rgb(1.0, 0.8, 0.2), true),
            shadow: KindMaterials::new(LinearRgba::rgb(0.1, 0.1, 0.1), true),
            light: KindMaterials::new(LinearRgba::rgb(1.0, 1.0, 0.6), true),
            error: Arc::new(RayMaterial::opaque(LinearRgba::MAGENTA)),
            color_opaque: HashMap::new(),
            color_transparent: HashMap::new(),
        }
    }

    /// Resolves the material for one ray under the current settings.
    ///
    /// Never fails: unrecognized kinds are logged and resolve to the error
    /// material so the draw loop keeps running.
    pub fn resolve(
        &mut self,
        kind: RayKind,
        contribution: f32,
        color: LinearRgba,
        settings: &RaySettings,
    ) -> Arc<RayMaterial> {
        if settings.transparency_enabled && contribution <= settings.transparency_threshold {
            let transparency = saturate(contribution).powf(settings.transparency_exponent);
            if settings.color_contribution_enabled {
                self.color_material_transparent(color, transparency)
            } else {
                self.kind_material_transparent(kind, transparency)
            }
        } else if settings.color_contribution_enabled {
            self.color_material(color)
        } else {
            self.kind_material(kind)
        }
    }

    /// The designated fallback material for unrecognized ray kinds.
    pub fn error_material(&self) -> Arc<RayMaterial> {
        Arc::clone(&self.error)
    }

    /// The number of lazily materialized color-keyed entries, across both
    /// the opaque and translucent caches.
    pub fn color_cache_len(&self) -> usize {
        self.color_opaque.len() + self.color_transparent.len()
    }

    fn family(&self, kind: RayKind) -> Option<&KindMaterials> {
        match kind {
            RayKind::NoHit => Some(&self.no_hit),
            RayKind::Reflect => Some(&self.reflect),
            RayKind::Refract => Some(&self.refract),
            RayKind::Normal => Some(&self.normal),
            RayKind::Shadow => Some(&self.shadow),
            RayKind::Light => Some(&self.light),
            RayKind::Unknown(_) => None,
        }
    }

    fn kind_material(&self, kind: RayKind) -> Arc<RayMaterial> {
        match self.family(kind) {
            Some(family) => Arc::clone(&family.opaque),
            None => {
                log::error!("Unrecognized ray kind {kind:?}; falling back to the error material.");
                Arc::clone(&self.error)
            }
        }
    }

    fn kind_material_transparent(&self, kind: RayKind, transparency: f32) -> Arc<RayMaterial> {
        match self.family(kind) {
            Some(family) if family.transparent.is_empty() => Arc::clone(&family.opaque),
            Some(family) => {
                let level = quantize(transparency, TRANSPARENCY_RANGE);
                Arc::clone(&family.transparent[level])
            }
            None => {
                log::error!("Unrecognized ray kind {kind:?}; falling back to the error material.");
                Arc::clone(&self.error)
            }
        }
    }

    fn color_material(&mut self, color: LinearRgba) -> Arc<RayMaterial> {
        let key = [
            quantize(color.r, COLOR_LEVELS) as u8,
            quantize(color.g, COLOR_LEVELS) as u8,
            quantize(color.b, COLOR_LEVELS) as u8,
        ];
        Arc::clone(self.color_opaque.entry(key).or_insert_with(|| {
            Arc::new(RayMaterial::opaque(LinearRgba::rgb(
                key[0] as f32 * COLOR_STEP,
                key[1] as f32 * COLOR_STEP,
                key[2] as f32 * COLOR_STEP,
            )))
        }))
    }

    fn color_material_transparent(
        &mut self,
        color: LinearRgba,
        transparency: f32,
    ) -> Arc<RayMaterial> {
        let key = [
            quantize(color.r, COLOR_LEVELS) as u8,
            quantize(color.g, COLOR_LEVELS) as u8,
            quantize(color.b, COLOR_LEVELS) as u8,
            quantize(transparency, TRANSPARENCY_RANGE) as u8,
        ];
        Arc::clone(self.color_transparent.entry(key).or_insert_with(|| {
            Arc::new(RayMaterial::transparent(
                LinearRgba::rgb(
                    key[0] as f32 * COLOR_STEP,
                    key[1] as f32 * COLOR_STEP,
                    key[2] as f32 * COLOR_STEP,
                ),
                ambient_for_level(key[3] as usize),
            ))
        }))
    }
}

impl Default for MaterialResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_settings() -> RaySettings {
        RaySettings {
            color_contribution_enabled: false,
            ..RaySettings::default()
        }
    }

    fn color_settings() -> RaySettings {
        RaySettings {
            color_contribution_enabled: true,
            ..RaySettings::default()
        }
    }

    #[test]
    fn contribution_above_threshold_is_opaque() {
        let mut resolver = MaterialResolver::new();
        let settings = kind_settings();

        let material = resolver.resolve(RayKind::Reflect, 0.9, LinearRgba::WHITE, &settings);
        assert!(!material.translucent);
    }

    #[test]
    fn contribution_at_threshold_is_transparent() {
        let mut resolver = MaterialResolver::new();
        let settings = kind_settings();

        // The boundary is inclusive.
        let at = resolver.resolve(
            RayKind::Reflect,
            settings.transparency_threshold,
            LinearRgba::WHITE,
            &settings,
        );
        assert!(at.translucent);
    }

    #[test]
    fn transparency_level_matches_the_quantization_formula() {
        let mut resolver = MaterialResolver::new();
        let mut settings = kind_settings();
        settings.transparency_exponent = 2.0;

        for &c in &[0.0f32, 0.05, 0.1, 0.2, 0.25] {
            let material = resolver.resolve(RayKind::Shadow, c, LinearRgba::WHITE, &settings);
            let expected_level =
                (c.powf(2.0) * (TRANSPARENCY_RANGE - 1) as f32).round() as usize;
            let expected_ambient = (expected_level + 1) as f32 / TRANSPARENCY_RANGE as f32;
            assert!(material.translucent, "contribution {c} must be translucent");
            assert!(
                (material.ambient - expected_ambient).abs() < 1e-6,
                "contribution {c}: ambient {} != expected {expected_ambient}",
                material.ambient
            );
        }
    }

    #[test]
    fn no_hit_has_no_transparent_variant() {
        let mut resolver = MaterialResolver::new();
        let settings = kind_settings();

        let low = resolver.resolve(RayKind::NoHit, 0.0, LinearRgba::WHITE, &settings);
        let high = resolver.resolve(RayKind::NoHit, 1.0, LinearRgba::WHITE, &settings);
        assert!(!low.translucent);
        assert!(Arc::ptr_eq(&low, &high));
    }

    #[test]
    fn kind_materials_are_shared() {
        let mut resolver = MaterialResolver::new();
        let settings = kind_settings();

        let a = resolver.resolve(RayKind::Light, 0.8, LinearRgba::WHITE, &settings);
        let b = resolver.resolve(RayKind::Light, 0.9, LinearRgba::BLACK, &settings);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn color_resolution_is_idempotent_and_cache_bounded() {
        let mut resolver = MaterialResolver::new();
        let settings = color_settings();
        let color = LinearRgba::rgb(0.31, 0.62, 0.93);

        let first = resolver.resolve(RayKind::Reflect, 0.9, color, &settings);
        let len_after_first = resolver.color_cache_len();
        let second = resolver.resolve(RayKind::Reflect, 0.9, color, &settings);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(resolver.color_cache_len(), len_after_first);

        // A color that quantizes to the same key shares the same entry.
        let nudged = LinearRgba::rgb(0.31 + COLOR_STEP / 4.0, 0.62, 0.93);
        let third = resolver.resolve(RayKind::Reflect, 0.9, nudged, &settings);
        assert!(Arc::ptr_eq(&first, &third));
        assert_eq!(resolver.color_cache_len(), len_after_first);
    }

    #[test]
    fn color_entry_snaps_to_the_quantized_color() {
        let mut resolver = MaterialResolver::new();
        let settings = color_settings();

        let material = resolver.resolve(RayKind::Reflect, 1.0, LinearRgba::WHITE, &settings);
        assert_eq!(material.color, LinearRgba::rgb(1.0, 1.0, 1.0));
        assert!(!material.translucent);

        let dark = resolver.resolve(RayKind::Reflect, 1.0, LinearRgba::BLACK, &settings);
        assert_eq!(dark.color, LinearRgba::rgb(0.0, 0.0, 0.0));
    }

    #[test]
    fn transparent_color_cache_is_keyed_by_level_too() {
        let mut resolver = MaterialResolver::new();
        let settings = color_settings();
        let color = LinearRgba::rgb(0.5, 0.5, 0.5);

        let a = resolver.resolve(RayKind::Reflect, 0.05, color, &settings);
        let b = resolver.resolve(RayKind::Reflect, 0.20, color, &settings);
        assert!(a.translucent && b.translucent);
        assert!(!Arc::ptr_eq(&a, &b), "different levels are distinct entries");
        assert_eq!(resolver.color_cache_len(), 2);
    }

    #[test]
    fn unknown_kind_falls_back_to_the_error_material() {
        let mut resolver = MaterialResolver::new();
        let settings = kind_settings();

        let opaque = resolver.resolve(RayKind::Unknown(200), 0.9, LinearRgba::WHITE, &settings);
        assert!(Arc::ptr_eq(&opaque, &resolver.error_material()));

        let transparent =
            resolver.resolve(RayKind::Unknown(200), 0.1, LinearRgba::WHITE, &settings);
        assert!(Arc::ptr_eq(&transparent, &resolver.error_material()));
    }
}
