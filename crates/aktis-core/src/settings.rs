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

//! Global settings for the ray visualization.

use serde::{Deserialize, Serialize};

/// A collection of settings that affect how rays are drawn and animated.
///
/// Every option takes effect on the next frame; none require a restart.
/// Hosts mutate a scheduler's settings through its `configure` method, which
/// also arms the implicit animation reset when the animation mode changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaySettings {
    /// Master switch; when `false` all drawing and animation work is skipped.
    pub show_rays: bool,
    /// Hides rays that did not intersect any object.
    pub hide_no_hit: bool,
    /// Hides rays whose contribution is at or below [`Self::hide_threshold`].
    pub hide_negligible: bool,
    /// The contribution at or below which negligible rays are hidden.
    pub hide_threshold: f32,
    /// Draws low-contribution rays with translucent materials.
    pub transparency_enabled: bool,
    /// The contribution at or below which rays become translucent.
    pub transparency_threshold: f32,
    /// The exponent applied to the contribution before quantizing it into a
    /// transparency level.
    pub transparency_exponent: f32,
    /// Colors rays by their contributed pixel color instead of their kind.
    pub color_contribution_enabled: bool,
    /// Scales each ray's radius by its contribution between
    /// [`Self::min_radius`] and [`Self::max_radius`].
    pub dynamic_radius_enabled: bool,
    /// The fixed ray radius used when dynamic radius is disabled.
    pub radius: f32,
    /// The radius of a zero-contribution ray in dynamic mode.
    pub min_radius: f32,
    /// The radius of a full-contribution ray in dynamic mode.
    pub max_radius: f32,
    /// The draw length for rays that never intersect an object.
    pub infinite_ray_length: f32,
    /// Progressively reveals rays instead of drawing them instantly.
    pub animate: bool,
    /// Reveals the forest one tree at a time. Does nothing unless
    /// [`Self::animate`] is set.
    pub animate_sequentially: bool,
    /// Restarts the animation when it completes. Does nothing unless
    /// [`Self::animate`] is set.
    pub loop_animation: bool,
    /// World units of ray revealed per second of animation.
    pub speed: f32,
    /// The number of drawable handles the pool pre-allocates.
    pub initial_pool_size: usize,
}

impl Default for RaySettings {
    fn default() -> Self {
        Self {
            show_rays: true,
            hide_no_hit: false,
            hide_negligible: false,
            hide_threshold: 0.02,
            transparency_enabled: true,
            transparency_threshold: 0.25,
            transparency_exponent: 1.0,
            color_contribution_enabled: true,
            dynamic_radius_enabled: true,
            radius: 0.01,
            min_radius: 0.003,
            max_radius: 0.025,
            infinite_ray_length: 10.0,
            animate: false,
            animate_sequentially: false,
            loop_animation: false,
            speed: 2.0,
            initial_pool_size: 64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let s = RaySettings::default();
        assert!(s.show_rays);
        assert!(!s.animate);
        assert_eq!(s.hide_threshold, 0.02);
        assert_eq!(s.transparency_threshold, 0.25);
        assert_eq!(s.initial_pool_size, 64);
    }

    #[test]
    fn settings_round_trip_through_serde() {
        let mut s = RaySettings::default();
        s.animate = true;
        s.speed = 4.5;

        let json = serde_json::to_string(&s).expect("serialize");
        let back: RaySettings = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, s);
    }
}
