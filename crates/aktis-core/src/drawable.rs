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

//! Defines the contract between the scheduler and the host's ray renderer.
//!
//! The scheduler never talks to a graphics API. It asks a
//! [`DrawableFactory`] to instantiate reusable [`RayDrawable`] handles, and
//! drives each handle once per frame with the ray, material, radius and
//! length budget to draw. How a handle turns that into geometry (a cylinder
//! mesh, a GPU line list, a terminal glyph) is entirely the host's business.

use crate::material::RayMaterial;
use crate::ray::Ray;
use std::sync::Arc;

/// One reusable drawable handle representing a single ray for one frame.
pub trait RayDrawable {
    /// Shows or hides the underlying drawable resource.
    ///
    /// The pool calls this instead of destroying handles, so a hidden handle
    /// keeps its resources and can be shown again next frame without
    /// reallocation.
    fn set_visible(&mut self, visible: bool);

    /// Draws the ray up to `max_length` world units.
    ///
    /// ## Arguments
    /// * `ray` - The ray to represent this frame.
    /// * `material` - The resolved material; implementations may retain the `Arc`.
    /// * `radius` - The world-space radius to draw the ray at.
    /// * `max_length` - The length budget; the ray is drawn up to
    ///   `min(max_length, its own draw length)`.
    ///
    /// ## Returns
    /// The length actually drawn, used by the scheduler to compute leftover
    /// animation budget.
    fn draw(&mut self, ray: &Ray, material: &Arc<RayMaterial>, radius: f32, max_length: f32)
        -> f32;
}

/// Instantiates [`RayDrawable`] handles for the renderable pool.
pub trait DrawableFactory {
    /// Creates one new drawable handle, initially hidden.
    fn instantiate(&self) -> Box<dyn RayDrawable>;
}
