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

//! Defines the contracts of the scheduler's upstream collaborators.
//!
//! Both collaborators are injected at scheduler construction; there is no
//! process-wide singleton accessor anywhere in Aktis.

use crate::math::Extent2D;
use crate::tree::Forest;

/// Produces the forest of ray trees the scheduler draws.
///
/// The scheduler pulls a fresh forest only after it has been flagged dirty
/// (scene changed, tracer settings changed), never per frame. The returned
/// forest replaces the previous one wholesale.
pub trait ForestSource {
    /// Traces the current scene and returns one tree per screen pixel,
    /// row-major.
    fn render(&mut self) -> Forest;
}

/// Exposes the screen dimensions of the virtual camera.
///
/// Used to convert 2-D pixel selections into linear forest indices and to
/// reject selections outside the screen.
pub trait ViewportInfo {
    /// The current virtual screen size in pixels.
    fn screen_size(&self) -> Extent2D;
}
