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

//! Defines the notifications the scheduler publishes for observers.

use aktis_core::{NodeId, Ray};

/// A notification published on the scheduler's event bus.
///
/// Events are published synchronously on the update thread. Observers (a
/// pixel-inspector panel, typically) drain them between frames and must not
/// call back into the scheduler from within the drain.
#[derive(Debug, Clone, PartialEq)]
pub enum VizEvent {
    /// The active ray selection changed.
    SelectionChanged {
        /// `true` when a ray is now selected, `false` after a deselection.
        selected: bool,
    },
    /// The sequential animator began drawing a node for the first time in
    /// the current pass. Fires exactly once per node per pass.
    NodeAnimationStarted {
        /// The forest-unique id of the node that started animating.
        node: NodeId,
        /// A copy of the ray the node represents.
        ray: Ray,
    },
}
