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

//! # Aktis Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! for the Aktis ray-tree visualization engine.
//!
//! The visualization scheduler itself lives in `aktis-viz`; this crate only
//! defines what it consumes: the ray/forest data model, the collaborator
//! traits (forest producer, viewport, drawable factory), the material entry
//! type, the settings surface, and the generic event bus.

#![warn(missing_docs)]

pub mod drawable;
pub mod error;
pub mod event;
pub mod material;
pub mod math;
pub mod ray;
pub mod settings;
pub mod source;
pub mod tree;

pub use drawable::{DrawableFactory, RayDrawable};
pub use error::CoreError;
pub use material::RayMaterial;
pub use math::{Extent2D, LinearRgba, Vec3};
pub use ray::{Ray, RayKind};
pub use settings::RaySettings;
pub use source::{ForestSource, ViewportInfo};
pub use tree::{Forest, NodeId, RayNode};
