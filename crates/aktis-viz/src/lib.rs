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

//! # Aktis Viz
//!
//! The ray-tree draw scheduler: takes the forest of per-pixel ray trees a
//! tracer produced and draws it as animated 3-D line segments, one fixed
//! update step at a time.
//!
//! The crate is organized leaf-first:
//! - [`pool`] — the fixed-capacity pool of reusable drawable handles;
//! - [`material`] — the quantizing, lazily populated material resolver;
//! - [`draw`] — the recursive tree draw engine (full, parallel-animated and
//!   sequential-animated traversals);
//! - [`scheduler`] — the per-frame state machine tying it all together, plus
//!   the selection/event bridge.
//!
//! All mutable state is owned by the [`scheduler::RayScheduler`] and touched
//! only from its `update` call; there is no concurrency inside this crate.

#![warn(missing_docs)]

pub mod draw;
pub mod event;
pub mod material;
pub mod pool;
pub mod scheduler;

pub use event::VizEvent;
pub use material::{MaterialResolver, COLOR_LEVELS, TRANSPARENCY_RANGE};
pub use pool::RayObjectPool;
pub use scheduler::RayScheduler;
