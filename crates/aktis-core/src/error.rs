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

//! Defines the error types for the visualization core.
//!
//! Every condition here is recoverable: an unrecognized ray kind degrades to
//! the error material and an out-of-range selection degrades to "no
//! selection". A broken frame is preferable to a frozen visualization, so
//! nothing in this crate halts the frame loop.

use std::fmt;

/// An error raised at the boundary between the core and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A producer handed over a ray kind code this crate does not recognize.
    UnknownRayKind(u8),
    /// A pixel selection lies outside the current screen dimensions.
    SelectionOutOfBounds {
        /// The selected x coordinate.
        x: u32,
        /// The selected y coordinate.
        y: u32,
        /// The current screen width.
        width: u32,
        /// The current screen height.
        height: u32,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::UnknownRayKind(code) => {
                write!(f, "Unrecognized ray kind code {code}")
            }
            CoreError::SelectionOutOfBounds {
                x,
                y,
                width,
                height,
            } => {
                write!(
                    f,
                    "Selected pixel ({x}, {y}) lies outside the {width}x{height} screen"
                )
            }
        }
    }
}

impl std::error::Error for CoreError {}
