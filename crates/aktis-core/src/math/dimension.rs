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

//! Defines 2-D extent types for screen-space dimensions.

/// The extent of a 2-D region, usually the virtual screen the tracer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// The width of the region in pixels.
    pub width: u32,
    /// The height of the region in pixels.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent from a width and height.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the number of pixels covered by this extent.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` when the pixel coordinate lies inside this extent.
    #[inline]
    pub const fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Converts a pixel coordinate into a row-major linear index
    /// (`x + width * y`), or `None` when the coordinate is out of bounds.
    #[inline]
    pub fn linear_index(&self, x: u32, y: u32) -> Option<usize> {
        if self.contains(x, y) {
            Some(x as usize + self.width as usize * y as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_exclusive_of_the_extent() {
        let e = Extent2D::new(10, 8);
        assert!(e.contains(0, 0));
        assert!(e.contains(9, 7));
        assert!(!e.contains(10, 0));
        assert!(!e.contains(0, 8));
    }

    #[test]
    fn linear_index_is_row_major() {
        let e = Extent2D::new(10, 8);
        assert_eq!(e.linear_index(4, 2), Some(24));
        assert_eq!(e.linear_index(0, 0), Some(0));
        assert_eq!(e.linear_index(9, 7), Some(79));
        assert_eq!(e.linear_index(20, 2), None);
    }

    #[test]
    fn area() {
        assert_eq!(Extent2D::new(10, 8).area(), 80);
        assert_eq!(Extent2D::default().area(), 0);
    }
}
