/*
point.rs

Copyright 2025 Hervé Quatremain

This file is part of Onestroke.

Onestroke is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Onestroke is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Onestroke. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Grid cells.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Cell of the square grid. Coordinates start at 0 from the top-left corner.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Rows first, then columns.
impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl Point {
    /// Create a [`Point`] object.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the point is inside a grid of the given side length.
    pub fn in_grid(self, size: i32) -> bool {
        self.x >= 0 && self.x < size && self.y >= 0 && self.y < size
    }

    /// Manhattan distance between the two points.
    pub fn manhattan(self, other: Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Squared Euclidean distance between the two points.
    pub fn distance_sq(self, other: Point) -> i32 {
        let dx: i32 = self.x - other.x;
        let dy: i32 = self.y - other.y;
        dx * dx + dy * dy
    }

    /// The four orthogonal neighbors, in the up, down, left, right order. Some of them might be
    /// outside the grid.
    pub fn neighbors(self) -> [Point; 4] {
        [
            Point::new(self.x, self.y - 1),
            Point::new(self.x, self.y + 1),
            Point::new(self.x - 1, self.y),
            Point::new(self.x + 1, self.y),
        ]
    }

    /// The orthogonal neighbors that are inside a grid of the given side length.
    pub fn neighbors_in(self, size: i32) -> impl Iterator<Item = Point> {
        self.neighbors().into_iter().filter(move |p| p.in_grid(size))
    }

    /// Clamp the point inside a grid of the given side length.
    pub fn clamp_to(self, size: i32) -> Self {
        let max: i32 = (size - 1).max(0);
        Point::new(self.x.clamp(0, max), self.y.clamp(0, max))
    }
}
