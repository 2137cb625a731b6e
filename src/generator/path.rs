/*
path.rs

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

//! Path being built over the grid.

use std::collections::HashSet;

use super::point::Point;

/// Path object.
#[derive(Debug, Default, Clone)]
pub struct Path {
    /// Path as an ordered list of cells.
    path: Vec<Point>,

    /// Stores the visited status of the cells.
    /// Instead of looking for the cell in the [`Path::path`] vector, this
    /// [`std::collections::HashSet`] speeds up the lookup.
    visited: HashSet<Point>,
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Path {
    /// Create a [`Path`] object able to hold `capacity` cells without reallocating.
    pub fn new(capacity: usize) -> Self {
        Self {
            path: Vec::with_capacity(capacity),
            visited: HashSet::with_capacity(capacity),
        }
    }

    /// Add a cell to the path.
    ///
    /// Return `false`, and leave the path unchanged, if the cell is already in the path.
    pub fn push(&mut self, cell: Point) -> bool {
        if !self.visited.insert(cell) {
            return false;
        }
        self.path.push(cell);
        true
    }

    /// Remove the last cell from the path.
    pub fn pop(&mut self) -> Option<Point> {
        let cell: Point = self.path.pop()?;
        self.visited.remove(&cell);
        Some(cell)
    }

    /// Get the number of cells in the path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Whether the path has no cell.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Whether the cell is in the path or not.
    pub fn contains(&self, cell: Point) -> bool {
        self.visited.contains(&cell)
    }

    /// Return a reference to the path vector.
    pub fn get(&self) -> &[Point] {
        &self.path
    }

    /// Return the first cell in the path.
    pub fn get_first(&self) -> Option<Point> {
        self.path.first().copied()
    }

    /// Return the last cell in the path.
    pub fn get_last(&self) -> Option<Point> {
        self.path.last().copied()
    }

    /// Return the cell before the last one.
    pub fn get_previous(&self) -> Option<Point> {
        let l: usize = self.path.len();
        if l > 1 { Some(self.path[l - 2]) } else { None }
    }

    /// Consume the object and return the ordered cells.
    pub fn into_vec(self) -> Vec<Point> {
        self.path
    }
}
