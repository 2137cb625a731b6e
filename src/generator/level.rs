/*
level.rs

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

//! Level record.
//!
//! A [`Level`] is built once from the path chosen by the generator and never changes afterward.
//! The `start`, `grid_size`, and `nodes` fields are the level itself and can be shown to the
//! player through [`LevelData`].
//! The `solution` field is the answer and must only be exposed as a hint through
//! [`LevelSolution`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt;

use super::point::Point;

/// Minimum number of cells in a level.
pub const MIN_NODES: usize = 3;

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The generator produced fewer than [`MIN_NODES`] cells.
    TooShort { level_id: u32, len: usize },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GenerationError::TooShort { level_id, len } => write!(
                f,
                "level {level_id}: generated path has {len} cells, at least {MIN_NODES} required"
            ),
        }
    }
}

impl Error for GenerationError {}

/// Broken level invariant.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// The node set and the solution set differ.
    NodesMismatch,
    /// A cell appears twice in the solution.
    RepeatedCell(Point),
    /// Two consecutive cells of the solution are not adjacent.
    NotAdjacent(Point, Point),
    /// The start is not the first cell of the solution.
    WrongStart,
    /// A cell is outside the grid.
    OutOfGrid(Point),
    /// Fewer than [`MIN_NODES`] cells.
    TooFewNodes(usize),
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Violation::NodesMismatch => write!(f, "nodes and solution differ"),
            Violation::RepeatedCell(p) => write!(f, "cell {p} visited twice"),
            Violation::NotAdjacent(a, b) => write!(f, "cells {a} and {b} are not adjacent"),
            Violation::WrongStart => write!(f, "start is not the first solution cell"),
            Violation::OutOfGrid(p) => write!(f, "cell {p} is outside the grid"),
            Violation::TooFewNodes(n) => write!(f, "only {n} nodes"),
        }
    }
}

/// Generated level.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Level ID.
    pub id: u32,

    /// Side length of the square grid.
    pub grid_size: u32,

    /// First cell of the path.
    pub start: Point,

    /// Cells to visit, sorted by row then column.
    pub nodes: Vec<Point>,

    /// Path that visits all the nodes.
    pub solution: Vec<Point>,
}

/// Level information that can be sent to the player. Does not include the solution.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub id: u32,
    pub grid_size: u32,
    pub start: Point,
    pub nodes: Vec<Point>,
}

/// Solution of a level, sent only when the player asks for a hint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LevelSolution {
    pub path: Vec<Point>,
}

/// Statistics about a level.
#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct LevelMetrics {
    /// Side length of the grid.
    pub grid_size: u32,

    /// Number of cells to visit.
    pub node_count: usize,

    /// Percentage of the grid cells to visit.
    pub coverage: f64,

    /// Number of turns along the solution.
    pub direction_changes: usize,
}

impl Level {
    /// Build a [`Level`] object from the path.
    ///
    /// # Errors
    ///
    /// Return an error if the path has fewer than [`MIN_NODES`] cells.
    pub fn assemble(
        level_id: u32,
        grid_size: u32,
        cells: Vec<Point>,
    ) -> Result<Self, GenerationError> {
        let Some(start) = cells.first().copied() else {
            return Err(GenerationError::TooShort { level_id, len: 0 });
        };
        if cells.len() < MIN_NODES {
            return Err(GenerationError::TooShort {
                level_id,
                len: cells.len(),
            });
        }
        let mut nodes: Vec<Point> = cells.clone();
        nodes.sort();
        Ok(Self {
            id: level_id,
            grid_size,
            start,
            nodes,
            solution: cells,
        })
    }

    /// Return the level information without the solution.
    pub fn data(&self) -> LevelData {
        LevelData {
            id: self.id,
            grid_size: self.grid_size,
            start: self.start,
            nodes: self.nodes.clone(),
        }
    }

    /// Return the solution.
    pub fn hint(&self) -> LevelSolution {
        LevelSolution {
            path: self.solution.clone(),
        }
    }

    /// Check the level invariants and return the broken ones.
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations: Vec<Violation> = Vec::new();
        let size: i32 = self.grid_size as i32;

        if self.nodes.len() < MIN_NODES {
            violations.push(Violation::TooFewNodes(self.nodes.len()));
        }
        if self.solution.first() != Some(&self.start) {
            violations.push(Violation::WrongStart);
        }

        let mut seen: HashSet<Point> = HashSet::with_capacity(self.solution.len());
        for p in &self.solution {
            if !seen.insert(*p) {
                violations.push(Violation::RepeatedCell(*p));
            }
            if !p.in_grid(size) {
                violations.push(Violation::OutOfGrid(*p));
            }
        }
        for w in self.solution.windows(2) {
            if w[0].manhattan(w[1]) != 1 {
                violations.push(Violation::NotAdjacent(w[0], w[1]));
            }
        }

        let nodes: HashSet<Point> = self.nodes.iter().copied().collect();
        if nodes != seen || self.nodes.len() != self.solution.len() {
            violations.push(Violation::NodesMismatch);
        }
        violations
    }

    /// Whether all the invariants hold.
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Compute statistics for the level.
    pub fn metrics(&self) -> LevelMetrics {
        let cells: f64 = f64::from(self.grid_size * self.grid_size);
        let coverage: f64 = if cells > 0.0 {
            self.nodes.len() as f64 / cells * 100.0
        } else {
            0.0
        };

        let mut direction_changes: usize = 0;
        let mut previous: Option<(i32, i32)> = None;
        for w in self.solution.windows(2) {
            let d: (i32, i32) = (w[1].x - w[0].x, w[1].y - w[0].y);
            if previous.is_some_and(|p| p != d) {
                direction_changes += 1;
            }
            previous = Some(d);
        }

        LevelMetrics {
            grid_size: self.grid_size,
            node_count: self.nodes.len(),
            coverage,
            direction_changes,
        }
    }
}
