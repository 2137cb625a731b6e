/*
random_path.rs

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

//! Generate a random path.
//!
//! The search is a depth-first backtracking over the 4-neighbor grid graph. It extends the path
//! from the starting cell until the path reaches the target length. It does not need to fill the
//! grid.
//!
//! Instead of recursion, the search keeps an explicit stack of frames, one per cell in the path.
//! Each frame stores the ordered candidates of its cell and the position of the next one to try.

use log::debug;
use std::fmt;

use super::ordering::{self, NeighborOrder, Step};
use super::path::Path;
use super::point::Point;
use super::prng::Mulberry32;

/// Type of errors.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RandomPathError {
    /// Every candidate has been tried from the starting cell.
    NoPath,

    /// The step budget of the attempt is spent.
    StepsExceeded,
}

impl fmt::Display for RandomPathError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RandomPathError::NoPath => write!(f, "no path of the requested length"),
            RandomPathError::StepsExceeded => write!(f, "step budget exceeded"),
        }
    }
}

impl std::error::Error for RandomPathError {}

/// Search state for one cell of the path.
struct Frame {
    /// Unvisited neighbors, in the order they must be tried.
    candidates: Vec<Point>,

    /// Index of the next candidate to try.
    next: usize,
}

/// [`RandomPath`] object.
pub struct RandomPath {
    /// Side length of the grid.
    pub grid_size: u32,

    /// Number of cells the path must reach.
    pub target: usize,

    /// Style of the level, which selects the neighbor ordering at each step.
    pub style: u32,

    /// Maximum number of cells the search can push during one attempt.
    pub max_steps: usize,

    /// Number of cells pushed during the last attempt.
    pub iteration: usize,
}

impl RandomPath {
    /// Create the object.
    pub fn new(grid_size: u32, target: usize, style: u32, max_steps: usize) -> Self {
        Self {
            grid_size,
            target,
            style,
            max_steps,
            iteration: 0,
        }
    }

    /// Generate and return a path from the given starting cell.
    ///
    /// All the random draws come from `rng`, which is not reset: two calls with the same stream
    /// explore different paths.
    ///
    /// # Errors
    ///
    /// The method returns an error if no path of the target length exists from the starting cell,
    /// or if the step budget is spent before finding one.
    pub fn generate(&mut self, start: Point, rng: &mut Mulberry32) -> Result<Path, RandomPathError> {
        self.iteration = 0;
        debug!(
            "Starting cell = {}  Target length = {}  Grid size = {}",
            start, self.target, self.grid_size
        );

        let mut path: Path = Path::new(self.target);
        path.push(start);
        if path.len() >= self.target {
            return Ok(path);
        }
        let mut frames: Vec<Frame> = Vec::with_capacity(self.target);
        frames.push(self.frame(&path, rng));

        loop {
            let next: Option<Point> = match frames.last_mut() {
                None => {
                    debug!("    Back: no eligible cell from the start");
                    return Err(RandomPathError::NoPath);
                }
                Some(frame) => {
                    let cell: Option<Point> = frame.candidates.get(frame.next).copied();
                    frame.next += 1;
                    cell
                }
            };

            match next {
                Some(cell) => {
                    if path.contains(cell) {
                        continue;
                    }
                    self.iteration += 1;
                    if self.iteration > self.max_steps {
                        debug!("    Giving up after {} steps", self.max_steps);
                        return Err(RandomPathError::StepsExceeded);
                    }
                    path.push(cell);
                    if path.len() >= self.target {
                        debug!("Iterations = {}", self.iteration);
                        return Ok(path);
                    }
                    frames.push(self.frame(&path, rng));
                }
                None => {
                    frames.pop();
                    if !frames.is_empty() {
                        path.pop();
                    }
                }
            }
        }
    }

    /// Build the frame of the last cell in the path.
    fn frame(&self, path: &Path, rng: &mut Mulberry32) -> Frame {
        let Some(current) = path.get_last() else {
            return Frame {
                candidates: Vec::new(),
                next: 0,
            };
        };
        let size: i32 = self.grid_size as i32;
        let mut candidates: Vec<Point> = current
            .neighbors_in(size)
            .filter(|p| !path.contains(*p))
            .collect();
        let step: Step = Step {
            current,
            previous: path.get_previous(),
            path_len: path.len(),
            grid_size: self.grid_size,
        };
        let order: NeighborOrder = NeighborOrder::for_step(self.style, path.len());
        ordering::order_neighbors(order, &step, &mut candidates, rng);
        Frame {
            candidates,
            next: 0,
        }
    }
}
