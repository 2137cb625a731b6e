/*
lib.rs

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

//! Level generator for a single-stroke grid puzzle.
//!
//! The player draws one continuous line through all the highlighted cells of a square grid,
//! moving horizontally or vertically, without visiting a cell twice.
//!
//! Levels 1 to [`MAX_LEVEL`] are computed from their ID, so any process that runs the same
//! version of the generator serves the same levels:
//!
//! ```
//! let level = onestroke::generate(42).unwrap();
//! assert_eq!(level, onestroke::generate(42).unwrap());
//! assert_eq!(level.start, level.solution[0]);
//! ```

pub mod config;
pub mod generator;
pub mod verify;

pub use generator::difficulty::{MAX_LEVEL, is_valid_level};
pub use generator::level::{GenerationError, Level, LevelData, LevelSolution};
pub use generator::point::Point;
pub use generator::{GenerationStats, LevelGenerator};

/// Generate the given level with the default settings.
pub fn generate(level_id: u32) -> Result<Level, GenerationError> {
    LevelGenerator::default().generate(level_id)
}

/// Return the solution of the given level with the default settings.
pub fn solution(level_id: u32) -> Result<Vec<Point>, GenerationError> {
    LevelGenerator::default().solution(level_id)
}
