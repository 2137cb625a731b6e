/*
start.rs

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

//! Select the starting cell of the path.

use strum_macros::FromRepr;

use super::point::Point;
use super::prng::Mulberry32;

/// Start placement heuristics.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u32)]
pub enum StartStyle {
    /// A grid corner, rotated by the level ID.
    Corner,
    /// A random cell on the top or bottom edge.
    HorizontalEdge,
    /// A random cell on the left or right edge.
    VerticalEdge,
    /// A cell in a window around the grid center.
    Center,
    /// A cell shifted along the diagonal by the level ID.
    DiagonalOffset,
    /// A corner, an edge middle, or the center.
    Ternary,
    /// A border cell that travels along the edges as the level ID grows.
    Wave,
}

impl StartStyle {
    /// Heuristic for the given level and style. It drifts slowly with the level ID.
    pub fn select(level_id: u32, style: u32) -> Self {
        let index: u32 = (style + level_id / 10 + level_id / 50) % 7;
        StartStyle::from_repr(index).unwrap_or(StartStyle::Corner)
    }
}

/// Return the starting cell for the given level.
///
/// The random draws, if any, come from `rng` so that successive attempts can start from
/// different cells.
pub fn select_start(grid_size: u32, level_id: u32, style: u32, rng: &mut Mulberry32) -> Point {
    let n: i32 = grid_size as i32;
    let id: i32 = level_id as i32;
    let far: i32 = n - 1;
    let even: bool = level_id % 2 == 0;

    let start: Point = match StartStyle::select(level_id, style) {
        StartStyle::Corner => Point::new(
            if even { 0 } else { far },
            if (level_id / 2) % 2 == 0 { 0 } else { far },
        ),
        StartStyle::HorizontalEdge => {
            let x: i32 = rng.below(grid_size as usize) as i32;
            Point::new(x, if even { 0 } else { far })
        }
        StartStyle::VerticalEdge => {
            let y: i32 = rng.below(grid_size as usize) as i32;
            Point::new(if even { 0 } else { far }, y)
        }
        StartStyle::Center => {
            let half: f64 = f64::from(grid_size) / 2.0;
            let spread: f64 = f64::from(grid_size) * 0.4;
            let x: f64 = (half + (rng.next_f64() - 0.5) * spread).floor();
            let y: f64 = (half + (rng.next_f64() - 0.5) * spread).floor();
            Point::new(x as i32, y as i32)
        }
        StartStyle::DiagonalOffset => {
            let offset: i32 = id % n;
            Point::new(offset, (offset + id / n) % n)
        }
        StartStyle::Ternary => {
            let pick = |k: u32| match k {
                0 => 0,
                1 => far,
                _ => n / 2,
            };
            Point::new(pick(level_id % 3), pick((level_id / 3) % 3))
        }
        StartStyle::Wave => {
            let wave: i32 = (id / 7) % n;
            let x: i32 = match level_id % 4 {
                0 => wave,
                1 => far - wave,
                _ => {
                    if rng.coin() {
                        0
                    } else {
                        far
                    }
                }
            };
            let y: i32 = match level_id % 4 {
                2 => wave,
                3 => far - wave,
                _ => {
                    if rng.coin() {
                        0
                    } else {
                        far
                    }
                }
            };
            Point::new(x, y)
        }
    };
    start.clamp_to(n)
}
