/*
fallback.rs

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

//! Search-free paths used when the random search gives up.
//!
//! A pattern first lists the grid cells in its own order (spiral, sweep, snake...).
//! Cells outside the grid and repeated cells are dropped.
//! Because some orders jump between cells that are not adjacent, the list is then traced into a
//! path: starting from the first cell, the path always moves to the unvisited neighbor that comes
//! first in the pattern order, until it is stuck.
//! For the snakes and the random walk, the traced path is the pattern itself.

use log::debug;
use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use strum_macros::FromRepr;

use super::path::Path;
use super::point::Point;
use super::prng::Mulberry32;

/// Number of patterns.
pub const PATTERN_COUNT: u32 = 9;

/// Fallback patterns.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u32)]
pub enum FallbackPattern {
    /// Clockwise spiral growing out of the top-left corner.
    CornerSpiral,
    /// Anti-diagonals from the top-left corner.
    DiagonalSweep,
    /// Rows, alternating direction.
    HorizontalSnake,
    /// Breadth-first order from the center.
    Radial,
    /// Random walk that stops when it is stuck.
    RandomWalk,
    /// Columns, alternating direction.
    VerticalSnake,
    /// Anti-diagonals from the bottom-right corner.
    ReverseDiagonalSweep,
    /// Counter-clockwise spiral growing out of the center.
    CenterSpiral,
    /// Anti-diagonals, alternating direction.
    ZigZag,
}

impl FallbackPattern {
    /// Pattern for the given level.
    pub fn for_level(level_id: u32) -> Self {
        FallbackPattern::from_repr(level_id % PATTERN_COUNT)
            .unwrap_or(FallbackPattern::HorizontalSnake)
    }
}

/// Return the fallback path for the given level.
///
/// Some patterns trace a path much shorter than the grid. When the traced path has fewer than
/// `target` cells, the first `target` cells of the horizontal snake are used instead.
pub fn fallback_path(level_id: u32, grid_size: u32, target: usize) -> Vec<Point> {
    let pattern: FallbackPattern = FallbackPattern::for_level(level_id);
    let mut rng: Mulberry32 = Mulberry32::for_fallback(level_id);
    let cells: Vec<Point> = pattern_cells(pattern, grid_size, &mut rng);
    let path: Vec<Point> = trace(&cells, grid_size);
    debug!(
        "Fallback {:?} for level {}: {} cells listed, {} traced",
        pattern,
        level_id,
        cells.len(),
        path.len()
    );
    if path.len() >= target {
        return path;
    }

    debug!("Fallback path too short ({} < {target}), using the snake", path.len());
    pattern_cells(FallbackPattern::HorizontalSnake, grid_size, &mut rng)
        .into_iter()
        .take(target)
        .collect()
}

/// List the grid cells in the pattern order, without duplicates.
pub fn pattern_cells(pattern: FallbackPattern, grid_size: u32, rng: &mut Mulberry32) -> Vec<Point> {
    let n: i32 = grid_size as i32;
    let raw: Vec<Point> = match pattern {
        FallbackPattern::CornerSpiral => spiral(n, Point::new(0, 0), (1, 0), true),
        FallbackPattern::DiagonalSweep => (0..(2 * n))
            .flat_map(|sum| (0..n).map(move |x| Point::new(x, sum - x)))
            .collect(),
        FallbackPattern::HorizontalSnake => (0..n)
            .flat_map(|y| snake_line(n, y).map(move |x| Point::new(x, y)))
            .collect(),
        FallbackPattern::Radial => radial(n),
        FallbackPattern::RandomWalk => random_walk(n, rng),
        FallbackPattern::VerticalSnake => (0..n)
            .flat_map(|x| snake_line(n, x).map(move |y| Point::new(x, y)))
            .collect(),
        FallbackPattern::ReverseDiagonalSweep => (0..=(2 * n - 2))
            .rev()
            .flat_map(|sum| (0..n).rev().map(move |x| Point::new(x, sum - x)))
            .collect(),
        FallbackPattern::CenterSpiral => spiral(n, Point::new(n / 2, n / 2), (0, -1), false),
        FallbackPattern::ZigZag => {
            let mut cells: Vec<Point> = (0..n)
                .flat_map(|y| (0..n).map(move |x| Point::new(x, y)))
                .collect();
            cells.sort_by_key(|p| {
                let diagonal: i32 = p.x + p.y;
                (diagonal, if diagonal % 2 == 0 { p.x } else { -p.x })
            });
            cells
        }
    };

    let mut seen: HashSet<Point> = HashSet::with_capacity(raw.len());
    raw.into_iter()
        .filter(|p| p.in_grid(n) && seen.insert(*p))
        .collect()
}

/// Turn an ordered list of cells into a path of adjacent cells.
///
/// From the current cell, the path moves to the unvisited neighbor with the lowest position in
/// `cells`. Neighbors that are not in `cells` are never used.
pub fn trace(cells: &[Point], grid_size: u32) -> Vec<Point> {
    let Some(first) = cells.first() else {
        return Vec::new();
    };
    let rank: HashMap<Point, usize> = cells.iter().enumerate().map(|(i, p)| (*p, i)).collect();
    let mut path: Path = Path::new(cells.len());
    let mut current: Point = *first;
    path.push(current);

    loop {
        let next: Option<Point> = current
            .neighbors_in(grid_size as i32)
            .filter(|p| !path.contains(*p))
            .filter_map(|p| rank.get(&p).map(|r| (*r, p)))
            .min()
            .map(|(_, p)| p);
        let Some(next) = next else {
            break;
        };
        path.push(next);
        current = next;
    }
    path.into_vec()
}

/// Values `0..n`, reversed on odd lines.
fn snake_line(n: i32, line: i32) -> Box<dyn Iterator<Item = i32>> {
    if line % 2 == 0 {
        Box::new(0..n)
    } else {
        Box::new((0..n).rev())
    }
}

/// Square spiral growing from `origin`.
///
/// The run length grows by one every two turns. Positions outside the grid are skipped. The
/// spiral stops when all the grid cells have been listed or when it is wider than twice the grid.
fn spiral(n: i32, origin: Point, direction: (i32, i32), clockwise: bool) -> Vec<Point> {
    let cells: usize = (n * n) as usize;
    let limit: usize = ((2 * n + 1) * (2 * n + 1)) as usize;
    let mut out: Vec<Point> = Vec::with_capacity(cells);
    let (mut dx, mut dy) = direction;
    let mut p: Point = origin;
    let mut run: i32 = 1;
    let mut step: i32 = 0;
    let mut turns: u32 = 0;

    for _ in 0..limit {
        if out.len() >= cells {
            break;
        }
        if p.in_grid(n) {
            out.push(p);
        }
        if step == run {
            (dx, dy) = if clockwise { (-dy, dx) } else { (dy, -dx) };
            turns += 1;
            step = 0;
            if turns % 2 == 0 {
                run += 1;
            }
        }
        p = Point::new(p.x + dx, p.y + dy);
        step += 1;
    }
    out
}

/// Breadth-first order from the grid center.
fn radial(n: i32) -> Vec<Point> {
    let center: Point = Point::new(n / 2, n / 2);
    let mut out: Vec<Point> = Vec::with_capacity((n * n) as usize);
    if !center.in_grid(n) {
        return out;
    }
    let mut seen: HashSet<Point> = HashSet::from([center]);
    let mut queue: VecDeque<Point> = VecDeque::from([center]);

    while let Some(p) = queue.pop_front() {
        out.push(p);
        for q in p.neighbors_in(n) {
            if seen.insert(q) {
                queue.push_back(q);
            }
        }
    }
    out
}

/// Random walk from a random cell. The walk only moves to unvisited cells and stops when it is
/// stuck or when it has covered the grid.
fn random_walk(n: i32, rng: &mut Mulberry32) -> Vec<Point> {
    let cells: usize = (n * n) as usize;
    let mut path: Path = Path::new(cells);
    if n <= 0 {
        return Vec::new();
    }
    let mut current: Point = Point::new(rng.below(n as usize) as i32, rng.below(n as usize) as i32);
    path.push(current);

    while path.len() < cells {
        let free: Vec<Point> = current
            .neighbors_in(n)
            .filter(|p| !path.contains(*p))
            .collect();
        if free.is_empty() {
            break;
        }
        current = free[rng.below(free.len())];
        path.push(current);
    }
    path.into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_simple_path(cells: &[Point], size: i32) -> bool {
        let unique: HashSet<Point> = cells.iter().copied().collect();
        unique.len() == cells.len()
            && cells.iter().all(|p| p.in_grid(size))
            && cells.windows(2).all(|w| w[0].manhattan(w[1]) == 1)
    }

    #[test]
    fn pattern_follows_level_id() {
        assert_eq!(FallbackPattern::for_level(0), FallbackPattern::CornerSpiral);
        assert_eq!(FallbackPattern::for_level(11), FallbackPattern::HorizontalSnake);
        assert_eq!(FallbackPattern::for_level(17), FallbackPattern::ZigZag);
        assert_eq!(FallbackPattern::for_level(200), FallbackPattern::HorizontalSnake);
    }

    #[test]
    fn full_patterns_list_every_cell_once() {
        for index in 0..PATTERN_COUNT {
            let pattern = FallbackPattern::from_repr(index).unwrap();
            if pattern == FallbackPattern::RandomWalk {
                continue;
            }
            for size in 1..=8 {
                let cells = pattern_cells(pattern, size, &mut Mulberry32::new(0));
                let unique: HashSet<Point> = cells.iter().copied().collect();
                assert_eq!(cells.len(), (size * size) as usize, "{pattern:?} size {size}");
                assert_eq!(unique.len(), cells.len(), "{pattern:?} size {size}");
            }
        }
    }

    #[test]
    fn snakes_cover_the_grid_as_paths() {
        for pattern in [FallbackPattern::HorizontalSnake, FallbackPattern::VerticalSnake] {
            let cells = pattern_cells(pattern, 5, &mut Mulberry32::new(0));
            assert!(is_simple_path(&cells, 5));
            assert_eq!(trace(&cells, 5), cells);
        }
    }

    #[test]
    fn corner_spiral_starts_in_the_corner() {
        let cells = pattern_cells(FallbackPattern::CornerSpiral, 4, &mut Mulberry32::new(0));
        assert_eq!(
            cells[..4],
            [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)]
        );
    }

    #[test]
    fn center_spiral_starts_in_the_center() {
        let cells = pattern_cells(FallbackPattern::CenterSpiral, 5, &mut Mulberry32::new(0));
        assert_eq!(cells[0], Point::new(2, 2));
        assert_eq!(cells[1], Point::new(2, 1));
        assert!(is_simple_path(&cells, 5));
    }

    #[test]
    fn zigzag_alternates_direction() {
        let cells = pattern_cells(FallbackPattern::ZigZag, 3, &mut Mulberry32::new(0));
        assert_eq!(
            cells[..6],
            [
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 1),
                Point::new(2, 0),
            ]
        );
    }

    #[test]
    fn random_walk_is_a_path() {
        for seed in 0..50 {
            let cells = pattern_cells(FallbackPattern::RandomWalk, 6, &mut Mulberry32::new(seed));
            assert!(cells.len() >= 3);
            assert!(is_simple_path(&cells, 6));
            assert_eq!(trace(&cells, 6), cells);
        }
    }

    #[test]
    fn every_fallback_is_a_valid_path() {
        for level_id in 0..(PATTERN_COUNT * 3) {
            for size in 2..=8 {
                let path = fallback_path(level_id, size, 3);
                assert!(path.len() >= 3, "level {level_id} size {size}");
                assert!(is_simple_path(&path, size as i32), "level {level_id} size {size}");
            }
        }
    }

    #[test]
    fn single_cell_grid_is_degenerate() {
        assert_eq!(fallback_path(2, 1, 1), vec![Point::new(0, 0)]);
    }

    #[test]
    fn short_trace_is_replaced_by_the_snake() {
        // Level 8 uses the zig-zag, which traces far fewer cells than the grid holds.
        let zigzag = pattern_cells(FallbackPattern::ZigZag, 8, &mut Mulberry32::new(0));
        assert!(trace(&zigzag, 8).len() < 62);

        let path = fallback_path(8, 8, 62);
        let snake = pattern_cells(FallbackPattern::HorizontalSnake, 8, &mut Mulberry32::new(0));
        assert_eq!(path, snake[..62]);
        assert!(is_simple_path(&path, 8));
    }

    #[test]
    fn long_enough_trace_is_kept() {
        // Level 11 uses the horizontal snake, which covers the grid.
        let path = fallback_path(11, 6, 30);
        assert_eq!(path.len(), 36);
        assert_eq!(path, trace(&path, 6));
    }

    #[test]
    fn trace_of_nothing_is_empty() {
        assert!(trace(&[], 4).is_empty());
    }
}
