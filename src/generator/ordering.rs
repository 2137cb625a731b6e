/*
ordering.rs

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

//! Order in which the path search tries the neighbors of a cell.
//!
//! The strategy changes at every step, which gives the paths their shape.
//! Strategies that sort draw exactly one random key per candidate, in candidate order, and sort
//! with a total order. The result does not depend on the sort algorithm.

use std::cmp::Ordering;
use strum_macros::FromRepr;

use super::point::Point;
use super::prng::Mulberry32;

/// Neighbor ordering strategies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, FromRepr)]
#[repr(u32)]
pub enum NeighborOrder {
    /// Plain shuffle.
    Shuffle,
    /// Random order biased towards going straight.
    Momentum,
    /// Horizontal moves first.
    Horizontal,
    /// Vertical moves first.
    Vertical,
    /// Cells far from the grid center first.
    Outward,
    /// Cells whose checkerboard color matches the path length parity first.
    Checkerboard,
    /// Reverse, then shuffle.
    ReverseShuffle,
}

impl NeighborOrder {
    /// Strategy for a step. `path_len` includes the cell being expanded.
    pub fn for_step(style: u32, path_len: usize) -> Self {
        let index: u32 = ((style as usize + path_len) % 7) as u32;
        NeighborOrder::from_repr(index).unwrap_or(NeighborOrder::Shuffle)
    }
}

/// Context of the cell being expanded.
#[derive(Debug, Copy, Clone)]
pub struct Step {
    /// Cell being expanded.
    pub current: Point,

    /// Cell before the current one, if any.
    pub previous: Option<Point>,

    /// Number of cells in the path, current one included.
    pub path_len: usize,

    /// Side length of the grid.
    pub grid_size: u32,
}

/// Sort the candidates in place according to the strategy.
pub fn order_neighbors(
    order: NeighborOrder,
    step: &Step,
    candidates: &mut Vec<Point>,
    rng: &mut Mulberry32,
) {
    let current: Point = step.current;
    match order {
        NeighborOrder::Shuffle => rng.shuffle(candidates),
        NeighborOrder::ReverseShuffle => {
            candidates.reverse();
            rng.shuffle(candidates);
        }
        NeighborOrder::Momentum => {
            // The straight continuation is farther from the previous cell than a turn.
            sort_by_key(candidates, rng, |p, r| {
                let reach: i32 = step.previous.map_or(0, |prev| prev.distance_sq(*p));
                -(r * f64::from(1 + reach))
            });
        }
        NeighborOrder::Horizontal => sort_by_score(candidates, rng, |p| {
            f64::from(-((p.x - current.x).abs() * 2 + (p.y - current.y).abs()))
        }),
        NeighborOrder::Vertical => sort_by_score(candidates, rng, |p| {
            f64::from(-((p.y - current.y).abs() * 2 + (p.x - current.x).abs()))
        }),
        NeighborOrder::Outward => {
            // Doubled coordinates keep the center on integers, so equal distances tie exactly.
            let center: i32 = step.grid_size as i32 - 1;
            sort_by_score(candidates, rng, |p| {
                let dx: i32 = 2 * p.x - center;
                let dy: i32 = 2 * p.y - center;
                f64::from(-(dx * dx + dy * dy))
            });
        }
        NeighborOrder::Checkerboard => {
            let prefer_even: bool = step.path_len % 2 == 0;
            sort_by_score(candidates, rng, |p| {
                let even: bool = (p.x + p.y) % 2 == 0;
                if even == prefer_even { 0.0 } else { 1.0 }
            });
        }
    }
}

/// Sort by ascending score, ties broken by a random draw.
fn sort_by_score<F>(candidates: &mut Vec<Point>, rng: &mut Mulberry32, score: F)
where
    F: Fn(&Point) -> f64,
{
    let mut keyed: Vec<(f64, f64, Point)> = candidates
        .iter()
        .map(|p| (score(p), rng.next_f64(), *p))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
    candidates.clear();
    candidates.extend(keyed.into_iter().map(|(_, _, p)| p));
}

/// Sort by ascending key, the key being computed from the candidate and a random draw.
fn sort_by_key<F>(candidates: &mut Vec<Point>, rng: &mut Mulberry32, key: F)
where
    F: Fn(&Point, f64) -> f64,
{
    let mut keyed: Vec<(f64, Point)> = candidates
        .iter()
        .map(|p| (key(p, rng.next_f64()), *p))
        .collect();
    keyed.sort_by(|a, b| match a.0.total_cmp(&b.0) {
        Ordering::Equal => a.1.cmp(&b.1),
        o => o,
    });
    candidates.clear();
    candidates.extend(keyed.into_iter().map(|(_, p)| p));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn step(current: Point, previous: Option<Point>, path_len: usize) -> Step {
        Step {
            current,
            previous,
            path_len,
            grid_size: 5,
        }
    }

    fn around(p: Point) -> Vec<Point> {
        p.neighbors_in(5).collect()
    }

    #[test]
    fn strategy_cycles_with_path_length() {
        assert_eq!(NeighborOrder::for_step(0, 0), NeighborOrder::Shuffle);
        assert_eq!(NeighborOrder::for_step(2, 3), NeighborOrder::Checkerboard);
        assert_eq!(NeighborOrder::for_step(6, 1), NeighborOrder::Shuffle);
        assert_eq!(NeighborOrder::for_step(6, 0), NeighborOrder::ReverseShuffle);
    }

    #[test]
    fn horizontal_moves_come_first() {
        let c = Point::new(2, 2);
        let mut rng = Mulberry32::new(1);
        let mut n = around(c);
        order_neighbors(NeighborOrder::Horizontal, &step(c, None, 1), &mut n, &mut rng);
        assert!(n[..2].iter().all(|p| p.y == c.y));
        assert!(n[2..].iter().all(|p| p.x == c.x));
    }

    #[test]
    fn vertical_moves_come_first() {
        let c = Point::new(2, 2);
        let mut rng = Mulberry32::new(1);
        let mut n = around(c);
        order_neighbors(NeighborOrder::Vertical, &step(c, None, 1), &mut n, &mut rng);
        assert!(n[..2].iter().all(|p| p.x == c.x));
        assert!(n[2..].iter().all(|p| p.y == c.y));
    }

    #[test]
    fn outward_prefers_cells_away_from_center() {
        let c = Point::new(1, 2);
        let mut rng = Mulberry32::new(3);
        let mut n = around(c);
        order_neighbors(NeighborOrder::Outward, &step(c, None, 1), &mut n, &mut rng);
        assert_eq!(n[0], Point::new(0, 2));
        assert_eq!(n[3], Point::new(2, 2));
    }

    #[test]
    fn outward_ties_are_broken_by_the_random_key() {
        // (2,4) and (3,5) are at the same distance from the center of an 8x8 grid.
        let c = Point::new(3, 4);
        let s = Step {
            current: c,
            previous: None,
            path_len: 4,
            grid_size: 8,
        };
        let mut orders = HashSet::new();
        for seed in 0..20 {
            let mut rng = Mulberry32::new(seed);
            let mut keys = rng.clone();
            let first_key = keys.next_f64();
            let second_key = keys.next_f64();
            let mut n = vec![Point::new(2, 4), Point::new(3, 5)];
            order_neighbors(NeighborOrder::Outward, &s, &mut n, &mut rng);
            let expected = if first_key < second_key {
                vec![Point::new(2, 4), Point::new(3, 5)]
            } else {
                vec![Point::new(3, 5), Point::new(2, 4)]
            };
            assert_eq!(n, expected, "seed {seed}");
            orders.insert(n);
        }
        assert_eq!(orders.len(), 2);
    }

    #[test]
    fn checkerboard_follows_path_length_parity() {
        let c = Point::new(1, 1);
        let cells = vec![Point::new(1, 0), Point::new(0, 0), Point::new(3, 0), Point::new(2, 0)];
        let even: HashSet<Point> = HashSet::from([Point::new(0, 0), Point::new(2, 0)]);
        let odd: HashSet<Point> = HashSet::from([Point::new(1, 0), Point::new(3, 0)]);

        let mut n = cells.clone();
        let mut rng = Mulberry32::new(2);
        order_neighbors(NeighborOrder::Checkerboard, &step(c, None, 4), &mut n, &mut rng);
        assert_eq!(n[..2].iter().copied().collect::<HashSet<Point>>(), even);

        let mut n = cells.clone();
        let mut rng = Mulberry32::new(2);
        order_neighbors(NeighborOrder::Checkerboard, &step(c, None, 3), &mut n, &mut rng);
        assert_eq!(n[..2].iter().copied().collect::<HashSet<Point>>(), odd);
    }

    #[test]
    fn momentum_favors_going_straight() {
        // Coming from (1,2), the straight continuation of (2,2) is (3,2).
        let c = Point::new(2, 2);
        let s = step(c, Some(Point::new(1, 2)), 3);
        let mut straight_first = 0;
        for seed in 0..200 {
            let mut n = vec![Point::new(2, 1), Point::new(2, 3), Point::new(3, 2)];
            order_neighbors(NeighborOrder::Momentum, &s, &mut n, &mut Mulberry32::new(seed));
            if n[0] == Point::new(3, 2) {
                straight_first += 1;
            }
        }
        assert!(straight_first > 100, "{straight_first}");
    }

    #[test]
    fn every_strategy_keeps_the_candidates() {
        let c = Point::new(2, 2);
        for index in 0..7 {
            let order = NeighborOrder::from_repr(index).unwrap();
            let mut rng = Mulberry32::new(index);
            let mut n = around(c);
            order_neighbors(order, &step(c, Some(Point::new(1, 2)), 4), &mut n, &mut rng);
            let mut sorted = n.clone();
            sorted.sort();
            let mut expected = around(c);
            expected.sort();
            assert_eq!(sorted, expected, "{order:?}");
        }
    }

    #[test]
    fn ordering_is_reproducible() {
        let c = Point::new(2, 2);
        for index in 0..7 {
            let order = NeighborOrder::from_repr(index).unwrap();
            let mut a = around(c);
            let mut b = around(c);
            order_neighbors(order, &step(c, None, 2), &mut a, &mut Mulberry32::new(11));
            order_neighbors(order, &step(c, None, 2), &mut b, &mut Mulberry32::new(11));
            assert_eq!(a, b, "{order:?}");
        }
    }
}
