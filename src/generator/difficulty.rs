/*
difficulty.rs

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

//! Difficulty curve.
//!
//! The level ID drives three parameters:
//!
//! * The grid side length, which grows by steps from 3x3 to [`MAX_GRID_SIZE`].
//! * The coverage fraction, which is the part of the grid cells that the path must visit.
//!   Early levels have floors so that they are not trivially short.
//! * The style, a small number that selects the start and neighbor ordering heuristics.
//!   It is computed from several modular hashes of the ID so that levels of the same tier do not
//!   all look alike.
//!
//! The breakpoints and multipliers are tuning values.

use serde::Serialize;
use std::fmt;
use std::ops::RangeInclusive;

/// Largest grid side length.
pub const MAX_GRID_SIZE: u32 = 8;

/// Highest supported level ID.
pub const MAX_LEVEL: u32 = 200;

/// Number of styles.
pub const STYLE_COUNT: u32 = 7;

/// Grid side length, by level ID upper bound.
const GRID_STEPS: [(u32, u32); 5] = [(4, 3), (10, 4), (16, 5), (31, 6), (60, 7)];

/// Coverage floors for the first tiers, by level ID upper bound.
const COVERAGE_FLOORS: [(u32, f64); 3] = [(5, 0.65), (15, 0.75), (31, 0.85)];

/// Above this level ID, coverage is pushed towards [`MAX_COVERAGE`].
const HARD_LEVEL: u32 = 100;

/// Coverage ceiling for the hardest levels.
const MAX_COVERAGE: f64 = 0.98;

/// Parameters derived from the level ID.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Curve {
    /// Side length of the square grid.
    pub grid_size: u32,

    /// Fraction of the grid cells that the path must visit.
    pub coverage: f64,

    /// Heuristic selector, between 0 and [`STYLE_COUNT`] - 1.
    pub style: u32,
}

impl Curve {
    /// Number of cells the path must visit.
    pub fn target_nodes(&self) -> usize {
        let cells: f64 = f64::from(self.grid_size * self.grid_size);
        ((cells * self.coverage).floor() as usize).max(3)
    }
}

/// Return the parameters of the given level.
pub fn curve(level_id: u32) -> Curve {
    Curve {
        grid_size: grid_size(level_id),
        coverage: coverage(level_id),
        style: style(level_id),
    }
}

/// Whether the level ID is in the supported range.
pub fn is_valid_level(level_id: u32) -> bool {
    (1..=MAX_LEVEL).contains(&level_id)
}

/// Grid side length for the level.
pub fn grid_size(level_id: u32) -> u32 {
    GRID_STEPS
        .iter()
        .find(|(last, _)| level_id <= *last)
        .map_or(MAX_GRID_SIZE, |(_, size)| *size)
}

/// Raw difficulty, from 0.2 for the first level to 1.5 for the last one.
fn difficulty(level_id: u32) -> f64 {
    let id: f64 = f64::from(level_id);
    match level_id {
        0..=4 => 0.2 + (id / 4.0) * 0.15,
        5..=10 => 0.35 + ((id - 4.0) / 6.0) * 0.35,
        11..=20 => 0.70 + ((id - 10.0) / 10.0) * 0.20,
        21..=31 => 0.90 + ((id - 20.0) / 11.0) * 0.10,
        32..=100 => 1.0,
        101..=130 => 1.0 + ((id - 100.0) / 30.0) * 0.15,
        131..=170 => 1.15 + ((id - 130.0) / 40.0) * 0.2,
        _ => 1.35 + ((id - 170.0) / 30.0) * 0.15,
    }
}

/// Fraction of the grid cells that the path must visit.
pub fn coverage(level_id: u32) -> f64 {
    let mut factor: f64 = 0.4 + difficulty(level_id) * 0.5;

    if let Some((_, floor)) = COVERAGE_FLOORS
        .iter()
        .find(|(last, _)| level_id >= 1 && level_id <= *last)
    {
        factor = factor.max(*floor);
    }
    if level_id > HARD_LEVEL {
        factor = (factor * 1.1).min(MAX_COVERAGE);
    }
    factor
}

/// Heuristic selector for the level.
pub fn style(level_id: u32) -> u32 {
    let id: u64 = u64::from(level_id);
    let a: u64 = (id * 7) % 5;
    let b: u64 = (id * 13) % 5;
    let c: u64 = (id * 19) % 5;
    ((a + b + c) % u64::from(STYLE_COUNT)) as u32
}

/// Named difficulty bands, used for reporting.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    Tutorial,
    EasyStart,
    Beginner,
    Intermediate,
    Advanced,
    Expert,
    Master,
    Extreme,
    Insane,
    Nightmare,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            Tier::Tutorial => "Tutorial",
            Tier::EasyStart => "Easy Start",
            Tier::Beginner => "Beginner",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
            Tier::Expert => "Expert",
            Tier::Master => "Master",
            Tier::Extreme => "Extreme",
            Tier::Insane => "Insane",
            Tier::Nightmare => "Nightmare",
        };
        write!(f, "{name}")
    }
}

impl Tier {
    /// All the tiers, easiest first.
    pub const ALL: [Tier; 10] = [
        Tier::Tutorial,
        Tier::EasyStart,
        Tier::Beginner,
        Tier::Intermediate,
        Tier::Advanced,
        Tier::Expert,
        Tier::Master,
        Tier::Extreme,
        Tier::Insane,
        Tier::Nightmare,
    ];

    /// Level IDs in the tier.
    pub fn levels(self) -> RangeInclusive<u32> {
        match self {
            Tier::Tutorial => 1..=1,
            Tier::EasyStart => 2..=4,
            Tier::Beginner => 5..=10,
            Tier::Intermediate => 11..=16,
            Tier::Advanced => 17..=31,
            Tier::Expert => 32..=60,
            Tier::Master => 61..=100,
            Tier::Extreme => 101..=130,
            Tier::Insane => 131..=170,
            Tier::Nightmare => 171..=MAX_LEVEL,
        }
    }

    /// Return the tier of the level, or None if the level is out of range.
    pub fn from_level(level_id: u32) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.levels().contains(&level_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_schedule() {
        assert_eq!(grid_size(1), 3);
        assert_eq!(grid_size(4), 3);
        assert_eq!(grid_size(5), 4);
        assert_eq!(grid_size(11), 5);
        assert_eq!(grid_size(17), 6);
        assert_eq!(grid_size(32), 7);
        assert_eq!(grid_size(61), 8);
        assert_eq!(grid_size(MAX_LEVEL), MAX_GRID_SIZE);
    }

    #[test]
    fn grid_size_never_decreases() {
        for id in 1..MAX_LEVEL {
            assert!(grid_size(id + 1) >= grid_size(id), "level {id}");
        }
    }

    #[test]
    fn first_level_is_small() {
        let c = curve(1);
        assert_eq!(c.grid_size, 3);
        assert_eq!(c.target_nodes(), 5);
    }

    #[test]
    fn early_floors_apply() {
        assert!(coverage(1) >= 0.65);
        assert!(coverage(6) >= 0.75);
        assert!(coverage(16) >= 0.85);
    }

    #[test]
    fn last_level_is_near_full() {
        let c = curve(MAX_LEVEL);
        assert_eq!(c.grid_size, 8);
        assert!((c.coverage - 0.98).abs() < 1e-9);
        assert_eq!(c.target_nodes(), 62);
    }

    #[test]
    fn target_never_exceeds_grid() {
        for id in 1..=MAX_LEVEL {
            let c = curve(id);
            let cells = (c.grid_size * c.grid_size) as usize;
            assert!(c.target_nodes() <= cells, "level {id}");
            assert!(c.target_nodes() >= 3, "level {id}");
        }
    }

    #[test]
    fn style_is_bounded() {
        for id in 0..1000 {
            assert!(style(id) < STYLE_COUNT);
        }
    }

    #[test]
    fn tiers_cover_the_range() {
        for id in 1..=MAX_LEVEL {
            assert!(Tier::from_level(id).is_some(), "level {id}");
        }
        assert_eq!(Tier::from_level(0), None);
        assert_eq!(Tier::from_level(MAX_LEVEL + 1), None);
        assert_eq!(Tier::from_level(1), Some(Tier::Tutorial));
        assert_eq!(Tier::from_level(200), Some(Tier::Nightmare));
        assert_eq!(Tier::EasyStart.to_string(), "Easy Start");
    }

    #[test]
    fn valid_level_range() {
        assert!(!is_valid_level(0));
        assert!(is_valid_level(1));
        assert!(is_valid_level(MAX_LEVEL));
        assert!(!is_valid_level(MAX_LEVEL + 1));
    }
}
