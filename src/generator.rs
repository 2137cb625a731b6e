/*
generator.rs

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

//! Generate levels from their ID.
//!
//! Levels are not stored. A level is computed again each time it is requested, so the generation
//! must be deterministic: the same ID always gives the same [`level::Level`].
//!
//! The generation goes through the following steps:
//!
//! * The [`difficulty::curve`] function derives the grid size, the number of cells to visit, and
//!   the style from the level ID.
//!
//! * A [`random_path::RandomPath`] object searches for a path of the requested length.
//!   Each attempt starts from a cell returned by [`start::select_start`], and orders the
//!   neighbors at each step with one of the [`ordering::NeighborOrder`] strategies.
//!   All the random draws come from one [`prng::Mulberry32`] stream seeded from the level ID.
//!   The stream is not reset between attempts.
//!
//! * If no attempt succeeds within the budget from [`crate::config::GeneratorConfig`], a
//!   search-free [`fallback::FallbackPattern`] provides the path.
//!
//! * [`level::Level::assemble`] builds the level from the path.

pub mod difficulty;
pub mod fallback;
pub mod level;
pub mod ordering;
pub mod path;
pub mod point;
pub mod prng;
pub mod random_path;
pub mod start;

use log::{debug, info, warn};
use serde::Serialize;
use std::time::Instant;

use crate::config::GeneratorConfig;
use difficulty::Curve;
use fallback::FallbackPattern;
use level::{GenerationError, Level};
use point::Point;
use prng::Mulberry32;
use random_path::RandomPath;

/// How a level has been produced.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Number of search attempts.
    pub attempts: u32,

    /// Total number of cells pushed by the search, over all the attempts.
    pub iterations: usize,

    /// Fallback pattern, if the search failed.
    pub fallback: Option<FallbackPattern>,

    /// Duration in seconds.
    pub duration: f32,
}

/// [`LevelGenerator`] object.
///
/// The object only holds the settings. Each call builds its own random stream and buffers, so a
/// single object can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    config: GeneratorConfig,
}

impl LevelGenerator {
    /// Create the object.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Return the settings.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the given level.
    ///
    /// # Errors
    ///
    /// Return an error if the path is too short to build a level, which only happens with
    /// degenerate grids.
    pub fn generate(&self, level_id: u32) -> Result<Level, GenerationError> {
        self.generate_with_stats(level_id).map(|(level, _)| level)
    }

    /// Return the solution of the given level. This is the hint shown to the player.
    pub fn solution(&self, level_id: u32) -> Result<Vec<Point>, GenerationError> {
        self.generate(level_id).map(|level| level.solution)
    }

    /// Generate the given level and report how it has been produced.
    pub fn generate_with_stats(
        &self,
        level_id: u32,
    ) -> Result<(Level, GenerationStats), GenerationError> {
        let start_time: Instant = Instant::now();
        let curve: Curve = difficulty::curve(level_id);
        let mut stats: GenerationStats = GenerationStats {
            attempts: 0,
            iterations: 0,
            fallback: None,
            duration: 0.0,
        };

        let cells: Vec<Point> = match self.search(level_id, &curve, &mut stats) {
            Some(cells) => cells,
            None => {
                let pattern: FallbackPattern = FallbackPattern::for_level(level_id);
                warn!(
                    "Level {level_id}: no path after {} attempts, using the {pattern:?} pattern",
                    stats.attempts
                );
                stats.fallback = Some(pattern);
                fallback::fallback_path(level_id, curve.grid_size, curve.target_nodes())
            }
        };

        let level: Level = Level::assemble(level_id, curve.grid_size, cells)?;
        stats.duration = start_time.elapsed().as_secs_f32();
        info!(
            "Level {level_id}: {}x{} grid, {} nodes, {} attempts, {} iterations",
            level.grid_size,
            level.grid_size,
            level.nodes.len(),
            stats.attempts,
            stats.iterations
        );
        Ok((level, stats))
    }

    /// Run the search attempts and return the first path found.
    fn search(
        &self,
        level_id: u32,
        curve: &Curve,
        stats: &mut GenerationStats,
    ) -> Option<Vec<Point>> {
        let max_attempts: u32 = self.config.attempts_for(level_id);
        let mut rng: Mulberry32 = Mulberry32::for_search(level_id);
        let mut search: RandomPath = RandomPath::new(
            curve.grid_size,
            curve.target_nodes(),
            curve.style,
            self.config.max_steps,
        );

        while stats.attempts < max_attempts {
            stats.attempts += 1;
            let start: Point =
                start::select_start(curve.grid_size, level_id, curve.style, &mut rng);
            let result = search.generate(start, &mut rng);
            stats.iterations += search.iteration;
            match result {
                Ok(path) => return Some(path.into_vec()),
                Err(e) => debug!("Level {level_id}: attempt {} failed: {e}", stats.attempts),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_level_is_a_tutorial() {
        let level = LevelGenerator::default().generate(1).unwrap();
        assert!(level.grid_size <= 3);
        assert!(level.nodes.len() <= 5);
        assert!(level.is_valid(), "{:?}", level.validate());
    }

    #[test]
    fn early_levels_are_found_by_search() {
        let generator = LevelGenerator::default();
        for id in 1..=20 {
            let (level, stats) = generator.generate_with_stats(id).unwrap();
            assert_eq!(stats.fallback, None, "level {id}");
            assert_eq!(level.nodes.len(), difficulty::curve(id).target_nodes());
        }
    }

    #[test]
    fn fallback_only_still_gives_valid_levels() {
        let generator = LevelGenerator::new(GeneratorConfig::fallback_only());
        for id in 1..=40 {
            let (level, stats) = generator.generate_with_stats(id).unwrap();
            assert_eq!(stats.attempts, 0);
            assert_eq!(stats.fallback, Some(FallbackPattern::for_level(id)));
            assert!(level.is_valid(), "level {id}: {:?}", level.validate());
        }
    }

    #[test]
    fn settings_are_kept() {
        let config = GeneratorConfig {
            max_steps: 10,
            ..GeneratorConfig::default()
        };
        assert_eq!(LevelGenerator::new(config).config(), &config);
        assert_eq!(LevelGenerator::default().config(), &GeneratorConfig::default());
    }

    #[test]
    fn solution_matches_generated_level() {
        let generator = LevelGenerator::default();
        for id in [3, 12, 27, 45] {
            assert_eq!(
                generator.solution(id).unwrap(),
                generator.generate(id).unwrap().solution
            );
        }
    }
}
