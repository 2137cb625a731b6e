/*
verify.rs

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

//! Verify a range of levels.
//!
//! The [`verify`] function generates every level in the range and collects:
//!
//! * The levels that cannot be generated or that break an invariant.
//! * The pairs of levels with the same grid size and the same cells. The generator does not
//!   guarantee that all the levels are different, so duplicates are reported, not rejected.
//! * Average grid size, node count, coverage, and number of turns for each difficulty tier.
//! * A few checks on the difficulty progression.
//!
//! Nothing is written to disk. The [`Report`] object can be printed or serialized to JSON.

use chrono::Local;
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use crate::generator::LevelGenerator;
use crate::generator::difficulty::Tier;
use crate::generator::level::{Level, LevelMetrics};
use crate::generator::point::Point;

/// The first level must not have more nodes than this.
const EASY_MAX_NODES: usize = 5;

/// The last level must cover at least this percentage of its grid.
const HARD_MIN_COVERAGE: f64 = 80.0;

/// The grid size is allowed to shrink for the levels up to this ID.
const GRID_CHECK_FROM: u32 = 10;

/// Level that cannot be generated or that breaks an invariant.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LevelError {
    pub level_id: u32,
    pub message: String,
}

/// Statistics for a difficulty tier.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TierSummary {
    pub tier: Tier,
    pub levels: usize,
    pub avg_grid_size: f64,
    pub avg_nodes: f64,
    pub avg_coverage: f64,
    pub avg_direction_changes: f64,

    /// First level of the tier, with its metrics.
    pub sample: (u32, LevelMetrics),
}

/// Progression checks.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Checks {
    /// First level ID and whether it is easy enough.
    pub first_level_easy: Option<(u32, bool)>,

    /// Last level ID and whether it is challenging enough.
    pub last_level_hard: Option<(u32, bool)>,

    /// Levels with a smaller grid than the level before them.
    pub grid_regressions: Vec<u32>,
}

/// Verification results.
#[derive(Serialize, Debug, Clone)]
pub struct Report {
    /// Local date and time of the verification.
    pub generated_at: String,

    /// First level ID.
    pub from: u32,

    /// Last level ID.
    pub to: u32,

    /// Number of levels successfully generated.
    pub generated: usize,

    /// Levels that cannot be generated or that break an invariant.
    pub errors: Vec<LevelError>,

    /// Pairs of identical levels, lower ID first.
    pub duplicates: Vec<(u32, u32)>,

    /// Levels produced by a fallback pattern.
    pub fallbacks: Vec<u32>,

    /// Statistics per tier, easiest first.
    pub tiers: Vec<TierSummary>,

    /// Progression checks.
    pub checks: Checks,

    /// Total number of cells pushed by the search.
    pub iterations: usize,

    /// Total generation time in seconds.
    pub duration: f32,
}

impl Report {
    /// Whether no error, no duplicate, and no failed check has been found.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
            && self.duplicates.is_empty()
            && self.checks.grid_regressions.is_empty()
            && self.checks.first_level_easy.is_none_or(|(_, ok)| ok)
            && self.checks.last_level_hard.is_none_or(|(_, ok)| ok)
    }
}

/// Generate and check the levels in the range.
pub fn verify(generator: &LevelGenerator, range: RangeInclusive<u32>) -> Report {
    let from: u32 = *range.start();
    let to: u32 = *range.end();
    let mut levels: Vec<Level> = Vec::new();
    let mut errors: Vec<LevelError> = Vec::new();
    let mut fallbacks: Vec<u32> = Vec::new();
    let mut iterations: usize = 0;
    let mut duration: f32 = 0.0;

    for level_id in range {
        match generator.generate_with_stats(level_id) {
            Ok((level, stats)) => {
                iterations += stats.iterations;
                duration += stats.duration;
                if stats.fallback.is_some() {
                    fallbacks.push(level_id);
                }
                for violation in level.validate() {
                    warn!("Level {level_id}: {violation}");
                    errors.push(LevelError {
                        level_id,
                        message: violation.to_string(),
                    });
                }
                levels.push(level);
            }
            Err(e) => {
                warn!("{e}");
                errors.push(LevelError {
                    level_id,
                    message: e.to_string(),
                });
            }
        }
    }
    debug!("Generated {} levels in {duration}s", levels.len());

    Report {
        generated_at: Local::now().format("%c").to_string(),
        from,
        to,
        generated: levels.len(),
        errors,
        duplicates: find_duplicates(&levels),
        fallbacks,
        tiers: summarize_tiers(&levels),
        checks: check_progression(&levels),
        iterations,
        duration,
    }
}

/// Return the pairs of levels with the same grid size and the same cells.
pub fn find_duplicates(levels: &[Level]) -> Vec<(u32, u32)> {
    let mut seen: HashMap<(u32, &[Point]), Vec<u32>> = HashMap::new();
    let mut pairs: Vec<(u32, u32)> = Vec::new();

    for level in levels {
        let ids: &mut Vec<u32> = seen
            .entry((level.grid_size, level.nodes.as_slice()))
            .or_default();
        for earlier in ids.iter() {
            warn!("Level {} is identical to level {}", level.id, earlier);
            pairs.push((*earlier, level.id));
        }
        ids.push(level.id);
    }
    pairs
}

/// Compute the statistics for each tier that has levels.
fn summarize_tiers(levels: &[Level]) -> Vec<TierSummary> {
    let mut summaries: Vec<TierSummary> = Vec::new();

    for tier in Tier::ALL {
        let metrics: Vec<(u32, LevelMetrics)> = levels
            .iter()
            .filter(|level| tier.levels().contains(&level.id))
            .map(|level| (level.id, level.metrics()))
            .collect();
        let Some(sample) = metrics.first().copied() else {
            continue;
        };
        let count: f64 = metrics.len() as f64;
        let average = |f: fn(&LevelMetrics) -> f64| -> f64 {
            metrics.iter().map(|(_, m)| f(m)).sum::<f64>() / count
        };
        summaries.push(TierSummary {
            tier,
            levels: metrics.len(),
            avg_grid_size: average(|m| f64::from(m.grid_size)),
            avg_nodes: average(|m| m.node_count as f64),
            avg_coverage: average(|m| m.coverage),
            avg_direction_changes: average(|m| m.direction_changes as f64),
            sample,
        });
    }
    summaries
}

/// Check that the difficulty goes up.
fn check_progression(levels: &[Level]) -> Checks {
    let first_level_easy: Option<(u32, bool)> = levels
        .first()
        .map(|level| (level.id, level.nodes.len() <= EASY_MAX_NODES));
    let last_level_hard: Option<(u32, bool)> = levels
        .last()
        .map(|level| (level.id, level.metrics().coverage.round() >= HARD_MIN_COVERAGE));
    let grid_regressions: Vec<u32> = levels
        .windows(2)
        .filter(|w| w[1].id > GRID_CHECK_FROM && w[1].grid_size < w[0].grid_size)
        .map(|w| w[1].id)
        .collect();

    Checks {
        first_level_easy,
        last_level_hard,
        grid_regressions,
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let requested: u32 = (self.to + 1).saturating_sub(self.from);
        writeln!(f, "Verification of levels {} to {}", self.from, self.to)?;
        writeln!(f, "Generated on {}", self.generated_at)?;
        writeln!(f)?;

        writeln!(f, "GENERATION RESULTS:")?;
        writeln!(f, "   Total levels generated: {}/{}", self.generated, requested)?;
        writeln!(f, "   Errors: {}", self.errors.len())?;
        writeln!(f, "   Fallback levels: {}", self.fallbacks.len())?;
        writeln!(f, "   Search iterations: {}", self.iterations)?;
        writeln!(f, "   Generation time: {:.3}s", self.duration)?;
        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "ERRORS:")?;
            for e in &self.errors {
                writeln!(f, "   Level {}: {}", e.level_id, e.message)?;
            }
        }
        if !self.fallbacks.is_empty() {
            let ids: Vec<String> = self.fallbacks.iter().map(u32::to_string).collect();
            writeln!(f, "   Fallback used for levels: {}", ids.join(", "))?;
        }

        writeln!(f)?;
        writeln!(f, "DUPLICATE CHECK:")?;
        if self.duplicates.is_empty() {
            writeln!(f, "   All levels are unique")?;
        } else {
            writeln!(f, "   Found {} duplicate pairs:", self.duplicates.len())?;
            for (a, b) in &self.duplicates {
                writeln!(f, "      Level {a} === Level {b}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "DIFFICULTY PROGRESSION:")?;
        for t in &self.tiers {
            let range: RangeInclusive<u32> = t.tier.levels();
            writeln!(f)?;
            if range.start() == range.end() {
                writeln!(f, "   Level {} ({}):", range.start(), t.tier)?;
            } else {
                writeln!(f, "   Levels {}-{} ({}):", range.start(), range.end(), t.tier)?;
            }
            writeln!(
                f,
                "      Grid: {g:.0}x{g:.0}, Nodes: ~{:.0}, Coverage: ~{:.0}%, Turns: ~{:.0}",
                t.avg_nodes,
                t.avg_coverage,
                t.avg_direction_changes,
                g = t.avg_grid_size
            )?;
            let (id, m) = t.sample;
            writeln!(
                f,
                "      Sample (Level {id}): {s}x{s} grid, {} nodes",
                m.node_count,
                s = m.grid_size
            )?;
        }

        writeln!(f)?;
        writeln!(f, "VALIDATION CHECKS:")?;
        if let Some((id, ok)) = self.checks.first_level_easy {
            let verdict: &str = if ok { "easy enough" } else { "might be too hard" };
            writeln!(f, "   Level {id}: {verdict}")?;
        }
        if let Some((id, ok)) = self.checks.last_level_hard {
            let verdict: &str = if ok {
                "very challenging"
            } else {
                "might be too easy"
            };
            writeln!(f, "   Level {id}: {verdict}")?;
        }
        if self.checks.grid_regressions.is_empty() {
            writeln!(f, "   Grid size progression looks good")?;
        } else {
            for id in &self.checks.grid_regressions {
                writeln!(f, "   Level {id} has a smaller grid than level {}", id - 1)?;
            }
        }
        if self.is_clean() {
            writeln!(f)?;
            writeln!(f, "All checks passed")?;
        }
        Ok(())
    }
}
