/*
cli_options.rs

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

//! Process command-line options.
//!
//! # Examples
//!
//! Display a level:
//!
//! ```
//! $ onestroke --level 3
//! ```
//!
//! In the grid, `S` is the start cell, `#` the other cells to visit, and `.` the empty cells.
//!
//! Print the level as JSON, without its solution, as a game client would receive it:
//!
//! ```
//! $ onestroke --level 3 --json
//! ```
//!
//! Print the solution:
//!
//! ```
//! $ onestroke --level 3 --hint --json
//! ```
//!
//! Generate levels 100 to 200 and print a report:
//!
//! ```
//! $ onestroke --verify --from 100 --to 200
//! ```

use clap::{ArgGroup, Parser};
use log::{LevelFilter, debug};
use rand::Rng;
use std::error::Error;
use std::path::PathBuf;

use onestroke::config::{COPYRIGHT_NOTICE, GeneratorConfig};
use onestroke::verify::{self, Report};
use onestroke::{Level, LevelGenerator, MAX_LEVEL, Point, is_valid_level};

/// Generate and verify Onestroke levels.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
#[command(group(ArgGroup::new("mode").required(true).args(["level", "random", "verify"])))]
struct Args {
    /// ID of the level to generate
    #[arg(short, long)]
    level: Option<u32>,

    /// Generate a random level
    #[arg(short, long, default_value_t = false)]
    random: bool,

    /// Print the solution of the level
    #[arg(long, default_value_t = false)]
    hint: bool,

    /// Generate a range of levels and check them
    #[arg(short, long, default_value_t = false)]
    verify: bool,

    /// First level to verify
    #[arg(long, default_value_t = 1, requires = "verify")]
    from: u32,

    /// Last level to verify
    #[arg(long, default_value_t = MAX_LEVEL, requires = "verify")]
    to: u32,

    /// Print the result as JSON
    #[arg(short, long, default_value_t = false)]
    json: bool,

    /// JSON file with the generator settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

/// Parse and process command-line options. Return the exit code.
pub fn parse() -> Result<u8, Box<dyn Error>> {
    let args: Args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    let config: GeneratorConfig = match &args.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };
    let generator: LevelGenerator = LevelGenerator::new(config);
    debug!("Settings: {:?}", generator.config());

    //
    // Verify a range of levels
    //
    if args.verify {
        if !is_valid_level(args.from) || !is_valid_level(args.to) || args.from > args.to {
            eprintln!(
                "Invalid range {}-{}. Levels go from 1 to {MAX_LEVEL}.",
                args.from, args.to
            );
            return Ok(1);
        }
        let report: Report = verify::verify(&generator, args.from..=args.to);
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{report}");
        }
        return Ok(if report.errors.is_empty() { 0 } else { 2 });
    }

    //
    // Generate one level
    //
    let level_id: u32 = match args.level {
        Some(id) => id,
        None => rand::rng().random_range(1..=MAX_LEVEL),
    };
    if !is_valid_level(level_id) {
        eprintln!("Unknown level {level_id}. Levels go from 1 to {MAX_LEVEL}.");
        return Ok(1);
    }

    let level: Level = generator.generate(level_id)?;
    match (args.json, args.hint) {
        (true, true) => println!("{}", serde_json::to_string_pretty(&level.hint())?),
        (true, false) => println!("{}", serde_json::to_string_pretty(&level.data())?),
        (false, hint) => print_level(&level, hint),
    }
    Ok(0)
}

/// Display the grid. `S` is the start, `#` the other nodes.
fn print_level(level: &Level, hint: bool) {
    println!(
        "Level {}: {}x{} grid, {} nodes\n",
        level.id,
        level.grid_size,
        level.grid_size,
        level.nodes.len()
    );
    let size: i32 = level.grid_size as i32;
    for y in 0..size {
        let row: Vec<&str> = (0..size)
            .map(|x| {
                let p: Point = Point::new(x, y);
                if p == level.start {
                    "S"
                } else if level.nodes.binary_search(&p).is_ok() {
                    "#"
                } else {
                    "."
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }

    if hint {
        let path: Vec<String> = level.solution.iter().map(Point::to_string).collect();
        println!("\nSolution: {}", path.join(" "));
    }
}
