/*
config.rs

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

//! Generator settings.
//!
//! The settings only bound the search effort. Changing them changes the generated levels, so all
//! the processes that serve the same levels must share the same settings.
//!
//! Settings can be loaded from a JSON file. Missing fields keep their default value:
//!
//! ```json
//! { "max_attempts": 350, "max_attempts_hard": 500, "hard_from": 100, "max_steps": 2000 }
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub const COPYRIGHT_NOTICE: &str = "Copyright 2025 Hervé Quatremain
License GPL-3.0-or-later <https://gnu.org/licenses/gpl.html>.
This is free software: you are free to change and redistribute it.
There is NO WARRANTY, to the extent permitted by law.";

/// Type of errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The file cannot be read.
    Io(std::io::Error),

    /// The file is not a valid JSON settings document.
    Parse(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read the configuration: {e}"),
            ConfigError::Parse(e) => write!(f, "invalid configuration: {e}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Search budget.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of search attempts before using a fallback pattern.
    pub max_attempts: u32,

    /// Number of search attempts for the levels above [`GeneratorConfig::hard_from`].
    pub max_attempts_hard: u32,

    /// Last level that uses [`GeneratorConfig::max_attempts`].
    pub hard_from: u32,

    /// Maximum number of cells pushed during one search attempt.
    pub max_steps: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 350,
            max_attempts_hard: 500,
            hard_from: 100,
            max_steps: 2000,
        }
    }
}

impl GeneratorConfig {
    /// Settings that never search, so that every level uses its fallback pattern.
    pub fn fallback_only() -> Self {
        Self {
            max_attempts: 0,
            max_attempts_hard: 0,
            ..Self::default()
        }
    }

    /// Number of attempts for the given level.
    pub fn attempts_for(&self, level_id: u32) -> u32 {
        if level_id > self.hard_from {
            self.max_attempts_hard
        } else {
            self.max_attempts
        }
    }

    /// Read the settings from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Configuration file: {path:?}");
        let file: File = File::open(path)?;
        let reader: BufReader<File> = BufReader::new(file);
        let config: GeneratorConfig = serde_json::from_reader(reader)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hard_levels_get_more_attempts() {
        let config = GeneratorConfig::default();
        assert_eq!(config.attempts_for(100), 350);
        assert_eq!(config.attempts_for(101), 500);
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let config: GeneratorConfig = serde_json::from_str(r#"{ "max_steps": 10 }"#).unwrap();
        assert_eq!(config.max_steps, 10);
        assert_eq!(config.max_attempts, 350);
        assert_eq!(config.hard_from, 100);
    }

    #[test]
    fn fallback_only_never_searches() {
        let config = GeneratorConfig::fallback_only();
        assert_eq!(config.attempts_for(1), 0);
        assert_eq!(config.attempts_for(200), 0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GeneratorConfig::from_file(Path::new("/nonexistent/onestroke.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("onestroke-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let err = GeneratorConfig::from_file(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
