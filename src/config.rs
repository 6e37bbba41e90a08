// ABOUTME: Environment-driven runtime configuration for the data layer
// ABOUTME: Database URL, preferences file location, and tracking defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use std::env;
use std::path::PathBuf;

/// Default daily step goal when none is configured
pub const DEFAULT_DAILY_STEP_GOAL: u32 = 10_000;

/// Default rest timer between sets, in seconds
pub const DEFAULT_REST_TIMER_SECS: u32 = 60;

/// Runtime configuration, read from the environment with sensible defaults
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL
    pub database_url: String,
    /// Location of the JSON preferences file
    pub preferences_path: PathBuf,
    /// Daily step goal used by the step tracker
    pub daily_step_goal: u32,
    /// Rest timer default between sets, in seconds
    pub rest_timer_secs: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `FITTRACK_DATABASE_URL`, `FITTRACK_DATA_DIR`,
    /// `FITTRACK_STEP_GOAL`.
    #[must_use]
    pub fn from_env() -> Self {
        let data_dir = env::var("FITTRACK_DATA_DIR").map_or_else(|_| PathBuf::from("."), PathBuf::from);

        let database_url =
            env::var("FITTRACK_DATABASE_URL").unwrap_or_else(|_| "sqlite:fittrack.db".into());

        let daily_step_goal = env::var("FITTRACK_STEP_GOAL")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_DAILY_STEP_GOAL);

        Self {
            database_url,
            preferences_path: data_dir.join("preferences.json"),
            daily_step_goal,
            rest_timer_secs: DEFAULT_REST_TIMER_SECS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:fittrack.db".into(),
            preferences_path: PathBuf::from("preferences.json"),
            daily_step_goal: DEFAULT_DAILY_STEP_GOAL,
            rest_timer_secs: DEFAULT_REST_TIMER_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_step_goal() {
        let config = Config::default();
        assert_eq!(config.daily_step_goal, DEFAULT_DAILY_STEP_GOAL);
        assert_eq!(config.database_url, "sqlite:fittrack.db");
    }
}
