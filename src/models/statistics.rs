// ABOUTME: Derived statistics view models computed from workout and weight history
// ABOUTME: Nothing here is persisted; every value is a rollup over stored rows
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Summary figures over a user's completed workouts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutStatistics {
    /// Number of completed workouts
    pub total_workouts: u32,
    /// Sum of completed workout durations, in minutes
    pub total_duration_min: u32,
    /// Sum of recorded calories; workouts without data count as zero
    pub total_calories: u32,
    /// Exercise appearing in the most completed workouts
    pub most_frequent_exercise: Option<String>,
    /// Heaviest set ever recorded
    pub strongest_lift: Option<Lift>,
    /// Completed workouts in the current ISO week
    pub workouts_this_week: u32,
    /// Completed workouts in the previous ISO week
    pub workouts_last_week: u32,
    /// Integer-truncated average duration; zero when no workouts exist
    pub average_duration_min: u32,
}

/// An exercise paired with a lifted weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lift {
    /// Exercise name
    pub exercise: String,
    /// Weight in kilograms
    pub weight_kg: f64,
}

/// One point in a date-ordered progress series (weight history or
/// per-exercise max lift per session).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressPoint {
    /// Calendar day of the measurement
    pub date: NaiveDate,
    /// Weight in kilograms
    pub weight_kg: f64,
}
