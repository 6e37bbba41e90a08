// ABOUTME: Workout aggregate domain models: exercises, workouts, sets, routines
// ABOUTME: A workout embeds its ordered exercises, which embed their ordered sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An exercise definition, either system-seeded or user-created.
///
/// `created_by = None` marks a system exercise; custom exercises point
/// at the creating user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Exercise name
    pub name: String,
    /// How to perform the exercise
    pub description: String,
    /// Primary muscle group, e.g. "Chest"
    pub muscle_group: String,
    /// Whether this is a user-created exercise
    pub is_custom: bool,
    /// Creating user for custom exercises, `None` for system ones
    pub created_by: Option<i64>,
    /// Creation instant
    pub created_at: DateTime<Utc>,
}

/// A logged workout session with its ordered exercise list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Workout name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Total duration in minutes, set on completion
    pub duration_min: i32,
    /// Estimated calories burned, set on completion when known
    pub calories: Option<i32>,
    /// Calendar day of the workout (day precision only)
    pub date: NaiveDate,
    /// Session start instant
    pub start_time: DateTime<Utc>,
    /// Session end instant, set on completion
    pub end_time: Option<DateTime<Utc>>,
    /// Whether the session has been completed
    pub is_completed: bool,
    /// Exercises in `order_index` order
    pub exercises: Vec<WorkoutExercise>,
}

/// One exercise slot inside a workout, with its performed sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning workout
    pub workout_id: i64,
    /// The referenced exercise definition
    pub exercise: Exercise,
    /// Sort key within the workout; gaps are allowed after deletions
    pub order_index: i32,
    /// Planned set count
    pub target_sets: i32,
    /// Planned reps per set, for rep-based exercises
    pub target_reps: Option<i32>,
    /// Planned duration in seconds, for timed exercises
    pub target_duration_secs: Option<i32>,
    /// Rest between sets, in seconds
    pub rest_between_sets_secs: Option<i32>,
    /// Performed sets in `set_number` order
    pub sets: Vec<ExerciseSet>,
}

/// One performed set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning workout exercise
    pub workout_exercise_id: i64,
    /// 1-based position within the exercise
    pub set_number: i32,
    /// Reps performed, for rep-based sets
    pub reps: Option<i32>,
    /// Weight lifted in kilograms
    pub weight_kg: Option<f64>,
    /// Duration in seconds, for timed sets
    pub duration_secs: Option<i32>,
    /// Whether the set was completed
    pub completed: bool,
    /// When the set was recorded
    pub recorded_at: DateTime<Utc>,
}

/// A reusable workout template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRoutine {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Routine name
    pub name: String,
    /// Optional free-form description
    pub description: Option<String>,
    /// Target sessions per week
    pub frequency_per_week: Option<i32>,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Exercises in `order_index` order
    pub exercises: Vec<RoutineExercise>,
}

/// One exercise slot inside a routine template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning routine
    pub routine_id: i64,
    /// The referenced exercise definition
    pub exercise: Exercise,
    /// Sort key within the routine
    pub order_index: i32,
    /// Planned set count
    pub target_sets: i32,
    /// Planned reps per set
    pub target_reps: Option<i32>,
    /// Planned duration in seconds
    pub target_duration_secs: Option<i32>,
    /// Rest between sets, in seconds
    pub rest_between_sets_secs: Option<i32>,
}
