// ABOUTME: Persisted row representations, one struct per table
// ABOUTME: Flat shapes with epoch-millisecond timestamps, converted by the mapping layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

/// Row in `users`
#[derive(Debug, Clone, PartialEq)]
pub struct UserRow {
    pub id: i64,
    pub auth_uid: Option<String>,
    pub name: String,
    pub age: i32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub gender: String,
    pub fitness_goal: String,
    /// Epoch milliseconds
    pub created_at: i64,
    /// Epoch milliseconds
    pub updated_at: i64,
}

/// Row in `weight_entries`
#[derive(Debug, Clone, PartialEq)]
pub struct WeightEntryRow {
    pub id: i64,
    pub user_id: i64,
    pub weight_kg: f64,
    /// Epoch milliseconds at UTC start of day
    pub date: i64,
    pub note: Option<String>,
}

/// Row in `exercises`
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub muscle_group: String,
    pub is_custom: bool,
    /// NULL marks a system exercise
    pub created_by: Option<i64>,
    /// Epoch milliseconds
    pub created_at: i64,
}

/// Row in `workouts`
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub duration_min: i32,
    pub calories: Option<i32>,
    /// Epoch milliseconds at UTC start of day
    pub date: i64,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: Option<i64>,
    pub is_completed: bool,
}

/// Row in `workout_exercises`
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExerciseRow {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub order_index: i32,
    pub target_sets: i32,
    pub target_reps: Option<i32>,
    pub target_duration_secs: Option<i32>,
    pub rest_between_sets_secs: Option<i32>,
}

/// Row in `exercise_sets`
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSetRow {
    pub id: i64,
    pub workout_exercise_id: i64,
    pub set_number: i32,
    pub reps: Option<i32>,
    pub weight_kg: Option<f64>,
    pub duration_secs: Option<i32>,
    pub completed: bool,
    /// Epoch milliseconds
    pub recorded_at: i64,
}

/// Row in `workout_routines`
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub frequency_per_week: Option<i32>,
    /// Epoch milliseconds
    pub created_at: i64,
}

/// Row in `routine_exercises`
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineExerciseRow {
    pub id: i64,
    pub routine_id: i64,
    pub exercise_id: i64,
    pub order_index: i32,
    pub target_sets: i32,
    pub target_reps: Option<i32>,
    pub target_duration_secs: Option<i32>,
    pub rest_between_sets_secs: Option<i32>,
}

/// Row in `step_records`
#[derive(Debug, Clone, PartialEq)]
pub struct StepRow {
    pub id: i64,
    pub user_id: i64,
    /// Epoch milliseconds at UTC start of day
    pub day: i64,
    pub count: i32,
}

/// Row in `bmi_records`
#[derive(Debug, Clone, PartialEq)]
pub struct BmiRow {
    pub id: i64,
    pub user_id: i64,
    pub weight_kg: f64,
    pub height_m: f64,
    pub bmi: f64,
    /// Epoch milliseconds
    pub recorded_at: i64,
}

/// Row in `activity_records`
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
}

/// Row in `route_sessions`; `coordinates` is JSON text
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSessionRow {
    pub id: i64,
    pub user_id: i64,
    /// Epoch milliseconds
    pub start_time: i64,
    /// Epoch milliseconds
    pub end_time: i64,
    pub coordinates: String,
}

/// A workout exercise joined with its definition and performed sets
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExerciseDetail {
    pub link: WorkoutExerciseRow,
    pub exercise: ExerciseRow,
    pub sets: Vec<ExerciseSetRow>,
}

/// A workout joined with its full exercise tree
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDetail {
    pub workout: WorkoutRow,
    pub exercises: Vec<WorkoutExerciseDetail>,
}

/// A routine exercise joined with its definition
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineExerciseDetail {
    pub link: RoutineExerciseRow,
    pub exercise: ExerciseRow,
}

/// A routine joined with its exercise list
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineDetail {
    pub routine: RoutineRow,
    pub exercises: Vec<RoutineExerciseDetail>,
}
