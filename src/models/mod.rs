// ABOUTME: In-memory domain models used by application logic
// ABOUTME: Richer types than the persisted rows: calendar dates, UTC instants, nesting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

mod statistics;
mod tracking;
mod user;
mod workout;

pub use statistics::{Lift, ProgressPoint, WorkoutStatistics};
pub use tracking::{ActivityRecord, BmiRecord, Coordinate, RouteSession, StepRecord};
pub use user::{User, WeightEntry};
pub use workout::{
    Exercise, ExerciseSet, RoutineExercise, Workout, WorkoutExercise, WorkoutRoutine,
};
