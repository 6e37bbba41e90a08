// ABOUTME: Repository traits and their SQLite-backed implementations
// ABOUTME: The seam application logic depends on; storage details stay behind it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Repositories
//!
//! Each data area exposes an `async_trait` repository returning domain
//! models and [`DatabaseError`]. Implementations hold a cloned
//! [`Database`](super::Database) handle and delegate to its query
//! modules, converting rows through the mapping layer. Watch methods
//! return streams that re-emit after every committed write to the
//! tables they cover.

mod exercise_repository;
mod routine_repository;
mod statistics_repository;
mod tracking_repository;
mod user_repository;
mod weight_repository;
mod workout_repository;

pub use exercise_repository::{ExerciseRepository, ExerciseRepositoryImpl};
pub use routine_repository::{RoutineRepository, RoutineRepositoryImpl};
pub use statistics_repository::{StatisticsRepository, StatisticsRepositoryImpl};
pub use tracking_repository::{TrackingRepository, TrackingRepositoryImpl};
pub use user_repository::{UserRepository, UserRepositoryImpl};
pub use weight_repository::{WeightRepository, WeightRepositoryImpl};
pub use workout_repository::{WorkoutRepository, WorkoutRepositoryImpl};

use crate::errors::DatabaseError;

/// Wrap a storage failure with its context for the repository caller
pub(crate) fn query_err(err: anyhow::Error) -> DatabaseError {
    DatabaseError::QueryError {
        context: err.to_string(),
    }
}
