// ABOUTME: Exercise catalog repository: system presets plus per-user custom exercises
// ABOUTME: Search and muscle-group filters serve the exercise picker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;
use chrono::Utc;

use super::query_err;
use crate::database::Database;
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::Exercise;

/// Access to the exercise catalog
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Create a custom exercise, returning the generated id. The stored
    /// `created_at` is stamped here; the value on the input is ignored.
    async fn create_exercise(&self, exercise: &Exercise) -> Result<i64, DatabaseError>;

    /// Replace an exercise by id
    async fn update_exercise(&self, exercise: &Exercise) -> Result<(), DatabaseError>;

    /// Delete an exercise; deleting a missing id is a no-op
    async fn delete_exercise(&self, id: i64) -> Result<(), DatabaseError>;

    /// Fetch an exercise by id
    async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, DatabaseError>;

    /// The system presets, by name
    async fn preset_exercises(&self) -> Result<Vec<Exercise>, DatabaseError>;

    /// One user's custom exercises, by name
    async fn custom_exercises(&self, user_id: i64) -> Result<Vec<Exercise>, DatabaseError>;

    /// Exercises in one muscle group, presets and customs alike
    async fn exercises_by_muscle_group(
        &self,
        muscle_group: &str,
    ) -> Result<Vec<Exercise>, DatabaseError>;

    /// Case-insensitive substring search over exercise names
    async fn search_exercises(&self, query: &str) -> Result<Vec<Exercise>, DatabaseError>;

    /// Seed the system catalog; a no-op once presets exist
    async fn seed_presets(&self) -> Result<(), DatabaseError>;
}

/// SQLite-backed [`ExerciseRepository`]
#[derive(Clone)]
pub struct ExerciseRepositoryImpl {
    db: Database,
}

impl ExerciseRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExerciseRepository for ExerciseRepositoryImpl {
    async fn create_exercise(&self, exercise: &Exercise) -> Result<i64, DatabaseError> {
        let mut row = mappers::exercise_to_row(exercise);
        row.created_at = Utc::now().timestamp_millis();

        self.db.insert_exercise(&row).await.map_err(query_err)
    }

    async fn update_exercise(&self, exercise: &Exercise) -> Result<(), DatabaseError> {
        let row = mappers::exercise_to_row(exercise);
        self.db.update_exercise(&row).await.map_err(query_err)
    }

    async fn delete_exercise(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_exercise(id).await.map_err(query_err)
    }

    async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, DatabaseError> {
        let row = self.db.get_exercise(id).await.map_err(query_err)?;
        Ok(row.map(mappers::exercise_from_row))
    }

    async fn preset_exercises(&self) -> Result<Vec<Exercise>, DatabaseError> {
        let rows = self.db.preset_exercises().await.map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::exercise_from_row).collect())
    }

    async fn custom_exercises(&self, user_id: i64) -> Result<Vec<Exercise>, DatabaseError> {
        let rows = self
            .db
            .custom_exercises_for_user(user_id)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::exercise_from_row).collect())
    }

    async fn exercises_by_muscle_group(
        &self,
        muscle_group: &str,
    ) -> Result<Vec<Exercise>, DatabaseError> {
        let rows = self
            .db
            .exercises_by_muscle_group(muscle_group)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::exercise_from_row).collect())
    }

    async fn search_exercises(&self, query: &str) -> Result<Vec<Exercise>, DatabaseError> {
        let rows = self.db.search_exercises(query).await.map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::exercise_from_row).collect())
    }

    async fn seed_presets(&self) -> Result<(), DatabaseError> {
        self.db.seed_preset_exercises().await.map_err(query_err)
    }
}
