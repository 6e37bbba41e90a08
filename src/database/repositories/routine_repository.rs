// ABOUTME: Routine template repository plus template-to-workout instantiation
// ABOUTME: Starting a routine clones its exercise list into a fresh incomplete workout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::BoxStream;

use super::query_err;
use crate::database::{
    changes, Database, Table, WorkoutDetail, WorkoutExerciseDetail, WorkoutExerciseRow, WorkoutRow,
};
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::{RoutineExercise, WorkoutRoutine};

/// Access to workout routine templates
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Create a routine with its exercise list in one atomic write,
    /// returning the new routine id. The stored `created_at` is stamped
    /// here; the value on the input is ignored.
    async fn create_routine(&self, routine: &WorkoutRoutine) -> Result<i64, DatabaseError>;

    /// Fetch a routine with its exercise list
    async fn get_routine(&self, id: i64) -> Result<Option<WorkoutRoutine>, DatabaseError>;

    /// Replace the routine's own fields; its exercise list is managed
    /// through the exercise methods
    async fn update_routine(&self, routine: &WorkoutRoutine) -> Result<(), DatabaseError>;

    /// Delete a routine and its exercise list atomically; deleting a
    /// missing id is a no-op
    async fn delete_routine(&self, id: i64) -> Result<(), DatabaseError>;

    /// A user's routines without their exercise lists, by name
    async fn routines_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRoutine>, DatabaseError>;

    /// Add an exercise to a routine, returning the new id
    async fn add_exercise(&self, exercise: &RoutineExercise) -> Result<i64, DatabaseError>;

    /// Replace a routine exercise's targets and position
    async fn update_exercise_entry(&self, exercise: &RoutineExercise)
        -> Result<(), DatabaseError>;

    /// Remove an exercise from a routine; a missing id is a no-op
    async fn remove_exercise(&self, routine_exercise_id: i64) -> Result<(), DatabaseError>;

    /// Reorder a routine's exercises to the supplied id order; ids left
    /// out keep their prior position
    async fn reorder_exercises(
        &self,
        routine_id: i64,
        ordered_ids: &[i64],
    ) -> Result<(), DatabaseError>;

    /// Start a workout from a routine: clone the routine's exercise
    /// list (targets, order, no sets) into a new incomplete workout
    /// dated today, returning the new workout id. `None` when the
    /// routine does not exist.
    async fn create_workout_from_routine(
        &self,
        routine_id: i64,
        user_id: i64,
    ) -> Result<Option<i64>, DatabaseError>;

    /// Stream of a user's routine list, re-emitted after every routine
    /// write
    fn watch_routines(
        &self,
        user_id: i64,
    ) -> BoxStream<'static, Result<Vec<WorkoutRoutine>, DatabaseError>>;
}

/// SQLite-backed [`RoutineRepository`]
#[derive(Clone)]
pub struct RoutineRepositoryImpl {
    db: Database,
}

impl RoutineRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RoutineRepository for RoutineRepositoryImpl {
    async fn create_routine(&self, routine: &WorkoutRoutine) -> Result<i64, DatabaseError> {
        let mut detail = mappers::routine_to_detail(routine);
        detail.routine.created_at = Utc::now().timestamp_millis();

        self.db.insert_routine(&detail).await.map_err(query_err)
    }

    async fn get_routine(&self, id: i64) -> Result<Option<WorkoutRoutine>, DatabaseError> {
        let detail = self.db.get_routine_detail(id).await.map_err(query_err)?;
        Ok(detail.map(mappers::routine_from_detail))
    }

    async fn update_routine(&self, routine: &WorkoutRoutine) -> Result<(), DatabaseError> {
        let row = mappers::routine_to_row(routine);
        self.db.update_routine(&row).await.map_err(query_err)
    }

    async fn delete_routine(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_routine(id).await.map_err(query_err)
    }

    async fn routines_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRoutine>, DatabaseError> {
        let rows = self.db.routines_for_user(user_id).await.map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::routine_from_row).collect())
    }

    async fn add_exercise(&self, exercise: &RoutineExercise) -> Result<i64, DatabaseError> {
        let link = mappers::routine_exercise_to_row(exercise);
        self.db
            .insert_routine_exercise(&link)
            .await
            .map_err(query_err)
    }

    async fn update_exercise_entry(
        &self,
        exercise: &RoutineExercise,
    ) -> Result<(), DatabaseError> {
        let link = mappers::routine_exercise_to_row(exercise);
        self.db
            .update_routine_exercise(&link)
            .await
            .map_err(query_err)
    }

    async fn remove_exercise(&self, routine_exercise_id: i64) -> Result<(), DatabaseError> {
        self.db
            .delete_routine_exercise(routine_exercise_id)
            .await
            .map_err(query_err)
    }

    async fn reorder_exercises(
        &self,
        routine_id: i64,
        ordered_ids: &[i64],
    ) -> Result<(), DatabaseError> {
        self.db
            .reorder_routine_exercises(routine_id, ordered_ids)
            .await
            .map_err(query_err)
    }

    async fn create_workout_from_routine(
        &self,
        routine_id: i64,
        user_id: i64,
    ) -> Result<Option<i64>, DatabaseError> {
        let Some(detail) = self
            .db
            .get_routine_detail(routine_id)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let now = Utc::now();
        let workout = WorkoutRow {
            id: 0,
            user_id,
            name: detail.routine.name.clone(),
            description: detail.routine.description.clone(),
            duration_min: 0,
            calories: None,
            date: mappers::date_to_epoch_millis(now.date_naive()),
            start_time: now.timestamp_millis(),
            end_time: None,
            is_completed: false,
        };

        let exercises = detail
            .exercises
            .into_iter()
            .map(|entry| WorkoutExerciseDetail {
                link: WorkoutExerciseRow {
                    id: 0,
                    workout_id: 0,
                    exercise_id: entry.link.exercise_id,
                    order_index: entry.link.order_index,
                    target_sets: entry.link.target_sets,
                    target_reps: entry.link.target_reps,
                    target_duration_secs: entry.link.target_duration_secs,
                    rest_between_sets_secs: entry.link.rest_between_sets_secs,
                },
                exercise: entry.exercise,
                sets: Vec::new(),
            })
            .collect();

        let workout_id = self
            .db
            .insert_workout(&WorkoutDetail { workout, exercises })
            .await
            .map_err(query_err)?;

        Ok(Some(workout_id))
    }

    fn watch_routines(
        &self,
        user_id: i64,
    ) -> BoxStream<'static, Result<Vec<WorkoutRoutine>, DatabaseError>> {
        changes::watch(
            self.db.clone(),
            &[Table::WorkoutRoutines],
            move |db| async move {
                db.routines_for_user(user_id)
                    .await
                    .map(|rows| rows.into_iter().map(mappers::routine_from_row).collect())
                    .map_err(query_err)
            },
        )
    }
}
