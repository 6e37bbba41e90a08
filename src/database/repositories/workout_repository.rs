// ABOUTME: Workout aggregate repository: session CRUD, exercise and set management, completion
// ABOUTME: Whole-aggregate writes cascade atomically; watch streams cover the full tree
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use futures_util::stream::BoxStream;

use super::query_err;
use crate::database::{changes, Database, Table};
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::{ExerciseSet, Workout, WorkoutExercise};

const WORKOUT_TREE_TABLES: [Table; 3] =
    [Table::Workouts, Table::WorkoutExercises, Table::ExerciseSets];

/// Access to workout sessions and their exercise trees
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Create a workout with its whole exercise tree in one atomic
    /// write, returning the new workout id. Child ids on the input are
    /// ignored; storage assigns fresh ones.
    async fn create_workout(&self, workout: &Workout) -> Result<i64, DatabaseError>;

    /// Fetch a workout with its full exercise tree
    async fn get_workout(&self, id: i64) -> Result<Option<Workout>, DatabaseError>;

    /// Replace the workout's own fields; the exercise tree is managed
    /// through the exercise and set methods
    async fn update_workout(&self, workout: &Workout) -> Result<(), DatabaseError>;

    /// Delete a workout and every descendant row atomically; deleting a
    /// missing id is a no-op
    async fn delete_workout(&self, id: i64) -> Result<(), DatabaseError>;

    /// A user's workouts without their trees, newest first
    async fn workouts_for_user(&self, user_id: i64) -> Result<Vec<Workout>, DatabaseError>;

    /// A user's completed workouts without their trees, newest first
    async fn completed_workouts(&self, user_id: i64) -> Result<Vec<Workout>, DatabaseError>;

    /// Workouts dated inside an inclusive day range, newest first
    async fn workouts_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Workout>, DatabaseError>;

    /// The most recent completed workouts, up to `limit`
    async fn recent_completed(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<Workout>, DatabaseError>;

    /// Add an exercise (with any pre-recorded sets) to a workout,
    /// returning the new workout-exercise id
    async fn add_exercise(&self, exercise: &WorkoutExercise) -> Result<i64, DatabaseError>;

    /// Replace an exercise entry's targets and position; its sets are
    /// managed through the set methods
    async fn update_exercise_entry(&self, exercise: &WorkoutExercise)
        -> Result<(), DatabaseError>;

    /// Remove an exercise and its sets atomically; a missing id is a
    /// no-op
    async fn remove_exercise(&self, workout_exercise_id: i64) -> Result<(), DatabaseError>;

    /// Reorder a workout's exercises to the supplied id order; ids left
    /// out keep their prior position
    async fn reorder_exercises(
        &self,
        workout_id: i64,
        ordered_ids: &[i64],
    ) -> Result<(), DatabaseError>;

    /// Record a performed set, returning the generated id
    async fn add_set(&self, set: &ExerciseSet) -> Result<i64, DatabaseError>;

    /// Replace a set by id
    async fn update_set(&self, set: &ExerciseSet) -> Result<(), DatabaseError>;

    /// Delete a set; deleting a missing id is a no-op
    async fn delete_set(&self, id: i64) -> Result<(), DatabaseError>;

    /// Mark a workout completed with its final duration and calories;
    /// the end time is stamped now. Completing a missing id is a no-op.
    async fn complete_workout(
        &self,
        id: i64,
        duration_min: i32,
        calories: Option<i32>,
    ) -> Result<(), DatabaseError>;

    /// Stream of one workout's full tree, re-emitted after every write
    /// touching workouts, their exercises, or sets
    fn watch_workout(&self, id: i64) -> BoxStream<'static, Result<Option<Workout>, DatabaseError>>;

    /// Stream of a user's workout list (without trees), re-emitted after
    /// every workout write
    fn watch_workouts(
        &self,
        user_id: i64,
    ) -> BoxStream<'static, Result<Vec<Workout>, DatabaseError>>;
}

/// SQLite-backed [`WorkoutRepository`]
#[derive(Clone)]
pub struct WorkoutRepositoryImpl {
    db: Database,
}

impl WorkoutRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn create_workout(&self, workout: &Workout) -> Result<i64, DatabaseError> {
        let detail = mappers::workout_to_detail(workout);
        self.db.insert_workout(&detail).await.map_err(query_err)
    }

    async fn get_workout(&self, id: i64) -> Result<Option<Workout>, DatabaseError> {
        let detail = self.db.get_workout_detail(id).await.map_err(query_err)?;
        Ok(detail.map(mappers::workout_from_detail))
    }

    async fn update_workout(&self, workout: &Workout) -> Result<(), DatabaseError> {
        let row = mappers::workout_to_row(workout);
        self.db.update_workout(&row).await.map_err(query_err)
    }

    async fn delete_workout(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_workout(id).await.map_err(query_err)
    }

    async fn workouts_for_user(&self, user_id: i64) -> Result<Vec<Workout>, DatabaseError> {
        let rows = self.db.workouts_for_user(user_id).await.map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::workout_from_row).collect())
    }

    async fn completed_workouts(&self, user_id: i64) -> Result<Vec<Workout>, DatabaseError> {
        let rows = self
            .db
            .completed_workouts_for_user(user_id)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::workout_from_row).collect())
    }

    async fn workouts_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Workout>, DatabaseError> {
        let (start_millis, end_millis) = mappers::day_range_millis(start, end);
        let rows = self
            .db
            .workouts_between(user_id, start_millis, end_millis)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::workout_from_row).collect())
    }

    async fn recent_completed(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<Workout>, DatabaseError> {
        let rows = self
            .db
            .recent_completed_workouts(user_id, limit)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::workout_from_row).collect())
    }

    async fn add_exercise(&self, exercise: &WorkoutExercise) -> Result<i64, DatabaseError> {
        let (link, sets) = mappers::workout_exercise_to_rows(exercise);
        self.db
            .insert_workout_exercise(&link, &sets)
            .await
            .map_err(query_err)
    }

    async fn update_exercise_entry(
        &self,
        exercise: &WorkoutExercise,
    ) -> Result<(), DatabaseError> {
        let (link, _) = mappers::workout_exercise_to_rows(exercise);
        self.db
            .update_workout_exercise(&link)
            .await
            .map_err(query_err)
    }

    async fn remove_exercise(&self, workout_exercise_id: i64) -> Result<(), DatabaseError> {
        self.db
            .delete_workout_exercise(workout_exercise_id)
            .await
            .map_err(query_err)
    }

    async fn reorder_exercises(
        &self,
        workout_id: i64,
        ordered_ids: &[i64],
    ) -> Result<(), DatabaseError> {
        self.db
            .reorder_workout_exercises(workout_id, ordered_ids)
            .await
            .map_err(query_err)
    }

    async fn add_set(&self, set: &ExerciseSet) -> Result<i64, DatabaseError> {
        let row = mappers::set_to_row(set);
        self.db.insert_set(&row).await.map_err(query_err)
    }

    async fn update_set(&self, set: &ExerciseSet) -> Result<(), DatabaseError> {
        let row = mappers::set_to_row(set);
        self.db.update_set(&row).await.map_err(query_err)
    }

    async fn delete_set(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_set(id).await.map_err(query_err)
    }

    async fn complete_workout(
        &self,
        id: i64,
        duration_min: i32,
        calories: Option<i32>,
    ) -> Result<(), DatabaseError> {
        let end_time_millis = Utc::now().timestamp_millis();
        self.db
            .complete_workout(id, duration_min, calories, end_time_millis)
            .await
            .map_err(query_err)
    }

    fn watch_workout(&self, id: i64) -> BoxStream<'static, Result<Option<Workout>, DatabaseError>> {
        changes::watch(self.db.clone(), &WORKOUT_TREE_TABLES, move |db| async move {
            db.get_workout_detail(id)
                .await
                .map(|detail| detail.map(mappers::workout_from_detail))
                .map_err(query_err)
        })
    }

    fn watch_workouts(
        &self,
        user_id: i64,
    ) -> BoxStream<'static, Result<Vec<Workout>, DatabaseError>> {
        changes::watch(self.db.clone(), &[Table::Workouts], move |db| async move {
            db.workouts_for_user(user_id)
                .await
                .map(|rows| rows.into_iter().map(mappers::workout_from_row).collect())
                .map_err(query_err)
        })
    }
}
