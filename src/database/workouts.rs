// ABOUTME: Workout aggregate database operations
// ABOUTME: Cascade writes for workout -> workout_exercises -> exercise_sets run in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::records::{
    ExerciseRow, ExerciseSetRow, WorkoutDetail, WorkoutExerciseDetail, WorkoutExerciseRow,
    WorkoutRow,
};
use super::{Database, Table};

const WORKOUT_CASCADE_TABLES: [Table; 3] =
    [Table::Workouts, Table::WorkoutExercises, Table::ExerciseSets];

impl Database {
    /// Create the workout aggregate tables
    pub(super) async fn migrate_workouts(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                description TEXT,
                duration_min INTEGER NOT NULL DEFAULT 0,
                calories INTEGER,
                date INTEGER NOT NULL,
                start_time INTEGER NOT NULL,
                end_time INTEGER,
                is_completed BOOLEAN NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL REFERENCES workouts(id),
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                order_index INTEGER NOT NULL,
                target_sets INTEGER NOT NULL,
                target_reps INTEGER,
                target_duration_secs INTEGER,
                rest_between_sets_secs INTEGER
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercise_sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_exercise_id INTEGER NOT NULL REFERENCES workout_exercises(id),
                set_number INTEGER NOT NULL,
                reps INTEGER,
                weight_kg REAL,
                duration_secs INTEGER,
                completed BOOLEAN NOT NULL DEFAULT 0,
                recorded_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_date ON workouts(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_exercises_workout ON workout_exercises(workout_id)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercise_sets_workout_exercise ON exercise_sets(workout_exercise_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a workout with its full exercise tree in one transaction.
    ///
    /// Child rows receive freshly generated parent ids; ids already
    /// present on the detail are ignored. Returns the new workout id.
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; no rows are written in
    /// that case.
    pub async fn insert_workout(&self, detail: &WorkoutDetail) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let workout = &detail.workout;
        let result = sqlx::query(
            r"
            INSERT INTO workouts (user_id, name, description, duration_min, calories, date, start_time, end_time, is_completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(workout.user_id)
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.duration_min)
        .bind(workout.calories)
        .bind(workout.date)
        .bind(workout.start_time)
        .bind(workout.end_time)
        .bind(workout.is_completed)
        .execute(&mut *tx)
        .await?;
        let workout_id = result.last_insert_rowid();

        for exercise in &detail.exercises {
            let link = &exercise.link;
            let result = sqlx::query(
                r"
                INSERT INTO workout_exercises (workout_id, exercise_id, order_index, target_sets, target_reps, target_duration_secs, rest_between_sets_secs)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(workout_id)
            .bind(link.exercise_id)
            .bind(link.order_index)
            .bind(link.target_sets)
            .bind(link.target_reps)
            .bind(link.target_duration_secs)
            .bind(link.rest_between_sets_secs)
            .execute(&mut *tx)
            .await?;
            let workout_exercise_id = result.last_insert_rowid();

            for set in &exercise.sets {
                sqlx::query(
                    r"
                    INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_kg, duration_secs, completed, recorded_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    ",
                )
                .bind(workout_exercise_id)
                .bind(set.set_number)
                .bind(set.reps)
                .bind(set.weight_kg)
                .bind(set.duration_secs)
                .bind(set.completed)
                .bind(set.recorded_at)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        tracing::debug!(workout_id, "workout created");
        self.changes.publish_all(&WORKOUT_CASCADE_TABLES);
        Ok(workout_id)
    }

    /// Replace the workout row itself; children are managed separately
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_workout(&self, workout: &WorkoutRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE workouts SET
                user_id = $2,
                name = $3,
                description = $4,
                duration_min = $5,
                calories = $6,
                date = $7,
                start_time = $8,
                end_time = $9,
                is_completed = $10
            WHERE id = $1
            ",
        )
        .bind(workout.id)
        .bind(workout.user_id)
        .bind(&workout.name)
        .bind(&workout.description)
        .bind(workout.duration_min)
        .bind(workout.calories)
        .bind(workout.date)
        .bind(workout.start_time)
        .bind(workout.end_time)
        .bind(workout.is_completed)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::Workouts);
        Ok(())
    }

    /// Delete a workout and all descendant rows in one transaction.
    /// Deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; no rows are removed in
    /// that case.
    pub async fn delete_workout(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            DELETE FROM exercise_sets WHERE workout_exercise_id IN
                (SELECT id FROM workout_exercises WHERE workout_id = $1)
            ",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM workout_exercises WHERE workout_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.changes.publish_all(&WORKOUT_CASCADE_TABLES);
        Ok(())
    }

    /// Get a workout with its full exercise tree
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_workout_detail(&self, id: i64) -> Result<Option<WorkoutDetail>> {
        let row = sqlx::query("SELECT * FROM workouts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let workout = Self::row_to_workout(&row);
        let exercises = self.workout_exercise_details(id).await?;

        Ok(Some(WorkoutDetail { workout, exercises }))
    }

    /// All of a user's workouts (flat rows), newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn workouts_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRow>> {
        let rows = sqlx::query("SELECT * FROM workouts WHERE user_id = $1 ORDER BY date DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_workout).collect())
    }

    /// A user's completed workouts, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn completed_workouts_for_user(&self, user_id: i64) -> Result<Vec<WorkoutRow>> {
        let rows = sqlx::query(
            "SELECT * FROM workouts WHERE user_id = $1 AND is_completed = 1 ORDER BY date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_workout).collect())
    }

    /// Workouts inside an inclusive millisecond range, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn workouts_between(
        &self,
        user_id: i64,
        start_millis: i64,
        end_millis: i64,
    ) -> Result<Vec<WorkoutRow>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workouts
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date DESC
            ",
        )
        .bind(user_id)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_workout).collect())
    }

    /// The most recent completed workouts, up to `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn recent_completed_workouts(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<WorkoutRow>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM workouts
            WHERE user_id = $1 AND is_completed = 1
            ORDER BY date DESC LIMIT $2
            ",
        )
        .bind(user_id)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_workout).collect())
    }

    /// Add one exercise (with any pre-recorded sets) to a workout,
    /// returning the new workout_exercise id
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written then.
    pub async fn insert_workout_exercise(
        &self,
        link: &WorkoutExerciseRow,
        sets: &[ExerciseSetRow],
    ) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r"
            INSERT INTO workout_exercises (workout_id, exercise_id, order_index, target_sets, target_reps, target_duration_secs, rest_between_sets_secs)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(link.workout_id)
        .bind(link.exercise_id)
        .bind(link.order_index)
        .bind(link.target_sets)
        .bind(link.target_reps)
        .bind(link.target_duration_secs)
        .bind(link.rest_between_sets_secs)
        .execute(&mut *tx)
        .await?;
        let workout_exercise_id = result.last_insert_rowid();

        for set in sets {
            sqlx::query(
                r"
                INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_kg, duration_secs, completed, recorded_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(workout_exercise_id)
            .bind(set.set_number)
            .bind(set.reps)
            .bind(set.weight_kg)
            .bind(set.duration_secs)
            .bind(set.completed)
            .bind(set.recorded_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.changes
            .publish_all(&[Table::WorkoutExercises, Table::ExerciseSets]);
        Ok(workout_exercise_id)
    }

    /// Replace a workout exercise row (targets, order); sets are managed
    /// separately
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_workout_exercise(&self, link: &WorkoutExerciseRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE workout_exercises SET
                exercise_id = $2,
                order_index = $3,
                target_sets = $4,
                target_reps = $5,
                target_duration_secs = $6,
                rest_between_sets_secs = $7
            WHERE id = $1
            ",
        )
        .bind(link.id)
        .bind(link.exercise_id)
        .bind(link.order_index)
        .bind(link.target_sets)
        .bind(link.target_reps)
        .bind(link.target_duration_secs)
        .bind(link.rest_between_sets_secs)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::WorkoutExercises);
        Ok(())
    }

    /// Remove an exercise from a workout, descendant sets first, in one
    /// transaction. Removing a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; nothing is removed then.
    pub async fn delete_workout_exercise(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM exercise_sets WHERE workout_exercise_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM workout_exercises WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.changes
            .publish_all(&[Table::WorkoutExercises, Table::ExerciseSets]);
        Ok(())
    }

    /// Rewrite order indices to match the supplied id order.
    ///
    /// Ids absent from `ordered_ids` keep their prior index; order_index
    /// is a sort key, not a dense position, so gaps are fine.
    ///
    /// # Errors
    ///
    /// Returns an error if any update fails; no index changes then.
    pub async fn reorder_workout_exercises(
        &self,
        workout_id: i64,
        ordered_ids: &[i64],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (index, id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE workout_exercises SET order_index = $1 WHERE id = $2 AND workout_id = $3",
            )
            .bind(i64::try_from(index).unwrap_or(i64::MAX))
            .bind(id)
            .bind(workout_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.changes.publish(Table::WorkoutExercises);
        Ok(())
    }

    /// Insert one performed set, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_set(&self, set: &ExerciseSetRow) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO exercise_sets (workout_exercise_id, set_number, reps, weight_kg, duration_secs, completed, recorded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(set.workout_exercise_id)
        .bind(set.set_number)
        .bind(set.reps)
        .bind(set.weight_kg)
        .bind(set.duration_secs)
        .bind(set.completed)
        .bind(set.recorded_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::ExerciseSets);
        Ok(result.last_insert_rowid())
    }

    /// Replace a set by id
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_set(&self, set: &ExerciseSetRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE exercise_sets SET
                set_number = $2,
                reps = $3,
                weight_kg = $4,
                duration_secs = $5,
                completed = $6,
                recorded_at = $7
            WHERE id = $1
            ",
        )
        .bind(set.id)
        .bind(set.set_number)
        .bind(set.reps)
        .bind(set.weight_kg)
        .bind(set.duration_secs)
        .bind(set.completed)
        .bind(set.recorded_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::ExerciseSets);
        Ok(())
    }

    /// Delete a set by id; deleting a missing id is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the delete query fails
    pub async fn delete_set(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM exercise_sets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.changes.publish(Table::ExerciseSets);
        Ok(())
    }

    /// Mark a workout completed with its final duration, calories, and
    /// end time. Completing a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn complete_workout(
        &self,
        id: i64,
        duration_min: i32,
        calories: Option<i32>,
        end_time_millis: i64,
    ) -> Result<()> {
        sqlx::query(
            r"
            UPDATE workouts SET
                is_completed = 1,
                duration_min = $2,
                calories = $3,
                end_time = $4
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(duration_min)
        .bind(calories)
        .bind(end_time_millis)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::Workouts);
        Ok(())
    }

    /// Fetch a workout's exercises joined with their definitions and
    /// sets, in order_index order
    pub(super) async fn workout_exercise_details(
        &self,
        workout_id: i64,
    ) -> Result<Vec<WorkoutExerciseDetail>> {
        let rows = sqlx::query(
            r"
            SELECT we.id AS we_id, we.workout_id, we.exercise_id, we.order_index,
                   we.target_sets, we.target_reps, we.target_duration_secs, we.rest_between_sets_secs,
                   e.name, e.description, e.muscle_group, e.is_custom, e.created_by, e.created_at
            FROM workout_exercises we
            JOIN exercises e ON e.id = we.exercise_id
            WHERE we.workout_id = $1
            ORDER BY we.order_index ASC
            ",
        )
        .bind(workout_id)
        .fetch_all(&self.pool)
        .await?;

        let mut details = Vec::with_capacity(rows.len());
        for row in &rows {
            let link = WorkoutExerciseRow {
                id: row.get("we_id"),
                workout_id: row.get("workout_id"),
                exercise_id: row.get("exercise_id"),
                order_index: row.get("order_index"),
                target_sets: row.get("target_sets"),
                target_reps: row.get("target_reps"),
                target_duration_secs: row.get("target_duration_secs"),
                rest_between_sets_secs: row.get("rest_between_sets_secs"),
            };
            let exercise = ExerciseRow {
                id: link.exercise_id,
                name: row.get("name"),
                description: row.get("description"),
                muscle_group: row.get("muscle_group"),
                is_custom: row.get("is_custom"),
                created_by: row.get("created_by"),
                created_at: row.get("created_at"),
            };
            let sets = self.sets_for_workout_exercise(link.id).await?;
            details.push(WorkoutExerciseDetail {
                link,
                exercise,
                sets,
            });
        }

        Ok(details)
    }

    /// A workout exercise's sets in set_number order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn sets_for_workout_exercise(
        &self,
        workout_exercise_id: i64,
    ) -> Result<Vec<ExerciseSetRow>> {
        let rows = sqlx::query(
            "SELECT * FROM exercise_sets WHERE workout_exercise_id = $1 ORDER BY set_number ASC",
        )
        .bind(workout_exercise_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_set).collect())
    }

    pub(super) fn row_to_workout(row: &sqlx::sqlite::SqliteRow) -> WorkoutRow {
        WorkoutRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            description: row.get("description"),
            duration_min: row.get("duration_min"),
            calories: row.get("calories"),
            date: row.get("date"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            is_completed: row.get("is_completed"),
        }
    }

    fn row_to_set(row: &sqlx::sqlite::SqliteRow) -> ExerciseSetRow {
        ExerciseSetRow {
            id: row.get("id"),
            workout_exercise_id: row.get("workout_exercise_id"),
            set_number: row.get("set_number"),
            reps: row.get("reps"),
            weight_kg: row.get("weight_kg"),
            duration_secs: row.get("duration_secs"),
            completed: row.get("completed"),
            recorded_at: row.get("recorded_at"),
        }
    }
}
