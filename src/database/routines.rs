// ABOUTME: Workout routine template database operations
// ABOUTME: Routine -> routine_exercises cascades run in one transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::records::{
    ExerciseRow, RoutineDetail, RoutineExerciseDetail, RoutineExerciseRow, RoutineRow,
};
use super::{Database, Table};

impl Database {
    /// Create the routine tables
    pub(super) async fn migrate_routines(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_routines (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                description TEXT,
                frequency_per_week INTEGER,
                created_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS routine_exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                routine_id INTEGER NOT NULL REFERENCES workout_routines(id),
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
            "CREATE INDEX IF NOT EXISTS idx_routine_exercises_routine ON routine_exercises(routine_id)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a routine with its exercise list in one transaction,
    /// returning the new routine id
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written then.
    pub async fn insert_routine(&self, detail: &RoutineDetail) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let routine = &detail.routine;
        let result = sqlx::query(
            r"
            INSERT INTO workout_routines (user_id, name, description, frequency_per_week, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(routine.user_id)
        .bind(&routine.name)
        .bind(&routine.description)
        .bind(routine.frequency_per_week)
        .bind(routine.created_at)
        .execute(&mut *tx)
        .await?;
        let routine_id = result.last_insert_rowid();

        for exercise in &detail.exercises {
            let link = &exercise.link;
            sqlx::query(
                r"
                INSERT INTO routine_exercises (routine_id, exercise_id, order_index, target_sets, target_reps, target_duration_secs, rest_between_sets_secs)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ",
            )
            .bind(routine_id)
            .bind(link.exercise_id)
            .bind(link.order_index)
            .bind(link.target_sets)
            .bind(link.target_reps)
            .bind(link.target_duration_secs)
            .bind(link.rest_between_sets_secs)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.changes
            .publish_all(&[Table::WorkoutRoutines, Table::RoutineExercises]);
        Ok(routine_id)
    }

    /// Replace the routine row itself; exercises are managed separately
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_routine(&self, routine: &RoutineRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE workout_routines SET
                user_id = $2,
                name = $3,
                description = $4,
                frequency_per_week = $5
            WHERE id = $1
            ",
        )
        .bind(routine.id)
        .bind(routine.user_id)
        .bind(&routine.name)
        .bind(&routine.description)
        .bind(routine.frequency_per_week)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::WorkoutRoutines);
        Ok(())
    }

    /// Delete a routine and its exercise list in one transaction.
    /// Deleting a missing id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if any delete fails; nothing is removed then.
    pub async fn delete_routine(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM routine_exercises WHERE routine_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM workout_routines WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.changes
            .publish_all(&[Table::WorkoutRoutines, Table::RoutineExercises]);
        Ok(())
    }

    /// Get a routine with its exercise list
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn get_routine_detail(&self, id: i64) -> Result<Option<RoutineDetail>> {
        let row = sqlx::query("SELECT * FROM workout_routines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let routine = Self::row_to_routine(&row);
        let exercises = self.routine_exercise_details(id).await?;

        Ok(Some(RoutineDetail { routine, exercises }))
    }

    /// All of a user's routines (flat rows), by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn routines_for_user(&self, user_id: i64) -> Result<Vec<RoutineRow>> {
        let rows = sqlx::query("SELECT * FROM workout_routines WHERE user_id = $1 ORDER BY name ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_routine).collect())
    }

    /// Add one exercise to a routine, returning the new id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_routine_exercise(&self, link: &RoutineExerciseRow) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO routine_exercises (routine_id, exercise_id, order_index, target_sets, target_reps, target_duration_secs, rest_between_sets_secs)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(link.routine_id)
        .bind(link.exercise_id)
        .bind(link.order_index)
        .bind(link.target_sets)
        .bind(link.target_reps)
        .bind(link.target_duration_secs)
        .bind(link.rest_between_sets_secs)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::RoutineExercises);
        Ok(result.last_insert_rowid())
    }

    /// Replace a routine exercise row
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_routine_exercise(&self, link: &RoutineExerciseRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE routine_exercises SET
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

        self.changes.publish(Table::RoutineExercises);
        Ok(())
    }

    /// Remove one exercise from a routine; a missing id is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the delete query fails
    pub async fn delete_routine_exercise(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM routine_exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.changes.publish(Table::RoutineExercises);
        Ok(())
    }

    /// Rewrite order indices to match the supplied id order; ids absent
    /// from the list keep their prior index
    ///
    /// # Errors
    ///
    /// Returns an error if any update fails; no index changes then.
    pub async fn reorder_routine_exercises(
        &self,
        routine_id: i64,
        ordered_ids: &[i64],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (index, id) in ordered_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE routine_exercises SET order_index = $1 WHERE id = $2 AND routine_id = $3",
            )
            .bind(i64::try_from(index).unwrap_or(i64::MAX))
            .bind(id)
            .bind(routine_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.changes.publish(Table::RoutineExercises);
        Ok(())
    }

    /// A routine's exercises joined with their definitions, in
    /// order_index order
    pub(super) async fn routine_exercise_details(
        &self,
        routine_id: i64,
    ) -> Result<Vec<RoutineExerciseDetail>> {
        let rows = sqlx::query(
            r"
            SELECT re.id AS re_id, re.routine_id, re.exercise_id, re.order_index,
                   re.target_sets, re.target_reps, re.target_duration_secs, re.rest_between_sets_secs,
                   e.name, e.description, e.muscle_group, e.is_custom, e.created_by, e.created_at
            FROM routine_exercises re
            JOIN exercises e ON e.id = re.exercise_id
            WHERE re.routine_id = $1
            ORDER BY re.order_index ASC
            ",
        )
        .bind(routine_id)
        .fetch_all(&self.pool)
        .await?;

        let details = rows
            .iter()
            .map(|row| {
                let link = RoutineExerciseRow {
                    id: row.get("re_id"),
                    routine_id: row.get("routine_id"),
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
                RoutineExerciseDetail { link, exercise }
            })
            .collect();

        Ok(details)
    }

    fn row_to_routine(row: &sqlx::sqlite::SqliteRow) -> RoutineRow {
        RoutineRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            description: row.get("description"),
            frequency_per_week: row.get("frequency_per_week"),
            created_at: row.get("created_at"),
        }
    }
}
