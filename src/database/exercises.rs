// ABOUTME: Exercise catalog database operations
// ABOUTME: System presets plus user-defined exercises, with muscle-group and name search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::records::ExerciseRow;
use super::{Database, Table};

impl Database {
    /// Create the exercises table
    pub(super) async fn migrate_exercises(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                is_custom BOOLEAN NOT NULL DEFAULT 0,
                created_by INTEGER REFERENCES users(id),
                created_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_exercises_muscle_group ON exercises(muscle_group)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert an exercise, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_exercise(&self, exercise: &ExerciseRow) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO exercises (name, description, muscle_group, is_custom, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&exercise.name)
        .bind(&exercise.description)
        .bind(&exercise.muscle_group)
        .bind(exercise.is_custom)
        .bind(exercise.created_by)
        .bind(exercise.created_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::Exercises);
        Ok(result.last_insert_rowid())
    }

    /// Replace an exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_exercise(&self, exercise: &ExerciseRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE exercises SET
                name = $2,
                description = $3,
                muscle_group = $4,
                is_custom = $5,
                created_by = $6
            WHERE id = $1
            ",
        )
        .bind(exercise.id)
        .bind(&exercise.name)
        .bind(&exercise.description)
        .bind(&exercise.muscle_group)
        .bind(exercise.is_custom)
        .bind(exercise.created_by)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::Exercises);
        Ok(())
    }

    /// Delete an exercise by id; deleting a missing id is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the delete query fails
    pub async fn delete_exercise(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM exercises WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.changes.publish(Table::Exercises);
        Ok(())
    }

    /// Get an exercise by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_exercise(&self, id: i64) -> Result<Option<ExerciseRow>> {
        let row = sqlx::query("SELECT * FROM exercises WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_exercise))
    }

    /// All system (non-custom) exercises, by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn preset_exercises(&self) -> Result<Vec<ExerciseRow>> {
        let rows = sqlx::query("SELECT * FROM exercises WHERE is_custom = 0 ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_exercise).collect())
    }

    /// A user's custom exercises, by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn custom_exercises_for_user(&self, user_id: i64) -> Result<Vec<ExerciseRow>> {
        let rows = sqlx::query(
            "SELECT * FROM exercises WHERE is_custom = 1 AND created_by = $1 ORDER BY name ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_exercise).collect())
    }

    /// All exercises targeting one muscle group, by name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exercises_by_muscle_group(&self, muscle_group: &str) -> Result<Vec<ExerciseRow>> {
        let rows = sqlx::query("SELECT * FROM exercises WHERE muscle_group = $1 ORDER BY name ASC")
            .bind(muscle_group)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_exercise).collect())
    }

    /// Case-insensitive substring search over exercise names
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn search_exercises(&self, query: &str) -> Result<Vec<ExerciseRow>> {
        // LIKE is case-insensitive for ASCII in SQLite; escape wildcards
        let pattern = format!(
            "%{}%",
            query.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
        );

        let rows = sqlx::query(
            r"SELECT * FROM exercises WHERE name LIKE $1 ESCAPE '\' ORDER BY name ASC",
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_exercise).collect())
    }

    pub(super) fn row_to_exercise(row: &sqlx::sqlite::SqliteRow) -> ExerciseRow {
        ExerciseRow {
            id: row.get("id"),
            name: row.get("name"),
            description: row.get("description"),
            muscle_group: row.get("muscle_group"),
            is_custom: row.get("is_custom"),
            created_by: row.get("created_by"),
            created_at: row.get("created_at"),
        }
    }
}
