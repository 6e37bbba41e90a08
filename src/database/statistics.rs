// ABOUTME: Aggregate queries feeding the statistics rollups
// ABOUTME: Joins across workouts, workout_exercises, and exercise_sets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::Database;

impl Database {
    /// The exercise appearing in the most completed workouts, with its
    /// appearance count
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn most_frequent_exercise(&self, user_id: i64) -> Result<Option<(String, i64)>> {
        let row = sqlx::query(
            r"
            SELECT e.name AS name, COUNT(*) AS appearances
            FROM workout_exercises we
            JOIN workouts w ON w.id = we.workout_id
            JOIN exercises e ON e.id = we.exercise_id
            WHERE w.user_id = $1 AND w.is_completed = 1
            GROUP BY we.exercise_id
            ORDER BY appearances DESC, e.name ASC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| (row.get("name"), row.get("appearances"))))
    }

    /// The heaviest set ever recorded in a completed workout, with its
    /// exercise name
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn strongest_lift(&self, user_id: i64) -> Result<Option<(String, f64)>> {
        let row = sqlx::query(
            r"
            SELECT e.name AS name, s.weight_kg AS weight_kg
            FROM exercise_sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            JOIN workouts w ON w.id = we.workout_id
            JOIN exercises e ON e.id = we.exercise_id
            WHERE w.user_id = $1 AND w.is_completed = 1 AND s.weight_kg IS NOT NULL
            ORDER BY s.weight_kg DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| (row.get("name"), row.get("weight_kg"))))
    }

    /// Per completed workout date, the max set weight recorded for one
    /// exercise, ascending by date. Dates are epoch milliseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn exercise_max_weight_by_date(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<(i64, f64)>> {
        let rows = sqlx::query(
            r"
            SELECT w.date AS date, MAX(s.weight_kg) AS max_weight
            FROM exercise_sets s
            JOIN workout_exercises we ON we.id = s.workout_exercise_id
            JOIN workouts w ON w.id = we.workout_id
            WHERE w.user_id = $1 AND we.exercise_id = $2
              AND w.is_completed = 1 AND s.weight_kg IS NOT NULL
            GROUP BY w.date
            ORDER BY w.date ASC
            ",
        )
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| (row.get("date"), row.get("max_weight")))
            .collect())
    }
}
