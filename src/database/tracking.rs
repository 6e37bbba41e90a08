// ABOUTME: Activity tracking database operations: steps, BMI, timed activities, GPS routes
// ABOUTME: Simple append-and-list tables keyed by user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::records::{ActivityRow, BmiRow, RouteSessionRow, StepRow};
use super::{Database, Table};

impl Database {
    /// Create the tracking tables
    pub(super) async fn migrate_tracking(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS step_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                day INTEGER NOT NULL,
                count INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bmi_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                weight_kg REAL NOT NULL,
                height_m REAL NOT NULL,
                bmi REAL NOT NULL,
                recorded_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activity_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                start_time INTEGER NOT NULL,
                end_time INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS route_sessions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                start_time INTEGER NOT NULL,
                end_time INTEGER NOT NULL,
                coordinates TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_step_records_user_day ON step_records(user_id, day)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a step record, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_steps(&self, record: &StepRow) -> Result<i64> {
        let result =
            sqlx::query("INSERT INTO step_records (user_id, day, count) VALUES ($1, $2, $3)")
                .bind(record.user_id)
                .bind(record.day)
                .bind(record.count)
                .execute(&self.pool)
                .await?;

        self.changes.publish(Table::StepRecords);
        Ok(result.last_insert_rowid())
    }

    /// All of a user's step records, newest day first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn steps_for_user(&self, user_id: i64) -> Result<Vec<StepRow>> {
        let rows = sqlx::query("SELECT * FROM step_records WHERE user_id = $1 ORDER BY day DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_steps).collect())
    }

    /// The latest saved count for one day bucket, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn steps_for_day(&self, user_id: i64, day_millis: i64) -> Result<Option<StepRow>> {
        let row = sqlx::query(
            "SELECT * FROM step_records WHERE user_id = $1 AND day = $2 ORDER BY id DESC LIMIT 1",
        )
        .bind(user_id)
        .bind(day_millis)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_steps))
    }

    /// Insert a BMI record, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_bmi(&self, record: &BmiRow) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO bmi_records (user_id, weight_kg, height_m, bmi, recorded_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(record.user_id)
        .bind(record.weight_kg)
        .bind(record.height_m)
        .bind(record.bmi)
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::BmiRecords);
        Ok(result.last_insert_rowid())
    }

    /// All of a user's BMI records, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn bmi_for_user(&self, user_id: i64) -> Result<Vec<BmiRow>> {
        let rows =
            sqlx::query("SELECT * FROM bmi_records WHERE user_id = $1 ORDER BY recorded_at DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(Self::row_to_bmi).collect())
    }

    /// Insert a timed activity, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_activity(&self, record: &ActivityRow) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO activity_records (user_id, name, start_time, end_time) VALUES ($1, $2, $3, $4)",
        )
        .bind(record.user_id)
        .bind(&record.name)
        .bind(record.start_time)
        .bind(record.end_time)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::ActivityRecords);
        Ok(result.last_insert_rowid())
    }

    /// All of a user's activities, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn activities_for_user(&self, user_id: i64) -> Result<Vec<ActivityRow>> {
        let rows = sqlx::query(
            "SELECT * FROM activity_records WHERE user_id = $1 ORDER BY start_time DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_activity).collect())
    }

    /// Delete an activity by id; deleting a missing id is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the delete query fails
    pub async fn delete_activity(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM activity_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.changes.publish(Table::ActivityRecords);
        Ok(())
    }

    /// Insert a route session (coordinates already JSON-encoded),
    /// returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_route(&self, record: &RouteSessionRow) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO route_sessions (user_id, start_time, end_time, coordinates) VALUES ($1, $2, $3, $4)",
        )
        .bind(record.user_id)
        .bind(record.start_time)
        .bind(record.end_time)
        .bind(&record.coordinates)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::RouteSessions);
        Ok(result.last_insert_rowid())
    }

    /// All of a user's route sessions, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn routes_for_user(&self, user_id: i64) -> Result<Vec<RouteSessionRow>> {
        let rows =
            sqlx::query("SELECT * FROM route_sessions WHERE user_id = $1 ORDER BY start_time DESC")
                .bind(user_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.iter().map(Self::row_to_route).collect())
    }

    fn row_to_steps(row: &sqlx::sqlite::SqliteRow) -> StepRow {
        StepRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            day: row.get("day"),
            count: row.get("count"),
        }
    }

    fn row_to_bmi(row: &sqlx::sqlite::SqliteRow) -> BmiRow {
        BmiRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            weight_kg: row.get("weight_kg"),
            height_m: row.get("height_m"),
            bmi: row.get("bmi"),
            recorded_at: row.get("recorded_at"),
        }
    }

    fn row_to_activity(row: &sqlx::sqlite::SqliteRow) -> ActivityRow {
        ActivityRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            name: row.get("name"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
        }
    }

    fn row_to_route(row: &sqlx::sqlite::SqliteRow) -> RouteSessionRow {
        RouteSessionRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            start_time: row.get("start_time"),
            end_time: row.get("end_time"),
            coordinates: row.get("coordinates"),
        }
    }
}
