// ABOUTME: Weight entry database operations
// ABOUTME: Append-only per-user weight history, queried descending by date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::records::WeightEntryRow;
use super::{Database, Table};

impl Database {
    /// Create the weight_entries table
    pub(super) async fn migrate_weight_entries(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS weight_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                weight_kg REAL NOT NULL,
                date INTEGER NOT NULL,
                note TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_weight_entries_user_date ON weight_entries(user_id, date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a weight entry, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_weight_entry(&self, entry: &WeightEntryRow) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO weight_entries (user_id, weight_kg, date, note) VALUES ($1, $2, $3, $4)",
        )
        .bind(entry.user_id)
        .bind(entry.weight_kg)
        .bind(entry.date)
        .bind(&entry.note)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::WeightEntries);
        Ok(result.last_insert_rowid())
    }

    /// Replace a weight entry by id
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_weight_entry(&self, entry: &WeightEntryRow) -> Result<()> {
        sqlx::query(
            "UPDATE weight_entries SET user_id = $2, weight_kg = $3, date = $4, note = $5 WHERE id = $1",
        )
        .bind(entry.id)
        .bind(entry.user_id)
        .bind(entry.weight_kg)
        .bind(entry.date)
        .bind(&entry.note)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::WeightEntries);
        Ok(())
    }

    /// Delete a weight entry by id; deleting a missing id is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the delete query fails
    pub async fn delete_weight_entry(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM weight_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.changes.publish(Table::WeightEntries);
        Ok(())
    }

    /// All of a user's weight entries, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn weight_entries_for_user(&self, user_id: i64) -> Result<Vec<WeightEntryRow>> {
        let rows = sqlx::query("SELECT * FROM weight_entries WHERE user_id = $1 ORDER BY date DESC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(Self::row_to_weight_entry).collect())
    }

    /// Weight entries inside an inclusive millisecond range, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn weight_entries_between(
        &self,
        user_id: i64,
        start_millis: i64,
        end_millis: i64,
    ) -> Result<Vec<WeightEntryRow>> {
        let rows = sqlx::query(
            r"
            SELECT * FROM weight_entries
            WHERE user_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date DESC
            ",
        )
        .bind(user_id)
        .bind(start_millis)
        .bind(end_millis)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::row_to_weight_entry).collect())
    }

    /// The most recent weight entry for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn latest_weight_entry(&self, user_id: i64) -> Result<Option<WeightEntryRow>> {
        let row = sqlx::query(
            "SELECT * FROM weight_entries WHERE user_id = $1 ORDER BY date DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_weight_entry))
    }

    fn row_to_weight_entry(row: &sqlx::sqlite::SqliteRow) -> WeightEntryRow {
        WeightEntryRow {
            id: row.get("id"),
            user_id: row.get("user_id"),
            weight_kg: row.get("weight_kg"),
            date: row.get("date"),
            note: row.get("note"),
        }
    }
}
