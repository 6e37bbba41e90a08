// ABOUTME: Database facade over the SQLite pool
// ABOUTME: Owns migrations, the change bus, and the per-area query modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

//! # Local store
//!
//! All persisted state lives in one SQLite file addressed through a
//! shared [`Database`] handle. Area modules add their queries as
//! `impl Database` blocks and their tables through `migrate_*`
//! functions run at startup. Writes publish change events consumed by
//! the repository watch streams.

mod changes;
mod exercises;
mod records;
pub mod repositories;
mod routines;
mod seed;
mod statistics;
mod tracking;
mod users;
mod weights;
mod workouts;

pub use changes::{ChangeBus, Table};
pub use records::*;

use anyhow::Result;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Shared handle to the local relational store
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
    changes: ChangeBus,
}

impl Database {
    /// Open (creating if necessary) the database and run migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails.
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_string()
        };

        let pool = SqlitePool::connect(&connection_options).await?;

        let db = Self {
            pool,
            changes: ChangeBus::new(),
        };

        db.migrate().await?;

        tracing::debug!(url = database_url, "database opened");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Get the change bus for watch subscriptions
    #[must_use]
    pub fn changes(&self) -> &ChangeBus {
        &self.changes
    }

    /// Run database migrations
    async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_weight_entries().await?;
        self.migrate_exercises().await?;
        self.migrate_workouts().await?;
        self.migrate_routines().await?;
        self.migrate_tracking().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) async fn create_test_db() -> Result<Database> {
        // In-memory database - each connection gets its own isolated instance
        Database::new("sqlite::memory:").await
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = create_test_db().await.expect("open db");
        db.migrate().await.expect("second migration run");
    }
}
