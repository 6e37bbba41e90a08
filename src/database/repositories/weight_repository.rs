// ABOUTME: Weight history repository with range queries and a reactive history stream
// ABOUTME: Calendar-date arguments convert to day-bucket timestamps at this layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;
use chrono::NaiveDate;
use futures_util::stream::BoxStream;

use super::query_err;
use crate::database::{changes, Database, Table};
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::WeightEntry;

/// Access to body weight history
#[async_trait]
pub trait WeightRepository: Send + Sync {
    /// Record a weight entry, returning the generated id
    async fn add_entry(&self, entry: &WeightEntry) -> Result<i64, DatabaseError>;

    /// Replace an entry by id
    async fn update_entry(&self, entry: &WeightEntry) -> Result<(), DatabaseError>;

    /// Delete an entry; deleting a missing id is a no-op
    async fn delete_entry(&self, id: i64) -> Result<(), DatabaseError>;

    /// A user's full history, newest first
    async fn entries_for_user(&self, user_id: i64) -> Result<Vec<WeightEntry>, DatabaseError>;

    /// Entries in an inclusive day range, newest first
    async fn entries_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeightEntry>, DatabaseError>;

    /// The most recent entry, if any
    async fn latest_entry(&self, user_id: i64) -> Result<Option<WeightEntry>, DatabaseError>;

    /// Stream of the full history, re-emitted after every weight write
    fn watch_entries(
        &self,
        user_id: i64,
    ) -> BoxStream<'static, Result<Vec<WeightEntry>, DatabaseError>>;
}

/// SQLite-backed [`WeightRepository`]
#[derive(Clone)]
pub struct WeightRepositoryImpl {
    db: Database,
}

impl WeightRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WeightRepository for WeightRepositoryImpl {
    async fn add_entry(&self, entry: &WeightEntry) -> Result<i64, DatabaseError> {
        let row = mappers::weight_entry_to_row(entry);
        self.db.insert_weight_entry(&row).await.map_err(query_err)
    }

    async fn update_entry(&self, entry: &WeightEntry) -> Result<(), DatabaseError> {
        let row = mappers::weight_entry_to_row(entry);
        self.db.update_weight_entry(&row).await.map_err(query_err)
    }

    async fn delete_entry(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_weight_entry(id).await.map_err(query_err)
    }

    async fn entries_for_user(&self, user_id: i64) -> Result<Vec<WeightEntry>, DatabaseError> {
        let rows = self
            .db
            .weight_entries_for_user(user_id)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::weight_entry_from_row).collect())
    }

    async fn entries_between(
        &self,
        user_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<WeightEntry>, DatabaseError> {
        let (start_millis, end_millis) = mappers::day_range_millis(start, end);
        let rows = self
            .db
            .weight_entries_between(user_id, start_millis, end_millis)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::weight_entry_from_row).collect())
    }

    async fn latest_entry(&self, user_id: i64) -> Result<Option<WeightEntry>, DatabaseError> {
        let row = self
            .db
            .latest_weight_entry(user_id)
            .await
            .map_err(query_err)?;
        Ok(row.map(mappers::weight_entry_from_row))
    }

    fn watch_entries(
        &self,
        user_id: i64,
    ) -> BoxStream<'static, Result<Vec<WeightEntry>, DatabaseError>> {
        changes::watch(
            self.db.clone(),
            &[Table::WeightEntries],
            move |db| async move {
                db.weight_entries_for_user(user_id)
                    .await
                    .map(|rows| rows.into_iter().map(mappers::weight_entry_from_row).collect())
                    .map_err(query_err)
            },
        )
    }
}
