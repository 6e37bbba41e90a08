// ABOUTME: Activity tracking repository: daily steps, BMI history, timed activities, GPS routes
// ABOUTME: Route coordinates decode from JSON here; malformed rows surface as errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;
use chrono::NaiveDate;

use super::query_err;
use crate::database::{Database, StepRow};
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::{ActivityRecord, BmiRecord, RouteSession, StepRecord};

/// Access to step counts, BMI records, timed activities, and routes
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Save a day's step count, returning the generated id. Each save
    /// appends; reads of a day take the latest record.
    async fn record_steps(
        &self,
        user_id: i64,
        day: NaiveDate,
        count: i32,
    ) -> Result<i64, DatabaseError>;

    /// A user's step history, newest day first
    async fn steps_for_user(&self, user_id: i64) -> Result<Vec<StepRecord>, DatabaseError>;

    /// The latest saved count for one day, if any
    async fn steps_for_day(
        &self,
        user_id: i64,
        day: NaiveDate,
    ) -> Result<Option<StepRecord>, DatabaseError>;

    /// Save a BMI measurement, returning the generated id
    async fn record_bmi(&self, record: &BmiRecord) -> Result<i64, DatabaseError>;

    /// A user's BMI history, newest first
    async fn bmi_history(&self, user_id: i64) -> Result<Vec<BmiRecord>, DatabaseError>;

    /// Save a timed activity, returning the generated id
    async fn record_activity(&self, record: &ActivityRecord) -> Result<i64, DatabaseError>;

    /// A user's activities, newest first
    async fn activities_for_user(&self, user_id: i64)
        -> Result<Vec<ActivityRecord>, DatabaseError>;

    /// Delete an activity; deleting a missing id is a no-op
    async fn delete_activity(&self, id: i64) -> Result<(), DatabaseError>;

    /// Save a recorded route, returning the generated id
    async fn add_route(&self, session: &RouteSession) -> Result<i64, DatabaseError>;

    /// A user's recorded routes, newest first
    async fn routes_for_user(&self, user_id: i64) -> Result<Vec<RouteSession>, DatabaseError>;
}

/// SQLite-backed [`TrackingRepository`]
#[derive(Clone)]
pub struct TrackingRepositoryImpl {
    db: Database,
}

impl TrackingRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TrackingRepository for TrackingRepositoryImpl {
    async fn record_steps(
        &self,
        user_id: i64,
        day: NaiveDate,
        count: i32,
    ) -> Result<i64, DatabaseError> {
        let row = StepRow {
            id: 0,
            user_id,
            day: mappers::date_to_epoch_millis(day),
            count,
        };
        self.db.insert_steps(&row).await.map_err(query_err)
    }

    async fn steps_for_user(&self, user_id: i64) -> Result<Vec<StepRecord>, DatabaseError> {
        let rows = self.db.steps_for_user(user_id).await.map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::step_record_from_row).collect())
    }

    async fn steps_for_day(
        &self,
        user_id: i64,
        day: NaiveDate,
    ) -> Result<Option<StepRecord>, DatabaseError> {
        let row = self
            .db
            .steps_for_day(user_id, mappers::date_to_epoch_millis(day))
            .await
            .map_err(query_err)?;
        Ok(row.map(mappers::step_record_from_row))
    }

    async fn record_bmi(&self, record: &BmiRecord) -> Result<i64, DatabaseError> {
        let row = mappers::bmi_record_to_row(record);
        self.db.insert_bmi(&row).await.map_err(query_err)
    }

    async fn bmi_history(&self, user_id: i64) -> Result<Vec<BmiRecord>, DatabaseError> {
        let rows = self.db.bmi_for_user(user_id).await.map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::bmi_record_from_row).collect())
    }

    async fn record_activity(&self, record: &ActivityRecord) -> Result<i64, DatabaseError> {
        let row = mappers::activity_to_row(record);
        self.db.insert_activity(&row).await.map_err(query_err)
    }

    async fn activities_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<ActivityRecord>, DatabaseError> {
        let rows = self
            .db
            .activities_for_user(user_id)
            .await
            .map_err(query_err)?;
        Ok(rows.into_iter().map(mappers::activity_from_row).collect())
    }

    async fn delete_activity(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_activity(id).await.map_err(query_err)
    }

    async fn add_route(&self, session: &RouteSession) -> Result<i64, DatabaseError> {
        let row = mappers::route_session_to_row(session);
        self.db.insert_route(&row).await.map_err(query_err)
    }

    async fn routes_for_user(&self, user_id: i64) -> Result<Vec<RouteSession>, DatabaseError> {
        let rows = self.db.routes_for_user(user_id).await.map_err(query_err)?;

        rows.into_iter()
            .map(|row| {
                mappers::route_session_from_row(row).map_err(|err| {
                    DatabaseError::SerializationError {
                        context: format!("route coordinates: {err}"),
                    }
                })
            })
            .collect()
    }
}
