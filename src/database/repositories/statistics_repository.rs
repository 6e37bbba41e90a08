// ABOUTME: Statistics repository computing rollups over workout and weight history
// ABOUTME: Aggregates come from SQL where a join does the work, in memory otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, Utc};

use super::query_err;
use crate::calculations::start_of_week;
use crate::database::Database;
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::{Lift, ProgressPoint, WorkoutStatistics};

/// Access to derived statistics over a user's history
#[async_trait]
pub trait StatisticsRepository: Send + Sync {
    /// Summary rollup over completed workouts. All-zero with empty
    /// optionals when the user has no completed workouts.
    async fn workout_statistics(&self, user_id: i64) -> Result<WorkoutStatistics, DatabaseError>;

    /// Body weight history as a progress series, newest first
    async fn weight_progress(&self, user_id: i64) -> Result<Vec<ProgressPoint>, DatabaseError>;

    /// Per completed-workout date, the heaviest set recorded for one
    /// exercise, oldest first
    async fn exercise_progress(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<ProgressPoint>, DatabaseError>;

    /// Completed workouts per calendar month of one year. Every month
    /// 1 through 12 is present, zero when empty.
    async fn workout_count_by_month(
        &self,
        user_id: i64,
        year: i32,
    ) -> Result<BTreeMap<u32, u32>, DatabaseError>;
}

/// SQLite-backed [`StatisticsRepository`]
#[derive(Clone)]
pub struct StatisticsRepositoryImpl {
    db: Database,
}

impl StatisticsRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StatisticsRepository for StatisticsRepositoryImpl {
    async fn workout_statistics(&self, user_id: i64) -> Result<WorkoutStatistics, DatabaseError> {
        let completed = self
            .db
            .completed_workouts_for_user(user_id)
            .await
            .map_err(query_err)?;

        let total_workouts = u32::try_from(completed.len()).unwrap_or(u32::MAX);
        let total_duration_min: u32 = completed
            .iter()
            .map(|workout| u32::try_from(workout.duration_min).unwrap_or(0))
            .sum();
        let total_calories: u32 = completed
            .iter()
            .map(|workout| u32::try_from(workout.calories.unwrap_or(0)).unwrap_or(0))
            .sum();

        let today = Utc::now().date_naive();
        let this_week_start = start_of_week(today);
        let last_week_start = this_week_start - Duration::days(7);

        let mut workouts_this_week = 0;
        let mut workouts_last_week = 0;
        for workout in &completed {
            let date = mappers::epoch_millis_to_date(workout.date);
            if date >= this_week_start {
                workouts_this_week += 1;
            } else if date >= last_week_start {
                workouts_last_week += 1;
            }
        }

        let average_duration_min = if total_workouts == 0 {
            0
        } else {
            total_duration_min / total_workouts
        };

        let most_frequent_exercise = self
            .db
            .most_frequent_exercise(user_id)
            .await
            .map_err(query_err)?
            .map(|(name, _)| name);

        let strongest_lift = self
            .db
            .strongest_lift(user_id)
            .await
            .map_err(query_err)?
            .map(|(exercise, weight_kg)| Lift {
                exercise,
                weight_kg,
            });

        Ok(WorkoutStatistics {
            total_workouts,
            total_duration_min,
            total_calories,
            most_frequent_exercise,
            strongest_lift,
            workouts_this_week,
            workouts_last_week,
            average_duration_min,
        })
    }

    async fn weight_progress(&self, user_id: i64) -> Result<Vec<ProgressPoint>, DatabaseError> {
        let entries = self
            .db
            .weight_entries_for_user(user_id)
            .await
            .map_err(query_err)?;

        Ok(entries
            .into_iter()
            .map(|entry| ProgressPoint {
                date: mappers::epoch_millis_to_date(entry.date),
                weight_kg: entry.weight_kg,
            })
            .collect())
    }

    async fn exercise_progress(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<ProgressPoint>, DatabaseError> {
        let points = self
            .db
            .exercise_max_weight_by_date(user_id, exercise_id)
            .await
            .map_err(query_err)?;

        Ok(points
            .into_iter()
            .map(|(date_millis, weight_kg)| ProgressPoint {
                date: mappers::epoch_millis_to_date(date_millis),
                weight_kg,
            })
            .collect())
    }

    async fn workout_count_by_month(
        &self,
        user_id: i64,
        year: i32,
    ) -> Result<BTreeMap<u32, u32>, DatabaseError> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or_default();
        let (start_millis, end_millis) = mappers::day_range_millis(start, end);

        let workouts = self
            .db
            .workouts_between(user_id, start_millis, end_millis)
            .await
            .map_err(query_err)?;

        let mut counts: BTreeMap<u32, u32> = (1..=12).map(|month| (month, 0)).collect();
        for workout in workouts.iter().filter(|workout| workout.is_completed) {
            let month = mappers::epoch_millis_to_date(workout.date).month();
            if let Some(count) = counts.get_mut(&month) {
                *count += 1;
            }
        }

        Ok(counts)
    }
}
