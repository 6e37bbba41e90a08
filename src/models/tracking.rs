// ABOUTME: Activity tracking domain models: steps, BMI history, timed activities, GPS routes
// ABOUTME: All are append-only per-user series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A saved step count for one calendar day.
///
/// One row is written per save action; a day may have several rows and
/// readers take the latest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Calendar day the steps belong to
    pub day: NaiveDate,
    /// Step count at save time
    pub count: i32,
}

/// One BMI measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiRecord {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Height in meters
    pub height_m: f64,
    /// Computed body mass index
    pub bmi: f64,
    /// Measurement instant
    pub recorded_at: DateTime<Utc>,
}

/// A free-form timed activity (e.g. "Evening run").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Activity name
    pub name: String,
    /// Start instant
    pub start_time: DateTime<Utc>,
    /// End instant
    pub end_time: DateTime<Utc>,
}

/// A single GPS sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

/// A recorded GPS route.
///
/// Coordinates are stored as a JSON text column, the sole
/// non-relational field in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSession {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Tracking start instant
    pub start_time: DateTime<Utc>,
    /// Tracking end instant
    pub end_time: DateTime<Utc>,
    /// Ordered GPS samples
    pub coordinates: Vec<Coordinate>,
}
