// ABOUTME: User profile and weight history domain models
// ABOUTME: One local profile per signed-in account, plus an append-only weight series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A local user profile.
///
/// `auth_uid` links the row to the cloud identity provider's stable
/// external identifier; it is `None` for profiles created before
/// sign-in completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// External identity provider uid, when linked
    pub auth_uid: Option<String>,
    /// Display name
    pub name: String,
    /// Age in years
    pub age: i32,
    /// Height in centimeters
    pub height_cm: f64,
    /// Current weight in kilograms
    pub weight_kg: f64,
    /// Self-reported gender
    pub gender: String,
    /// Fitness goal, e.g. "Gain Muscle"
    pub fitness_goal: String,
    /// Creation instant
    pub created_at: DateTime<Utc>,
    /// Last profile update instant
    pub updated_at: DateTime<Utc>,
}

/// One entry in a user's weight history.
///
/// Dates carry calendar-day precision only; time of day is discarded
/// when the entry is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Local identifier (0 until persisted)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Calendar day the weight was recorded
    pub date: NaiveDate,
    /// Optional free-form note
    pub note: Option<String>,
}
