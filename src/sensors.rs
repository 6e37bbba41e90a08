// ABOUTME: Step counting and GPS route capture over platform sensor seams
// ABOUTME: Hardware access stays behind traits; the logic here is plain state machines
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use chrono::{DateTime, Utc};

use crate::calculations;
use crate::models::{Coordinate, RouteSession};

/// Platform step counter.
///
/// Reports a monotonically increasing count since device boot, or
/// `None` when no step sensor is available.
pub trait StepCounter: Send + Sync {
    fn cumulative_steps(&self) -> Option<u64>;
}

/// Tracks today's steps against a daily goal from a cumulative sensor.
///
/// The first reading after [`reset`](Self::reset) becomes the baseline;
/// progress is the delta since then. A device without a sensor counts
/// zero steps rather than failing.
pub struct StepTracker {
    baseline: Option<u64>,
    latest: u64,
    daily_goal: u32,
}

impl StepTracker {
    #[must_use]
    pub fn new(daily_goal: u32) -> Self {
        Self {
            baseline: None,
            latest: 0,
            daily_goal,
        }
    }

    /// Take a sensor reading and update the day's count
    pub fn update(&mut self, counter: &dyn StepCounter) {
        let Some(cumulative) = counter.cumulative_steps() else {
            return;
        };

        let baseline = *self.baseline.get_or_insert(cumulative);
        // A reading below the baseline means the counter restarted
        if cumulative < baseline {
            self.baseline = Some(cumulative);
            self.latest = 0;
            return;
        }
        self.latest = cumulative - baseline;
    }

    /// Steps counted since the baseline
    #[must_use]
    pub fn steps(&self) -> u64 {
        self.latest
    }

    /// Estimated calories burned by today's steps
    #[must_use]
    pub fn calories(&self) -> f64 {
        calculations::step_calories(self.latest)
    }

    /// Estimated distance covered today, in kilometres
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        calculations::step_distance_km(self.latest)
    }

    /// Fraction of the daily goal reached, clamped to 1.0
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.daily_goal == 0 {
            return 0.0;
        }
        (self.latest as f64 / f64::from(self.daily_goal)).min(1.0)
    }

    /// Start a fresh day: drop the baseline so the next reading becomes
    /// the new zero
    pub fn reset(&mut self) {
        self.baseline = None;
        self.latest = 0;
    }
}

/// Collects GPS fixes for one outdoor session.
///
/// `start` stamps the session, `push` appends fixes in arrival order,
/// and `finish` yields a [`RouteSession`] ready for the tracking
/// repository.
pub struct RouteRecorder {
    user_id: i64,
    started_at: DateTime<Utc>,
    coordinates: Vec<Coordinate>,
}

impl RouteRecorder {
    /// Begin recording for a user, stamping the start time now
    #[must_use]
    pub fn start(user_id: i64) -> Self {
        Self {
            user_id,
            started_at: Utc::now(),
            coordinates: Vec::new(),
        }
    }

    /// Append a GPS fix
    pub fn push(&mut self, coordinate: Coordinate) {
        self.coordinates.push(coordinate);
    }

    /// Number of fixes captured so far
    #[must_use]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Stop recording, stamping the end time now. The result has no
    /// storage id yet; saving assigns one.
    #[must_use]
    pub fn finish(self) -> RouteSession {
        RouteSession {
            id: 0,
            user_id: self.user_id,
            start_time: self.started_at,
            end_time: Utc::now(),
            coordinates: self.coordinates,
        }
    }
}
