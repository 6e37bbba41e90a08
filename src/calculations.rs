// ABOUTME: Pure fitness math: BMI, calorie estimates, one-rep max, unit conversions
// ABOUTME: No I/O; everything here is deterministic and unit tested
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use chrono::{Datelike, Duration, NaiveDate};

const KG_PER_LB: f64 = 2.204_62;
const CM_PER_IN: f64 = 2.54;

/// Calories burned per step for an average adult
const CALORIES_PER_STEP: f64 = 0.04;

/// Metres covered per step, an average stride
const METRES_PER_STEP: f64 = 0.762;

/// Body mass index from weight in kilograms and height in metres
#[must_use]
pub fn bmi(weight_kg: f64, height_m: f64) -> f64 {
    if height_m <= 0.0 {
        return 0.0;
    }
    weight_kg / (height_m * height_m)
}

/// Body mass index with height given in centimetres, as profiles store it
#[must_use]
pub fn bmi_from_cm(weight_kg: f64, height_cm: f64) -> f64 {
    bmi(weight_kg, height_cm / 100.0)
}

/// WHO category label for a BMI value
#[must_use]
pub fn bmi_category(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight"
    } else if bmi < 25.0 {
        "Normal weight"
    } else if bmi < 30.0 {
        "Overweight"
    } else {
        "Obese"
    }
}

/// Workout intensity bands with their MET values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkoutIntensity {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl WorkoutIntensity {
    /// Metabolic equivalent of task for the band
    #[must_use]
    pub fn met(self) -> f64 {
        match self {
            Self::Low => 3.0,
            Self::Moderate => 5.0,
            Self::High => 8.0,
            Self::VeryHigh => 12.0,
        }
    }
}

/// Estimated calories burned: MET x body weight (kg) x duration (hours)
#[must_use]
pub fn estimate_calories_burned(
    intensity: WorkoutIntensity,
    weight_kg: f64,
    duration_min: u32,
) -> f64 {
    intensity.met() * weight_kg * (f64::from(duration_min) / 60.0)
}

/// Estimated calories burned by a step count
#[must_use]
pub fn step_calories(steps: u64) -> f64 {
    steps as f64 * CALORIES_PER_STEP
}

/// Estimated distance covered by a step count, in kilometres
#[must_use]
pub fn step_distance_km(steps: u64) -> f64 {
    steps as f64 * METRES_PER_STEP / 1000.0
}

/// Epley estimate of the one-rep max for a weight lifted `reps` times.
/// A single rep is already the max.
#[must_use]
pub fn one_rep_max(weight_kg: f64, reps: u32) -> f64 {
    if reps <= 1 {
        return weight_kg;
    }
    weight_kg * (1.0 + f64::from(reps) / 30.0)
}

/// Inverse of [`one_rep_max`]: the working weight that projects to a
/// given one-rep max at a rep count
#[must_use]
pub fn target_weight(one_rep_max_kg: f64, reps: u32) -> f64 {
    if reps <= 1 {
        return one_rep_max_kg;
    }
    one_rep_max_kg / (1.0 + f64::from(reps) / 30.0)
}

#[must_use]
pub fn kg_to_lb(kg: f64) -> f64 {
    kg * KG_PER_LB
}

#[must_use]
pub fn lb_to_kg(lb: f64) -> f64 {
    lb / KG_PER_LB
}

#[must_use]
pub fn cm_to_in(cm: f64) -> f64 {
    cm / CM_PER_IN
}

#[must_use]
pub fn in_to_cm(inches: f64) -> f64 {
    inches * CM_PER_IN
}

/// The Monday starting the ISO week containing `date`
#[must_use]
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The Sunday ending the ISO week containing `date`
#[must_use]
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}
