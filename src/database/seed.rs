// ABOUTME: System exercise catalog seeding
// ABOUTME: Idempotent insert of the preset (non-custom) exercises at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use chrono::Utc;

use super::records::ExerciseRow;
use super::Database;

/// (name, description, muscle group)
const PRESET_EXERCISES: &[(&str, &str, &str)] = &[
    ("Bench Press", "Barbell press lying on a flat bench", "Chest"),
    ("Incline Dumbbell Press", "Dumbbell press on an incline bench", "Chest"),
    ("Push-ups", "Bodyweight press from a plank position", "Chest"),
    ("Pull-ups", "Bodyweight vertical pull from a dead hang", "Back"),
    ("Bent-over Row", "Barbell row with a hinged torso", "Back"),
    ("Lat Pulldown", "Cable pull to the upper chest", "Back"),
    ("Deadlift", "Barbell lift from the floor to lockout", "Back"),
    ("Overhead Press", "Standing barbell press overhead", "Shoulders"),
    ("Lateral Raise", "Dumbbell raise to the side at shoulder height", "Shoulders"),
    ("Bicep Curl", "Dumbbell curl with elbows pinned", "Arms"),
    ("Tricep Dips", "Bodyweight dip on parallel bars", "Arms"),
    ("Squat", "Barbell back squat to parallel or below", "Legs"),
    ("Lunges", "Alternating forward lunge with dumbbells", "Legs"),
    ("Leg Press", "Machine press with feet shoulder width", "Legs"),
    ("Plank", "Timed isometric hold on forearms", "Core"),
    ("Crunches", "Partial sit-up targeting the abdominals", "Core"),
    ("Russian Twist", "Seated rotation with feet elevated", "Core"),
    ("Jump Rope", "Continuous rope skipping", "Cardio"),
    ("Rowing", "Steady-state erg rowing", "Cardio"),
];

impl Database {
    /// Seed the system exercise catalog.
    ///
    /// A no-op when any non-custom exercise already exists, so it is
    /// safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails
    pub async fn seed_preset_exercises(&self) -> Result<()> {
        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exercises WHERE is_custom = 0")
            .fetch_one(self.pool())
            .await?;

        if existing > 0 {
            return Ok(());
        }

        let now = Utc::now().timestamp_millis();
        for (name, description, muscle_group) in PRESET_EXERCISES {
            self.insert_exercise(&ExerciseRow {
                id: 0,
                name: (*name).into(),
                description: (*description).into(),
                muscle_group: (*muscle_group).into(),
                is_custom: false,
                created_by: None,
                created_at: now,
            })
            .await?;
        }

        tracing::info!(count = PRESET_EXERCISES.len(), "seeded preset exercises");
        Ok(())
    }
}
