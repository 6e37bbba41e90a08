// ABOUTME: Integration tests for the reactive repository watch streams
// ABOUTME: Verifies the initial emission and re-emission after committed writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::NaiveDate;
use fittrack::database::repositories::{
    UserRepository, UserRepositoryImpl, WeightRepository, WeightRepositoryImpl, WorkoutRepository,
    WorkoutRepositoryImpl,
};
use fittrack::database::Database;
use fittrack::models::{User, WeightEntry, Workout};
use futures_util::StreamExt;

async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

fn sample_user() -> User {
    User {
        id: 0,
        auth_uid: None,
        name: "Alex".into(),
        age: 29,
        height_cm: 181.0,
        weight_kg: 78.5,
        gender: "Male".into(),
        fitness_goal: "Build Muscle".into(),
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    }
}

fn weight_entry(user_id: i64, weight_kg: f64) -> WeightEntry {
    WeightEntry {
        id: 0,
        user_id,
        weight_kg,
        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        note: None,
    }
}

#[tokio::test]
async fn weight_watch_emits_current_state_then_updates() -> Result<()> {
    let db = create_test_db().await?;
    let weights = WeightRepositoryImpl::new(db);

    let mut stream = weights.watch_entries(1);

    let initial = stream.next().await.expect("initial emission")?;
    assert!(initial.is_empty());

    weights.add_entry(&weight_entry(1, 80.0)).await?;

    let after_write = stream.next().await.expect("re-emission")?;
    assert_eq!(after_write.len(), 1);
    assert!((after_write[0].weight_kg - 80.0).abs() < f64::EPSILON);

    Ok(())
}

#[tokio::test]
async fn user_watch_tracks_profile_changes() -> Result<()> {
    let db = create_test_db().await?;
    let users = UserRepositoryImpl::new(db);

    let id = users.create_user(&sample_user()).await?;

    let mut stream = users.watch_user(id);
    let initial = stream.next().await.expect("initial emission")?;
    assert_eq!(initial.as_ref().map(|u| u.weight_kg), Some(78.5));

    let mut updated = initial.expect("user exists");
    updated.weight_kg = 77.0;
    users.update_user(&updated).await?;

    let after_update = stream.next().await.expect("re-emission")?;
    assert_eq!(after_update.map(|u| u.weight_kg), Some(77.0));

    Ok(())
}

#[tokio::test]
async fn workout_watch_covers_the_whole_tree() -> Result<()> {
    let db = create_test_db().await?;
    let workouts = WorkoutRepositoryImpl::new(db);

    let id = workouts
        .create_workout(&Workout {
            id: 0,
            user_id: 1,
            name: "Session".into(),
            description: None,
            duration_min: 0,
            calories: None,
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            start_time: chrono::Utc::now(),
            end_time: None,
            is_completed: false,
            exercises: vec![],
        })
        .await?;

    let mut stream = workouts.watch_workout(id);
    let initial = stream.next().await.expect("initial emission")?;
    assert!(!initial.expect("workout exists").is_completed);

    workouts.complete_workout(id, 40, Some(280)).await?;

    let after_completion = stream.next().await.expect("re-emission")?;
    let workout = after_completion.expect("workout exists");
    assert!(workout.is_completed);
    assert_eq!(workout.duration_min, 40);
    assert_eq!(workout.calories, Some(280));

    Ok(())
}

#[tokio::test]
async fn watch_of_a_missing_row_emits_none() -> Result<()> {
    let db = create_test_db().await?;
    let users = UserRepositoryImpl::new(db);

    let mut stream = users.watch_user(404);
    let initial = stream.next().await.expect("initial emission")?;
    assert!(initial.is_none());

    Ok(())
}
