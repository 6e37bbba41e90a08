// ABOUTME: Integration tests for the statistics rollups
// ABOUTME: Covers totals, week buckets, frequent/strongest queries, and progress series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use fittrack::database::repositories::{StatisticsRepository, StatisticsRepositoryImpl};
use fittrack::database::{
    Database, ExerciseRow, ExerciseSetRow, WorkoutDetail, WorkoutExerciseDetail,
    WorkoutExerciseRow, WorkoutRow,
};
use fittrack::mappers::date_to_epoch_millis;

async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

async fn seed_exercise(db: &Database, name: &str) -> Result<i64> {
    db.insert_exercise(&ExerciseRow {
        id: 0,
        name: name.into(),
        description: String::new(),
        muscle_group: "Full Body".into(),
        is_custom: false,
        created_by: None,
        created_at: 0,
    })
    .await
}

fn exercise_entry(exercise_id: i64, weights: &[f64]) -> WorkoutExerciseDetail {
    WorkoutExerciseDetail {
        link: WorkoutExerciseRow {
            id: 0,
            workout_id: 0,
            exercise_id,
            order_index: 0,
            target_sets: weights.len() as i32,
            target_reps: Some(5),
            target_duration_secs: None,
            rest_between_sets_secs: None,
        },
        exercise: ExerciseRow {
            id: exercise_id,
            name: String::new(),
            description: String::new(),
            muscle_group: String::new(),
            is_custom: false,
            created_by: None,
            created_at: 0,
        },
        sets: weights
            .iter()
            .enumerate()
            .map(|(i, weight)| ExerciseSetRow {
                id: 0,
                workout_exercise_id: 0,
                set_number: (i + 1) as i32,
                reps: Some(5),
                weight_kg: Some(*weight),
                duration_secs: None,
                completed: true,
                recorded_at: 0,
            })
            .collect(),
    }
}

async fn insert_workout(
    db: &Database,
    user_id: i64,
    day: NaiveDate,
    duration_min: i32,
    calories: Option<i32>,
    completed: bool,
    exercises: Vec<WorkoutExerciseDetail>,
) -> Result<i64> {
    let millis = date_to_epoch_millis(day);
    db.insert_workout(&WorkoutDetail {
        workout: WorkoutRow {
            id: 0,
            user_id,
            name: "Session".into(),
            description: None,
            duration_min,
            calories,
            date: millis,
            start_time: millis,
            end_time: None,
            is_completed: completed,
        },
        exercises,
    })
    .await
}

#[tokio::test]
async fn empty_history_yields_zeroed_statistics() -> Result<()> {
    let db = create_test_db().await?;
    let stats = StatisticsRepositoryImpl::new(db);

    let rollup = stats.workout_statistics(1).await?;
    assert_eq!(rollup.total_workouts, 0);
    assert_eq!(rollup.total_duration_min, 0);
    assert_eq!(rollup.total_calories, 0);
    assert_eq!(rollup.average_duration_min, 0);
    assert!(rollup.most_frequent_exercise.is_none());
    assert!(rollup.strongest_lift.is_none());

    Ok(())
}

#[tokio::test]
async fn totals_cover_completed_workouts_only() -> Result<()> {
    let db = create_test_db().await?;

    insert_workout(&db, 1, date(2025, 1, 6), 30, Some(200), true, vec![]).await?;
    insert_workout(&db, 1, date(2025, 1, 8), 45, None, true, vec![]).await?;
    insert_workout(&db, 1, date(2025, 1, 10), 60, Some(300), true, vec![]).await?;
    // In-progress sessions never count
    insert_workout(&db, 1, date(2025, 1, 12), 90, Some(900), false, vec![]).await?;

    let stats = StatisticsRepositoryImpl::new(db);
    let rollup = stats.workout_statistics(1).await?;

    assert_eq!(rollup.total_workouts, 3);
    assert_eq!(rollup.total_duration_min, 135);
    assert_eq!(rollup.total_calories, 500);
    assert_eq!(rollup.average_duration_min, 45);

    Ok(())
}

#[tokio::test]
async fn week_buckets_split_on_the_iso_week_boundary() -> Result<()> {
    let db = create_test_db().await?;
    let today = Utc::now().date_naive();

    insert_workout(&db, 1, today, 30, None, true, vec![]).await?;
    insert_workout(&db, 1, today - Duration::days(7), 30, None, true, vec![]).await?;
    insert_workout(&db, 1, today - Duration::days(30), 30, None, true, vec![]).await?;

    let stats = StatisticsRepositoryImpl::new(db);
    let rollup = stats.workout_statistics(1).await?;

    assert_eq!(rollup.workouts_this_week, 1);
    assert_eq!(rollup.workouts_last_week, 1);
    assert_eq!(rollup.total_workouts, 3);

    Ok(())
}

#[tokio::test]
async fn most_frequent_and_strongest_come_from_completed_sets() -> Result<()> {
    let db = create_test_db().await?;
    let bench = seed_exercise(&db, "Bench Press").await?;
    let squat = seed_exercise(&db, "Squat").await?;

    insert_workout(
        &db,
        1,
        date(2025, 1, 6),
        45,
        None,
        true,
        vec![exercise_entry(bench, &[60.0, 65.0])],
    )
    .await?;
    insert_workout(
        &db,
        1,
        date(2025, 1, 8),
        45,
        None,
        true,
        vec![
            exercise_entry(bench, &[62.5]),
            exercise_entry(squat, &[140.0]),
        ],
    )
    .await?;
    // The heaviest set of all sits in an unfinished session and must not win
    insert_workout(
        &db,
        1,
        date(2025, 1, 10),
        0,
        None,
        false,
        vec![exercise_entry(squat, &[200.0])],
    )
    .await?;

    let stats = StatisticsRepositoryImpl::new(db);
    let rollup = stats.workout_statistics(1).await?;

    assert_eq!(rollup.most_frequent_exercise.as_deref(), Some("Bench Press"));
    let lift = rollup.strongest_lift.expect("has lifts");
    assert_eq!(lift.exercise, "Squat");
    assert!((lift.weight_kg - 140.0).abs() < f64::EPSILON);

    Ok(())
}

#[tokio::test]
async fn exercise_progress_takes_the_daily_max_ascending() -> Result<()> {
    let db = create_test_db().await?;
    let bench = seed_exercise(&db, "Bench Press").await?;

    insert_workout(
        &db,
        1,
        date(2025, 2, 10),
        45,
        None,
        true,
        vec![exercise_entry(bench, &[60.0, 65.0, 62.5])],
    )
    .await?;
    insert_workout(
        &db,
        1,
        date(2025, 2, 3),
        45,
        None,
        true,
        vec![exercise_entry(bench, &[57.5, 60.0])],
    )
    .await?;

    let stats = StatisticsRepositoryImpl::new(db);
    let progress = stats.exercise_progress(1, bench).await?;

    assert_eq!(progress.len(), 2);
    assert_eq!(progress[0].date, date(2025, 2, 3));
    assert!((progress[0].weight_kg - 60.0).abs() < f64::EPSILON);
    assert_eq!(progress[1].date, date(2025, 2, 10));
    assert!((progress[1].weight_kg - 65.0).abs() < f64::EPSILON);

    Ok(())
}

#[tokio::test]
async fn month_buckets_are_zero_filled_across_the_year() -> Result<()> {
    let db = create_test_db().await?;

    insert_workout(&db, 1, date(2025, 1, 6), 30, None, true, vec![]).await?;
    insert_workout(&db, 1, date(2025, 1, 20), 30, None, true, vec![]).await?;
    insert_workout(&db, 1, date(2025, 3, 12), 30, None, true, vec![]).await?;
    insert_workout(&db, 1, date(2025, 1, 25), 30, None, false, vec![]).await?;
    // Other years stay out of the rollup
    insert_workout(&db, 1, date(2024, 12, 31), 30, None, true, vec![]).await?;

    let stats = StatisticsRepositoryImpl::new(db);
    let by_month = stats.workout_count_by_month(1, 2025).await?;

    assert_eq!(by_month.len(), 12);
    assert_eq!(by_month[&1], 2);
    assert_eq!(by_month[&2], 0);
    assert_eq!(by_month[&3], 1);
    assert_eq!(by_month[&12], 0);

    Ok(())
}

#[tokio::test]
async fn weight_progress_mirrors_the_weight_history() -> Result<()> {
    let db = create_test_db().await?;

    for (day, weight) in [
        (date(2025, 1, 1), 82.0),
        (date(2025, 1, 15), 81.2),
        (date(2025, 2, 1), 80.4),
    ] {
        db.insert_weight_entry(&fittrack::database::WeightEntryRow {
            id: 0,
            user_id: 1,
            weight_kg: weight,
            date: date_to_epoch_millis(day),
            note: None,
        })
        .await?;
    }

    let stats = StatisticsRepositoryImpl::new(db);
    let progress = stats.weight_progress(1).await?;

    assert_eq!(progress.len(), 3);
    // Newest first, matching the history ordering
    assert_eq!(progress[0].date, date(2025, 2, 1));
    assert!((progress[0].weight_kg - 80.4).abs() < f64::EPSILON);
    assert_eq!(progress[2].date, date(2025, 1, 1));

    Ok(())
}
