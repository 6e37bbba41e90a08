// ABOUTME: Integration tests for routine templates
// ABOUTME: Covers cascade writes, ordering, and starting a workout from a routine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::Utc;
use fittrack::database::repositories::{RoutineRepository, RoutineRepositoryImpl};
use fittrack::database::{
    Database, ExerciseRow, RoutineDetail, RoutineExerciseDetail, RoutineExerciseRow, RoutineRow,
};

async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

async fn seed_exercise(db: &Database, name: &str) -> Result<i64> {
    db.insert_exercise(&ExerciseRow {
        id: 0,
        name: name.into(),
        description: String::new(),
        muscle_group: "Legs".into(),
        is_custom: false,
        created_by: None,
        created_at: 0,
    })
    .await
}

fn routine_row(user_id: i64, name: &str) -> RoutineRow {
    RoutineRow {
        id: 0,
        user_id,
        name: name.into(),
        description: Some("three times a week".into()),
        frequency_per_week: Some(3),
        created_at: 1_700_000_000_000,
    }
}

fn routine_link(exercise_id: i64, order_index: i32) -> RoutineExerciseRow {
    RoutineExerciseRow {
        id: 0,
        routine_id: 0,
        exercise_id,
        order_index,
        target_sets: 5,
        target_reps: Some(5),
        target_duration_secs: None,
        rest_between_sets_secs: Some(120),
    }
}

fn exercise_stub(id: i64, name: &str) -> ExerciseRow {
    ExerciseRow {
        id,
        name: name.into(),
        description: String::new(),
        muscle_group: "Legs".into(),
        is_custom: false,
        created_by: None,
        created_at: 0,
    }
}

#[tokio::test]
async fn cascade_create_persists_the_exercise_list() -> Result<()> {
    let db = create_test_db().await?;
    let squat = seed_exercise(&db, "Squat").await?;
    let deadlift = seed_exercise(&db, "Deadlift").await?;

    let id = db
        .insert_routine(&RoutineDetail {
            routine: routine_row(1, "Strength A"),
            exercises: vec![
                RoutineExerciseDetail {
                    link: routine_link(squat, 0),
                    exercise: exercise_stub(squat, "Squat"),
                },
                RoutineExerciseDetail {
                    link: routine_link(deadlift, 1),
                    exercise: exercise_stub(deadlift, "Deadlift"),
                },
            ],
        })
        .await?;

    let fetched = db.get_routine_detail(id).await?.expect("routine exists");
    assert_eq!(fetched.routine.name, "Strength A");
    assert_eq!(fetched.routine.frequency_per_week, Some(3));
    assert_eq!(fetched.exercises.len(), 2);
    assert_eq!(fetched.exercises[0].exercise.name, "Squat");
    assert!(fetched.exercises.iter().all(|e| e.link.routine_id == id));

    Ok(())
}

#[tokio::test]
async fn routines_list_is_sorted_by_name() -> Result<()> {
    let db = create_test_db().await?;

    for name in ["Pull Day", "Leg Day", "Push Day"] {
        db.insert_routine(&RoutineDetail {
            routine: routine_row(1, name),
            exercises: vec![],
        })
        .await?;
    }

    let routines = db.routines_for_user(1).await?;
    let names: Vec<&str> = routines.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Leg Day", "Pull Day", "Push Day"]);

    Ok(())
}

#[tokio::test]
async fn delete_routine_removes_its_exercises() -> Result<()> {
    let db = create_test_db().await?;
    let squat = seed_exercise(&db, "Squat").await?;

    let id = db
        .insert_routine(&RoutineDetail {
            routine: routine_row(1, "Strength A"),
            exercises: vec![RoutineExerciseDetail {
                link: routine_link(squat, 0),
                exercise: exercise_stub(squat, "Squat"),
            }],
        })
        .await?;

    db.delete_routine(id).await?;
    assert!(db.get_routine_detail(id).await?.is_none());

    // Deleting again must not error
    db.delete_routine(id).await?;
    Ok(())
}

#[tokio::test]
async fn starting_a_routine_clones_its_exercises_into_a_new_workout() -> Result<()> {
    let db = create_test_db().await?;
    let squat = seed_exercise(&db, "Squat").await?;
    let deadlift = seed_exercise(&db, "Deadlift").await?;

    let routine_id = db
        .insert_routine(&RoutineDetail {
            routine: routine_row(1, "Strength A"),
            exercises: vec![
                RoutineExerciseDetail {
                    link: routine_link(squat, 0),
                    exercise: exercise_stub(squat, "Squat"),
                },
                RoutineExerciseDetail {
                    link: routine_link(deadlift, 1),
                    exercise: exercise_stub(deadlift, "Deadlift"),
                },
            ],
        })
        .await?;

    let routines = RoutineRepositoryImpl::new(db.clone());
    let workout_id = routines
        .create_workout_from_routine(routine_id, 1)
        .await?
        .expect("routine exists");

    let workout = db.get_workout_detail(workout_id).await?.expect("created");
    assert_eq!(workout.workout.name, "Strength A");
    assert_eq!(workout.workout.user_id, 1);
    assert!(!workout.workout.is_completed);
    assert_eq!(workout.workout.duration_min, 0);

    // Today's date, cloned targets, no performed sets yet
    assert_eq!(
        fittrack::mappers::epoch_millis_to_date(workout.workout.date),
        Utc::now().date_naive()
    );
    assert_eq!(workout.exercises.len(), 2);
    assert_eq!(workout.exercises[0].exercise.name, "Squat");
    assert_eq!(workout.exercises[0].link.target_sets, 5);
    assert!(workout.exercises.iter().all(|e| e.sets.is_empty()));

    // The template is untouched
    let routine = db.get_routine_detail(routine_id).await?.expect("exists");
    assert_eq!(routine.exercises.len(), 2);

    Ok(())
}

#[tokio::test]
async fn starting_a_missing_routine_yields_none() -> Result<()> {
    let db = create_test_db().await?;
    let routines = RoutineRepositoryImpl::new(db);

    assert!(routines.create_workout_from_routine(404, 1).await?.is_none());
    Ok(())
}
