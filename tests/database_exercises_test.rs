// ABOUTME: Integration tests for the exercise catalog
// ABOUTME: Covers preset seeding, custom exercises, filters, and name search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use fittrack::database::{Database, ExerciseRow};

async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

fn custom_exercise(name: &str, muscle_group: &str, created_by: i64) -> ExerciseRow {
    ExerciseRow {
        id: 0,
        name: name.into(),
        description: format!("{name} description"),
        muscle_group: muscle_group.into(),
        is_custom: true,
        created_by: Some(created_by),
        created_at: 1_700_000_000_000,
    }
}

#[tokio::test]
async fn seeding_presets_is_idempotent() -> Result<()> {
    let db = create_test_db().await?;

    db.seed_preset_exercises().await?;
    let first = db.preset_exercises().await?;
    assert!(!first.is_empty());
    assert!(first.iter().all(|e| !e.is_custom && e.created_by.is_none()));

    db.seed_preset_exercises().await?;
    let second = db.preset_exercises().await?;
    assert_eq!(first.len(), second.len());

    Ok(())
}

#[tokio::test]
async fn presets_are_sorted_by_name() -> Result<()> {
    let db = create_test_db().await?;
    db.seed_preset_exercises().await?;

    let presets = db.preset_exercises().await?;
    let names: Vec<&str> = presets.iter().map(|e| e.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    assert_eq!(names, sorted);
    assert!(names.contains(&"Bench Press"));
    assert!(names.contains(&"Squat"));

    Ok(())
}

#[tokio::test]
async fn custom_exercises_are_scoped_to_their_creator() -> Result<()> {
    let db = create_test_db().await?;
    db.seed_preset_exercises().await?;

    db.insert_exercise(&custom_exercise("Cable Fly", "Chest", 1)).await?;
    db.insert_exercise(&custom_exercise("Box Jump", "Legs", 2)).await?;

    let for_one = db.custom_exercises_for_user(1).await?;
    assert_eq!(for_one.len(), 1);
    assert_eq!(for_one[0].name, "Cable Fly");
    assert_eq!(for_one[0].created_by, Some(1));

    // Presets never appear in the custom list
    assert!(db.custom_exercises_for_user(99).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn muscle_group_filter_mixes_presets_and_customs() -> Result<()> {
    let db = create_test_db().await?;
    db.seed_preset_exercises().await?;
    db.insert_exercise(&custom_exercise("Cable Fly", "Chest", 1)).await?;

    let chest = db.exercises_by_muscle_group("Chest").await?;
    assert!(chest.iter().any(|e| e.name == "Bench Press"));
    assert!(chest.iter().any(|e| e.name == "Cable Fly"));
    assert!(chest.iter().all(|e| e.muscle_group == "Chest"));

    Ok(())
}

#[tokio::test]
async fn search_matches_substrings_case_insensitively() -> Result<()> {
    let db = create_test_db().await?;
    db.seed_preset_exercises().await?;

    let hits = db.search_exercises("press").await?;
    assert!(hits.iter().any(|e| e.name == "Bench Press"));
    assert!(hits.iter().any(|e| e.name == "Overhead Press"));
    assert!(hits.iter().all(|e| e.name.to_lowercase().contains("press")));

    Ok(())
}

#[tokio::test]
async fn search_treats_like_wildcards_as_literals() -> Result<()> {
    let db = create_test_db().await?;
    db.seed_preset_exercises().await?;

    // A bare % would otherwise match everything
    assert!(db.search_exercises("100%").await?.is_empty());
    assert!(db.search_exercises("_").await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn update_and_delete_exercise() -> Result<()> {
    let db = create_test_db().await?;

    let id = db.insert_exercise(&custom_exercise("Cable Fly", "Chest", 1)).await?;

    let mut updated = db.get_exercise(id).await?.expect("exists");
    updated.name = "High Cable Fly".into();
    db.update_exercise(&updated).await?;
    assert_eq!(db.get_exercise(id).await?.expect("exists").name, "High Cable Fly");

    db.delete_exercise(id).await?;
    assert!(db.get_exercise(id).await?.is_none());

    Ok(())
}
