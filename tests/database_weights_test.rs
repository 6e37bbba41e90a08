// ABOUTME: Integration tests for weight entry storage
// ABOUTME: Covers ordering, inclusive date ranges, and the latest-entry query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::NaiveDate;
use fittrack::database::{Database, WeightEntryRow};
use fittrack::mappers::date_to_epoch_millis;

async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

fn day(year: i32, month: u32, dayofmonth: u32) -> i64 {
    date_to_epoch_millis(NaiveDate::from_ymd_opt(year, month, dayofmonth).unwrap())
}

fn entry(user_id: i64, date: i64, weight_kg: f64) -> WeightEntryRow {
    WeightEntryRow {
        id: 0,
        user_id,
        weight_kg,
        date,
        note: None,
    }
}

#[tokio::test]
async fn history_is_newest_first() -> Result<()> {
    let db = create_test_db().await?;

    db.insert_weight_entry(&entry(1, day(2025, 1, 10), 80.0)).await?;
    db.insert_weight_entry(&entry(1, day(2025, 1, 20), 79.2)).await?;
    db.insert_weight_entry(&entry(1, day(2025, 1, 15), 79.6)).await?;

    let history = db.weight_entries_for_user(1).await?;
    let dates: Vec<i64> = history.iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![day(2025, 1, 20), day(2025, 1, 15), day(2025, 1, 10)]);

    Ok(())
}

#[tokio::test]
async fn range_query_is_inclusive_on_both_ends() -> Result<()> {
    let db = create_test_db().await?;

    db.insert_weight_entry(&entry(1, day(2025, 2, 1), 80.0)).await?;
    db.insert_weight_entry(&entry(1, day(2025, 2, 10), 79.0)).await?;
    db.insert_weight_entry(&entry(1, day(2025, 2, 20), 78.0)).await?;

    let inside = db
        .weight_entries_between(1, day(2025, 2, 1), day(2025, 2, 10))
        .await?;
    assert_eq!(inside.len(), 2);

    let none = db
        .weight_entries_between(1, day(2025, 2, 21), day(2025, 2, 28))
        .await?;
    assert!(none.is_empty());

    Ok(())
}

#[tokio::test]
async fn latest_entry_picks_the_newest_date() -> Result<()> {
    let db = create_test_db().await?;

    assert!(db.latest_weight_entry(1).await?.is_none());

    db.insert_weight_entry(&entry(1, day(2025, 3, 1), 80.0)).await?;
    db.insert_weight_entry(&entry(1, day(2025, 3, 5), 79.4)).await?;

    let latest = db.latest_weight_entry(1).await?.expect("has entries");
    assert_eq!(latest.date, day(2025, 3, 5));
    assert!((latest.weight_kg - 79.4).abs() < f64::EPSILON);

    Ok(())
}

#[tokio::test]
async fn entries_are_scoped_to_their_user() -> Result<()> {
    let db = create_test_db().await?;

    db.insert_weight_entry(&entry(1, day(2025, 3, 1), 80.0)).await?;
    db.insert_weight_entry(&entry(2, day(2025, 3, 1), 64.0)).await?;

    assert_eq!(db.weight_entries_for_user(1).await?.len(), 1);
    assert_eq!(db.weight_entries_for_user(2).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn update_and_delete_entry() -> Result<()> {
    let db = create_test_db().await?;

    let id = db.insert_weight_entry(&entry(1, day(2025, 3, 1), 80.0)).await?;

    let mut updated = entry(1, day(2025, 3, 1), 79.0);
    updated.id = id;
    updated.note = Some("after run".into());
    db.update_weight_entry(&updated).await?;

    let history = db.weight_entries_for_user(1).await?;
    assert!((history[0].weight_kg - 79.0).abs() < f64::EPSILON);
    assert_eq!(history[0].note.as_deref(), Some("after run"));

    db.delete_weight_entry(id).await?;
    assert!(db.weight_entries_for_user(1).await?.is_empty());

    // Missing id is a no-op
    db.delete_weight_entry(id).await?;
    Ok(())
}
