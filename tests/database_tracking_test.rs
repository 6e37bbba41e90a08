// ABOUTME: Integration tests for activity tracking storage
// ABOUTME: Covers step day buckets, BMI history, timed activities, and GPS routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use chrono::NaiveDate;
use fittrack::database::repositories::{TrackingRepository, TrackingRepositoryImpl};
use fittrack::database::{ActivityRow, BmiRow, Database};
use fittrack::mappers::epoch_millis_to_instant;
use fittrack::models::{Coordinate, RouteSession};

async fn create_test_db() -> Result<Database> {
    Database::new("sqlite::memory:").await
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[tokio::test]
async fn latest_record_wins_within_a_day_bucket() -> Result<()> {
    let db = create_test_db().await?;
    let tracking = TrackingRepositoryImpl::new(db);

    let day = date(2025, 6, 1);
    tracking.record_steps(1, day, 4_200).await?;
    tracking.record_steps(1, day, 9_800).await?;

    let latest = tracking.steps_for_day(1, day).await?.expect("recorded");
    assert_eq!(latest.count, 9_800);
    assert_eq!(latest.day, day);

    assert!(tracking.steps_for_day(1, date(2025, 6, 2)).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn step_history_is_newest_day_first() -> Result<()> {
    let db = create_test_db().await?;
    let tracking = TrackingRepositoryImpl::new(db);

    tracking.record_steps(1, date(2025, 6, 1), 5_000).await?;
    tracking.record_steps(1, date(2025, 6, 3), 7_000).await?;
    tracking.record_steps(1, date(2025, 6, 2), 6_000).await?;

    let history = tracking.steps_for_user(1).await?;
    let days: Vec<NaiveDate> = history.iter().map(|r| r.day).collect();
    assert_eq!(days, vec![date(2025, 6, 3), date(2025, 6, 2), date(2025, 6, 1)]);

    Ok(())
}

#[tokio::test]
async fn bmi_history_is_newest_first() -> Result<()> {
    let db = create_test_db().await?;

    for (recorded_at, bmi) in [(1_000, 24.0), (3_000, 23.5), (2_000, 23.8)] {
        db.insert_bmi(&BmiRow {
            id: 0,
            user_id: 1,
            weight_kg: 75.0,
            height_m: 1.78,
            bmi,
            recorded_at,
        })
        .await?;
    }

    let history = db.bmi_for_user(1).await?;
    let stamps: Vec<i64> = history.iter().map(|r| r.recorded_at).collect();
    assert_eq!(stamps, vec![3_000, 2_000, 1_000]);

    Ok(())
}

#[tokio::test]
async fn activities_can_be_recorded_and_deleted() -> Result<()> {
    let db = create_test_db().await?;

    let id = db
        .insert_activity(&ActivityRow {
            id: 0,
            user_id: 1,
            name: "Evening Run".into(),
            start_time: 1_000,
            end_time: 3_600_000,
        })
        .await?;

    let activities = db.activities_for_user(1).await?;
    assert_eq!(activities.len(), 1);
    assert_eq!(activities[0].name, "Evening Run");

    db.delete_activity(id).await?;
    assert!(db.activities_for_user(1).await?.is_empty());

    // Missing id is a no-op
    db.delete_activity(id).await?;
    Ok(())
}

#[tokio::test]
async fn routes_round_trip_their_coordinates() -> Result<()> {
    let db = create_test_db().await?;
    let tracking = TrackingRepositoryImpl::new(db);

    let session = RouteSession {
        id: 0,
        user_id: 1,
        start_time: epoch_millis_to_instant(1_000),
        end_time: epoch_millis_to_instant(600_000),
        coordinates: vec![
            Coordinate {
                latitude: 52.5200,
                longitude: 13.4050,
            },
            Coordinate {
                latitude: 52.5205,
                longitude: 13.4061,
            },
            Coordinate {
                latitude: 52.5211,
                longitude: 13.4074,
            },
        ],
    };

    let id = tracking.add_route(&session).await?;
    assert!(id > 0);

    let routes = tracking.routes_for_user(1).await?;
    assert_eq!(routes.len(), 1);
    assert_eq!(routes[0].coordinates, session.coordinates);
    assert_eq!(routes[0].start_time, session.start_time);
    assert_eq!(routes[0].end_time, session.end_time);

    Ok(())
}

#[tokio::test]
async fn empty_routes_are_valid() -> Result<()> {
    let db = create_test_db().await?;
    let tracking = TrackingRepositoryImpl::new(db);

    tracking
        .add_route(&RouteSession {
            id: 0,
            user_id: 1,
            start_time: epoch_millis_to_instant(0),
            end_time: epoch_millis_to_instant(1),
            coordinates: vec![],
        })
        .await?;

    let routes = tracking.routes_for_user(1).await?;
    assert!(routes[0].coordinates.is_empty());

    Ok(())
}
