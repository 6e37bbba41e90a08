// ABOUTME: Table change notification bus backing the reactive query streams
// ABOUTME: Every committed write publishes its touched tables; watchers re-run their query
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use std::future::Future;
use std::sync::Arc;

use futures_util::stream::{self, BoxStream, StreamExt};
use tokio::sync::broadcast;

use super::Database;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Tables a write can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Users,
    WeightEntries,
    Exercises,
    Workouts,
    WorkoutExercises,
    ExerciseSets,
    WorkoutRoutines,
    RoutineExercises,
    StepRecords,
    BmiRecords,
    ActivityRecords,
    RouteSessions,
}

/// Broadcast fan-out of table change events.
///
/// Senders never block; a subscriber that falls behind skips to the
/// freshest state instead of erroring.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    tx: broadcast::Sender<Table>,
}

impl ChangeBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Announce a committed write to one table.
    ///
    /// A send error only means no subscriber is listening, which is fine.
    pub fn publish(&self, table: Table) {
        let _ = self.tx.send(table);
    }

    /// Announce a committed cascade touching several tables
    pub fn publish_all(&self, tables: &[Table]) {
        for table in tables {
            self.publish(*table);
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Table> {
        self.tx.subscribe()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Turn a query into a continuously-updating stream.
///
/// Emits the current result immediately, then re-runs the query after
/// every published change to one of `tables`. The subscription ends
/// when the caller drops the stream.
pub(crate) fn watch<T, F, Fut>(
    db: Database,
    tables: &'static [Table],
    query: F,
) -> BoxStream<'static, T>
where
    T: Send + 'static,
    F: Fn(Database) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let rx = db.changes().subscribe();
    let query = Arc::new(query);

    stream::unfold((db, rx, true), move |(db, mut rx, first)| {
        let query = Arc::clone(&query);
        async move {
            if !first {
                loop {
                    match rx.recv().await {
                        Ok(table) if tables.contains(&table) => break,
                        Ok(_) => {}
                        Err(broadcast::error::RecvError::Lagged(_)) => break,
                        Err(broadcast::error::RecvError::Closed) => return None,
                    }
                }
            }
            let item = query(db.clone()).await;
            Some((item, (db, rx, false)))
        }
    })
    .boxed()
}
