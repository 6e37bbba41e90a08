// ABOUTME: File-backed user preference store with change notification
// ABOUTME: One JSON document written atomically; readers subscribe through a watch channel
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use crate::config::DEFAULT_REST_TIMER_SECS;
use crate::errors::PreferencesError;

/// Display unit for body weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    Lb,
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kg => write!(f, "kg"),
            Self::Lb => write!(f, "lb"),
        }
    }
}

impl FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kg" => Ok(Self::Kg),
            "lb" => Ok(Self::Lb),
            other => Err(format!("unknown weight unit: {other}")),
        }
    }
}

/// Display unit for height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    Cm,
    In,
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cm => write!(f, "cm"),
            Self::In => write!(f, "in"),
        }
    }
}

impl FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(Self::Cm),
            "in" => Ok(Self::In),
            other => Err(format!("unknown height unit: {other}")),
        }
    }
}

/// User-tunable settings persisted between runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub weight_unit: WeightUnit,
    pub height_unit: HeightUnit,
    pub dark_theme: bool,
    pub rest_timer_secs: u32,
    pub rest_timer_enabled: bool,
    pub notifications_enabled: bool,
    /// Daily reminder time as minutes after midnight; `None` disables it
    pub workout_reminder_time: Option<u32>,
    pub onboarding_complete: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Kg,
            height_unit: HeightUnit::Cm,
            dark_theme: false,
            rest_timer_secs: DEFAULT_REST_TIMER_SECS,
            rest_timer_enabled: true,
            notifications_enabled: true,
            workout_reminder_time: None,
            onboarding_complete: false,
        }
    }
}

/// Preference document stored at one path, loaded at open and rewritten
/// atomically on every update.
///
/// Unknown fields in the file are dropped and missing fields take their
/// defaults, so documents survive version skew in both directions.
pub struct PreferenceStore {
    path: PathBuf,
    state: RwLock<Preferences>,
    tx: watch::Sender<Preferences>,
}

impl PreferenceStore {
    /// Open the store, reading the document at `path` if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferencesError> {
        let path = path.into();
        let prefs = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Preferences::default()
        };

        let (tx, _) = watch::channel(prefs.clone());
        Ok(Self {
            path,
            state: RwLock::new(prefs),
            tx,
        })
    }

    /// The current preferences
    #[must_use]
    pub fn get(&self) -> Preferences {
        self.state
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Apply a mutation, persist the result, and notify subscribers.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the file fails; the in-memory state
    /// is not changed in that case.
    pub fn update(
        &self,
        mutate: impl FnOnce(&mut Preferences),
    ) -> Result<Preferences, PreferencesError> {
        let mut next = self.get();
        mutate(&mut next);

        Self::write_atomic(&self.path, &next)?;

        if let Ok(mut guard) = self.state.write() {
            *guard = next.clone();
        }
        // Send failure only means nobody is subscribed
        let _ = self.tx.send(next.clone());

        tracing::debug!("preferences updated");
        Ok(next)
    }

    /// Subscribe to preference changes; the receiver starts at the
    /// current value
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }

    /// Preference changes as a stream, starting from the current value
    #[must_use]
    pub fn stream(&self) -> WatchStream<Preferences> {
        WatchStream::new(self.tx.subscribe())
    }

    /// Write via a sibling temp file and rename, so a crash mid-write
    /// never leaves a torn document
    fn write_atomic(path: &Path, prefs: &Preferences) -> Result<(), PreferencesError> {
        let encoded = serde_json::to_string_pretty(prefs)?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_no_file_exists() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::open(dir.path().join("prefs.json")).expect("open");

        assert_eq!(store.get(), Preferences::default());
    }

    #[test]
    fn updates_survive_a_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");

        let store = PreferenceStore::open(&path).expect("open");
        store
            .update(|prefs| {
                prefs.weight_unit = WeightUnit::Lb;
                prefs.dark_theme = true;
                prefs.onboarding_complete = true;
            })
            .expect("update");

        let reopened = PreferenceStore::open(&path).expect("reopen");
        let prefs = reopened.get();
        assert_eq!(prefs.weight_unit, WeightUnit::Lb);
        assert!(prefs.dark_theme);
        assert!(prefs.onboarding_complete);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"dark_theme": true}"#).expect("write");

        let store = PreferenceStore::open(&path).expect("open");
        let prefs = store.get();
        assert!(prefs.dark_theme);
        assert_eq!(prefs.weight_unit, WeightUnit::Kg);
        assert_eq!(prefs.rest_timer_secs, DEFAULT_REST_TIMER_SECS);
    }

    #[test]
    fn subscribers_see_updates() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PreferenceStore::open(dir.path().join("prefs.json")).expect("open");
        let mut rx = store.subscribe();

        store
            .update(|prefs| prefs.rest_timer_secs = 90)
            .expect("update");

        assert!(rx.has_changed().expect("channel open"));
        assert_eq!(rx.borrow_and_update().rest_timer_secs, 90);
    }

    #[test]
    fn unit_labels_round_trip_through_from_str() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!(WeightUnit::Lb.to_string().parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert_eq!("in".parse::<HeightUnit>().unwrap(), HeightUnit::In);
        assert!("stone".parse::<WeightUnit>().is_err());
    }
}
