// ABOUTME: Main library entry point for the FitTrack data layer
// ABOUTME: Local-first workout, routine, and body metric tracking over SQLite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

#![deny(unsafe_code)]

//! # FitTrack Core
//!
//! The local-first data layer behind the FitTrack app: user profiles,
//! workouts with nested exercises and sets, reusable routines, body
//! weight and BMI history, step counting, GPS routes, and statistics
//! rollups, all persisted in one SQLite file.
//!
//! ## Architecture
//!
//! - **Models**: In-memory domain types with calendar dates and UTC instants
//! - **Database**: The SQLite facade, migrations, and per-area query modules
//! - **Repositories**: The trait seam application logic depends on, with
//!   reactive watch streams driven by a table change bus
//! - **Session**: Explicit sign-in state linking a cloud identity to a
//!   local profile
//! - **Sensors**: Step counting and route capture behind platform traits
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fittrack::config::Config;
//! use fittrack::database::repositories::{UserRepository, UserRepositoryImpl};
//! use fittrack::database::Database;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let db = Database::new(&config.database_url).await?;
//!     db.seed_preset_exercises().await?;
//!
//!     let users = UserRepositoryImpl::new(db);
//!     let profile = users.get_user(1).await?;
//!     println!("profile: {profile:?}");
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod calculations;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod mappers;
pub mod models;
pub mod preferences;
pub mod sensors;
pub mod session;
