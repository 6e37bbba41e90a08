// ABOUTME: User profile repository: CRUD plus a reactive profile stream
// ABOUTME: Stamps creation and update instants on the way into storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;
use chrono::Utc;
use futures_util::stream::BoxStream;

use super::query_err;
use crate::database::{changes, Database, Table};
use crate::errors::DatabaseError;
use crate::mappers;
use crate::models::User;

/// Access to user profiles
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a profile, returning the generated id. The stored
    /// `created_at` and `updated_at` are stamped here; values on the
    /// input are ignored.
    async fn create_user(&self, user: &User) -> Result<i64, DatabaseError>;

    /// Fetch a profile by id; `None` when no such user exists
    async fn get_user(&self, id: i64) -> Result<Option<User>, DatabaseError>;

    /// Fetch the profile linked to an identity-provider uid
    async fn get_user_by_auth_uid(&self, auth_uid: &str) -> Result<Option<User>, DatabaseError>;

    /// Replace a profile by id, stamping a fresh `updated_at`
    async fn update_user(&self, user: &User) -> Result<(), DatabaseError>;

    /// Delete a profile; deleting a missing id is a no-op
    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError>;

    /// Stream of the profile, re-emitted after every user write
    fn watch_user(&self, id: i64) -> BoxStream<'static, Result<Option<User>, DatabaseError>>;
}

/// SQLite-backed [`UserRepository`]
#[derive(Clone)]
pub struct UserRepositoryImpl {
    db: Database,
}

impl UserRepositoryImpl {
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create_user(&self, user: &User) -> Result<i64, DatabaseError> {
        let mut row = mappers::user_to_row(user);
        let now = Utc::now().timestamp_millis();
        row.created_at = now;
        row.updated_at = now;

        self.db.insert_user(&row).await.map_err(query_err)
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>, DatabaseError> {
        let row = self.db.get_user(id).await.map_err(query_err)?;
        Ok(row.map(mappers::user_from_row))
    }

    async fn get_user_by_auth_uid(&self, auth_uid: &str) -> Result<Option<User>, DatabaseError> {
        let row = self
            .db
            .get_user_by_auth_uid(auth_uid)
            .await
            .map_err(query_err)?;
        Ok(row.map(mappers::user_from_row))
    }

    async fn update_user(&self, user: &User) -> Result<(), DatabaseError> {
        let mut row = mappers::user_to_row(user);
        row.updated_at = Utc::now().timestamp_millis();

        self.db.update_user(&row).await.map_err(query_err)
    }

    async fn delete_user(&self, id: i64) -> Result<(), DatabaseError> {
        self.db.delete_user(id).await.map_err(query_err)
    }

    fn watch_user(&self, id: i64) -> BoxStream<'static, Result<Option<User>, DatabaseError>> {
        changes::watch(self.db.clone(), &[Table::Users], move |db| async move {
            db.get_user(id)
                .await
                .map(|row| row.map(mappers::user_from_row))
                .map_err(query_err)
        })
    }
}
