// ABOUTME: User profile database operations
// ABOUTME: Handles profile creation, lookup by id or external auth uid, update, and delete
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use anyhow::Result;
use sqlx::Row;

use super::records::UserRow;
use super::{Database, Table};

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                auth_uid TEXT UNIQUE,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                height_cm REAL NOT NULL,
                weight_kg REAL NOT NULL,
                gender TEXT NOT NULL,
                fitness_goal TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_auth_uid ON users(auth_uid)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert a new user profile, returning the generated id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. duplicate `auth_uid`)
    pub async fn insert_user(&self, user: &UserRow) -> Result<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO users (auth_uid, name, age, height_cm, weight_kg, gender, fitness_goal, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(&user.auth_uid)
        .bind(&user.name)
        .bind(user.age)
        .bind(user.height_cm)
        .bind(user.weight_kg)
        .bind(&user.gender)
        .bind(&user.fitness_goal)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::Users);
        Ok(result.last_insert_rowid())
    }

    /// Replace an existing user profile by id
    ///
    /// # Errors
    ///
    /// Returns an error if the update query fails
    pub async fn update_user(&self, user: &UserRow) -> Result<()> {
        sqlx::query(
            r"
            UPDATE users SET
                auth_uid = $2,
                name = $3,
                age = $4,
                height_cm = $5,
                weight_kg = $6,
                gender = $7,
                fitness_goal = $8,
                updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(user.id)
        .bind(&user.auth_uid)
        .bind(&user.name)
        .bind(user.age)
        .bind(user.height_cm)
        .bind(user.weight_kg)
        .bind(&user.gender)
        .bind(&user.fitness_goal)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        self.changes.publish(Table::Users);
        Ok(())
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user(&self, id: i64) -> Result<Option<UserRow>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    /// Get a user by the identity provider's external uid
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_user_by_auth_uid(&self, auth_uid: &str) -> Result<Option<UserRow>> {
        let row = sqlx::query("SELECT * FROM users WHERE auth_uid = $1")
            .bind(auth_uid)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    /// Delete a user by id; deleting a missing id is a no-op
    ///
    /// # Errors
    ///
    /// Returns an error if the delete query fails
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        self.changes.publish(Table::Users);
        Ok(())
    }

    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> UserRow {
        UserRow {
            id: row.get("id"),
            auth_uid: row.get("auth_uid"),
            name: row.get("name"),
            age: row.get("age"),
            height_cm: row.get("height_cm"),
            weight_kg: row.get("weight_kg"),
            gender: row.get("gender"),
            fitness_goal: row.get("fitness_goal"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}
