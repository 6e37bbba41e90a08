// ABOUTME: Explicit user session linking a provider identity to a local profile
// ABOUTME: Every per-user call takes the session's user id; there is no ambient current user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::{AuthUser, IdentityProvider};
use crate::database::repositories::UserRepository;
use crate::errors::{AuthError, DatabaseError};
use crate::models::User;

/// An established sign-in: a provider identity resolved to a local
/// profile. Callers pass `user_id` to the repositories explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Unique id for this sign-in, useful in logs
    pub id: Uuid,
    /// Local profile row the identity resolved to
    pub user_id: i64,
    /// Provider uid backing the session
    pub auth_uid: String,
    pub started_at: DateTime<Utc>,
}

impl Session {
    fn for_user(user_id: i64, auth_uid: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            auth_uid,
            started_at: Utc::now(),
        }
    }
}

/// Outcome of a sign-in attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SignIn {
    /// The identity already has a local profile
    Established(Session),
    /// First sign-in on this device; a profile must be created before a
    /// session can start
    NeedsProfile(AuthUser),
}

/// Errors from establishing a session
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Resolves provider identities to local profiles and hands out
/// sessions.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    users: Arc<dyn UserRepository>,
}

impl SessionManager {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, users: Arc<dyn UserRepository>) -> Self {
        Self { provider, users }
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the credentials or the
    /// profile lookup fails.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn, SessionError> {
        let identity = self.provider.sign_in(email, password).await?;
        self.resolve(identity).await
    }

    /// Register a new account. The caller follows up with
    /// [`establish`](Self::establish) once the profile details are
    /// collected.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the registration.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, SessionError> {
        Ok(self.provider.sign_up(email, password).await?)
    }

    /// Sign in with an external credential token
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the token or the
    /// profile lookup fails.
    pub async fn sign_in_with_credential(&self, token: &str) -> Result<SignIn, SessionError> {
        let identity = self.provider.sign_in_with_credential(token).await?;
        self.resolve(identity).await
    }

    /// Create the local profile for a first sign-in and start a session.
    /// The profile is stored with the identity's uid attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile insert fails.
    pub async fn establish(
        &self,
        identity: &AuthUser,
        mut profile: User,
    ) -> Result<Session, SessionError> {
        profile.auth_uid = Some(identity.uid.clone());
        let user_id = self.users.create_user(&profile).await?;

        tracing::info!(user_id, "profile created for new identity");
        Ok(Session::for_user(user_id, identity.uid.clone()))
    }

    /// Sign out at the provider
    ///
    /// # Errors
    ///
    /// Returns an error if the provider call fails.
    pub async fn sign_out(&self) -> Result<(), SessionError> {
        Ok(self.provider.sign_out().await?)
    }

    async fn resolve(&self, identity: AuthUser) -> Result<SignIn, SessionError> {
        match self.users.get_user_by_auth_uid(&identity.uid).await? {
            Some(user) => {
                tracing::debug!(user_id = user.id, "session established");
                Ok(SignIn::Established(Session::for_user(
                    user.id,
                    identity.uid,
                )))
            }
            None => Ok(SignIn::NeedsProfile(identity)),
        }
    }
}
