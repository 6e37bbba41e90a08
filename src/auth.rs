// ABOUTME: Identity provider seam for cloud sign-in
// ABOUTME: The app depends on this trait; concrete providers live outside this crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use async_trait::async_trait;

use crate::errors::AuthError;

/// An authenticated identity as the provider reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    /// Provider-assigned stable uid, linked to the local profile
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Cloud identity provider.
///
/// Implementations wrap whichever service performs the actual
/// authentication; the rest of the app only sees [`AuthUser`] values
/// and links them to local profiles through the session layer.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Authenticate with email and password
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Register a new account with email and password
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    /// Authenticate with an external credential token (for example a
    /// federated sign-in result)
    async fn sign_in_with_credential(&self, token: &str) -> Result<AuthUser, AuthError>;

    /// End the provider-side session
    async fn sign_out(&self) -> Result<(), AuthError>;
}
