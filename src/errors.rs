// ABOUTME: Structured error types shared across the storage and repository layers
// ABOUTME: DatabaseError for repository calls, PreferencesError for the key-value store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitTrack Contributors

use thiserror::Error;

/// Errors surfaced by the repository layer.
///
/// Absent rows are never errors: reads of a missing id yield `Ok(None)`
/// and deletes of a missing id complete as no-ops.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A storage query failed
    #[error("database query failed: {context}")]
    QueryError {
        /// Description of the failed operation
        context: String,
    },

    /// A persisted value could not be decoded
    #[error("serialization failed: {context}")]
    SerializationError {
        /// Description of the malformed value
        context: String,
    },
}

/// Errors from the file-backed preference store
#[derive(Debug, Error)]
pub enum PreferencesError {
    /// Reading or writing the preferences file failed
    #[error("preferences file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The preferences file contents could not be decoded
    #[error("preferences decoding failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Authentication failure from the identity provider.
///
/// Carries a human-readable message only; the cloud provider does not
/// expose structured error codes to this layer.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AuthError {
    /// Human-readable failure description
    pub message: String,
}

impl AuthError {
    /// Build an auth error from any displayable message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
