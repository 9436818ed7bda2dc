// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User directory adapters

mod http;

pub use http::HttpDirectoryAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeDirectoryAdapter;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use iw_core::UserId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from directory operations
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory connect failed: {0}")]
    Connect(String),
    #[error("directory fetch failed: {0}")]
    Fetch(String),
    #[error("directory update failed for {id}: {message}")]
    Update { id: String, message: String },
}

/// Connection parameters for the directory service.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    pub url: String,
    pub username: String,
    pub password: String,
    /// Per-request timeout; the reconciler never blocks indefinitely on the
    /// directory.
    pub timeout: Duration,
}

/// A user record as the directory serves it, timestamps still raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawUser {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "lastActivityTimestamp")]
    pub last_activity: Option<String>,
    #[serde(rename = "expirationDate")]
    pub expiration: Option<String>,
}

/// Adapter for the remote user directory
#[async_trait]
pub trait DirectoryAdapter: Send + Sync {
    /// Fetch every user record. Failure here is fatal to the run: without a
    /// snapshot there is nothing to reconcile.
    async fn fetch_users(&self) -> Result<Vec<RawUser>, DirectoryError>;

    /// Set a user's expiration date via read-modify-write of the full
    /// record. Not atomic: a concurrent external update to the same record
    /// can be lost.
    async fn update_expiration(
        &self,
        id: &UserId,
        when: DateTime<Utc>,
    ) -> Result<(), DirectoryError>;
}
