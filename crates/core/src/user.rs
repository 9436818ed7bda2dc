// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User identifiers and directory user records.
//!
//! Directory identifiers are case-insensitive; [`UserId`] normalizes them
//! (trim + lowercase) at construction so that every map keyed by id joins
//! on the same form, regardless of how the directory or the config file
//! spelled the name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Case-normalized user identifier.
///
/// The inner string is always trimmed and lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl Borrow<str> for UserId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Re-normalize on the way in so hand-edited config entries join too
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}

/// One user as seen in a directory snapshot, timestamps already parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Absent means the account has never been observed active.
    pub last_activity: Option<DateTime<Utc>>,
    /// Absent means no expiration is set on the account.
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserRecord {
    /// Whether the account is already expired as of `now`.
    ///
    /// An absent expiration date counts as not expired.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
