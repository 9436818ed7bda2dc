// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake directory adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DirectoryAdapter, DirectoryError, RawUser};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use iw_core::UserId;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Default)]
struct FakeDirectoryState {
    users: Vec<RawUser>,
    updates: Vec<(UserId, DateTime<Utc>)>,
    fail_fetch: bool,
    fail_update: BTreeSet<String>,
}

/// Fake directory adapter for testing
#[derive(Clone, Default)]
pub struct FakeDirectoryAdapter {
    inner: Arc<Mutex<FakeDirectoryState>>,
}

impl FakeDirectoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<RawUser>) -> Self {
        let fake = Self::default();
        fake.inner.lock().users = users;
        fake
    }

    pub fn push_user(&self, user: RawUser) {
        self.inner.lock().users.push(user);
    }

    /// Make the next fetch fail.
    pub fn fail_fetch(&self) {
        self.inner.lock().fail_fetch = true;
    }

    /// Make updates for the given id fail.
    pub fn fail_update_for(&self, id: &str) {
        self.inner.lock().fail_update.insert(id.to_string());
    }

    /// Let updates for the given id succeed again.
    pub fn heal_update_for(&self, id: &str) {
        self.inner.lock().fail_update.remove(id);
    }

    /// All recorded expiration updates, in call order.
    pub fn updates(&self) -> Vec<(UserId, DateTime<Utc>)> {
        self.inner.lock().updates.clone()
    }
}

#[async_trait]
impl DirectoryAdapter for FakeDirectoryAdapter {
    async fn fetch_users(&self) -> Result<Vec<RawUser>, DirectoryError> {
        let state = self.inner.lock();
        if state.fail_fetch {
            return Err(DirectoryError::Fetch("simulated fetch failure".into()));
        }
        Ok(state.users.clone())
    }

    async fn update_expiration(
        &self,
        id: &UserId,
        when: DateTime<Utc>,
    ) -> Result<(), DirectoryError> {
        let mut state = self.inner.lock();
        if state.fail_update.contains(id.as_str()) {
            return Err(DirectoryError::Update {
                id: id.to_string(),
                message: "simulated update failure".into(),
            });
        }
        // Mirror the production read-modify-write: the stored record changes
        let iso = when.to_rfc3339_opts(SecondsFormat::Micros, true);
        for user in &mut state.users {
            if UserId::new(&user.id) == *id {
                user.expiration = Some(iso.clone());
            }
        }
        state.updates.push((id.clone(), when));
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
