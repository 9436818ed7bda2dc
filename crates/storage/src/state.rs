// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted per-user lifecycle bookkeeping.

use chrono::{DateTime, Utc};
use iw_core::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The id-keyed timestamp maps carried between runs.
///
/// Invariants maintained by the policy engine:
/// - `watching[id]` exists only while the id currently has no recorded
///   activity and is not expired; the value is the moment it was first
///   observed in that state and is never overwritten while watching.
/// - `warned[id]` exists only while the id is a current warning candidate
///   or inside its grace window; expiry always removes it.
/// - `expired[id]` is an audit trail of expirations performed by this job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStore {
    #[serde(default)]
    pub watching: BTreeMap<UserId, DateTime<Utc>>,
    #[serde(default)]
    pub warned: BTreeMap<UserId, DateTime<Utc>>,
    #[serde(default)]
    pub expired: BTreeMap<UserId, DateTime<Utc>>,
}

impl LifecycleStore {
    pub fn is_empty(&self) -> bool {
        self.watching.is_empty() && self.warned.is_empty() && self.expired.is_empty()
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
