// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot adaptation: raw directory records to parsed domain records.
//!
//! Identifiers are case-normalized here so the snapshot joins cleanly with
//! the persisted store. Timestamp fields parse leniently (null/empty is
//! absent); a record with a non-empty unparsable timestamp is dropped from
//! the snapshot and reported as a per-record issue rather than blocking the
//! whole run.

use crate::directory::RawUser;
use iw_core::{parse_optional_timestamp, TimestampError, UserId, UserRecord};
use std::collections::BTreeMap;

/// A directory record that could not be adapted into the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotIssue {
    pub id: String,
    pub field: &'static str,
    pub error: TimestampError,
}

/// Build the run snapshot. Returns the id-keyed records plus the issues for
/// records that were dropped.
pub fn build_snapshot(raw: Vec<RawUser>) -> (BTreeMap<UserId, UserRecord>, Vec<SnapshotIssue>) {
    let mut snapshot = BTreeMap::new();
    let mut issues = Vec::new();

    for user in raw {
        let id = UserId::new(&user.id);

        let last_activity = match parse_optional_timestamp(user.last_activity.as_deref()) {
            Ok(ts) => ts,
            Err(error) => {
                report(&mut issues, &id, "lastActivityTimestamp", error);
                continue;
            }
        };
        let expires_at = match parse_optional_timestamp(user.expiration.as_deref()) {
            Ok(ts) => ts,
            Err(error) => {
                report(&mut issues, &id, "expirationDate", error);
                continue;
            }
        };

        snapshot.insert(
            id.clone(),
            UserRecord {
                id,
                name: user.name,
                email: user.email,
                last_activity,
                expires_at,
            },
        );
    }

    (snapshot, issues)
}

fn report(issues: &mut Vec<SnapshotIssue>, id: &UserId, field: &'static str, error: TimestampError) {
    tracing::warn!(user = %id, field, %error, "dropping record from snapshot");
    issues.push(SnapshotIssue {
        id: id.to_string(),
        field,
        error,
    });
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
