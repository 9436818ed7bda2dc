// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{UserId, UserRecord};
use chrono::{TimeZone, Utc};

#[yare::parameterized(
    lowercase   = { "alice", "alice" },
    mixed_case  = { "Alice", "alice" },
    uppercase   = { "ALICE", "alice" },
    padded      = { "  alice  ", "alice" },
    padded_caps = { " J.Smith\t", "j.smith" },
)]
fn id_normalization(raw: &str, expected: &str) {
    assert_eq!(UserId::new(raw).as_str(), expected);
}

#[test]
fn ids_join_across_spellings() {
    assert_eq!(UserId::new("Alice"), UserId::new(" ALICE "));
}

#[test]
fn id_borrows_as_str() {
    use std::collections::BTreeSet;
    let mut set = BTreeSet::new();
    set.insert(UserId::new("Bob"));
    assert!(set.contains("bob"));
}

fn record(expires_at: Option<chrono::DateTime<Utc>>) -> UserRecord {
    UserRecord {
        id: UserId::new("alice"),
        name: "Alice".into(),
        email: "alice@example.com".into(),
        last_activity: None,
        expires_at,
    }
}

#[test]
fn expired_when_expiration_in_past() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    assert!(record(Some(now - chrono::Duration::days(1))).is_expired(now));
    assert!(record(Some(now)).is_expired(now));
}

#[test]
fn not_expired_when_future_or_absent() {
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    assert!(!record(Some(now + chrono::Duration::days(1))).is_expired(now));
    assert!(!record(None).is_expired(now));
}
