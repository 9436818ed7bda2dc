// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::build_snapshot;
use crate::directory::RawUser;
use chrono::{TimeZone, Utc};

fn raw(id: &str, last_activity: Option<&str>, expiration: Option<&str>) -> RawUser {
    RawUser {
        id: id.to_string(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
        last_activity: last_activity.map(String::from),
        expiration: expiration.map(String::from),
    }
}

#[test]
fn normalizes_ids_and_parses_timestamps() {
    let (snapshot, issues) = build_snapshot(vec![raw(
        " Alice ",
        Some("2026-01-15T08:00:00"),
        Some("2027-01-01T00:00:00"),
    )]);

    assert!(issues.is_empty());
    let record = snapshot.get("alice").unwrap();
    assert_eq!(
        record.last_activity,
        Some(Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0).unwrap())
    );
    assert!(record.expires_at.is_some());
}

#[test]
fn null_and_empty_fields_are_absent() {
    let (snapshot, issues) = build_snapshot(vec![raw("bob", None, Some(""))]);
    assert!(issues.is_empty());
    let record = snapshot.get("bob").unwrap();
    assert_eq!(record.last_activity, None);
    assert_eq!(record.expires_at, None);
}

#[test]
fn abbreviated_fraction_is_accepted() {
    let (snapshot, issues) =
        build_snapshot(vec![raw("carol", Some("2026-01-15T08:00:00.5"), None)]);
    assert!(issues.is_empty());
    assert!(snapshot.get("carol").unwrap().last_activity.is_some());
}

#[test]
fn unparsable_record_is_dropped_and_reported() {
    let (snapshot, issues) = build_snapshot(vec![
        raw("bad", Some("not-a-date"), None),
        raw("good", None, None),
    ]);

    assert_eq!(snapshot.len(), 1);
    assert!(snapshot.contains_key("good"));
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "bad");
    assert_eq!(issues[0].field, "lastActivityTimestamp");
}

#[test]
fn duplicate_ids_last_record_wins() {
    let (snapshot, _) = build_snapshot(vec![
        raw("Dave", Some("2026-01-01T00:00:00"), None),
        raw("dave", None, None),
    ]);
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.get("dave").unwrap().last_activity, None);
}
