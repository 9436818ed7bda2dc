// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{DirectoryAdapter, FakeDirectoryAdapter, RawUser};
use chrono::{TimeZone, Utc};
use iw_core::UserId;

fn user(id: &str) -> RawUser {
    RawUser {
        id: id.to_string(),
        name: id.to_string(),
        email: format!("{id}@example.com"),
        last_activity: None,
        expiration: None,
    }
}

#[tokio::test]
async fn serves_canned_users() {
    let fake = FakeDirectoryAdapter::with_users(vec![user("alice"), user("bob")]);
    let users = fake.fetch_users().await.unwrap();
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn fetch_failure_is_simulated() {
    let fake = FakeDirectoryAdapter::new();
    fake.fail_fetch();
    assert!(fake.fetch_users().await.is_err());
}

#[tokio::test]
async fn update_records_call_and_mutates_record() {
    let fake = FakeDirectoryAdapter::with_users(vec![user("Alice")]);
    let when = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

    fake.update_expiration(&UserId::new("alice"), when)
        .await
        .unwrap();

    assert_eq!(fake.updates(), vec![(UserId::new("alice"), when)]);
    let users = fake.fetch_users().await.unwrap();
    assert!(users[0].expiration.as_deref().unwrap().starts_with("2026-03-01"));
}

#[tokio::test]
async fn update_failure_is_per_id() {
    let fake = FakeDirectoryAdapter::with_users(vec![user("alice"), user("bob")]);
    fake.fail_update_for("alice");
    let when = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

    assert!(fake
        .update_expiration(&UserId::new("alice"), when)
        .await
        .is_err());
    assert!(fake
        .update_expiration(&UserId::new("bob"), when)
        .await
        .is_ok());
}
