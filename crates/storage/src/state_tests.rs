// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::LifecycleStore;
use chrono::{TimeZone, Utc};
use iw_core::UserId;

#[test]
fn default_store_is_empty() {
    let store = LifecycleStore::default();
    assert!(store.is_empty());
}

#[test]
fn store_with_entries_is_not_empty() {
    let mut store = LifecycleStore::default();
    store.warned.insert(
        UserId::new("alice"),
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
    );
    assert!(!store.is_empty());
}

#[test]
fn keys_are_normalized_on_deserialization() {
    let toml_src = r#"
        [watching]
        "Alice" = "2026-01-01T00:00:00Z"
    "#;
    let store: LifecycleStore = toml::from_str(toml_src).unwrap();
    assert!(store.watching.contains_key("alice"));
}
