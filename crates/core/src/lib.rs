// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! iw-core: Domain types for the idlewatch account-lifecycle reconciler

pub mod clock;
pub mod threshold;
pub mod timestamp;
pub mod user;

pub use clock::{Clock, SystemClock};
pub use threshold::{Threshold, Thresholds};
pub use timestamp::{
    inactivity_days, parse_directory_timestamp, parse_optional_timestamp, short_date,
    TimestampError,
};
pub use user::{UserId, UserRecord};

#[cfg(any(test, feature = "test-support"))]
pub use clock::FakeClock;
