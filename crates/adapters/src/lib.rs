// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! iw-adapters: External collaborators behind async traits.
//!
//! The reconciler touches two remote systems — the user directory and the
//! mail transport — plus the snapshot-adaptation boundary that turns raw
//! directory records into parsed [`iw_core::UserRecord`]s. Each collaborator
//! is a trait with a production implementation and a recording fake (behind
//! the `test-support` feature) so the engine is testable without a network.

pub mod directory;
pub mod mail;
pub mod snapshot;

pub use directory::{DirectoryAdapter, DirectoryConfig, DirectoryError, HttpDirectoryAdapter, RawUser};
pub use mail::{MailError, MailTransport, OutboundMessage, SmtpConfig, SmtpMailTransport};
pub use snapshot::{build_snapshot, SnapshotIssue};

#[cfg(any(test, feature = "test-support"))]
pub use directory::FakeDirectoryAdapter;
#[cfg(any(test, feature = "test-support"))]
pub use mail::FakeMailTransport;
