// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! iw-engine: The inactivity lifecycle policy engine and run orchestrator.
//!
//! [`policy::reconcile`] is the core: a pure function from one directory
//! snapshot, the persisted store, and the thresholds to the watch/warn/expire
//! sets plus the store mutations that keep the next run correct. Everything
//! with a network cable attached lives behind the adapter traits and is
//! sequenced by [`run::run_pass`].

pub mod error;
pub mod notify;
pub mod policy;
pub mod run;

pub use error::RunError;
pub use notify::{MessageTemplate, Notifier, NotifyStats, TemplateError};
pub use policy::{reconcile, PolicyOutcome, RunContext};
pub use run::{run_pass, PassReport};
