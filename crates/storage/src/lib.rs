// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! iw-storage: The combined configuration + lifecycle-state file.
//!
//! One TOML file carries both operator configuration and the per-user
//! bookkeeping that makes warnings idempotent across runs. It is read fully
//! at the start of a pass and rewritten (atomically) only when the pass
//! completes.

pub mod config;
pub mod state;

pub use config::{
    ConfigError, ConfigFile, DirectorySection, NotifySection, RunSection, SmtpSection,
};
pub use state::LifecycleStore;
