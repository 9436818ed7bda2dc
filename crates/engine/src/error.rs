// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the run orchestrator

use iw_adapters::DirectoryError;
use thiserror::Error;

/// Errors that abort a reconciliation pass.
///
/// Everything else (templates, transport, individual sends and write-backs)
/// degrades and is reported in the [`crate::PassReport`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),
}
