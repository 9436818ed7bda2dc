// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake mail transport for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{MailError, MailTransport, OutboundMessage};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Default)]
struct FakeMailState {
    sent: Vec<OutboundMessage>,
    fail_to: BTreeSet<String>,
}

/// Fake mail transport for testing
#[derive(Clone, Default)]
pub struct FakeMailTransport {
    inner: Arc<Mutex<FakeMailState>>,
}

impl FakeMailTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sends to the given address fail.
    pub fn fail_for(&self, to: &str) {
        self.inner.lock().fail_to.insert(to.to_string());
    }

    /// All messages sent, in order.
    pub fn sent(&self) -> Vec<OutboundMessage> {
        self.inner.lock().sent.clone()
    }
}

#[async_trait]
impl MailTransport for FakeMailTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError> {
        let mut state = self.inner.lock();
        if state.fail_to.contains(&message.to) {
            return Err(MailError::Send {
                to: message.to.clone(),
                message: "simulated send failure".into(),
            });
        }
        state.sent.push(message.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
