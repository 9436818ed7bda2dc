// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mail transport adapters

mod smtp;

pub use smtp::{wrap_body, SmtpMailTransport, MAX_LINE_LEN};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMailTransport;

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors from mail operations
#[derive(Debug, Error)]
pub enum MailError {
    #[error("mail transport connect failed: {0}")]
    Connect(String),
    #[error("send to {to} failed: {message}")]
    Send { to: String, message: String },
}

/// SMTP connection parameters.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub ssl: bool,
    pub auth: bool,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

/// One rendered notification, addressed and ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub to: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub from: String,
    pub subject: String,
    /// HTML content; line-wrapped by the transport before the wire.
    pub html_body: String,
}

/// Adapter for dispatching notification messages
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError>;
}
