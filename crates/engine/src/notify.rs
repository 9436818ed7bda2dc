// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification rendering and dispatch.
//!
//! Templates are plain HTML files with `{name}`, `{lastlogin}`, `{days}` and
//! `{url}` placeholders. A user with no recorded activity renders the login
//! fields as an explicit unknown marker instead of failing the send. One
//! failed send is logged and does not abort the remaining sends.

use chrono::{DateTime, Utc};
use iw_adapters::{MailTransport, OutboundMessage};
use iw_core::{inactivity_days, short_date, UserId, UserRecord};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use thiserror::Error;

/// Marker rendered when a user has no last-activity timestamp.
const UNKNOWN: &str = "(Unknown!)";

/// A notification template that failed to load
#[derive(Debug, Error)]
#[error("failed to load template {path}: {source}")]
pub struct TemplateError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// A notification category: subject line plus body template.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    pub subject: String,
    body: String,
}

impl MessageTemplate {
    /// Load the body from a file. The orchestrator treats failure as
    /// "skip this category for the run", not as a fatal error.
    pub fn load(subject: impl Into<String>, path: &Path) -> Result<Self, TemplateError> {
        let body = std::fs::read_to_string(path).map_err(|source| TemplateError {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self {
            subject: subject.into(),
            body,
        })
    }

    #[cfg(test)]
    pub fn from_parts(subject: &str, body: &str) -> Self {
        Self {
            subject: subject.to_string(),
            body: body.to_string(),
        }
    }

    /// Render the body for one user. A user with no recorded activity gets
    /// the unknown marker in both login fields.
    pub fn render(&self, record: &UserRecord, now: DateTime<Utc>, url: &str) -> String {
        let (lastlogin, days) = match record.last_activity {
            Some(last) => (short_date(last), inactivity_days(now, last).to_string()),
            None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
        };
        self.body
            .replace("{name}", &record.name)
            .replace("{lastlogin}", &lastlogin)
            .replace("{days}", &days)
            .replace("{url}", url)
    }
}

/// Dispatch tallies for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyStats {
    pub sent: usize,
    pub failed: usize,
}

/// Formats and dispatches one message per target id.
pub struct Notifier<'a, M: MailTransport> {
    pub transport: &'a M,
    pub from: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub url: String,
    pub now: DateTime<Utc>,
}

impl<M: MailTransport> Notifier<'_, M> {
    pub async fn notify_all(
        &self,
        targets: &BTreeSet<UserId>,
        snapshot: &BTreeMap<UserId, UserRecord>,
        template: &MessageTemplate,
    ) -> NotifyStats {
        let mut stats = NotifyStats::default();
        for id in targets {
            let Some(record) = snapshot.get(id) else {
                continue;
            };
            let body = template.render(record, self.now, &self.url);
            let (lastlogin, days) = match record.last_activity {
                Some(last) => (
                    short_date(last),
                    inactivity_days(self.now, last).to_string(),
                ),
                None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
            };

            // Per-user audit line
            tracing::info!(
                user = %record.name,
                email = %record.email,
                lastlogin = %lastlogin,
                days = %days,
                subject = %template.subject,
                "sending notification"
            );

            let message = OutboundMessage {
                to: record.email.clone(),
                cc: self.cc.clone(),
                bcc: self.bcc.clone(),
                from: self.from.clone(),
                subject: template.subject.clone(),
                html_body: body,
            };
            match self.transport.send(&message).await {
                Ok(()) => stats.sent += 1,
                Err(e) => {
                    tracing::error!(user = %id, error = %e, "notification send failed");
                    stats.failed += 1;
                }
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "notify_tests.rs"]
mod tests;
