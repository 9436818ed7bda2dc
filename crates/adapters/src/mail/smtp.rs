// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! SMTP mail transport using lettre.

use super::{MailError, MailTransport, OutboundMessage, SmtpConfig};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP hard limit per RFC 5321 is 1000 octets per line including CRLF;
/// wrap conservatively under it.
pub const MAX_LINE_LEN: usize = 998;

/// Wrap body text to [`MAX_LINE_LEN`], breaking only at whitespace and
/// joining with CRLF. Words longer than the limit go on their own line
/// unbroken.
pub fn wrap_body(body: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    for word in body.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= MAX_LINE_LEN {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines.join("\r\n")
}

/// Mail transport over SMTP, TLS or plaintext per config.
#[derive(Clone)]
pub struct SmtpMailTransport {
    inner: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailTransport {
    /// Build the transport and verify the server is reachable (and, when
    /// auth is configured, that credentials are accepted). A failure here is
    /// recoverable for the run: the orchestrator skips the notification
    /// phase.
    pub async fn connect(config: &SmtpConfig) -> Result<Self, MailError> {
        let mut builder = if config.ssl {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.server)
                .map_err(|e| MailError::Connect(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(config.server.as_str())
        };
        builder = builder.port(config.port).timeout(Some(config.timeout));
        if config.auth {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }
        let inner = builder.build();

        let ok = inner
            .test_connection()
            .await
            .map_err(|e| MailError::Connect(e.to_string()))?;
        if !ok {
            return Err(MailError::Connect("server rejected connection".into()));
        }

        tracing::debug!(server = %config.server, port = config.port, "mail transport connected");
        Ok(Self { inner })
    }
}

fn mailbox(addr: &str, to: &str) -> Result<Mailbox, MailError> {
    addr.parse::<Mailbox>().map_err(|e| MailError::Send {
        to: to.to_string(),
        message: format!("bad address {addr:?}: {e}"),
    })
}

#[async_trait]
impl MailTransport for SmtpMailTransport {
    async fn send(&self, message: &OutboundMessage) -> Result<(), MailError> {
        let mut builder = Message::builder()
            .from(mailbox(&message.from, &message.to)?)
            .to(mailbox(&message.to, &message.to)?)
            .subject(message.subject.clone());
        for cc in &message.cc {
            builder = builder.cc(mailbox(cc, &message.to)?);
        }
        for bcc in &message.bcc {
            builder = builder.bcc(mailbox(bcc, &message.to)?);
        }

        let email = builder
            .header(ContentType::TEXT_HTML)
            .body(wrap_body(&message.html_body))
            .map_err(|e| MailError::Send {
                to: message.to.clone(),
                message: e.to_string(),
            })?;

        self.inner.send(email).await.map_err(|e| MailError::Send {
            to: message.to.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "smtp_tests.rs"]
mod tests;
