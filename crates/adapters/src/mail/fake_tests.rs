// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{FakeMailTransport, MailTransport, OutboundMessage};

fn message(to: &str) -> OutboundMessage {
    OutboundMessage {
        to: to.to_string(),
        cc: vec![],
        bcc: vec![],
        from: "job@example.com".to_string(),
        subject: "subject".to_string(),
        html_body: "body".to_string(),
    }
}

#[tokio::test]
async fn records_sent_messages() {
    let fake = FakeMailTransport::new();
    fake.send(&message("a@example.com")).await.unwrap();
    fake.send(&message("b@example.com")).await.unwrap();

    let sent = fake.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].to, "a@example.com");
}

#[tokio::test]
async fn armed_failure_only_hits_target() {
    let fake = FakeMailTransport::new();
    fake.fail_for("bad@example.com");

    assert!(fake.send(&message("bad@example.com")).await.is_err());
    assert!(fake.send(&message("good@example.com")).await.is_ok());
    assert_eq!(fake.sent().len(), 1);
}
