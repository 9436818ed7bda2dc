// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{wrap_body, MAX_LINE_LEN};

#[test]
fn short_body_is_one_line() {
    assert_eq!(wrap_body("hello world"), "hello world");
}

#[test]
fn long_body_wraps_at_whitespace_with_crlf() {
    let word = "x".repeat(400);
    let body = format!("{word} {word} {word}");
    let wrapped = wrap_body(&body);

    assert!(wrapped.contains("\r\n"));
    for line in wrapped.split("\r\n") {
        assert!(line.len() <= MAX_LINE_LEN);
    }
}

#[test]
fn overlong_word_is_not_broken() {
    let word = "y".repeat(MAX_LINE_LEN + 50);
    let wrapped = wrap_body(&format!("start {word} end"));
    assert!(wrapped.split("\r\n").any(|line| line == word));
}

#[test]
fn collapses_internal_newlines() {
    // Templates may contain hard newlines; wrapping re-flows them
    assert_eq!(wrap_body("a\nb\n\nc"), "a b c");
}

#[test]
fn empty_body_stays_empty() {
    assert_eq!(wrap_body(""), "");
}
