// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Day-count thresholds with lenient normalization.
//!
//! Operators edit these by hand, so a bad value must never abort a run:
//! anything absent, non-numeric, or not strictly positive normalizes to
//! [`Threshold::Disabled`], and a disabled threshold removes its whole rule
//! from the policy. Disabled serializes back to `0` so the config file shows
//! the operator what the job actually ran with.

use chrono::Duration;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A policy threshold: a positive number of days, or disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threshold {
    Days(u32),
    Disabled,
}

impl Threshold {
    /// Normalize a raw config value. `None`, non-numeric, and ≤ 0 all
    /// become `Disabled`; this never fails.
    pub fn normalize(raw: Option<&str>) -> Self {
        match raw {
            Some(s) => Self::from_count(s.trim().parse::<i64>().unwrap_or(0)),
            None => Threshold::Disabled,
        }
    }

    /// Normalize an integer day count: positive is enabled, otherwise disabled.
    pub fn from_count(days: i64) -> Self {
        if days > 0 && days <= u32::MAX as i64 {
            Threshold::Days(days as u32)
        } else {
            Threshold::Disabled
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Threshold::Days(_))
    }

    /// The threshold as a duration, or `None` when disabled.
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Threshold::Days(d) => Some(Duration::days(i64::from(*d))),
            Threshold::Disabled => None,
        }
    }

    /// The value written back to the config file: the day count, or `0`
    /// for disabled (operator visibility).
    pub fn config_value(&self) -> i64 {
        match self {
            Threshold::Days(d) => i64::from(*d),
            Threshold::Disabled => 0,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Days(d) => write!(f, "{}d", d),
            Threshold::Disabled => f.write_str("disabled"),
        }
    }
}

impl Serialize for Threshold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.config_value())
    }
}

struct ThresholdVisitor;

impl Visitor<'_> for ThresholdVisitor {
    type Value = Threshold;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a day count (integer or numeric string)")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Threshold, E> {
        Ok(Threshold::from_count(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Threshold, E> {
        Ok(Threshold::from_count(v.min(i64::MAX as u64) as i64))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Threshold, E> {
        Ok(Threshold::from_count(v as i64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Threshold, E> {
        Ok(Threshold::normalize(Some(v)))
    }
}

impl<'de> Deserialize<'de> for Threshold {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ThresholdVisitor)
    }
}

/// The four policy knobs driving the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Deadline for a never-active account before forced expiry.
    pub first_login: Threshold,
    /// Inactivity age that triggers a warning.
    pub warning: Threshold,
    /// Inactivity age that triggers expiry.
    pub expire: Threshold,
    /// Minimum spacing between warnings for the same user.
    pub grace: Threshold,
}

impl Thresholds {
    /// All rules disabled.
    pub fn disabled() -> Self {
        Self {
            first_login: Threshold::Disabled,
            warning: Threshold::Disabled,
            expire: Threshold::Disabled,
            grace: Threshold::Disabled,
        }
    }
}

#[cfg(test)]
#[path = "threshold_tests.rs"]
mod tests;
