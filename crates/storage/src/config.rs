// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The on-disk configuration + state file.
//!
//! Loaded fully at the start of a run. Saved with write-to-temp then atomic
//! rename so a crash mid-save leaves the previous file intact; the orchestrator
//! only saves after a pass completes, so an aborted run never loses state.

use crate::state::LifecycleStore;
use chrono::{DateTime, Utc};
use iw_core::{Threshold, Thresholds, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from loading or saving the config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Run metadata: last-run marker, thresholds, immune users.
///
/// Threshold fields deserialize leniently (see [`Threshold`]); `None` means
/// the key was absent and the built-in default applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    pub lastrun: Option<DateTime<Utc>>,
    pub firstlogindays: Option<Threshold>,
    pub warningdays: Option<Threshold>,
    pub expiredays: Option<Threshold>,
    pub gracedays: Option<Threshold>,
    pub immune_users: Vec<String>,
}

fn default_warn_subject() -> String {
    "Account inactivity warning".to_string()
}

fn default_expire_subject() -> String {
    "Account expiry due to inactivity".to_string()
}

/// Notification settings: subjects, template paths, addressing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySection {
    pub enabled: bool,
    pub warn_subject: String,
    pub warn_template: Option<PathBuf>,
    pub expire_subject: String,
    pub expire_template: Option<PathBuf>,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub from: String,
}

impl Default for NotifySection {
    fn default() -> Self {
        Self {
            enabled: false,
            warn_subject: default_warn_subject(),
            warn_template: None,
            expire_subject: default_expire_subject(),
            expire_template: None,
            cc: Vec::new(),
            bcc: Vec::new(),
            from: String::new(),
        }
    }
}

fn default_smtp_port() -> u16 {
    25
}

/// Mail transport connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmtpSection {
    pub server: String,
    pub port: u16,
    pub ssl: bool,
    pub auth: bool,
    pub username: String,
    pub password: String,
}

impl Default for SmtpSection {
    fn default() -> Self {
        Self {
            server: String::new(),
            port: default_smtp_port(),
            ssl: false,
            auth: false,
            username: String::new(),
            password: String::new(),
        }
    }
}

/// Directory service connection parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySection {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// The whole file: configuration sections plus the three lifecycle maps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub run: RunSection,
    pub notify: NotifySection,
    pub smtp: SmtpSection,
    pub directory: DirectorySection,
    pub watching: BTreeMap<UserId, DateTime<Utc>>,
    pub warned: BTreeMap<UserId, DateTime<Utc>>,
    pub expired: BTreeMap<UserId, DateTime<Utc>>,
}

impl ConfigFile {
    /// Read and parse the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Save atomically: write to a sibling temp file, sync, rename.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let serialized = toml::to_string_pretty(self)?;
        let tmp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&tmp_path)?;
            file.write_all(serialized.as_bytes())?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, path)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Effective thresholds, with the built-in defaults for absent keys and
    /// written back so the file shows what the run used (disabled shows `0`).
    pub fn normalize_thresholds(&mut self) -> Thresholds {
        let t = Thresholds {
            first_login: self.run.firstlogindays.unwrap_or(Threshold::Days(7)),
            warning: self.run.warningdays.unwrap_or(Threshold::Days(30)),
            expire: self.run.expiredays.unwrap_or(Threshold::Days(60)),
            grace: self.run.gracedays.unwrap_or(Threshold::Days(7)),
        };
        self.run.firstlogindays = Some(t.first_login);
        self.run.warningdays = Some(t.warning);
        self.run.expiredays = Some(t.expire);
        self.run.gracedays = Some(t.grace);
        t
    }

    /// The configured immune users, normalized.
    pub fn immune_users(&self) -> BTreeSet<UserId> {
        self.run
            .immune_users
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(UserId::new)
            .collect()
    }

    /// Write the immune set back, sorted, in normalized form.
    pub fn set_immune_users(&mut self, immune: &BTreeSet<UserId>) {
        self.run.immune_users = immune.iter().map(|id| id.as_str().to_string()).collect();
    }

    pub fn lifecycle_store(&self) -> LifecycleStore {
        LifecycleStore {
            watching: self.watching.clone(),
            warned: self.warned.clone(),
            expired: self.expired.clone(),
        }
    }

    pub fn set_lifecycle_store(&mut self, store: LifecycleStore) {
        self.watching = store.watching;
        self.warned = store.warned;
        self.expired = store.expired;
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
