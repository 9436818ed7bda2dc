// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! HTTP directory adapter.
//!
//! Authenticates once at construction and holds the bearer token for the
//! rest of the pass. All requests share one bounded-timeout client.

use super::{DirectoryAdapter, DirectoryConfig, DirectoryError, RawUser};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use iw_core::UserId;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

/// Directory client over HTTP with bearer-token auth.
#[derive(Clone)]
pub struct HttpDirectoryAdapter {
    client: reqwest::Client,
    base: String,
    token: String,
}

impl HttpDirectoryAdapter {
    /// Build a client and authenticate against the directory.
    pub async fn connect(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::Connect(e.to_string()))?;
        let base = config.url.trim_end_matches('/').to_string();

        let response = client
            .post(format!("{base}/api/auth/login"))
            .json(&LoginRequest {
                username: &config.username,
                password: &config.password,
            })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DirectoryError::Connect(e.to_string()))?;

        let LoginResponse { token } = response
            .json()
            .await
            .map_err(|e| DirectoryError::Connect(e.to_string()))?;

        tracing::debug!(url = %base, "directory session established");
        Ok(Self {
            client,
            base,
            token,
        })
    }

    /// End the directory session. Failures are logged, not surfaced: the
    /// session expires server-side anyway.
    pub async fn logout(&self) {
        let result = self
            .client
            .post(format!("{}/api/auth/logout", self.base))
            .bearer_auth(&self.token)
            .send()
            .await;
        if let Err(e) = result {
            tracing::warn!(error = %e, "directory logout failed");
        }
    }
}

#[async_trait]
impl DirectoryAdapter for HttpDirectoryAdapter {
    async fn fetch_users(&self) -> Result<Vec<RawUser>, DirectoryError> {
        self.client
            .get(format!("{}/api/users", self.base))
            .bearer_auth(&self.token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| DirectoryError::Fetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| DirectoryError::Fetch(e.to_string()))
    }

    async fn update_expiration(
        &self,
        id: &UserId,
        when: DateTime<Utc>,
    ) -> Result<(), DirectoryError> {
        let update_err = |e: reqwest::Error| DirectoryError::Update {
            id: id.to_string(),
            message: e.to_string(),
        };

        // Read-modify-write of the full record: fetch the current version,
        // overwrite the expiration field, write the whole thing back.
        let url = format!("{}/api/users/{}", self.base, id);
        let mut record: serde_json::Value = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(update_err)?
            .json()
            .await
            .map_err(update_err)?;

        let Some(fields) = record.as_object_mut() else {
            return Err(DirectoryError::Update {
                id: id.to_string(),
                message: "directory returned a non-object record".into(),
            });
        };
        fields.insert(
            "expirationDate".to_string(),
            serde_json::Value::String(when.to_rfc3339_opts(SecondsFormat::Micros, true)),
        );

        self.client
            .put(&url)
            .bearer_auth(&self.token)
            .json(&record)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(update_err)?;

        Ok(())
    }
}
