// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One reconciliation pass, end to end.
//!
//! Sequencing: normalize thresholds → fetch and adapt the snapshot → run the
//! policy engine → dispatch notifications (skipped wholesale if the transport
//! is unreachable, per category if a template fails to load) → write
//! expirations back to the directory → stamp the run metadata. The caller
//! saves the config file only after this returns `Ok`, so an aborted pass
//! never rewrites state.

use crate::error::RunError;
use crate::notify::{MessageTemplate, Notifier};
use crate::policy::{reconcile, RunContext};
use iw_adapters::{build_snapshot, DirectoryAdapter, MailError, MailTransport};
use iw_core::{Clock, UserId};
use iw_storage::ConfigFile;
use std::future::Future;
use std::path::Path;

/// What one pass did, for reporting and tests.
#[derive(Debug, Clone, Default)]
pub struct PassReport {
    /// Warning notifications delivered.
    pub warned: usize,
    /// Ids expired in the directory this run.
    pub expired: Vec<UserId>,
    /// Ids whose expiry write-back failed; left for the next pass.
    pub failed_updates: Vec<UserId>,
    /// Size of the watch set after this run.
    pub watching: usize,
    /// Records dropped at the snapshot boundary.
    pub dropped_records: usize,
    /// True when the notification phase was skipped (disabled, nothing to
    /// send, or transport unreachable).
    pub notifications_skipped: bool,
}

/// Run one reconciliation pass against the given collaborators.
///
/// `connect_mail` is only invoked when notifications are enabled and there
/// is something to send; a connect failure skips the notification phase but
/// never the expiry phase.
pub async fn run_pass<D, M, C, Fut>(
    config: &mut ConfigFile,
    clock: &dyn Clock,
    directory: &D,
    connect_mail: C,
) -> Result<PassReport, RunError>
where
    D: DirectoryAdapter,
    M: MailTransport,
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<M, MailError>>,
{
    let now = clock.now();
    tracing::info!(%now, "reconciliation pass starting");

    let thresholds = config.normalize_thresholds();
    tracing::debug!(
        first_login = %thresholds.first_login,
        warning = %thresholds.warning,
        expire = %thresholds.expire,
        grace = %thresholds.grace,
        "effective thresholds"
    );

    // Persist the configured immune list normalized and sorted; the service
    // account is added in memory only, so it is exempt without showing up
    // in the operator's list.
    let mut immune = config.immune_users();
    config.set_immune_users(&immune);
    if !config.directory.username.trim().is_empty() {
        immune.insert(UserId::new(&config.directory.username));
    }

    // Fatal if this fails: no snapshot, nothing to reconcile.
    let raw = directory.fetch_users().await?;
    let (snapshot, issues) = build_snapshot(raw);
    tracing::info!(
        users = snapshot.len(),
        dropped = issues.len(),
        "directory snapshot built"
    );

    let mut store = config.lifecycle_store();
    let outcome = reconcile(
        &RunContext {
            now,
            snapshot: &snapshot,
            thresholds: &thresholds,
            immune: &immune,
        },
        &mut store,
    );
    tracing::info!(
        watch = outcome.to_watch.len(),
        warn = outcome.to_warn.len(),
        expire = outcome.to_expire.len(),
        in_grace = outcome.in_grace.len(),
        "policy engine reconciled"
    );

    let mut report = PassReport {
        dropped_records: issues.len(),
        ..PassReport::default()
    };

    // Notification phase.
    let have_targets = !outcome.to_warn.is_empty() || !outcome.to_expire.is_empty();
    if config.notify.enabled && have_targets {
        match connect_mail().await {
            Ok(transport) => {
                let notifier = Notifier {
                    transport: &transport,
                    from: config.notify.from.clone(),
                    cc: config.notify.cc.clone(),
                    bcc: config.notify.bcc.clone(),
                    url: config.directory.url.clone(),
                    now,
                };
                let mut dispatched = false;
                if !outcome.to_warn.is_empty() {
                    if let Some(tpl) = load_template(
                        &config.notify.warn_subject,
                        config.notify.warn_template.as_deref(),
                    ) {
                        let stats = notifier
                            .notify_all(&outcome.to_warn, &snapshot, &tpl)
                            .await;
                        report.warned = stats.sent;
                        dispatched = true;
                    }
                }
                if !outcome.to_expire.is_empty() {
                    if let Some(tpl) = load_template(
                        &config.notify.expire_subject,
                        config.notify.expire_template.as_deref(),
                    ) {
                        notifier
                            .notify_all(&outcome.to_expire, &snapshot, &tpl)
                            .await;
                        dispatched = true;
                    }
                }
                // Enabled with targets but every template missing: nothing
                // went out, the report says so.
                report.notifications_skipped = !dispatched;
            }
            Err(e) => {
                // Degraded, not fatal: an account can be expired without
                // having been warned if mail was unreachable at the
                // critical run.
                tracing::error!(error = %e, "mail transport unavailable, skipping notifications");
                report.notifications_skipped = true;
            }
        }
    } else {
        report.notifications_skipped = true;
        if have_targets {
            tracing::info!("notifications disabled in config");
        }
    }

    // Expiry write-back. A failed update rolls back that id's local record:
    // no audit entry is written, and a consumed first-login watch marker is
    // restored with its original timestamp, so the id re-qualifies next pass
    // without restarting the deadline clock.
    for id in &outcome.to_expire {
        match directory.update_expiration(id, now).await {
            Ok(()) => {
                store.expired.insert(id.clone(), now);
                let name = snapshot.get(id).map_or(id.as_str(), |r| r.name.as_str());
                tracing::info!(user = %id, %name, "expired account");
                report.expired.push(id.clone());
            }
            Err(e) => {
                tracing::error!(user = %id, error = %e, "expiry write-back failed, leaving for next pass");
                if let Some(&since) = outcome.overdue_watches.get(id) {
                    store.watching.insert(id.clone(), since);
                }
                report.failed_updates.push(id.clone());
            }
        }
    }
    report.watching = store.watching.len();

    config.run.lastrun = Some(now);
    config.set_lifecycle_store(store);

    tracing::info!(
        warned = report.warned,
        expired = report.expired.len(),
        failed_updates = report.failed_updates.len(),
        "reconciliation pass complete"
    );
    Ok(report)
}

fn load_template(subject: &str, path: Option<&Path>) -> Option<MessageTemplate> {
    let path = match path {
        Some(p) => p,
        None => {
            tracing::warn!(%subject, "no template configured, skipping category");
            return None;
        }
    };
    match MessageTemplate::load(subject, path) {
        Ok(tpl) => Some(tpl),
        Err(e) => {
            tracing::warn!(error = %e, "template load failed, skipping category");
            None
        }
    }
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
