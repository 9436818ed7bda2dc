// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The lifecycle policy engine.
//!
//! Pure: no I/O, no ambient time. Given a snapshot, the prior store, the
//! thresholds, and the immune set, compute who to watch, warn, and expire
//! this run, and mutate the store so the next run stays correct. The order
//! of the steps matters and is documented inline.

use chrono::{DateTime, Utc};
use iw_core::{Threshold, Thresholds, UserId, UserRecord};
use iw_storage::LifecycleStore;
use std::collections::{BTreeMap, BTreeSet};

/// Everything one reconciliation pass reads. Explicit, never global.
pub struct RunContext<'a> {
    pub now: DateTime<Utc>,
    pub snapshot: &'a BTreeMap<UserId, UserRecord>,
    pub thresholds: &'a Thresholds,
    /// Ids exempt from all policy action. Always includes the identity the
    /// job authenticates as, so it cannot lock itself out.
    pub immune: &'a BTreeSet<UserId>,
}

/// The computed action sets for one pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyOutcome {
    pub to_warn: BTreeSet<UserId>,
    pub to_expire: BTreeSet<UserId>,
    pub to_watch: BTreeSet<UserId>,
    pub in_grace: BTreeSet<UserId>,
    /// Watch markers consumed by the first-login deadline, keyed by id with
    /// the first-observed timestamp they carried. The orchestrator restores
    /// a marker when the directory write-back for that id fails, so the
    /// deadline clock keeps its original start.
    pub overdue_watches: BTreeMap<UserId, DateTime<Utc>>,
}

/// Ids whose last activity is at least `threshold` old and whose expiration
/// is set and still in the future. The future-expiration condition is what
/// makes expiry idempotent: an already-expired account never re-qualifies.
/// A disabled threshold removes the whole rule.
fn inactive_past(ctx: &RunContext<'_>, threshold: Threshold) -> BTreeSet<UserId> {
    let Some(age) = threshold.duration() else {
        return BTreeSet::new();
    };
    ctx.snapshot
        .values()
        .filter(|r| r.last_activity.is_some_and(|la| ctx.now - la >= age))
        .filter(|r| r.expires_at.is_some_and(|exp| exp > ctx.now))
        .map(|r| r.id.clone())
        .collect()
}

/// Run one reconciliation pass over the snapshot and store.
pub fn reconcile(ctx: &RunContext<'_>, store: &mut LifecycleStore) -> PolicyOutcome {
    let now = ctx.now;

    // Expire test.
    let mut to_expire = inactive_past(ctx, ctx.thresholds.expire);

    // Grace: ids warned recently enough that warning again would nag.
    let in_grace: BTreeSet<UserId> = match ctx.thresholds.grace.duration() {
        Some(grace) => store
            .warned
            .iter()
            .filter(|(_, &warned_at)| now - warned_at <= grace)
            .map(|(id, _)| id.clone())
            .collect(),
        None => BTreeSet::new(),
    };

    // Warn test: same shape as the expire test with the warning threshold,
    // minus anyone being expired this run, minus anyone in grace.
    let mut to_warn: BTreeSet<UserId> = inactive_past(ctx, ctx.thresholds.warning)
        .into_iter()
        .filter(|id| !to_expire.contains(id) && !in_grace.contains(id))
        .collect();

    // Watch test: never active and not already expired. Independent of the
    // thresholds.
    let mut to_watch: BTreeSet<UserId> = ctx
        .snapshot
        .values()
        .filter(|r| r.last_activity.is_none() && !r.is_expired(now))
        .map(|r| r.id.clone())
        .collect();

    // Immune exclusion, before the store is reconciled against the sets.
    for set in [&mut to_expire, &mut to_warn, &mut to_watch] {
        set.retain(|id| !ctx.immune.contains(id));
    }

    // Store reconciliation. Order matters:
    // drop watch entries that resolved (logged in, expired, or went immune),
    store.watching.retain(|id, _| to_watch.contains(id));
    // then record first-observed markers for new watches without touching
    // existing ones,
    for id in &to_watch {
        store.watching.entry(id.clone()).or_insert(now);
    }
    // then stamp this run's warnings,
    for id in &to_warn {
        store.warned.insert(id.clone(), now);
    }
    // then reclaim warned entries that resolved, and always the ones being
    // expired.
    store.warned.retain(|id, _| {
        !to_expire.contains(id)
            && (to_watch.contains(id) || to_warn.contains(id) || in_grace.contains(id))
    });

    // First-login deadline: a watched account that never activated within
    // the deadline is force-expired, regardless of any expiration date it
    // was originally assigned (or the lack of one).
    let mut overdue_watches = BTreeMap::new();
    if let Some(deadline) = ctx.thresholds.first_login.duration() {
        let overdue: Vec<UserId> = store
            .watching
            .iter()
            .filter(|(_, &since)| now - since >= deadline)
            .map(|(id, _)| id.clone())
            .collect();
        for id in overdue {
            if let Some(since) = store.watching.remove(&id) {
                overdue_watches.insert(id.clone(), since);
            }
            to_expire.insert(id);
        }
    }

    PolicyOutcome {
        to_warn,
        to_expire,
        to_watch,
        in_grace,
        overdue_watches,
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
