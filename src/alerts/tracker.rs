// ABOUTME: Cooldown-gated alert tracker over the record-store abstraction
// ABOUTME: Fail-open on storage uncertainty; upsert-replace with a send counter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Alert tracking.
//!
//! `AlertTracker` decides whether a computed condition may trigger a new
//! notification and records sends. It keeps at most one live record per
//! `(user, alert type, dedup key)`: an upsert-replace with a send counter,
//! not an event log.
//!
//! # Failure policy
//!
//! Every storage failure fails open: an unreadable record is treated as
//! "never sent" and a failed write after a send is logged and swallowed,
//! never retried synchronously. A duplicate on the next cycle is the accepted
//! cost; a silently dropped notification is not.
//!
//! # Concurrency
//!
//! The check-then-act sequence (`is_recently_alerted` read, later
//! `record_alert` write) is not atomic. Two invocations racing on the same
//! key (an hourly timer and a manual trigger, say) can both observe "not
//! recently alerted" and both send. That race is a documented limitation of
//! the record-store contract, which offers no conditional write.

use crate::alerts::keys::dedup_key;
use crate::storage::RecordStore;
use chrono::{DateTime, Duration, Utc};
use skywatch_core::models::{AlertEvent, AlertRecord};
use uuid::Uuid;

/// Cooldown-gated alert tracker over a pluggable record store.
#[derive(Debug, Clone)]
pub struct AlertTracker<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> AlertTracker<S> {
    /// Create a tracker over a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Whether an alert for this event fired within the cooldown window.
    ///
    /// Fails open: an absent record and a store failure both return `false`.
    pub async fn is_recently_alerted(
        &self,
        user_id: Uuid,
        event: &AlertEvent,
        cooldown_hours: i64,
    ) -> bool {
        self.is_recently_alerted_at(user_id, event, cooldown_hours, Utc::now())
            .await
    }

    /// [`Self::is_recently_alerted`] with an explicit clock, for deterministic
    /// callers and tests.
    pub async fn is_recently_alerted_at(
        &self,
        user_id: Uuid,
        event: &AlertEvent,
        cooldown_hours: i64,
        now: DateTime<Utc>,
    ) -> bool {
        let row_key = AlertRecord::compose_row_key(event.alert_type(), &dedup_key(event, now));
        match self.store.get(user_id, &row_key).await {
            Ok(Some(record)) => {
                now.signed_duration_since(record.sent_at) < Duration::hours(cooldown_hours)
            }
            Ok(None) => false,
            Err(error) => {
                tracing::warn!(%user_id, %row_key, %error, "alert lookup failed, failing open");
                false
            }
        }
    }

    /// Record that an alert was sent, replacing any previous record for the
    /// same key and bumping its send counter.
    ///
    /// Returns `false` when the write failed; the failure is logged and
    /// swallowed because the send has already happened.
    pub async fn record_alert(
        &self,
        user_id: Uuid,
        event: &AlertEvent,
        details: serde_json::Value,
    ) -> bool {
        self.record_alert_at(user_id, event, details, Utc::now())
            .await
    }

    /// [`Self::record_alert`] with an explicit clock.
    pub async fn record_alert_at(
        &self,
        user_id: Uuid,
        event: &AlertEvent,
        details: serde_json::Value,
        now: DateTime<Utc>,
    ) -> bool {
        let key = dedup_key(event, now);
        let row_key = AlertRecord::compose_row_key(event.alert_type(), &key);

        let send_count = match self.store.get(user_id, &row_key).await {
            Ok(Some(previous)) => previous.send_count.saturating_add(1),
            Ok(None) => 1,
            Err(error) => {
                tracing::warn!(%user_id, %row_key, %error, "prior-record read failed, counting from 1");
                1
            }
        };

        let record = AlertRecord {
            user_id,
            row_key: row_key.clone(),
            alert_type: event.alert_type().to_owned(),
            dedup_key: key,
            sent_at: now,
            send_count,
            details,
        };
        match self.store.upsert_replace(record).await {
            Ok(()) => true,
            Err(error) => {
                tracing::warn!(%user_id, %row_key, %error, "alert record write failed, continuing without dedup");
                false
            }
        }
    }

    /// Most recent alert records for a user, newest first, optionally filtered
    /// by alert type and truncated to `limit`.
    ///
    /// Fails open to an empty history on store errors.
    pub async fn history(
        &self,
        user_id: Uuid,
        limit: usize,
        alert_type: Option<&str>,
    ) -> Vec<AlertRecord> {
        match self.store.list_by_partition(user_id, alert_type).await {
            Ok(mut records) => {
                records.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
                records.truncate(limit);
                records
            }
            Err(error) => {
                tracing::warn!(%user_id, %error, "history query failed, returning empty");
                Vec::new()
            }
        }
    }

    /// Delete records older than the retention horizon, regardless of
    /// cooldown state. Returns the number of records removed.
    pub async fn purge_older_than(&self, retention_days: i64) -> u64 {
        self.purge_older_than_at(retention_days, Utc::now()).await
    }

    /// [`Self::purge_older_than`] with an explicit clock.
    pub async fn purge_older_than_at(&self, retention_days: i64, now: DateTime<Utc>) -> u64 {
        let cutoff = now - Duration::days(retention_days);
        let stale = match self.store.scan_older_than(cutoff).await {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(%error, "retention scan failed, skipping sweep");
                return 0;
            }
        };

        let mut removed = 0_u64;
        for record in stale {
            match self.store.delete(record.user_id, &record.row_key).await {
                Ok(true) => removed += 1,
                Ok(false) => {}
                Err(error) => {
                    tracing::warn!(
                        user_id = %record.user_id,
                        row_key = %record.row_key,
                        %error,
                        "stale record delete failed, leaving for next sweep"
                    );
                }
            }
        }
        removed
    }
}
