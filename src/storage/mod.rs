// ABOUTME: Record-store abstraction for durable alert records
// ABOUTME: Pluggable backend trait following the cache-provider pattern
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Record-store abstraction.
//!
//! The alert tracker is the only component touching shared state, and that
//! state lives behind this minimal key-value contract: records are addressed
//! by `(partition key, row key)` where the partition is the user and the row
//! combines alert type and dedup key. No transactions and no secondary
//! indexes are required of a backend; `scan_older_than` corresponds to a
//! full-table query and exists solely for the retention sweep.

/// In-memory record store implementation
pub mod memory;

use chrono::{DateTime, Utc};
use skywatch_core::errors::AppResult;
use skywatch_core::models::AlertRecord;
use uuid::Uuid;

/// Pluggable record-store backend for alert records.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one record by partition and row key.
    ///
    /// Absent records are `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unreachable or the read fails.
    async fn get(&self, user_id: Uuid, row_key: &str) -> AppResult<Option<AlertRecord>>;

    /// Insert or fully replace the record addressed by its own keys.
    ///
    /// # Errors
    ///
    /// Returns an error when the write fails.
    async fn upsert_replace(&self, record: AlertRecord) -> AppResult<()>;

    /// All records for a user, optionally filtered by alert type. Ordering is
    /// backend-defined; callers sort client-side.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unreachable or the read fails.
    async fn list_by_partition(
        &self,
        user_id: Uuid,
        alert_type: Option<&str>,
    ) -> AppResult<Vec<AlertRecord>>;

    /// Delete one record. Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns an error when the delete fails.
    async fn delete(&self, user_id: Uuid, row_key: &str) -> AppResult<bool>;

    /// All records, across every user, whose `sent_at` is strictly before the
    /// cutoff. Used by the retention sweep.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend is unreachable or the scan fails.
    async fn scan_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<AlertRecord>>;
}
