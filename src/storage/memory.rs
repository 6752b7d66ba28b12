// ABOUTME: In-memory record store keyed by (user, row key)
// ABOUTME: Backs tests and single-process embedding; shares state via Arc<RwLock>
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

use super::RecordStore;
use chrono::{DateTime, Utc};
use skywatch_core::errors::AppResult;
use skywatch_core::models::AlertRecord;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory [`RecordStore`] backed by a `HashMap` behind a `tokio` `RwLock`.
///
/// Clones share the same underlying map, mirroring how a real backend is one
/// shared service behind many handles.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    rows: Arc<RwLock<HashMap<(Uuid, String), AlertRecord>>>,
}

impl InMemoryRecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live records across all users.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// True when the store holds no records.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get(&self, user_id: Uuid, row_key: &str) -> AppResult<Option<AlertRecord>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(user_id, row_key.to_owned())).cloned())
    }

    async fn upsert_replace(&self, record: AlertRecord) -> AppResult<()> {
        let key = (record.user_id, record.row_key.clone());
        self.rows.write().await.insert(key, record);
        Ok(())
    }

    async fn list_by_partition(
        &self,
        user_id: Uuid,
        alert_type: Option<&str>,
    ) -> AppResult<Vec<AlertRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|record| record.user_id == user_id)
            .filter(|record| alert_type.is_none_or(|t| record.alert_type == t))
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: Uuid, row_key: &str) -> AppResult<bool> {
        let removed = self
            .rows
            .write()
            .await
            .remove(&(user_id, row_key.to_owned()));
        Ok(removed.is_some())
    }

    async fn scan_older_than(&self, cutoff: DateTime<Utc>) -> AppResult<Vec<AlertRecord>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|record| record.sent_at < cutoff)
            .cloned()
            .collect())
    }
}
