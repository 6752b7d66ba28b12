// ABOUTME: Main library entry point for the skywatch conditions platform
// ABOUTME: Alert deduplication, record-store abstraction, and caller-owned caching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

#![deny(unsafe_code)]

//! # Skywatch
//!
//! The conditions core behind a weather-alert notification product: a
//! multi-factor conditions scorer, a best-time-window detector, and a
//! cooldown-gated alert deduplicator.
//!
//! This crate is a library, not a service boundary. HTTP routing, the weather
//! and space-weather fetchers, message delivery, and scheduling all live with
//! the embedding application; they hand this core normalized hourly samples
//! and a record store, and consume `ScoreResult`s, `Window`s, and send/suppress
//! decisions.
//!
//! ## Architecture
//!
//! - **skywatch-core**: shared domain models, errors, and fixed thresholds
//! - **skywatch-intelligence**: the pure scoring and window-detection engine
//! - **this crate**: the stateful pieces, over an abstracted record store
//!
//! ## Example
//!
//! ```rust
//! use skywatch::alerts::AlertTracker;
//! use skywatch::storage::memory::InMemoryRecordStore;
//! use skywatch::{AlertEvent, ConditionScorer, HourlySample, WindowOptions};
//! use chrono::Utc;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), skywatch::AppError> {
//! let scorer = ConditionScorer::new()?;
//! let forecast = vec![HourlySample::new(Utc::now(), 18.0)];
//!
//! let result = scorer.score(&forecast[0], "hiking");
//! let windows = scorer.find_windows(&forecast, "hiking", &WindowOptions::default());
//!
//! let tracker = AlertTracker::new(InMemoryRecordStore::new());
//! let event = AlertEvent::Geomagnetic { kp_index: 5.4 };
//! let user = Uuid::new_v4();
//! if result.score >= 65 && !tracker.is_recently_alerted(user, &event, 12).await {
//!     // ... deliver the notification, then:
//!     tracker.record_alert(user, &event, serde_json::json!({"score": result.score})).await;
//! }
//! # Ok(())
//! # }
//! ```

/// Alert deduplication and cooldown tracking
pub mod alerts;

/// Caller-owned TTL cache with an injectable clock
pub mod cache;

/// Record-store abstraction and the in-memory implementation
pub mod storage;

pub use skywatch_core::errors::{AppError, AppResult};
pub use skywatch_core::models::{AlertEvent, AlertRecord, HourlySample};
pub use skywatch_intelligence::scoring::{ConditionScorer, FactorScore, Rating, ScoreResult};
pub use skywatch_intelligence::windows::{ScoredHour, Window, WindowOptions};
pub use skywatch_intelligence::config::{ConditionProfile, Factor, ProfileRegistry};

pub use alerts::AlertTracker;
pub use cache::TtlCache;
pub use storage::RecordStore;
