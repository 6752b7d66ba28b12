// ABOUTME: Alert deduplication and cooldown tracking over a record store
// ABOUTME: Key derivation policy plus the fail-open AlertTracker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Alert deduplication and cooldown tracking.
//!
//! A dedup key names "the same underlying event" at a deliberately coarser
//! grain than the raw observation; the tracker then gates sends on a cooldown
//! per `(user, alert type, dedup key)` and records what was sent.
//!
//! The whole module fails open: for a notification product, a missed alert is
//! worse than an occasional duplicate.

/// Dedup key derivation per alert type
pub mod keys;

/// Cooldown tracking and send recording
pub mod tracker;

pub use keys::dedup_key;
pub use tracker::AlertTracker;
