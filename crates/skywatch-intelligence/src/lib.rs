// ABOUTME: Conditions intelligence engine: multi-factor scoring and window detection
// ABOUTME: Pure, synchronous computations over hourly samples; no I/O, no shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

#![deny(unsafe_code)]

//! # Skywatch Intelligence
//!
//! The conditions-intelligence engine: a weighted multi-factor scorer shared by
//! every "is X good right now" evaluation, and a sliding-window detector that
//! turns an hourly forecast into "best time ranges".
//!
//! Every evaluation is a pure, synchronous, stateless computation, safe to run
//! with unlimited parallelism across users and locations with no coordination.
//!
//! ## Modules
//!
//! - **config**: condition profiles and per-factor penalty tables, validated at
//!   registry construction
//! - **scoring**: `ConditionScorer` producing a `ScoreResult` per hourly sample
//! - **windows**: window detection over per-hour scores

/// Condition profiles and per-factor penalty tables
pub mod config;

/// Weighted multi-factor scoring
pub mod scoring;

/// Window detection over per-hour scores
pub mod windows;

pub use config::{ConditionProfile, Factor, FactorWeight, PenaltyCurve, PenaltyStep, ProfileRegistry};
pub use scoring::{ConditionScorer, FactorScore, Rating, ScoreResult};
pub use windows::{ScoredHour, Window, WindowOptions};
