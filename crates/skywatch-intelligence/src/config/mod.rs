// ABOUTME: Configuration for the conditions scorer: factors and profiles
// ABOUTME: All tables are data, validated once at registry construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Scorer configuration.
//!
//! Penalty thresholds are explicit data (`PenaltyCurve` variants per factor)
//! rather than logic scattered through the scorer, and are validated when a
//! `ProfileRegistry` is built: weights must not sum past 100, boundaries must
//! be ordered, and penalty fractions must grow monotonically in the "bad"
//! direction.

/// Factor identifiers and penalty-curve tables
pub mod factors;

/// Named condition profiles and the registry with default fallback
pub mod profiles;

pub use factors::{Factor, FactorWeight, PenaltyCurve, PenaltyStep};
pub use profiles::{ConditionProfile, ProfileRegistry};
