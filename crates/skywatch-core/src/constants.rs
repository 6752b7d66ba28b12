// ABOUTME: Fixed thresholds and defaults for conditions scoring and alerting
// ABOUTME: Organized by domain: score bands, compound risk, precipitation, defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Fixed thresholds and defaults used throughout the conditions core.
//!
//! These values are deliberately constants rather than configuration: they
//! define the meaning of a score (rating bands), the compound-risk rule, and
//! the neutral substitutes for missing metrics. Per-activity tuning lives in
//! `ConditionProfile`s, not here.

/// Score bands mapping a 0-100 score to a rating category.
pub mod score_bands {
    /// Minimum score rated "excellent"
    pub const EXCELLENT_MIN: u8 = 80;

    /// Minimum score rated "good"
    pub const GOOD_MIN: u8 = 65;

    /// Minimum score rated "fair"
    pub const FAIR_MIN: u8 = 50;

    /// Minimum score rated "poor"; anything below is "not recommended"
    pub const POOR_MIN: u8 = 35;
}

/// Compound-risk adjustment: several independently bad factors compound worse
/// than their sum. Two or more flags subtract `flag_count * PER_FACTOR_PENALTY`
/// additional points. This non-linearity is deliberate.
pub mod compound_risk {
    /// Number of simultaneously bad factors that triggers the adjustment
    pub const MIN_BAD_FACTORS: usize = 2;

    /// Extra points subtracted per bad factor once triggered
    pub const PER_FACTOR_PENALTY: u8 = 5;

    /// Margin below the profile comfort minimum that flags temperature as bad
    pub const COLD_MARGIN_C: f64 = 5.0;

    /// Wind speed above which wind is flagged as bad, km/h
    pub const HIGH_WIND_KMH: f64 = 30.0;
}

/// Precipitation handling.
pub mod precipitation {
    /// Intensity at or above which precipitation counts as actively falling, mm/h
    pub const ACTIVE_INTENSITY_MM: f64 = 0.1;

    /// Minimum penalty fraction applied while precipitation is actively
    /// falling, regardless of measured intensity. "It is raining" is
    /// categorically worse than "rain is merely likely".
    pub const ACTIVE_MIN_PENALTY_FRACTION: f64 = 0.6;
}

/// Profile-neutral defaults substituted for missing optional metrics so the
/// scorer stays total over partially populated input.
pub mod defaults {
    /// UV index assumed when the source omits it
    pub const UV_INDEX: f64 = 1.0;

    /// Visibility assumed when the source omits it, meters
    pub const VISIBILITY_M: f64 = 10_000.0;

    /// Wind speed assumed when the source omits it, km/h
    pub const WIND_SPEED_KMH: f64 = 0.0;

    /// Precipitation probability assumed when the source omits it, percent
    pub const PRECIPITATION_PROBABILITY: f64 = 0.0;

    /// Precipitation intensity assumed when the source omits it, mm/h
    pub const PRECIPITATION_INTENSITY_MM: f64 = 0.0;

    /// Cloud cover assumed when the source omits it, percent
    pub const CLOUD_COVER_PERCENT: f64 = 0.0;

    /// Kp index assumed when the source omits it (geomagnetically quiet)
    pub const KP_INDEX: f64 = 2.0;
}

/// Alert tracker defaults.
pub mod tracker {
    /// Default cooldown before the same dedup key may fire again, hours
    pub const DEFAULT_COOLDOWN_HOURS: i64 = 12;

    /// Default retention horizon for the maintenance sweep, days
    pub const DEFAULT_RETENTION_DAYS: i64 = 30;

    /// Default number of records returned by a history query
    pub const DEFAULT_HISTORY_LIMIT: usize = 20;
}

/// Reason/recommendation generation.
pub mod reasons {
    /// Maximum number of reason phrases attached to a score result
    pub const MAX_REASONS: usize = 4;
}
