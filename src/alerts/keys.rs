// ABOUTME: Deterministic dedup key derivation per alert type
// ABOUTME: Keys are deliberately coarser than raw observations to group one event
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Dedup key derivation.
//!
//! The key decides what counts as "the same event", per alert type:
//!
//! - **Geomagnetic**: the Kp index truncated to its integer band. Observations
//!   drifting within a band (5.1, 5.6) collapse to one event so the user is
//!   not re-alerted as the index wobbles; crossing into the next band is news.
//! - **Severe weather**: `(warning type, severity, onset date)`. A new day's
//!   warning of the same type and severity is a new event even when the
//!   meteorological episode is continuous.
//! - **Daily digest**: the calendar date alone: at most one per day.
//! - **Generic**: the current hour, truncated, capping at one per hour by default.

use chrono::{DateTime, Utc};
use skywatch_core::models::AlertEvent;

/// Derive the dedup key for an event.
///
/// Pure and deterministic: the same event and the same `now` always produce
/// the same key. `now` only participates for the generic variant, whose key
/// is the truncated hour.
#[must_use]
pub fn dedup_key(event: &AlertEvent, now: DateTime<Utc>) -> String {
    match event {
        AlertEvent::Geomagnetic { kp_index } => format!("kp{}", kp_index.floor() as i64),
        AlertEvent::SevereWeather {
            warning_type,
            severity,
            onset,
        } => format!(
            "{}:{}:{}",
            warning_type.to_lowercase(),
            severity.to_lowercase(),
            onset.format("%Y-%m-%d")
        ),
        AlertEvent::DailyDigest { date } => date.format("%Y-%m-%d").to_string(),
        AlertEvent::Generic { .. } => now.format("%Y-%m-%dT%H").to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 14, 25, 0).unwrap()
    }

    fn kp(kp_index: f64) -> AlertEvent {
        AlertEvent::Geomagnetic { kp_index }
    }

    #[test]
    fn kp_within_a_band_collapses_to_one_key() {
        assert_eq!(dedup_key(&kp(5.1), now()), dedup_key(&kp(5.6), now()));
        assert_eq!(dedup_key(&kp(5.1), now()), "kp5");
    }

    #[test]
    fn kp_across_bands_differs() {
        assert_ne!(dedup_key(&kp(5.1), now()), dedup_key(&kp(6.4), now()));
    }

    #[test]
    fn severe_weather_keys_on_type_severity_and_onset_date() {
        let mar1 = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mar2 = NaiveDate::from_ymd_opt(2025, 3, 2).unwrap();
        let today = AlertEvent::SevereWeather {
            warning_type: "Wind".into(),
            severity: "Amber".into(),
            onset: mar1,
        };
        let same_day = AlertEvent::SevereWeather {
            warning_type: "wind".into(),
            severity: "amber".into(),
            onset: mar1,
        };
        let next_day = AlertEvent::SevereWeather {
            warning_type: "Wind".into(),
            severity: "Amber".into(),
            onset: mar2,
        };
        assert_eq!(dedup_key(&today, now()), dedup_key(&same_day, now()));
        assert_ne!(dedup_key(&today, now()), dedup_key(&next_day, now()));
        assert_eq!(dedup_key(&today, now()), "wind:amber:2025-03-01");
    }

    #[test]
    fn digest_keys_on_calendar_date_only() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let digest = AlertEvent::DailyDigest { date };
        assert_eq!(dedup_key(&digest, now()), "2025-03-01");
    }

    #[test]
    fn generic_keys_on_truncated_hour() {
        let event = AlertEvent::Generic {
            kind: "uv_warning".into(),
        };
        let later_same_hour = Utc.with_ymd_and_hms(2025, 3, 1, 14, 59, 59).unwrap();
        let next_hour = Utc.with_ymd_and_hms(2025, 3, 1, 15, 0, 0).unwrap();
        assert_eq!(dedup_key(&event, now()), dedup_key(&event, later_same_hour));
        assert_ne!(dedup_key(&event, now()), dedup_key(&event, next_hour));
        assert_eq!(dedup_key(&event, now()), "2025-03-01T14");
    }
}
