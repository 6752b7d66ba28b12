// ABOUTME: Domain models shared across the skywatch workspace
// ABOUTME: Defines HourlySample metrics input plus AlertEvent and AlertRecord
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Domain models.
//!
//! `HourlySample` is the normalized per-hour metrics record produced by the
//! (external) weather and space-weather fetchers. Units and presence of
//! optional fields are the source's responsibility; the scorer substitutes
//! profile-neutral defaults for anything missing.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One hour's worth of raw environmental metrics.
///
/// All optional fields may legitimately be absent depending on the upstream
/// source. Read-only to the scoring core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// Hour this sample describes
    pub timestamp: DateTime<Utc>,
    /// Air temperature in Celsius
    pub temperature_c: f64,
    /// Apparent ("feels like") temperature in Celsius
    pub feels_like_c: Option<f64>,
    /// Probability of precipitation, 0-100
    pub precipitation_probability: Option<f64>,
    /// Measured precipitation intensity in mm/h
    pub precipitation_intensity_mm: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_kmh: Option<f64>,
    /// UV index (0-11+)
    pub uv_index: Option<f64>,
    /// Horizontal visibility in meters
    pub visibility_m: Option<f64>,
    /// Cloud cover percentage, 0-100
    pub cloud_cover_percent: Option<f64>,
    /// Coarse condition label from the source (e.g. "Rain", "Clear")
    pub condition: Option<String>,
    /// Planetary geomagnetic index (Kp, 0-9)
    pub kp_index: Option<f64>,
}

impl HourlySample {
    /// Create a sample with only the required fields populated.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, temperature_c: f64) -> Self {
        Self {
            timestamp,
            temperature_c,
            feels_like_c: None,
            precipitation_probability: None,
            precipitation_intensity_mm: None,
            wind_speed_kmh: None,
            uv_index: None,
            visibility_m: None,
            cloud_cover_percent: None,
            condition: None,
            kp_index: None,
        }
    }

    /// Effective temperature for comfort scoring: feels-like when reported,
    /// otherwise the measured air temperature.
    #[must_use]
    pub fn effective_temperature_c(&self) -> f64 {
        self.feels_like_c.unwrap_or(self.temperature_c)
    }

    /// True when the sample reports precipitation actually falling, either as
    /// a measurable intensity or via the coarse condition label.
    #[must_use]
    pub fn is_precipitating(&self) -> bool {
        if self
            .precipitation_intensity_mm
            .is_some_and(|mm| mm >= crate::constants::precipitation::ACTIVE_INTENSITY_MM)
        {
            return true;
        }
        self.condition.as_deref().is_some_and(|label| {
            let label = label.to_lowercase();
            ["rain", "drizzle", "snow", "sleet", "shower", "thunderstorm"]
                .iter()
                .any(|kind| label.contains(kind))
        })
    }
}

/// One alert-worthy observation, carrying the data that identifies "the same
/// underlying event" for deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEvent {
    /// Geomagnetic/aurora activity at a given Kp index
    Geomagnetic {
        /// Observed planetary Kp index
        kp_index: f64,
    },
    /// An official severe-weather warning
    SevereWeather {
        /// Warning category (e.g. "wind", "thunderstorm")
        warning_type: String,
        /// Severity level (e.g. "yellow", "amber", "red")
        severity: String,
        /// Calendar date the warning takes effect
        onset: NaiveDate,
    },
    /// Daily digest-style summary, at most one per calendar day
    DailyDigest {
        /// Calendar date the digest covers
        date: NaiveDate,
    },
    /// Any other alert kind, capped at one per hour by default
    Generic {
        /// Free-form alert kind label
        kind: String,
    },
}

impl AlertEvent {
    /// Stable type tag used as part of the record row key.
    #[must_use]
    pub fn alert_type(&self) -> &str {
        match self {
            Self::Geomagnetic { .. } => "geomagnetic",
            Self::SevereWeather { .. } => "severe_weather",
            Self::DailyDigest { .. } => "daily_digest",
            Self::Generic { kind } => kind.as_str(),
        }
    }
}

/// One durable fact: an alert was sent to a user at a point in time.
///
/// Keyed by `(user_id, row_key)` where `row_key` combines the alert type and
/// the dedup key. The store holds at most one live record per key; a re-send
/// after cooldown expiry replaces the record and bumps `send_count`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// Recipient (partition key)
    pub user_id: Uuid,
    /// `{alert_type}:{dedup_key}` (row key)
    pub row_key: String,
    /// Alert type tag
    pub alert_type: String,
    /// Derived dedup key
    pub dedup_key: String,
    /// When the most recent send happened
    pub sent_at: DateTime<Utc>,
    /// How many times this key has fired, across cooldown cycles
    pub send_count: u32,
    /// Display details captured at send time, for the history view
    pub details: serde_json::Value,
}

impl AlertRecord {
    /// Compose the row key for an alert type and dedup key.
    #[must_use]
    pub fn compose_row_key(alert_type: &str, dedup_key: &str) -> String {
        format!("{alert_type}:{dedup_key}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> HourlySample {
        let noon = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        HourlySample::new(noon, 15.0)
    }

    #[test]
    fn effective_temperature_prefers_feels_like() {
        let mut s = sample();
        assert!((s.effective_temperature_c() - 15.0).abs() < f64::EPSILON);
        s.feels_like_c = Some(11.5);
        assert!((s.effective_temperature_c() - 11.5).abs() < f64::EPSILON);
    }

    #[test]
    fn precipitating_from_intensity() {
        let mut s = sample();
        assert!(!s.is_precipitating());
        s.precipitation_intensity_mm = Some(0.3);
        assert!(s.is_precipitating());
    }

    #[test]
    fn precipitating_from_condition_label() {
        let mut s = sample();
        s.condition = Some("Light Drizzle".into());
        assert!(s.is_precipitating());
        s.condition = Some("Clear".into());
        assert!(!s.is_precipitating());
    }

    #[test]
    fn trace_intensity_below_floor_is_not_active() {
        let mut s = sample();
        s.precipitation_intensity_mm = Some(0.01);
        assert!(!s.is_precipitating());
    }

    #[test]
    fn alert_type_tags_are_stable() {
        let geo = AlertEvent::Geomagnetic { kp_index: 5.0 };
        assert_eq!(geo.alert_type(), "geomagnetic");
        let generic = AlertEvent::Generic {
            kind: "uv_warning".into(),
        };
        assert_eq!(generic.alert_type(), "uv_warning");
    }

    #[test]
    fn row_key_composition() {
        assert_eq!(
            AlertRecord::compose_row_key("geomagnetic", "kp5"),
            "geomagnetic:kp5"
        );
    }
}
