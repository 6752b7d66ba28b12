// ABOUTME: Weighted multi-factor conditions scorer producing 0-100 ScoreResults
// ABOUTME: Total over partial input; compound-risk adjustment; reasons and recommendation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Weighted multi-factor scoring.
//!
//! `ConditionScorer::score` turns one hourly sample and a profile name into a
//! `ScoreResult`: an integer score clamped to `[0, 100]`, a rating category, a
//! per-factor breakdown, up to four ranked reasons, and a recommendation line.
//!
//! The function is total over partially populated input: absent optional
//! metrics fall back to profile-neutral defaults, and an unknown profile name
//! falls back to the default profile. It never fails and never panics: for a
//! notification product a best-effort score beats a hard error.

use crate::config::{ConditionProfile, Factor, PenaltyCurve, ProfileRegistry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skywatch_core::constants::{compound_risk, defaults, reasons, score_bands};
use skywatch_core::errors::AppResult;
use skywatch_core::models::HourlySample;
use std::collections::HashMap;

/// Ordinal rating category derived from fixed score bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// Score at or above 80
    Excellent,
    /// Score at or above 65
    Good,
    /// Score at or above 50
    Fair,
    /// Score at or above 35
    Poor,
    /// Anything below 35
    NotRecommended,
}

impl Rating {
    /// Classify a clamped score into its band.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        if score >= score_bands::EXCELLENT_MIN {
            Self::Excellent
        } else if score >= score_bands::GOOD_MIN {
            Self::Good
        } else if score >= score_bands::FAIR_MIN {
            Self::Fair
        } else if score >= score_bands::POOR_MIN {
            Self::Poor
        } else {
            Self::NotRecommended
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::NotRecommended => "Not recommended",
        }
    }
}

/// Per-factor contribution to a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorScore {
    /// Raw value the penalty was computed from (after default substitution)
    pub value: f64,
    /// Penalty points removed by this factor
    pub penalty_points: u8,
    /// Maximum points this factor could have removed (its weight)
    pub max_points: u8,
}

/// Output of one scoring evaluation. Created fresh per evaluation, never
/// mutated, never persisted by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Final score, clamped to `[0, 100]`
    pub score: u8,
    /// Rating band for the score
    pub rating: Rating,
    /// Breakdown by factor
    pub factors: HashMap<Factor, FactorScore>,
    /// Ranked, capped list of short human phrases for the dominant penalties
    pub reasons: Vec<String>,
    /// One-line recommendation derived from the rating and the worst factor
    pub recommendation: String,
    /// Hour the evaluation describes
    pub timestamp: DateTime<Utc>,
}

/// The shared conditions scorer.
///
/// Holds a validated [`ProfileRegistry`]; scoring itself is pure and keeps no
/// per-evaluation state.
#[derive(Debug, Clone)]
pub struct ConditionScorer {
    registry: ProfileRegistry,
}

impl ConditionScorer {
    /// Create a scorer over the built-in profiles.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the built-in tables fail validation,
    /// which indicates a programming error in the built-ins.
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            registry: ProfileRegistry::with_builtins()?,
        })
    }

    /// Create a scorer over a caller-supplied registry.
    #[must_use]
    pub const fn with_registry(registry: ProfileRegistry) -> Self {
        Self { registry }
    }

    /// The profile registry backing this scorer.
    #[must_use]
    pub const fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Score a sample against a named profile. Unknown names fall back to the
    /// default profile.
    #[must_use]
    pub fn score(&self, sample: &HourlySample, profile_name: &str) -> ScoreResult {
        Self::score_with_profile(sample, self.registry.get(profile_name))
    }

    /// Score a sample against an explicit profile.
    #[must_use]
    pub fn score_with_profile(sample: &HourlySample, profile: &ConditionProfile) -> ScoreResult {
        let mut total: i32 = 100;
        let mut factors = HashMap::with_capacity(profile.factors.len());
        let mut candidates: Vec<(u8, Factor, String)> = Vec::new();

        for fw in &profile.factors {
            let (value, fraction) = factor_penalty(&fw.curve, fw.factor, sample);
            let tolerance = profile.tolerance_for(fw.factor);
            // Tolerance only scales non-zero penalties; in-band values stay at
            // exactly zero however tolerant or strict the profile is.
            let adjusted = if fraction > 0.0 {
                (fraction / tolerance).min(1.0)
            } else {
                0.0
            };
            let penalty_points = (f64::from(fw.weight) * adjusted).round() as u8;
            total -= i32::from(penalty_points);

            if penalty_points > 0 {
                candidates.push((penalty_points, fw.factor, reason_phrase(fw.factor, value, sample)));
            }
            factors.insert(
                fw.factor,
                FactorScore {
                    value,
                    penalty_points,
                    max_points: fw.weight,
                },
            );
        }

        // Worst factor drives the recommendation caveat; decided before the
        // compound-risk note joins the reason candidates.
        let worst = candidates
            .iter()
            .max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(&a.1)))
            .map(|(_, factor, _)| *factor);

        // Compound risk: several independently bad factors are worse than the
        // sum of their penalties.
        let bad_flags = count_bad_flags(sample, profile);
        if bad_flags >= compound_risk::MIN_BAD_FACTORS {
            let extra = (bad_flags as u8).saturating_mul(compound_risk::PER_FACTOR_PENALTY);
            total -= i32::from(extra);
            candidates.push((
                extra,
                Factor::Precipitation,
                format!("{bad_flags} adverse factors at once compound the risk"),
            ));
        }

        let score = total.clamp(0, 100) as u8;
        let rating = Rating::from_score(score);

        // Rank by penalty, heaviest first; ties keep factor declaration order.
        candidates.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        let reasons: Vec<String> = candidates
            .into_iter()
            .take(reasons::MAX_REASONS)
            .map(|(_, _, phrase)| phrase)
            .collect();

        let recommendation = recommendation_line(rating, worst);

        ScoreResult {
            score,
            rating,
            factors,
            reasons,
            recommendation,
            timestamp: sample.timestamp,
        }
    }
}

/// Raw value and penalty fraction for one factor, substituting neutral
/// defaults for missing metrics.
fn factor_penalty(curve: &PenaltyCurve, factor: Factor, sample: &HourlySample) -> (f64, f64) {
    match factor {
        Factor::Precipitation => {
            if sample.is_precipitating() {
                let mm = sample
                    .precipitation_intensity_mm
                    .unwrap_or(defaults::PRECIPITATION_INTENSITY_MM);
                let fraction = curve.active_precipitation_fraction(mm).unwrap_or(1.0);
                (mm, fraction)
            } else {
                let probability = sample
                    .precipitation_probability
                    .unwrap_or(defaults::PRECIPITATION_PROBABILITY);
                (probability, curve.penalty_fraction(probability))
            }
        }
        Factor::Temperature => {
            let value = sample.effective_temperature_c();
            (value, curve.penalty_fraction(value))
        }
        Factor::Wind => {
            let value = sample.wind_speed_kmh.unwrap_or(defaults::WIND_SPEED_KMH);
            (value, curve.penalty_fraction(value))
        }
        Factor::UvExposure => {
            let value = sample.uv_index.unwrap_or(defaults::UV_INDEX);
            (value, curve.penalty_fraction(value))
        }
        Factor::Visibility => {
            let value = sample.visibility_m.unwrap_or(defaults::VISIBILITY_M);
            (value, curve.penalty_fraction(value))
        }
        Factor::Geomagnetic => {
            let value = sample.kp_index.unwrap_or(defaults::KP_INDEX);
            (value, curve.penalty_fraction(value))
        }
    }
}

/// Fixed boolean badness rules feeding the compound-risk adjustment.
fn count_bad_flags(sample: &HourlySample, profile: &ConditionProfile) -> usize {
    let mut bad = 0;
    if sample.is_precipitating() {
        bad += 1;
    }
    if let Some((comfort_min, _)) = profile.comfort_range() {
        if sample.effective_temperature_c() < comfort_min - compound_risk::COLD_MARGIN_C {
            bad += 1;
        }
    }
    if sample
        .wind_speed_kmh
        .is_some_and(|kmh| kmh > compound_risk::HIGH_WIND_KMH)
    {
        bad += 1;
    }
    bad
}

/// Short human phrase for a penalized factor.
fn reason_phrase(factor: Factor, value: f64, sample: &HourlySample) -> String {
    match factor {
        Factor::Temperature => {
            format!("Temperatures around {value:.0}\u{b0}C sit outside the comfortable range")
        }
        Factor::Precipitation => {
            if sample.is_precipitating() {
                format!("Precipitation falling at {value:.1} mm/h")
            } else {
                format!("{value:.0}% chance of precipitation")
            }
        }
        Factor::Wind => format!("Winds near {value:.0} km/h will be noticeable"),
        Factor::UvExposure => format!("UV index of {value:.0} calls for sun protection"),
        Factor::Visibility => format!("Visibility down to {value:.0} m"),
        Factor::Geomagnetic => format!("Geomagnetic activity too quiet (Kp {value:.1})"),
    }
}

/// Caveat fragment naming the most significant unmet factor.
const fn factor_caveat(factor: Factor) -> &'static str {
    match factor {
        Factor::Temperature => "temperature is the main caveat",
        Factor::Precipitation => "precipitation is the main caveat",
        Factor::Wind => "wind is the main caveat",
        Factor::UvExposure => "UV exposure is the main caveat",
        Factor::Visibility => "visibility is the main caveat",
        Factor::Geomagnetic => "geomagnetic activity is the limiting factor",
    }
}

/// One-line recommendation from the rating plus the worst factor.
fn recommendation_line(rating: Rating, worst: Option<Factor>) -> String {
    match (rating, worst) {
        (Rating::Excellent, _) => "Excellent conditions - get out there.".into(),
        (Rating::Good, None) => "Good conditions overall.".into(),
        (Rating::Good, Some(factor)) => {
            format!("Good conditions overall; {}.", factor_caveat(factor))
        }
        (Rating::Fair, None) => "Fair conditions.".into(),
        (Rating::Fair, Some(factor)) => format!("Fair conditions; {}.", factor_caveat(factor)),
        (Rating::Poor, None) => "Poor conditions; consider another time.".into(),
        (Rating::Poor, Some(factor)) => {
            format!("Poor conditions; {}. Consider another time.", factor_caveat(factor))
        }
        (Rating::NotRecommended, None) => "Not recommended right now.".into(),
        (Rating::NotRecommended, Some(factor)) => {
            format!("Not recommended right now; {}.", factor_caveat(factor))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn calm_sample() -> HourlySample {
        HourlySample {
            precipitation_probability: Some(0.0),
            precipitation_intensity_mm: Some(0.0),
            wind_speed_kmh: Some(10.0),
            uv_index: Some(2.0),
            visibility_m: Some(10_000.0),
            ..HourlySample::new(noon(), 15.0)
        }
    }

    fn scorer() -> ConditionScorer {
        ConditionScorer::new().unwrap()
    }

    #[test]
    fn ideal_input_scores_exactly_100() {
        let result = scorer().score(&calm_sample(), "outdoor");
        assert_eq!(result.score, 100);
        assert_eq!(result.rating, Rating::Excellent);
        assert!(result.reasons.is_empty());
        for factor_score in result.factors.values() {
            assert_eq!(factor_score.penalty_points, 0);
        }
    }

    #[test]
    fn rating_bands_match_constants() {
        assert_eq!(Rating::from_score(80), Rating::Excellent);
        assert_eq!(Rating::from_score(79), Rating::Good);
        assert_eq!(Rating::from_score(65), Rating::Good);
        assert_eq!(Rating::from_score(64), Rating::Fair);
        assert_eq!(Rating::from_score(50), Rating::Fair);
        assert_eq!(Rating::from_score(49), Rating::Poor);
        assert_eq!(Rating::from_score(35), Rating::Poor);
        assert_eq!(Rating::from_score(34), Rating::NotRecommended);
        assert_eq!(Rating::from_score(0), Rating::NotRecommended);
    }

    #[test]
    fn in_band_value_zero_penalty_regardless_of_tolerance() {
        // Hiking narrows nothing at 15C; tolerance must not manufacture penalty.
        let result = scorer().score(&calm_sample(), "hiking");
        let temp = &result.factors[&Factor::Temperature];
        assert_eq!(temp.penalty_points, 0);
    }

    #[test]
    fn missing_optional_fields_use_neutral_defaults() {
        // Only timestamp and temperature present: still a total function.
        let sparse = HourlySample::new(noon(), 15.0);
        let result = scorer().score(&sparse, "outdoor");
        assert_eq!(result.score, 100);
    }

    #[test]
    fn active_rain_penalty_meets_categorical_floor() {
        let mut sample = calm_sample();
        sample.precipitation_intensity_mm = Some(3.0);
        sample.condition = Some("Rain".into());
        let baseline = scorer().score(&calm_sample(), "outdoor").score;
        let result = scorer().score(&sample, "outdoor");

        let precip = &result.factors[&Factor::Precipitation];
        let floor = (f64::from(precip.max_points) * 0.6).round() as u8;
        assert!(
            precip.penalty_points >= floor,
            "active rain penalty {} below 60% of weight {}",
            precip.penalty_points,
            precip.max_points
        );
        assert!(baseline - result.score >= floor);
    }

    #[test]
    fn trace_rain_still_gets_categorical_minimum() {
        let mut sample = calm_sample();
        sample.precipitation_intensity_mm = Some(0.2);
        let result = scorer().score(&sample, "outdoor");
        let precip = &result.factors[&Factor::Precipitation];
        let floor = (f64::from(precip.max_points) * 0.6).round() as u8;
        assert!(precip.penalty_points >= floor);
    }

    #[test]
    fn compound_risk_fires_on_two_bad_factors() {
        let mut sample = calm_sample();
        sample.temperature_c = 0.0; // > 5C below the 10C comfort minimum
        sample.wind_speed_kmh = Some(40.0); // above the high-wind boundary
        let result = scorer().score(&sample, "outdoor");

        let temp_penalty = result.factors[&Factor::Temperature].penalty_points;
        let wind_penalty = result.factors[&Factor::Wind].penalty_points;
        let expected_without_compound =
            100 - i32::from(temp_penalty) - i32::from(wind_penalty);
        let expected = (expected_without_compound
            - i32::from(2 * compound_risk::PER_FACTOR_PENALTY))
        .clamp(0, 100) as u8;
        assert_eq!(result.score, expected);
    }

    #[test]
    fn single_bad_factor_does_not_compound() {
        let mut sample = calm_sample();
        sample.wind_speed_kmh = Some(40.0);
        let result = scorer().score(&sample, "outdoor");
        let wind_penalty = result.factors[&Factor::Wind].penalty_points;
        assert_eq!(result.score, 100 - wind_penalty);
    }

    #[test]
    fn score_is_deterministic() {
        let mut sample = calm_sample();
        sample.precipitation_probability = Some(55.0);
        sample.wind_speed_kmh = Some(28.0);
        let a = scorer().score(&sample, "cycling");
        let b = scorer().score(&sample, "cycling");
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_profile_scores_like_default() {
        let mut sample = calm_sample();
        sample.wind_speed_kmh = Some(30.0);
        let via_unknown = scorer().score(&sample, "parkour");
        let via_default = scorer().score(&sample, "outdoor");
        assert_eq!(via_unknown.score, via_default.score);
    }

    #[test]
    fn reasons_are_capped_and_ranked() {
        let mut sample = calm_sample();
        sample.temperature_c = -12.0;
        sample.precipitation_intensity_mm = Some(5.0);
        sample.wind_speed_kmh = Some(55.0);
        sample.uv_index = Some(10.0);
        sample.visibility_m = Some(300.0);
        let result = scorer().score(&sample, "outdoor");
        assert!(result.reasons.len() <= 4);
        assert!(!result.reasons.is_empty());
        // Heaviest factor leads: precipitation at full weight (30 points).
        assert!(result.reasons[0].contains("Precipitation"));
        assert_eq!(result.rating, Rating::NotRecommended);
    }

    #[test]
    fn tolerance_widens_or_narrows_nonzero_penalties() {
        let mut sample = calm_sample();
        sample.wind_speed_kmh = Some(30.0); // 0.3 fraction band
        let registry = ProfileRegistry::with_builtins().unwrap();

        // Cycling narrows wind tolerance (0.8) and carries a bigger weight.
        let outdoor = ConditionScorer::score_with_profile(&sample, registry.get("outdoor"));
        let cycling = ConditionScorer::score_with_profile(&sample, registry.get("cycling"));
        let outdoor_wind = &outdoor.factors[&Factor::Wind];
        let cycling_wind = &cycling.factors[&Factor::Wind];
        assert_eq!(outdoor_wind.penalty_points, 6); // 20 * 0.3
        assert_eq!(cycling_wind.penalty_points, 11); // 30 * (0.3 / 0.8) = 11.25 -> 11
    }

    #[test]
    fn aurora_profile_rewards_high_kp_clear_sky() {
        let mut sample = calm_sample();
        sample.kp_index = Some(7.5);
        sample.temperature_c = 2.0;
        let result = scorer().score(&sample, "aurora");
        assert!(result.score >= 90, "score {} too low", result.score);

        sample.kp_index = Some(1.0);
        let quiet = scorer().score(&sample, "aurora");
        assert!(quiet.score < result.score);
        assert_eq!(quiet.factors[&Factor::Geomagnetic].max_points, 45);
    }

    #[test]
    fn score_result_serializes_with_string_factor_keys() {
        let result = scorer().score(&calm_sample(), "outdoor");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json["factors"]["wind"]["max_points"].is_u64());
        assert_eq!(json["rating"], "excellent");
    }
}
