// ABOUTME: Named condition profiles customizing comfort ranges and tolerances
// ABOUTME: ProfileRegistry validates tables at construction and guarantees a default
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Condition profiles.
//!
//! A profile is an immutable named parameter set for one activity or
//! phenomenon: its factor weights, penalty tables, and per-factor tolerance
//! multipliers. Profiles are defined at configuration time and looked up by
//! name; an unrecognized name falls back to the default profile so callers are
//! never blocked by an unknown activity string.

use super::factors::{Factor, FactorWeight, PenaltyCurve, PenaltyStep};
use serde::{Deserialize, Serialize};
use skywatch_core::errors::{AppError, AppResult};
use std::collections::HashMap;

/// Named parameter set for one activity or phenomenon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionProfile {
    /// Profile name, matched case-insensitively on lookup
    pub name: String,
    /// Weighted factors with their penalty tables
    pub factors: Vec<FactorWeight>,
    /// Per-factor tolerance multipliers. Values above 1 widen effective
    /// tolerance (lower penalties); below 1 narrow it. Missing factors use 1.
    pub tolerance: HashMap<Factor, f64>,
}

impl ConditionProfile {
    /// Tolerance multiplier for a factor, defaulting to 1.
    #[must_use]
    pub fn tolerance_for(&self, factor: Factor) -> f64 {
        self.tolerance.get(&factor).copied().unwrap_or(1.0)
    }

    /// Sum of all factor weights. At most 100; any remainder is an implicit
    /// baseline that cannot be penalized away.
    #[must_use]
    pub fn weight_total(&self) -> u32 {
        self.factors.iter().map(|f| u32::from(f.weight)).sum()
    }

    /// The temperature comfort range, when this profile scores temperature.
    #[must_use]
    pub fn comfort_range(&self) -> Option<(f64, f64)> {
        self.factors
            .iter()
            .find(|f| f.factor == Factor::Temperature)
            .and_then(|f| f.curve.comfort_range())
    }

    /// Validate the profile: every curve well-formed, weights summing to at
    /// most 100, no duplicate factors, positive tolerances.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` describing the first violation found.
    pub fn validate(&self) -> AppResult<()> {
        for fw in &self.factors {
            fw.validate()?;
        }
        let total = self.weight_total();
        if total > 100 {
            return Err(AppError::config(format!(
                "profile '{}': factor weights sum to {total}, exceeding 100",
                self.name
            )));
        }
        let mut seen = Vec::with_capacity(self.factors.len());
        for fw in &self.factors {
            if seen.contains(&fw.factor) {
                return Err(AppError::config(format!(
                    "profile '{}': duplicate factor {}",
                    self.name, fw.factor
                )));
            }
            seen.push(fw.factor);
        }
        for (factor, multiplier) in &self.tolerance {
            if *multiplier <= 0.0 {
                return Err(AppError::config(format!(
                    "profile '{}': tolerance for {factor} must be positive",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

fn precipitation_curve() -> PenaltyCurve {
    PenaltyCurve::Precipitation {
        probability: vec![
            PenaltyStep::new(20.0, 0.0),
            PenaltyStep::new(40.0, 0.25),
            PenaltyStep::new(60.0, 0.5),
            PenaltyStep::new(80.0, 0.75),
        ],
        intensity: vec![
            PenaltyStep::new(0.5, 0.6),
            PenaltyStep::new(2.5, 0.75),
            PenaltyStep::new(7.5, 0.9),
        ],
    }
}

fn wind_curve() -> PenaltyCurve {
    PenaltyCurve::Threshold {
        steps: vec![
            PenaltyStep::new(15.0, 0.0),
            PenaltyStep::new(25.0, 0.3),
            PenaltyStep::new(35.0, 0.6),
            PenaltyStep::new(50.0, 0.85),
        ],
    }
}

fn uv_curve() -> PenaltyCurve {
    PenaltyCurve::Threshold {
        steps: vec![
            PenaltyStep::new(5.0, 0.0),
            PenaltyStep::new(7.0, 0.25),
            PenaltyStep::new(9.0, 0.5),
            PenaltyStep::new(11.0, 0.75),
        ],
    }
}

fn visibility_curve() -> PenaltyCurve {
    PenaltyCurve::Floor {
        steps: vec![
            PenaltyStep::new(5000.0, 0.0),
            PenaltyStep::new(2000.0, 0.3),
            PenaltyStep::new(1000.0, 0.6),
            PenaltyStep::new(200.0, 0.85),
        ],
    }
}

fn night_sky_visibility_curve() -> PenaltyCurve {
    PenaltyCurve::Floor {
        steps: vec![
            PenaltyStep::new(8000.0, 0.0),
            PenaltyStep::new(4000.0, 0.25),
            PenaltyStep::new(2000.0, 0.5),
            PenaltyStep::new(500.0, 0.8),
        ],
    }
}

fn temperature_curve(ideal_min: f64, ideal_max: f64) -> PenaltyCurve {
    PenaltyCurve::Comfort {
        ideal_min,
        ideal_max,
        steps: vec![
            PenaltyStep::new(2.0, 0.15),
            PenaltyStep::new(4.0, 0.3),
            PenaltyStep::new(8.0, 0.55),
            PenaltyStep::new(15.0, 0.8),
        ],
    }
}

impl ConditionProfile {
    /// General outdoor activity; the registry default.
    #[must_use]
    pub fn outdoor() -> Self {
        Self {
            name: "outdoor".into(),
            factors: vec![
                FactorWeight::new(Factor::Temperature, 25, temperature_curve(10.0, 24.0)),
                FactorWeight::new(Factor::Precipitation, 30, precipitation_curve()),
                FactorWeight::new(Factor::Wind, 20, wind_curve()),
                FactorWeight::new(Factor::UvExposure, 10, uv_curve()),
                FactorWeight::new(Factor::Visibility, 15, visibility_curve()),
            ],
            tolerance: HashMap::new(),
        }
    }

    /// Hiking: slightly cooler comfort range, UV matters more on exposed
    /// trails, and hikers dress for temperature.
    #[must_use]
    pub fn hiking() -> Self {
        Self {
            name: "hiking".into(),
            factors: vec![
                FactorWeight::new(Factor::Temperature, 25, temperature_curve(8.0, 22.0)),
                FactorWeight::new(Factor::Precipitation, 30, precipitation_curve()),
                FactorWeight::new(Factor::Wind, 20, wind_curve()),
                FactorWeight::new(Factor::UvExposure, 15, uv_curve()),
                FactorWeight::new(Factor::Visibility, 10, visibility_curve()),
            ],
            tolerance: HashMap::from([(Factor::Temperature, 1.2)]),
        }
    }

    /// Cycling: wind-dominated, narrow wind tolerance.
    #[must_use]
    pub fn cycling() -> Self {
        Self {
            name: "cycling".into(),
            factors: vec![
                FactorWeight::new(Factor::Temperature, 20, temperature_curve(12.0, 26.0)),
                FactorWeight::new(Factor::Precipitation, 30, precipitation_curve()),
                FactorWeight::new(Factor::Wind, 30, wind_curve()),
                FactorWeight::new(Factor::UvExposure, 10, uv_curve()),
                FactorWeight::new(Factor::Visibility, 10, visibility_curve()),
            ],
            tolerance: HashMap::from([(Factor::Wind, 0.8)]),
        }
    }

    /// Open-water and lido swimming: warm comfort range, sunburn-sensitive.
    #[must_use]
    pub fn swimming() -> Self {
        Self {
            name: "swimming".into(),
            factors: vec![
                FactorWeight::new(
                    Factor::Temperature,
                    30,
                    PenaltyCurve::Comfort {
                        ideal_min: 22.0,
                        ideal_max: 32.0,
                        steps: vec![
                            PenaltyStep::new(2.0, 0.2),
                            PenaltyStep::new(4.0, 0.4),
                            PenaltyStep::new(8.0, 0.7),
                            PenaltyStep::new(12.0, 0.9),
                        ],
                    },
                ),
                FactorWeight::new(Factor::Precipitation, 25, precipitation_curve()),
                FactorWeight::new(Factor::Wind, 20, wind_curve()),
                FactorWeight::new(Factor::UvExposure, 20, uv_curve()),
                FactorWeight::new(Factor::Visibility, 5, visibility_curve()),
            ],
            tolerance: HashMap::from([(Factor::UvExposure, 0.8)]),
        }
    }

    /// Stargazing: sky clarity dominates; temperature is a comfort note only.
    /// Weights deliberately sum below 100, leaving an implicit baseline.
    #[must_use]
    pub fn stargazing() -> Self {
        Self {
            name: "stargazing".into(),
            factors: vec![
                FactorWeight::new(Factor::Visibility, 35, night_sky_visibility_curve()),
                FactorWeight::new(Factor::Precipitation, 30, precipitation_curve()),
                FactorWeight::new(Factor::Temperature, 15, temperature_curve(0.0, 25.0)),
                FactorWeight::new(Factor::Wind, 10, wind_curve()),
            ],
            tolerance: HashMap::from([(Factor::Temperature, 1.5)]),
        }
    }

    /// Aurora viewing: geomagnetic activity drives everything, then sky
    /// clarity. Low Kp is the "bad" direction.
    #[must_use]
    pub fn aurora() -> Self {
        Self {
            name: "aurora".into(),
            factors: vec![
                FactorWeight::new(
                    Factor::Geomagnetic,
                    45,
                    PenaltyCurve::Floor {
                        steps: vec![
                            PenaltyStep::new(7.0, 0.0),
                            PenaltyStep::new(5.0, 0.15),
                            PenaltyStep::new(4.0, 0.4),
                            PenaltyStep::new(3.0, 0.7),
                            PenaltyStep::new(2.0, 0.9),
                        ],
                    },
                ),
                FactorWeight::new(Factor::Visibility, 30, night_sky_visibility_curve()),
                FactorWeight::new(Factor::Precipitation, 15, precipitation_curve()),
                FactorWeight::new(Factor::Temperature, 10, temperature_curve(-10.0, 15.0)),
            ],
            tolerance: HashMap::from([(Factor::Temperature, 1.5)]),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Profile lookup with a guaranteed default fallback.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    default_profile: ConditionProfile,
    profiles: HashMap<String, ConditionProfile>,
}

impl ProfileRegistry {
    /// Build the registry with the built-in profiles, validating every table.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if any built-in profile fails validation;
    /// this indicates a programming error in the built-in tables.
    pub fn with_builtins() -> AppResult<Self> {
        let default_profile = ConditionProfile::outdoor();
        default_profile.validate()?;

        let mut registry = Self {
            default_profile,
            profiles: HashMap::new(),
        };
        for profile in [
            ConditionProfile::outdoor(),
            ConditionProfile::hiking(),
            ConditionProfile::cycling(),
            ConditionProfile::swimming(),
            ConditionProfile::stargazing(),
            ConditionProfile::aurora(),
        ] {
            registry.insert(profile)?;
        }
        Ok(registry)
    }

    /// Add or replace a profile after validating it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the profile fails validation.
    pub fn insert(&mut self, profile: ConditionProfile) -> AppResult<()> {
        profile.validate()?;
        self.profiles.insert(profile.name.to_lowercase(), profile);
        Ok(())
    }

    /// Look up a profile by name, case-insensitively. Unknown names fall back
    /// to the default profile rather than failing.
    #[must_use]
    pub fn get(&self, name: &str) -> &ConditionProfile {
        match self.profiles.get(&name.to_lowercase()) {
            Some(profile) => profile,
            None => {
                tracing::debug!(profile = name, "unknown profile, using default");
                &self.default_profile
            }
        }
    }

    /// The default profile used for unknown names.
    #[must_use]
    pub const fn default_profile(&self) -> &ConditionProfile {
        &self.default_profile
    }

    /// Registered profile names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_all_validate() {
        let registry = ProfileRegistry::with_builtins().unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "aurora",
                "cycling",
                "hiking",
                "outdoor",
                "stargazing",
                "swimming"
            ]
        );
    }

    #[test]
    fn builtin_weights_never_exceed_100() {
        for profile in [
            ConditionProfile::outdoor(),
            ConditionProfile::hiking(),
            ConditionProfile::cycling(),
            ConditionProfile::swimming(),
            ConditionProfile::stargazing(),
            ConditionProfile::aurora(),
        ] {
            assert!(
                profile.weight_total() <= 100,
                "profile '{}' weights sum to {}",
                profile.name,
                profile.weight_total()
            );
        }
    }

    #[test]
    fn stargazing_leaves_implicit_baseline() {
        assert!(ConditionProfile::stargazing().weight_total() < 100);
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        let registry = ProfileRegistry::with_builtins().unwrap();
        assert_eq!(registry.get("base-jumping").name, "outdoor");
        assert_eq!(registry.get("HIKING").name, "hiking");
    }

    #[test]
    fn registry_rejects_overweight_profile() {
        let mut registry = ProfileRegistry::with_builtins().unwrap();
        let mut profile = ConditionProfile::outdoor();
        profile.name = "heavy".into();
        profile.factors.push(FactorWeight::new(
            Factor::Geomagnetic,
            50,
            PenaltyCurve::Floor {
                steps: vec![PenaltyStep::new(5.0, 0.0)],
            },
        ));
        assert!(registry.insert(profile).is_err());
    }

    #[test]
    fn registry_rejects_duplicate_factor() {
        let mut registry = ProfileRegistry::with_builtins().unwrap();
        let mut profile = ConditionProfile::stargazing();
        profile.name = "dup".into();
        profile
            .factors
            .push(FactorWeight::new(Factor::Wind, 5, wind_curve()));
        assert!(registry.insert(profile).is_err());
    }

    #[test]
    fn registry_rejects_non_positive_tolerance() {
        let mut registry = ProfileRegistry::with_builtins().unwrap();
        let mut profile = ConditionProfile::outdoor();
        profile.name = "zero-tol".into();
        profile.tolerance.insert(Factor::Wind, 0.0);
        assert!(registry.insert(profile).is_err());
    }

    #[test]
    fn comfort_range_reads_temperature_curve() {
        let (min, max) = ConditionProfile::outdoor().comfort_range().unwrap();
        assert!((min - 10.0).abs() < f64::EPSILON);
        assert!((max - 24.0).abs() < f64::EPSILON);
    }
}
