// ABOUTME: Scoring factor identifiers and tagged penalty-curve tables
// ABOUTME: Threshold, Floor, Comfort, and Precipitation curve variants with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Scoring factors and penalty curves.
//!
//! Each factor owns one tagged penalty curve. A curve maps a raw metric value
//! to a penalty fraction in `[0, 1]`; the scorer multiplies the fraction by the
//! factor weight to get penalty points. Curves differ in which direction is
//! "bad":
//!
//! - [`PenaltyCurve::Threshold`]: higher values are worse (wind, UV,
//!   precipitation probability)
//! - [`PenaltyCurve::Floor`]: lower values are worse (visibility, Kp index
//!   for aurora viewing)
//! - [`PenaltyCurve::Comfort`]: distance outside an ideal range is worse
//!   (temperature)
//! - [`PenaltyCurve::Precipitation`]: probability table while dry, intensity
//!   table with a categorical minimum while actively precipitating

use serde::{Deserialize, Serialize};
use skywatch_core::constants::precipitation::ACTIVE_MIN_PENALTY_FRACTION;
use skywatch_core::errors::{AppError, AppResult};
use std::fmt;

/// One independently-weighted input dimension to a score.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// Air temperature (feels-like when available)
    Temperature,
    /// Precipitation probability and intensity
    Precipitation,
    /// Wind speed
    Wind,
    /// UV index
    UvExposure,
    /// Horizontal visibility
    Visibility,
    /// Planetary geomagnetic index (Kp)
    Geomagnetic,
}

impl Factor {
    /// Stable snake_case identifier, matching the serde representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Precipitation => "precipitation",
            Self::Wind => "wind",
            Self::UvExposure => "uv_exposure",
            Self::Visibility => "visibility",
            Self::Geomagnetic => "geomagnetic",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `{boundary, fraction}` entry in a penalty table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyStep {
    /// Threshold boundary in the factor's raw unit (or distance for comfort curves)
    pub boundary: f64,
    /// Penalty fraction applied when this step matches, in `[0, 1]`
    pub fraction: f64,
}

impl PenaltyStep {
    /// Create a step.
    #[must_use]
    pub const fn new(boundary: f64, fraction: f64) -> Self {
        Self { boundary, fraction }
    }
}

/// Tagged penalty table selected per factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum PenaltyCurve {
    /// Higher raw values are worse. Steps ascend by boundary; the first step
    /// whose boundary the value does not exceed supplies the fraction, and a
    /// value beyond every boundary takes the full penalty.
    Threshold {
        /// Ascending `{boundary, fraction}` table
        steps: Vec<PenaltyStep>,
    },
    /// Lower raw values are worse. Steps descend by boundary; the first step
    /// whose boundary the value still reaches supplies the fraction, and a
    /// value below every boundary takes the full penalty.
    Floor {
        /// Descending `{boundary, fraction}` table
        steps: Vec<PenaltyStep>,
    },
    /// Values inside `[ideal_min, ideal_max]` carry exactly zero penalty; the
    /// penalty outside grows as a step function of the distance from the range.
    Comfort {
        /// Lower edge of the zero-penalty range
        ideal_min: f64,
        /// Upper edge of the zero-penalty range
        ideal_max: f64,
        /// Ascending table keyed by distance outside the range
        steps: Vec<PenaltyStep>,
    },
    /// Probability-based while dry, intensity-based while actively
    /// precipitating. Active precipitation never scores below the categorical
    /// minimum fraction, however light the measured intensity.
    Precipitation {
        /// Ascending table over precipitation probability (percent)
        probability: Vec<PenaltyStep>,
        /// Ascending table over precipitation intensity (mm/h)
        intensity: Vec<PenaltyStep>,
    },
}

/// Scan an ascending table: first step the value does not exceed wins.
fn scan_ascending(steps: &[PenaltyStep], value: f64) -> f64 {
    for step in steps {
        if value <= step.boundary {
            return step.fraction;
        }
    }
    1.0
}

/// Scan a descending table: first step the value still reaches wins.
fn scan_descending(steps: &[PenaltyStep], value: f64) -> f64 {
    for step in steps {
        if value >= step.boundary {
            return step.fraction;
        }
    }
    1.0
}

impl PenaltyCurve {
    /// Penalty fraction for a raw value on this curve.
    ///
    /// For the `Precipitation` variant this evaluates the probability table;
    /// use [`Self::active_precipitation_fraction`] while precipitation is
    /// falling.
    #[must_use]
    pub fn penalty_fraction(&self, value: f64) -> f64 {
        match self {
            Self::Threshold { steps } => scan_ascending(steps, value),
            Self::Floor { steps } => scan_descending(steps, value),
            Self::Comfort {
                ideal_min,
                ideal_max,
                steps,
            } => {
                let distance = if value < *ideal_min {
                    ideal_min - value
                } else if value > *ideal_max {
                    value - ideal_max
                } else {
                    return 0.0;
                };
                scan_ascending(steps, distance)
            }
            Self::Precipitation { probability, .. } => scan_ascending(probability, value),
        }
    }

    /// Penalty fraction while precipitation is actively falling, from the
    /// intensity table, floored at the categorical minimum.
    ///
    /// Returns `None` for non-precipitation curves.
    #[must_use]
    pub fn active_precipitation_fraction(&self, intensity_mm: f64) -> Option<f64> {
        match self {
            Self::Precipitation { intensity, .. } => {
                Some(scan_ascending(intensity, intensity_mm).max(ACTIVE_MIN_PENALTY_FRACTION))
            }
            _ => None,
        }
    }

    /// The comfort range when this is a comfort curve.
    #[must_use]
    pub const fn comfort_range(&self) -> Option<(f64, f64)> {
        match self {
            Self::Comfort {
                ideal_min,
                ideal_max,
                ..
            } => Some((*ideal_min, *ideal_max)),
            _ => None,
        }
    }

    /// Validate table shape: fractions in `[0, 1]` and monotonically
    /// non-decreasing as boundaries are crossed in the "bad" direction.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` naming the offending factor when a table is
    /// empty of meaning, misordered, or non-monotonic.
    pub fn validate(&self, factor: Factor) -> AppResult<()> {
        match self {
            Self::Threshold { steps } => validate_table(factor, steps, TableOrder::Ascending),
            Self::Floor { steps } => validate_table(factor, steps, TableOrder::Descending),
            Self::Comfort {
                ideal_min,
                ideal_max,
                steps,
            } => {
                if ideal_min >= ideal_max {
                    return Err(AppError::config(format!(
                        "{factor}: comfort range [{ideal_min}, {ideal_max}] is empty"
                    )));
                }
                if steps.iter().any(|s| s.boundary <= 0.0) {
                    return Err(AppError::config(format!(
                        "{factor}: comfort distances must be positive"
                    )));
                }
                validate_table(factor, steps, TableOrder::Ascending)
            }
            Self::Precipitation {
                probability,
                intensity,
            } => {
                validate_table(factor, probability, TableOrder::Ascending)?;
                validate_table(factor, intensity, TableOrder::Ascending)
            }
        }
    }
}

/// Boundary ordering expected of a penalty table.
#[derive(Clone, Copy)]
enum TableOrder {
    Ascending,
    Descending,
}

fn validate_table(factor: Factor, steps: &[PenaltyStep], order: TableOrder) -> AppResult<()> {
    for step in steps {
        if !(0.0..=1.0).contains(&step.fraction) {
            return Err(AppError::config(format!(
                "{factor}: penalty fraction {} outside [0, 1]",
                step.fraction
            )));
        }
    }
    for pair in steps.windows(2) {
        let ordered = match order {
            TableOrder::Ascending => pair[0].boundary < pair[1].boundary,
            TableOrder::Descending => pair[0].boundary > pair[1].boundary,
        };
        if !ordered {
            return Err(AppError::config(format!(
                "{factor}: table boundaries out of order at {}",
                pair[1].boundary
            )));
        }
        // Later steps are further into "bad" territory; penalty must not shrink.
        if pair[1].fraction < pair[0].fraction {
            return Err(AppError::config(format!(
                "{factor}: penalty fraction decreases at boundary {}",
                pair[1].boundary
            )));
        }
    }
    Ok(())
}

/// One scoring dimension: a factor, its weight in points out of 100, and the
/// penalty curve that maps raw values to penalty fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorWeight {
    /// Which factor this weight applies to
    pub factor: Factor,
    /// Maximum points this factor can remove from the score
    pub weight: u8,
    /// Penalty table for the factor
    pub curve: PenaltyCurve,
}

impl FactorWeight {
    /// Create a weighted factor.
    #[must_use]
    pub const fn new(factor: Factor, weight: u8, curve: PenaltyCurve) -> Self {
        Self {
            factor,
            weight,
            curve,
        }
    }

    /// Validate the weight and curve.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when the weight exceeds 100 or the curve
    /// fails [`PenaltyCurve::validate`].
    pub fn validate(&self) -> AppResult<()> {
        if self.weight > 100 {
            return Err(AppError::config(format!(
                "{}: weight {} exceeds 100",
                self.factor, self.weight
            )));
        }
        self.curve.validate(self.factor)
    }
}
