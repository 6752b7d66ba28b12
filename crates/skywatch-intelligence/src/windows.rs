// ABOUTME: Sliding-window detection turning hourly scores into best time ranges
// ABOUTME: Single-pass accumulator; stable peak-score ordering; duration filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Skywatch Labs

//! Window detection.
//!
//! A window is a maximal contiguous run of hourly samples whose score stays at
//! or above a caller-supplied minimum. Detection is a single left-to-right
//! pass with an open-window accumulator: linear time, streaming-compatible,
//! never buffering the sequence twice.
//!
//! The detector depends on the scorer's output shape ([`ScoredHour`]) but not
//! on the scorer itself; any per-hour score source works.

use crate::scoring::ConditionScorer;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use skywatch_core::models::HourlySample;

/// Spacing between consecutive forecast samples, minutes.
const HOURLY_SPACING_MINUTES: i64 = 60;

/// One hour's score, the input shape for window detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredHour {
    /// Hour the score describes
    pub timestamp: DateTime<Utc>,
    /// Score for that hour, 0-100
    pub score: u8,
}

/// Caller-supplied window detection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowOptions {
    /// Minimum per-hour score for an hour to extend a window
    pub min_score: u8,
    /// Windows shorter than this are discarded, minutes
    pub min_duration_minutes: i64,
    /// At most this many windows are returned
    pub max_windows: usize,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            min_score: 65,
            min_duration_minutes: 120,
            max_windows: 3,
        }
    }
}

/// A contiguous span of hours clearing the score bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    /// First hour in the window
    pub start: DateTime<Utc>,
    /// End of the window (exclusive: last hour plus the hourly spacing)
    pub end: DateTime<Utc>,
    /// Always `sample_count x hourly spacing`
    pub duration_minutes: i64,
    /// Highest hourly score inside the window
    pub peak_score: u8,
    /// Mean hourly score inside the window
    pub average_score: f64,
    /// Hour of the first occurrence of the peak score
    pub best_hour: DateTime<Utc>,
}

/// Open-window accumulator state for the single pass.
struct OpenWindow {
    start: DateTime<Utc>,
    last: DateTime<Utc>,
    best_hour: DateTime<Utc>,
    peak: u8,
    sum: u32,
    count: u32,
}

impl OpenWindow {
    fn begin(hour: &ScoredHour) -> Self {
        Self {
            start: hour.timestamp,
            last: hour.timestamp,
            best_hour: hour.timestamp,
            peak: hour.score,
            sum: u32::from(hour.score),
            count: 1,
        }
    }

    fn extend(&mut self, hour: &ScoredHour) {
        self.last = hour.timestamp;
        self.sum += u32::from(hour.score);
        self.count += 1;
        // Strictly-greater keeps the earliest peak hour on ties.
        if hour.score > self.peak {
            self.peak = hour.score;
            self.best_hour = hour.timestamp;
        }
    }

    fn finalize(self) -> Window {
        let duration_minutes = i64::from(self.count) * HOURLY_SPACING_MINUTES;
        Window {
            start: self.start,
            end: self.last + Duration::minutes(HOURLY_SPACING_MINUTES),
            duration_minutes,
            peak_score: self.peak,
            average_score: f64::from(self.sum) / f64::from(self.count),
            best_hour: self.best_hour,
        }
    }
}

/// Detect windows over pre-scored hours.
///
/// Returns windows ordered descending by peak score; ties preserve encounter
/// order, so the soonest equally-good opportunity comes first. The list is
/// truncated to `max_windows`.
#[must_use]
pub fn detect_windows(hours: &[ScoredHour], options: &WindowOptions) -> Vec<Window> {
    let mut windows = Vec::new();
    let mut open: Option<OpenWindow> = None;

    for hour in hours {
        if hour.score >= options.min_score {
            match open.as_mut() {
                Some(window) => window.extend(hour),
                None => open = Some(OpenWindow::begin(hour)),
            }
        } else if let Some(window) = open.take() {
            push_if_long_enough(&mut windows, window, options);
        }
    }
    // A window may legitimately run off the end of the forecast.
    if let Some(window) = open.take() {
        push_if_long_enough(&mut windows, window, options);
    }

    // Stable sort: equal peaks keep encounter order.
    windows.sort_by(|a, b| b.peak_score.cmp(&a.peak_score));
    windows.truncate(options.max_windows);
    windows
}

fn push_if_long_enough(windows: &mut Vec<Window>, open: OpenWindow, options: &WindowOptions) {
    let window = open.finalize();
    if window.duration_minutes >= options.min_duration_minutes {
        windows.push(window);
    }
}

impl ConditionScorer {
    /// Score a forecast and reduce it to notable windows in one pass.
    #[must_use]
    pub fn find_windows(
        &self,
        samples: &[HourlySample],
        profile_name: &str,
        options: &WindowOptions,
    ) -> Vec<Window> {
        let profile = self.registry().get(profile_name);
        let scored: Vec<ScoredHour> = samples
            .iter()
            .map(|sample| ScoredHour {
                timestamp: sample.timestamp,
                score: Self::score_with_profile(sample, profile).score,
            })
            .collect();
        detect_windows(&scored, options)
    }
}
