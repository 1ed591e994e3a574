//! Study strategy estimator.
//!
//! Turns a [`StudentProfile`] into a realistic score band, the daily hours the
//! plan actually needs and an effort verdict. The rule set is a coarse stepped
//! heuristic; every constant comes from [`StrategyConfig`].

use crate::config::StrategyConfig;
use crate::model::{EffortBand, StrategyExplanation, StrategyResult, StudentProfile};

/// Shortest horizon the estimator plans for, in days.
pub const MIN_DAYS_LEFT: i64 = 1;
/// Smallest daily study time the estimator plans for, in hours.
pub const MIN_HOURS_PER_DAY: f64 = 0.5;

/// Clamp range for the comfortable and on-track bands.
const BAND_FLOOR: f64 = 50.0;
const BAND_CEILING: f64 = 95.0;

/// Final clamp range for the realistic band.
const RESULT_MIN_FLOOR: i32 = 30;
const RESULT_MIN_CEILING: i32 = 95;
const RESULT_MAX_CEILING: i32 = 98;

/// Estimate a profile with the default rule set.
pub fn estimate(profile: &StudentProfile) -> StrategyResult {
    explain(profile, &StrategyConfig::default()).result
}

/// Estimate a profile with a custom rule set.
pub fn estimate_with(profile: &StudentProfile, config: &StrategyConfig) -> StrategyResult {
    explain(profile, config).result
}

/// Estimate a profile and keep the intermediate figures.
pub fn explain(profile: &StudentProfile, config: &StrategyConfig) -> StrategyExplanation {
    let days = profile.days_left.max(MIN_DAYS_LEFT);
    if days != profile.days_left {
        tracing::debug!("days_left {} clamped to {days}", profile.days_left);
    }
    let hours_per_day = if profile.hours_per_day.is_finite() {
        profile.hours_per_day.max(MIN_HOURS_PER_DAY)
    } else {
        MIN_HOURS_PER_DAY
    };
    let target = clamp_percent(profile.target_percent);

    let supplied = profile
        .current_percent
        .filter(|c| c.is_finite())
        .map(clamp_percent);
    let current = supplied.unwrap_or_else(|| assumed_current_level(target, config));

    let target_hours = study_hours_for(target, config);
    let current_hours = credited_hours_for(current, config);
    let required_hours =
        (target_hours - current_hours).max(config.effort_floor_fraction * target_hours);

    let available_hours = days as f64 * hours_per_day;
    let effort_ratio = available_hours / required_hours;

    let band = classify(effort_ratio, config);
    let (raw_min, raw_max) = raw_band(band, target, effort_ratio);
    let (realistic_min, realistic_max) = final_clamp(raw_min, raw_max);

    let result = StrategyResult {
        realistic_min,
        realistic_max,
        hours_per_day_required: round_to_tenth(required_hours / days as f64),
        effort_status: band.status(),
    };

    tracing::debug!(
        "estimate: target {target} current {current} ratio {effort_ratio:.2} -> {} [{realistic_min}, {realistic_max}]",
        result.effort_status
    );

    StrategyExplanation {
        result,
        assumed_current_percent: current,
        current_supplied: supplied.is_some(),
        target_hours,
        current_hours,
        required_hours,
        available_hours,
        effort_ratio,
        band,
    }
}

/// Total study hours associated with reaching `level` percent.
///
/// A step function over `config.hour_steps`; levels below every step map to
/// `config.base_hours`.
pub fn study_hours_for(level: f64, config: &StrategyConfig) -> f64 {
    config
        .hour_steps
        .iter()
        .find(|step| level >= step.min_percent)
        .map(|step| step.hours)
        .unwrap_or(config.base_hours)
}

/// Study hours already credited to a student at `level` percent.
///
/// Same table as [`study_hours_for`], but a level only earns a step's hours
/// once it is strictly above the step threshold.
pub fn credited_hours_for(level: f64, config: &StrategyConfig) -> f64 {
    config
        .hour_steps
        .iter()
        .find(|step| level > step.min_percent)
        .map(|step| step.hours)
        .unwrap_or(config.base_hours)
}

/// Current level assumed when the profile has none: a fixed offset below the
/// target, kept inside the fallback range.
pub fn assumed_current_level(target: f64, config: &StrategyConfig) -> f64 {
    (target - config.fallback_offset)
        .min(config.fallback_max)
        .max(config.fallback_min)
}

fn classify(ratio: f64, config: &StrategyConfig) -> EffortBand {
    if ratio >= config.high_ratio {
        EffortBand::Comfortable
    } else if ratio >= config.ok_ratio {
        EffortBand::OnTrack
    } else if ratio >= config.severe_ratio {
        EffortBand::Stretched
    } else {
        EffortBand::Severe
    }
}

fn raw_band(band: EffortBand, target: f64, ratio: f64) -> (f64, f64) {
    match band {
        EffortBand::Comfortable => (
            (target - 2.0).clamp(BAND_FLOOR, BAND_CEILING),
            (target + 8.0).clamp(BAND_FLOOR, BAND_CEILING),
        ),
        EffortBand::OnTrack => (
            (target - 5.0).clamp(BAND_FLOOR, BAND_CEILING),
            (target + 3.0).clamp(BAND_FLOOR, BAND_CEILING),
        ),
        EffortBand::Stretched => {
            let drop = ((1.0 - ratio) * 20.0).round();
            let max = target - drop;
            (max - 8.0, max)
        }
        EffortBand::Severe => {
            let max = (target - 20.0).max(40.0);
            ((max - 10.0).max(30.0), max)
        }
    }
}

// min is clamped first so that max always has room above it.
fn final_clamp(raw_min: f64, raw_max: f64) -> (i32, i32) {
    let min = (raw_min.round() as i32).clamp(RESULT_MIN_FLOOR, RESULT_MIN_CEILING);
    let max = (raw_max.round() as i32).clamp(min + 1, RESULT_MAX_CEILING);
    (min, max)
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
