//! Tunable heuristic constants and CLI defaults.
//!
//! The hour lookup table, the assumed-current-level fallback and the effort
//! ratio thresholds are unvalidated heuristics, so they live here rather than
//! in the estimator. Defaults reproduce the stock rule set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::allocation::AllocationMethod;
use crate::error::ConfigError;

/// One step of the level → study-hours lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourStep {
    /// Levels at or above this percentage use `hours`.
    pub min_percent: f64,
    /// Total study hours associated with the level.
    pub hours: f64,
}

/// Constants driving the strategy estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Steps ordered from the highest threshold down.
    #[serde(default = "default_hour_steps")]
    pub hour_steps: Vec<HourStep>,
    /// Hours for levels below every step.
    #[serde(default = "default_base_hours")]
    pub base_hours: f64,
    /// Points below target assumed when no current level is known.
    #[serde(default = "default_fallback_offset")]
    pub fallback_offset: f64,
    #[serde(default = "default_fallback_min")]
    pub fallback_min: f64,
    #[serde(default = "default_fallback_max")]
    pub fallback_max: f64,
    /// Required effort never drops below this fraction of the target hours.
    #[serde(default = "default_effort_floor_fraction")]
    pub effort_floor_fraction: f64,
    /// Ratio at or above which effort is `high`.
    #[serde(default = "default_high_ratio")]
    pub high_ratio: f64,
    /// Ratio at or above which effort is `ok`.
    #[serde(default = "default_ok_ratio")]
    pub ok_ratio: f64,
    /// Ratio below which the severe band applies.
    #[serde(default = "default_severe_ratio")]
    pub severe_ratio: f64,
}

fn default_hour_steps() -> Vec<HourStep> {
    vec![
        HourStep {
            min_percent: 90.0,
            hours: 240.0,
        },
        HourStep {
            min_percent: 80.0,
            hours: 180.0,
        },
        HourStep {
            min_percent: 70.0,
            hours: 130.0,
        },
        HourStep {
            min_percent: 60.0,
            hours: 90.0,
        },
    ]
}
fn default_base_hours() -> f64 {
    70.0
}
fn default_fallback_offset() -> f64 {
    10.0
}
fn default_fallback_min() -> f64 {
    50.0
}
fn default_fallback_max() -> f64 {
    70.0
}
fn default_effort_floor_fraction() -> f64 {
    0.4
}
fn default_high_ratio() -> f64 {
    1.1
}
fn default_ok_ratio() -> f64 {
    0.8
}
fn default_severe_ratio() -> f64 {
    0.5
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            hour_steps: default_hour_steps(),
            base_hours: default_base_hours(),
            fallback_offset: default_fallback_offset(),
            fallback_min: default_fallback_min(),
            fallback_max: default_fallback_max(),
            effort_floor_fraction: default_effort_floor_fraction(),
            high_ratio: default_high_ratio(),
            ok_ratio: default_ok_ratio(),
            severe_ratio: default_severe_ratio(),
        }
    }
}

impl StrategyConfig {
    /// Check that the table and thresholds are internally consistent.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hour_steps.is_empty() {
            return Err(ConfigError::EmptyHourSteps);
        }
        for (index, pair) in self.hour_steps.windows(2).enumerate() {
            if pair[1].min_percent >= pair[0].min_percent {
                return Err(ConfigError::UnorderedHourSteps { index: index + 1 });
            }
        }
        let all_hours = self
            .hour_steps
            .iter()
            .map(|s| s.hours)
            .chain(std::iter::once(self.base_hours));
        for hours in all_hours {
            if !(hours > 0.0) {
                return Err(ConfigError::NonPositiveHours(hours));
            }
        }
        if self.fallback_min > self.fallback_max {
            return Err(ConfigError::InvertedFallbackRange {
                min: self.fallback_min,
                max: self.fallback_max,
            });
        }
        if !(self.effort_floor_fraction > 0.0 && self.effort_floor_fraction <= 1.0) {
            return Err(ConfigError::EffortFloorOutOfRange(
                self.effort_floor_fraction,
            ));
        }
        if !(self.severe_ratio < self.ok_ratio && self.ok_ratio < self.high_ratio) {
            return Err(ConfigError::UnorderedRatios {
                severe: self.severe_ratio,
                ok: self.ok_ratio,
                high: self.high_ratio,
            });
        }
        Ok(())
    }
}

/// Defaults for topic-mix planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationConfig {
    #[serde(default)]
    pub method: AllocationMethod,
    /// Questions in a mock test when no total is given.
    #[serde(default = "default_total")]
    pub default_total: u32,
}

fn default_total() -> u32 {
    30
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            method: AllocationMethod::default(),
            default_total: default_total(),
        }
    }
}

/// Sampler settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Fixed seed for reproducible draws; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Top-level studyplan configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyplanConfig {
    #[serde(default)]
    pub strategy: StrategyConfig,
    #[serde(default)]
    pub allocation: AllocationConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studyplan.toml` in the current directory
/// 2. `~/.config/studyplan/config.toml`
///
/// Environment variable overrides: `STUDYPLAN_SEED`, `STUDYPLAN_ALLOCATION_METHOD`.
pub fn load_config() -> Result<StudyplanConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudyplanConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studyplan.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => StudyplanConfig::default(),
    };

    if let Ok(seed) = std::env::var("STUDYPLAN_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("STUDYPLAN_SEED is not a valid u64: {seed}"))?;
        config.sampler.seed = Some(seed);
    }

    if let Ok(method) = std::env::var("STUDYPLAN_ALLOCATION_METHOD") {
        config.allocation.method = method.parse()?;
    }

    Ok(config)
}

/// Parse and validate a config document.
pub fn parse_config_str(content: &str) -> Result<StudyplanConfig> {
    let config: StudyplanConfig = toml::from_str(content)?;
    config.strategy.validate()?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("studyplan"))
}
