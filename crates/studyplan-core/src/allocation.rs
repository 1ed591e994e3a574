//! Weighted quota allocation.
//!
//! Splits a fixed item budget across weighted categories so that the integer
//! quotas always add up to the budget exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::{QuotaResult, WeightedCategory};

/// How rounding drift is settled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationMethod {
    /// Round every share but the last; the last category takes the remainder.
    ///
    /// Order dependent: callers should put the category least sensitive to
    /// rounding error last.
    #[default]
    LastRemainder,
    /// Hamilton apportionment: floor every share, then hand leftover units to
    /// the largest fractional remainders.
    LargestRemainder,
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationMethod::LastRemainder => write!(f, "last-remainder"),
            AllocationMethod::LargestRemainder => write!(f, "largest-remainder"),
        }
    }
}

impl FromStr for AllocationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-remainder" | "last" => Ok(AllocationMethod::LastRemainder),
            "largest-remainder" | "largest" | "hamilton" => Ok(AllocationMethod::LargestRemainder),
            other => Err(ConfigError::UnknownAllocationMethod(other.to_string())),
        }
    }
}

/// Allocate `total` items across `categories` with the last-remainder rule.
///
/// Categories are processed in the given order and never re-sorted. Entries
/// that end up with a zero count are dropped from the result.
pub fn allocate(categories: &[WeightedCategory], total: u32) -> Vec<QuotaResult> {
    allocate_with(categories, total, AllocationMethod::LastRemainder)
}

/// Allocate `total` items across `categories` with the chosen method.
pub fn allocate_with(
    categories: &[WeightedCategory],
    total: u32,
    method: AllocationMethod,
) -> Vec<QuotaResult> {
    categories
        .iter()
        .zip(allocate_counts(categories, total, method))
        .filter(|(_, count)| *count > 0)
        .map(|(category, count)| QuotaResult {
            name: category.name.clone(),
            count,
            weightage_percent: category.weightage_percent,
        })
        .collect()
}

/// Per-category counts, one per input category in input order.
///
/// Zero counts are kept so each count lines up with its category by
/// position. Empty input or a zero total yields all zeros.
pub fn allocate_counts(
    categories: &[WeightedCategory],
    total: u32,
    method: AllocationMethod,
) -> Vec<u32> {
    if categories.is_empty() || total == 0 {
        return vec![0; categories.len()];
    }

    let weight_sum: f64 = categories
        .iter()
        .map(|c| sanitize_weight(c.weightage_percent))
        .sum();
    if (weight_sum - 100.0).abs() > 0.5 {
        tracing::debug!(
            "category weights sum to {weight_sum:.1}%, drift absorbed by {method} allocation"
        );
    }

    match method {
        AllocationMethod::LastRemainder => last_remainder_counts(categories, total),
        AllocationMethod::LargestRemainder => largest_remainder_counts(categories, total),
    }
}

fn last_remainder_counts(categories: &[WeightedCategory], total: u32) -> Vec<u32> {
    let last = categories.len() - 1;
    let mut remaining = total;
    let mut counts = Vec::with_capacity(categories.len());

    for category in &categories[..last] {
        let share = (sanitize_weight(category.weightage_percent) / 100.0 * total as f64).round();
        // Never hand out more than is left, so the last count stays non-negative.
        let count = (share as u32).min(remaining);
        remaining -= count;
        counts.push(count);
    }
    counts.push(remaining);
    counts
}

fn largest_remainder_counts(categories: &[WeightedCategory], total: u32) -> Vec<u32> {
    let weights: Vec<f64> = categories
        .iter()
        .map(|c| sanitize_weight(c.weightage_percent))
        .collect();
    let weight_sum: f64 = weights.iter().sum();
    let weights = if weight_sum > 0.0 {
        weights
    } else {
        vec![1.0; categories.len()]
    };
    let weight_sum: f64 = weights.iter().sum();

    let exact: Vec<f64> = weights
        .iter()
        .map(|w| w / weight_sum * total as f64)
        .collect();
    let mut counts: Vec<u32> = exact.iter().map(|e| e.floor() as u32).collect();
    let floor_sum: u32 = counts.iter().sum();
    let leftover = total.saturating_sub(floor_sum) as usize;

    let mut by_remainder: Vec<usize> = (0..categories.len()).collect();
    // Stable sort keeps caller order among equal remainders.
    by_remainder.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });
    for &index in by_remainder.iter().cycle().take(leftover) {
        counts[index] += 1;
    }
    counts
}

fn sanitize_weight(weight: f64) -> f64 {
    if weight.is_finite() {
        weight.max(0.0)
    } else {
        0.0
    }
}
