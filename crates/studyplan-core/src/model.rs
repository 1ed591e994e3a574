//! Core data model types for studyplan.
//!
//! These are the transient value types the estimator, allocator and sampler
//! exchange with their callers: student profiles, strategy results, weighted
//! categories, quotas and the questions a bank is made of.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A student's situation as collected by the onboarding form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    /// Days remaining until the exam.
    pub days_left: i64,
    /// Score the student is aiming for, in percent.
    pub target_percent: f64,
    /// Hours the student can study each day.
    pub hours_per_day: f64,
    /// Recent performance average, in percent.
    #[serde(default)]
    pub current_percent: Option<f64>,
}

impl StudentProfile {
    pub fn new(days_left: i64, target_percent: f64, hours_per_day: f64) -> Self {
        Self {
            days_left,
            target_percent,
            hours_per_day,
            current_percent: None,
        }
    }

    /// Set the recent performance average.
    pub fn with_current_percent(mut self, current_percent: f64) -> Self {
        self.current_percent = Some(current_percent);
        self
    }

    /// Derive the current level from a list of recent test scores.
    ///
    /// An empty list leaves the current level unset.
    pub fn with_recent_scores(mut self, scores: &[f64]) -> Self {
        self.current_percent = average_percent(scores);
        self
    }
}

/// Mean of the finite scores in `scores`, or `None` when there are none.
pub fn average_percent(scores: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = scores.iter().copied().filter(|s| s.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite.iter().sum::<f64>() / finite.len() as f64)
}

/// Qualitative verdict on whether the available time covers the work needed.
///
/// Ordered `Low < Ok < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortStatus {
    Low,
    Ok,
    High,
}

impl fmt::Display for EffortStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffortStatus::Low => write!(f, "low"),
            EffortStatus::Ok => write!(f, "ok"),
            EffortStatus::High => write!(f, "high"),
        }
    }
}

/// The effort-ratio band a profile landed in.
///
/// `Stretched` and `Severe` both report [`EffortStatus::Low`] but derive the
/// score band differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortBand {
    Comfortable,
    OnTrack,
    Stretched,
    Severe,
}

impl EffortBand {
    pub fn status(self) -> EffortStatus {
        match self {
            EffortBand::Comfortable => EffortStatus::High,
            EffortBand::OnTrack => EffortStatus::Ok,
            EffortBand::Stretched | EffortBand::Severe => EffortStatus::Low,
        }
    }
}

impl fmt::Display for EffortBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffortBand::Comfortable => write!(f, "comfortable"),
            EffortBand::OnTrack => write!(f, "on track"),
            EffortBand::Stretched => write!(f, "stretched"),
            EffortBand::Severe => write!(f, "severe"),
        }
    }
}

/// Realistic outcome for a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    /// Lower end of the realistic score band.
    pub realistic_min: i32,
    /// Upper end of the realistic score band; always above `realistic_min`.
    pub realistic_max: i32,
    /// Daily hours needed to cover the required effort, one decimal place.
    pub hours_per_day_required: f64,
    pub effort_status: EffortStatus,
}

/// A [`StrategyResult`] together with the figures it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyExplanation {
    pub result: StrategyResult,
    /// Current level used for the baseline (supplied or assumed).
    pub assumed_current_percent: f64,
    /// Whether `assumed_current_percent` came from the profile.
    pub current_supplied: bool,
    /// Study hours associated with the target level.
    pub target_hours: f64,
    /// Study hours associated with the current level.
    pub current_hours: f64,
    /// Additional hours the student still needs.
    pub required_hours: f64,
    /// Hours the student can put in before the exam.
    pub available_hours: f64,
    /// `available_hours / required_hours`.
    pub effort_ratio: f64,
    pub band: EffortBand,
}

/// A category (exam topic) with its share of the marks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedCategory {
    pub name: String,
    /// Share of marks in percent.
    pub weightage_percent: f64,
}

impl WeightedCategory {
    pub fn new(name: impl Into<String>, weightage_percent: f64) -> Self {
        Self {
            name: name.into(),
            weightage_percent,
        }
    }
}

/// Items allocated to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuotaResult {
    pub name: String,
    pub count: u32,
    /// The category weight, echoed back.
    pub weightage_percent: f64,
}

/// A multiple-choice question from a bank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options` of the correct answer.
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// Whether `choice` is the correct option.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }
}

/// An exam topic and its pool of questions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    pub weightage_percent: f64,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// A question bank grouped by topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Topics in file order. This order is the allocation order.
    #[serde(default)]
    pub topics: Vec<Topic>,
}

impl QuestionBank {
    /// The bank's topics as weighted categories, in bank order.
    pub fn categories(&self) -> Vec<WeightedCategory> {
        self.topics
            .iter()
            .map(|t| WeightedCategory::new(t.name.clone(), t.weightage_percent))
            .collect()
    }

    /// Look up a topic by name. An exact match wins; otherwise the first
    /// case-insensitive match.
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics
            .iter()
            .find(|t| t.name == name)
            .or_else(|| self.topics.iter().find(|t| t.name.eq_ignore_ascii_case(name)))
    }

    /// Total number of questions across all topics.
    pub fn question_count(&self) -> usize {
        self.topics.iter().map(|t| t.questions.len()).sum()
    }

    /// Sum of all topic weights.
    pub fn total_weightage(&self) -> f64 {
        self.topics.iter().map(|t| t.weightage_percent).sum()
    }
}
