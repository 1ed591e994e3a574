//! Study plan reports with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocation::{allocate_with, AllocationMethod};
use crate::config::StrategyConfig;
use crate::model::{QuestionBank, QuotaResult, StrategyExplanation, StudentProfile};
use crate::strategy::explain;

/// A complete study plan: where the student stands and how to split practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    pub profile: StudentProfile,
    pub strategy: StrategyExplanation,
    /// Summary of the bank the topic mix was planned against.
    pub bank: BankSummary,
    pub method: AllocationMethod,
    /// Questions per mock test.
    pub total_questions: u32,
    pub topic_mix: Vec<QuotaResult>,
}

/// Summary of a question bank (without the questions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub id: String,
    pub name: String,
    pub topic_count: usize,
    pub question_count: usize,
}

impl BankSummary {
    pub fn of(bank: &QuestionBank) -> Self {
        Self {
            id: bank.id.clone(),
            name: bank.name.clone(),
            topic_count: bank.topics.len(),
            question_count: bank.question_count(),
        }
    }
}

impl PlanReport {
    /// Estimate the profile and plan a topic mix for `total_questions`.
    pub fn build(
        profile: &StudentProfile,
        bank: &QuestionBank,
        total_questions: u32,
        strategy_config: &StrategyConfig,
        method: AllocationMethod,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            profile: profile.clone(),
            strategy: explain(profile, strategy_config),
            bank: BankSummary::of(bank),
            method,
            total_questions,
            topic_mix: allocate_with(&bank.categories(), total_questions, method),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: PlanReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let result = &self.strategy.result;
        let mut md = String::new();

        md.push_str(&format!("# Study plan — {}\n\n", self.bank.name));
        md.push_str(&format!(
            "_Generated {}_\n\n",
            self.created_at.format("%Y-%m-%d %H:%M UTC")
        ));

        md.push_str("## Outlook\n\n");
        md.push_str(&format!(
            "**Realistic score:** {}–{}% (target {}%)\n\n",
            result.realistic_min, result.realistic_max, self.profile.target_percent
        ));
        md.push_str(&format!(
            "**Effort:** {} ({})\n\n",
            result.effort_status, self.strategy.band
        ));
        md.push_str(&format!(
            "**Hours per day required:** {:.1} (planned {:.1} over {} days)\n\n",
            result.hours_per_day_required, self.profile.hours_per_day, self.profile.days_left
        ));

        md.push_str("| Figure | Value |\n");
        md.push_str("|--------|-------|\n");
        let current_note = if self.strategy.current_supplied {
            "measured"
        } else {
            "assumed"
        };
        md.push_str(&format!(
            "| Current level | {:.1}% ({current_note}) |\n",
            self.strategy.assumed_current_percent
        ));
        md.push_str(&format!(
            "| Required hours | {:.0} |\n",
            self.strategy.required_hours
        ));
        md.push_str(&format!(
            "| Available hours | {:.0} |\n",
            self.strategy.available_hours
        ));
        md.push_str(&format!(
            "| Effort ratio | {:.2} |\n\n",
            self.strategy.effort_ratio
        ));

        md.push_str(&format!(
            "## Topic mix ({} questions, {})\n\n",
            self.total_questions, self.method
        ));
        if self.topic_mix.is_empty() {
            md.push_str("No questions allocated.\n");
        } else {
            md.push_str("| Topic | Weightage | Questions |\n");
            md.push_str("|-------|-----------|-----------|\n");
            for quota in &self.topic_mix {
                md.push_str(&format!(
                    "| {} | {:.1}% | {} |\n",
                    quota.name, quota.weightage_percent, quota.count
                ));
            }
        }

        md
    }
}
