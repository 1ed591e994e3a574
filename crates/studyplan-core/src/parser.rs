//! TOML content parser.
//!
//! Loads student profiles and question banks from TOML files and
//! directories, and validates banks.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::model::{average_percent, Question, QuestionBank, StudentProfile, Topic};

/// How far a bank's weights may drift from 100% before it is flagged.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.5;

#[derive(Debug, Deserialize)]
struct TomlProfileFile {
    profile: TomlProfile,
}

#[derive(Debug, Deserialize)]
struct TomlProfile {
    #[serde(default)]
    days_left: Option<i64>,
    #[serde(default)]
    exam_date: Option<NaiveDate>,
    target_percent: f64,
    hours_per_day: f64,
    #[serde(default)]
    current_percent: Option<f64>,
    #[serde(default)]
    recent_scores: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    topics: Vec<TomlTopic>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlTopic {
    name: String,
    weightage_percent: f64,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    prompt: String,
    #[serde(default)]
    options: Vec<String>,
    correct_index: usize,
    #[serde(default)]
    explanation: String,
}

/// Parse a profile file. `today` resolves an `exam_date` into days left.
pub fn parse_profile(path: &Path, today: NaiveDate) -> Result<StudentProfile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile file: {}", path.display()))?;

    parse_profile_str(&content, path, today)
}

/// Parse a profile from a TOML string (useful for testing).
pub fn parse_profile_str(
    content: &str,
    source_path: &Path,
    today: NaiveDate,
) -> Result<StudentProfile> {
    let parsed: TomlProfileFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
    let p = parsed.profile;

    let days_left = match (p.days_left, p.exam_date) {
        (Some(days), _) => days,
        (None, Some(date)) => (date - today).num_days(),
        (None, None) => anyhow::bail!(
            "profile needs either days_left or exam_date: {}",
            source_path.display()
        ),
    };

    let current_percent = p
        .current_percent
        .or_else(|| average_percent(&p.recent_scores));

    Ok(StudentProfile {
        days_left,
        target_percent: p.target_percent,
        hours_per_day: p.hours_per_day,
        current_percent,
    })
}

/// Parse a single question bank file.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a question bank from a TOML string (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let topics = parsed
        .topics
        .into_iter()
        .map(|t| Topic {
            name: t.name,
            weightage_percent: t.weightage_percent,
            questions: t
                .questions
                .into_iter()
                .map(|q| Question {
                    id: q.id,
                    prompt: q.prompt,
                    options: q.options,
                    correct_index: q.correct_index,
                    explanation: q.explanation,
                })
                .collect(),
        })
        .collect();

    Ok(QuestionBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        topics,
    })
}

/// Recursively load all `.toml` question banks from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank file, or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<QuestionBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from question bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The topic name (if applicable).
    pub topic: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn bank(message: impl Into<String>) -> Self {
        Self {
            topic: None,
            message: message.into(),
        }
    }

    fn topic(topic: &str, message: impl Into<String>) -> Self {
        Self {
            topic: Some(topic.to_string()),
            message: message.into(),
        }
    }
}

/// Validate a question bank for common content issues.
///
/// None of these stop allocation or sampling; they flag content that would
/// give surprising quotas or unanswerable questions.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.topics.is_empty() {
        warnings.push(ValidationWarning::bank("bank has no topics"));
        return warnings;
    }

    // Weight drift is absorbed by the allocator, but callers usually want to know
    let weight_sum = bank.total_weightage();
    if (weight_sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
        warnings.push(ValidationWarning::bank(format!(
            "topic weights sum to {weight_sum:.1}%, expected 100%"
        )));
    }

    let mut seen_topics = std::collections::HashSet::new();
    for topic in &bank.topics {
        if !seen_topics.insert(topic.name.to_lowercase()) {
            warnings.push(ValidationWarning::topic(
                &topic.name,
                format!("duplicate topic name: {}", topic.name),
            ));
        }
    }

    for topic in &bank.topics {
        if topic.weightage_percent < 0.0 || !topic.weightage_percent.is_finite() {
            warnings.push(ValidationWarning::topic(
                &topic.name,
                format!("invalid weightage: {}", topic.weightage_percent),
            ));
        }
        if topic.questions.is_empty() {
            warnings.push(ValidationWarning::topic(&topic.name, "topic has no questions"));
        }
    }

    let mut seen_ids = std::collections::HashSet::new();
    for topic in &bank.topics {
        for question in &topic.questions {
            if !seen_ids.insert(question.id.as_str()) {
                warnings.push(ValidationWarning::topic(
                    &topic.name,
                    format!("duplicate question ID: {}", question.id),
                ));
            }
            if question.prompt.trim().is_empty() {
                warnings.push(ValidationWarning::topic(
                    &topic.name,
                    format!("question {} has an empty prompt", question.id),
                ));
            }
            if question.options.len() < 2 {
                warnings.push(ValidationWarning::topic(
                    &topic.name,
                    format!("question {} has fewer than two options", question.id),
                ));
            } else if question.correct_index >= question.options.len() {
                warnings.push(ValidationWarning::topic(
                    &topic.name,
                    format!(
                        "question {} has correct_index {} but only {} options",
                        question.id,
                        question.correct_index,
                        question.options.len()
                    ),
                ));
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_BANK: &str = r#"
[bank]
id = "physics-12"
name = "Class 12 Physics"
description = "Board exam practice"

[[topics]]
name = "Electrostatics"
weightage_percent = 60.0

[[topics.questions]]
id = "es-1"
prompt = "What is the SI unit of charge?"
options = ["Ampere", "Coulomb", "Volt", "Ohm"]
correct_index = 1
explanation = "Charge is measured in coulombs."

[[topics.questions]]
id = "es-2"
prompt = "Field lines start on which charges?"
options = ["Positive", "Negative"]
correct_index = 0

[[topics]]
name = "Optics"
weightage_percent = 40.0

[[topics.questions]]
id = "op-1"
prompt = "Which mirror forms a virtual, diminished image?"
options = ["Concave", "Convex", "Plane"]
correct_index = 1
"#;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn parse_valid_bank() {
        let bank = parse_bank_str(VALID_BANK, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.id, "physics-12");
        assert_eq!(bank.topics.len(), 2);
        assert_eq!(bank.topics[0].name, "Electrostatics");
        assert_eq!(bank.topics[0].questions.len(), 2);
        assert_eq!(bank.topics[0].questions[0].correct_index, 1);
        assert!(bank.topics[0].questions[1].explanation.is_empty());
        assert!(validate_bank(&bank).is_empty());
    }

    #[test]
    fn parse_profile_with_days_left() {
        let toml = r#"
[profile]
days_left = 93
target_percent = 85
hours_per_day = 2.0
"#;
        let profile = parse_profile_str(toml, &PathBuf::from("p.toml"), today()).unwrap();
        assert_eq!(profile, StudentProfile::new(93, 85.0, 2.0));
    }

    #[test]
    fn parse_profile_with_exam_date_and_recent_scores() {
        let toml = r#"
[profile]
exam_date = "2027-01-17"
target_percent = 75.0
hours_per_day = 3.5
recent_scores = [60.0, 64.0, 68.0]
"#;
        let profile = parse_profile_str(toml, &PathBuf::from("p.toml"), today()).unwrap();
        assert_eq!(profile.days_left, 93);
        assert_eq!(profile.current_percent, Some(64.0));
    }

    #[test]
    fn explicit_current_percent_wins_over_recent_scores() {
        let toml = r#"
[profile]
days_left = 30
target_percent = 75.0
hours_per_day = 3.5
current_percent = 70.0
recent_scores = [10.0]
"#;
        let profile = parse_profile_str(toml, &PathBuf::from("p.toml"), today()).unwrap();
        assert_eq!(profile.current_percent, Some(70.0));
    }

    #[test]
    fn profile_without_horizon_is_an_error() {
        let toml = r#"
[profile]
target_percent = 75.0
hours_per_day = 3.5
"#;
        let err = parse_profile_str(toml, &PathBuf::from("p.toml"), today()).unwrap_err();
        assert!(err.to_string().contains("days_left or exam_date"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
        assert!(parse_profile_str(bad, &PathBuf::from("bad.toml"), today()).is_err());
    }

    #[test]
    fn validate_flags_weight_drift() {
        let toml = r#"
[bank]
id = "drift"
name = "Drift"

[[topics]]
name = "A"
weightage_percent = 50.0

[[topics.questions]]
id = "a-1"
prompt = "Q"
options = ["x", "y"]
correct_index = 0

[[topics]]
name = "B"
weightage_percent = 30.0

[[topics.questions]]
id = "b-1"
prompt = "Q"
options = ["x", "y"]
correct_index = 0
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("80.0%"));
        assert!(warnings[0].topic.is_none());
    }

    #[test]
    fn validate_flags_question_problems() {
        let toml = r#"
[bank]
id = "broken"
name = "Broken"

[[topics]]
name = "A"
weightage_percent = 100.0

[[topics.questions]]
id = "dup"
prompt = "   "
options = ["only"]
correct_index = 0

[[topics.questions]]
id = "dup"
prompt = "Fine prompt"
options = ["x", "y"]
correct_index = 5

[[topics]]
name = "a"
weightage_percent = 0.0
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let messages: Vec<String> = validate_bank(&bank)
            .into_iter()
            .map(|w| w.message)
            .collect();
        assert!(messages.iter().any(|m| m.contains("duplicate topic name")));
        assert!(messages.iter().any(|m| m.contains("duplicate question ID: dup")));
        assert!(messages.iter().any(|m| m.contains("empty prompt")));
        assert!(messages.iter().any(|m| m.contains("fewer than two options")));
        assert!(messages.iter().any(|m| m.contains("correct_index 5")));
        assert!(messages.iter().any(|m| m.contains("no questions")));
    }

    #[test]
    fn validate_empty_bank() {
        let toml = r#"
[bank]
id = "empty"
name = "Empty"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("no topics"));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("physics.toml"), VALID_BANK).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "physics-12");

        let file_banks = load_banks(&dir.path().join("physics.toml")).unwrap();
        assert_eq!(file_banks.len(), 1);
    }

    #[test]
    fn load_directory_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("physics.toml");
        std::fs::write(&path, VALID_BANK).unwrap();
        assert!(load_bank_directory(&path).is_err());
    }
}
