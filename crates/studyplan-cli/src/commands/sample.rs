//! The `studyplan sample` command.

use std::path::PathBuf;

use anyhow::Result;

use studyplan_core::config::load_config_from;
use studyplan_core::model::Question;
use studyplan_core::parser::parse_bank;
use studyplan_core::sampler::Sampler;
use studyplan_core::session::practice_topic;

use super::option_label;

pub fn execute(
    bank_path: PathBuf,
    topic: String,
    count: usize,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = parse_bank(&bank_path)?;

    let mut sampler = Sampler::new(seed.or(config.sampler.seed));
    let questions = practice_topic(&bank, &topic, count, sampler.rng()).ok_or_else(|| {
        anyhow::anyhow!(
            "topic '{}' not found in bank '{}'. Available: {:?}",
            topic,
            bank.id,
            bank.topics.iter().map(|t| t.name.as_str()).collect::<Vec<_>>()
        )
    })?;

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }
        _ => {
            println!("{topic}: {} question(s)\n", questions.len());
            print_questions(&questions, 1);
        }
    }

    Ok(())
}

/// Print questions numbered from `start`. Returns the next number.
pub(crate) fn print_questions(questions: &[Question], start: usize) -> usize {
    let mut number = start;
    for q in questions {
        println!("{number}. [{}] {}", q.id, q.prompt);
        for (i, option) in q.options.iter().enumerate() {
            println!("   {}) {option}", option_label(i));
        }
        number += 1;
    }
    number
}
