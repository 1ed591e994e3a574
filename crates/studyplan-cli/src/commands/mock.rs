//! The `studyplan mock` command.

use std::path::PathBuf;

use anyhow::Result;

use studyplan_core::config::load_config_from;
use studyplan_core::parser::parse_bank;
use studyplan_core::sampler::Sampler;
use studyplan_core::session::build_mock_test;

use super::resolve_method;
use super::sample::print_questions;

pub fn execute(
    bank_path: PathBuf,
    total: Option<u32>,
    method: Option<String>,
    seed: Option<u64>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let method = resolve_method(method, &config)?;
    let total = total.unwrap_or(config.allocation.default_total);
    let bank = parse_bank(&bank_path)?;

    let mut sampler = Sampler::new(seed.or(config.sampler.seed));
    let mock = build_mock_test(&bank, total, method, sampler.rng());

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&mock)?);
        }
        _ => {
            println!(
                "Mock test: {} — {} of {} questions ({method})",
                bank.name,
                mock.len(),
                mock.requested
            );

            let mut number = 1;
            for section in &mock.sections {
                println!(
                    "\n## {} ({} of {})",
                    section.topic,
                    section.questions.len(),
                    section.quota.count
                );
                number = print_questions(&section.questions, number);
            }

            let shortfall = mock.shortfall();
            if shortfall > 0 {
                eprintln!("\nWarning: {shortfall} question(s) short; add more questions to the bank.");
            }
        }
    }

    Ok(())
}
