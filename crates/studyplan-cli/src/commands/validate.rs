//! The `studyplan validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = studyplan_core::parser::load_banks(&bank_path)?;
    anyhow::ensure!(
        !banks.is_empty(),
        "no question banks found in {}",
        bank_path.display()
    );

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Bank: {} ({} topics, {} questions)",
            bank.name,
            bank.topics.len(),
            bank.question_count()
        );

        let warnings = studyplan_core::parser::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .topic
                .as_ref()
                .map(|topic| format!("  [{topic}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
