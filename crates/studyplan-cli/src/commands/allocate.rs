//! The `studyplan allocate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyplan_core::allocation::allocate_with;
use studyplan_core::config::load_config_from;
use studyplan_core::parser::{parse_bank, WEIGHT_SUM_TOLERANCE};

use super::resolve_method;

pub fn execute(
    bank_path: PathBuf,
    total: Option<u32>,
    method: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let method = resolve_method(method, &config)?;
    let total = total.unwrap_or(config.allocation.default_total);

    let bank = parse_bank(&bank_path)?;
    let quotas = allocate_with(&bank.categories(), total, method);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&quotas)?);
        }
        _ => {
            let mut table = Table::new();
            table.set_header(vec!["Topic", "Weightage", "Questions"]);
            for quota in &quotas {
                table.add_row(vec![
                    Cell::new(&quota.name),
                    Cell::new(format!("{:.1}%", quota.weightage_percent)),
                    Cell::new(quota.count),
                ]);
            }

            println!("{} — {total} questions ({method})", bank.name);
            println!("{table}");

            let weight_sum = bank.total_weightage();
            if (weight_sum - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
                eprintln!(
                    "Warning: topic weightages sum to {weight_sum:.1}%, not 100%. \
                     Run `studyplan validate` for details."
                );
            }
        }
    }

    Ok(())
}
