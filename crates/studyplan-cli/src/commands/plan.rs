//! The `studyplan plan` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyplan_core::config::load_config_from;
use studyplan_core::parser::{parse_bank, parse_profile};
use studyplan_core::report::PlanReport;
use studyplan_report::html::write_html_report;

use super::resolve_method;

pub fn execute(
    profile_path: PathBuf,
    bank_path: PathBuf,
    total: Option<u32>,
    method: Option<String>,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let method = resolve_method(method, &config)?;
    let total = total.unwrap_or(config.allocation.default_total);

    let profile = parse_profile(&profile_path, chrono::Local::now().date_naive())?;
    let bank = parse_bank(&bank_path)?;

    let report = PlanReport::build(&profile, &bank, total, &config.strategy, method);
    print_summary(&report);

    std::fs::create_dir_all(&output)?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("plan-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Plan saved to: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("plan-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())?;
                eprintln!("Markdown plan: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("plan-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML plan: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

fn print_summary(report: &PlanReport) {
    let result = &report.strategy.result;
    println!(
        "Realistic score: {}–{}% (target {:.0}%)",
        result.realistic_min, result.realistic_max, report.profile.target_percent
    );
    println!(
        "Effort: {} ({}), {:.1} h/day required",
        result.effort_status, report.strategy.band, result.hours_per_day_required
    );

    let mut table = Table::new();
    table.set_header(vec!["Topic", "Weightage", "Questions"]);
    for quota in &report.topic_mix {
        table.add_row(vec![
            Cell::new(&quota.name),
            Cell::new(format!("{:.1}%", quota.weightage_percent)),
            Cell::new(quota.count),
        ]);
    }
    println!("\n{table}");
}
