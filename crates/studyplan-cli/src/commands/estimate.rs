//! The `studyplan estimate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyplan_core::config::load_config_from;
use studyplan_core::model::{StrategyExplanation, StudentProfile};
use studyplan_core::parser::parse_profile;
use studyplan_core::strategy::explain;

/// Where the profile comes from: flags or a profile file.
pub enum ProfileSource {
    Flags {
        days_left: i64,
        target: f64,
        hours: f64,
        current: Option<f64>,
    },
    File(PathBuf),
}

impl ProfileSource {
    /// clap guarantees either a profile file or all three flags.
    pub fn from_args(
        days_left: Option<i64>,
        target: Option<f64>,
        hours: Option<f64>,
        current: Option<f64>,
        profile: Option<PathBuf>,
    ) -> Self {
        match profile {
            Some(path) => ProfileSource::File(path),
            None => ProfileSource::Flags {
                days_left: days_left.unwrap_or_default(),
                target: target.unwrap_or_default(),
                hours: hours.unwrap_or_default(),
                current,
            },
        }
    }

    fn resolve(self) -> Result<StudentProfile> {
        match self {
            ProfileSource::Flags {
                days_left,
                target,
                hours,
                current,
            } => {
                let profile = StudentProfile::new(days_left, target, hours);
                Ok(match current {
                    Some(c) => profile.with_current_percent(c),
                    None => profile,
                })
            }
            ProfileSource::File(path) => {
                parse_profile(&path, chrono::Local::now().date_naive())
            }
        }
    }
}

pub fn execute(
    source: ProfileSource,
    show_explanation: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let profile = source.resolve()?;
    let explanation = explain(&profile, &config.strategy);

    match format.as_str() {
        "json" => {
            if show_explanation {
                println!("{}", serde_json::to_string_pretty(&explanation)?);
            } else {
                println!("{}", serde_json::to_string_pretty(&explanation.result)?);
            }
        }
        _ => print_text(&explanation, show_explanation),
    }

    Ok(())
}

fn print_text(explanation: &StrategyExplanation, show_explanation: bool) {
    let result = &explanation.result;
    println!(
        "Realistic score: {}–{}%",
        result.realistic_min, result.realistic_max
    );
    println!("Effort: {} ({})", result.effort_status, explanation.band);
    println!(
        "Hours per day required: {:.1}",
        result.hours_per_day_required
    );

    if !show_explanation {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Figure", "Value"]);
    let current_note = if explanation.current_supplied {
        "measured"
    } else {
        "assumed"
    };
    table.add_row(vec![
        Cell::new("Current level"),
        Cell::new(format!(
            "{:.1}% ({current_note})",
            explanation.assumed_current_percent
        )),
    ]);
    table.add_row(vec![
        Cell::new("Hours to reach target"),
        Cell::new(format!("{:.0}", explanation.target_hours)),
    ]);
    table.add_row(vec![
        Cell::new("Hours already credited"),
        Cell::new(format!("{:.0}", explanation.current_hours)),
    ]);
    table.add_row(vec![
        Cell::new("Required hours"),
        Cell::new(format!("{:.0}", explanation.required_hours)),
    ]);
    table.add_row(vec![
        Cell::new("Available hours"),
        Cell::new(format!("{:.0}", explanation.available_hours)),
    ]);
    table.add_row(vec![
        Cell::new("Effort ratio"),
        Cell::new(format!("{:.2}", explanation.effort_ratio)),
    ]);

    println!("\n{table}");
}
