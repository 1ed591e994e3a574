//! The `studyplan init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("studyplan.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("content/banks")?;
    std::fs::create_dir_all("content/profiles")?;
    write_if_missing(Path::new("content/banks/example.toml"), EXAMPLE_BANK)?;
    write_if_missing(Path::new("content/profiles/me.toml"), EXAMPLE_PROFILE)?;

    println!("\nNext steps:");
    println!("  1. Edit content/profiles/me.toml with your exam date and goals");
    println!("  2. Run: studyplan validate --bank content/banks");
    println!(
        "  3. Run: studyplan plan --profile content/profiles/me.toml --bank content/banks/example.toml"
    );

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studyplan configuration

[strategy]
# Study hours needed to reach each score level, highest first.
hour_steps = [
    { min_percent = 90.0, hours = 240.0 },
    { min_percent = 80.0, hours = 180.0 },
    { min_percent = 70.0, hours = 130.0 },
    { min_percent = 60.0, hours = 90.0 },
]
base_hours = 70.0
high_ratio = 1.1
ok_ratio = 0.8
severe_ratio = 0.5

[allocation]
method = "last-remainder"
default_total = 30

[sampler]
# seed = 42
"#;

const EXAMPLE_PROFILE: &str = r#"[profile]
exam_date = "2027-03-01"
target_percent = 80
hours_per_day = 2.0
recent_scores = [62, 68, 71]
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A tiny bank to get started"

[[topics]]
name = "Arithmetic"
weightage_percent = 60.0

[[topics.questions]]
id = "ar-1"
prompt = "What is 7 x 8?"
options = ["54", "56", "64", "48"]
correct_index = 1
explanation = "7 x 8 = 56."

[[topics.questions]]
id = "ar-2"
prompt = "What is 15% of 200?"
options = ["15", "20", "30", "35"]
correct_index = 2
explanation = "0.15 x 200 = 30."

[[topics]]
name = "Geometry"
weightage_percent = 40.0

[[topics.questions]]
id = "ge-1"
prompt = "The interior angles of a triangle sum to"
options = ["90 degrees", "180 degrees", "270 degrees", "360 degrees"]
correct_index = 1
explanation = "Any triangle's angles sum to 180 degrees."
"#;
