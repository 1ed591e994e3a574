//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PHYSICS: &str = "../../content/banks/physics-12.toml";
const BANKS: &str = "../../content/banks";
const PROFILE: &str = "../../content/profiles/board-exam.toml";

fn studyplan() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("studyplan").unwrap();
    cmd.env("HOME", empty_home())
        .env_remove("STUDYPLAN_SEED")
        .env_remove("STUDYPLAN_ALLOCATION_METHOD")
        .env_remove("RUST_LOG");
    cmd
}

/// A HOME without `.config/studyplan`, so a developer's config is never read.
fn empty_home() -> &'static std::path::Path {
    static HOME: std::sync::OnceLock<TempDir> = std::sync::OnceLock::new();
    HOME.get_or_init(|| TempDir::new().unwrap()).path()
}

fn json_stdout(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

fn counts(quotas: &serde_json::Value) -> Vec<u64> {
    quotas
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["count"].as_u64().unwrap())
        .collect()
}

#[test]
fn estimate_from_flags() {
    studyplan()
        .args(["estimate", "--days-left", "93", "--target", "85", "--hours", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Realistic score: 83–93%"))
        .stdout(predicate::str::contains("Effort: high (comfortable)"))
        .stdout(predicate::str::contains("Hours per day required: 1.0"));
}

#[test]
fn estimate_from_profile_file() {
    studyplan()
        .args(["estimate", "--profile", PROFILE])
        .assert()
        .success()
        .stdout(predicate::str::contains("83–93%"));
}

#[test]
fn estimate_behind_schedule_with_current_level() {
    studyplan()
        .args([
            "estimate",
            "--days-left",
            "33",
            "--target",
            "85",
            "--hours",
            "2",
            "--current",
            "55",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("69–77%"))
        .stdout(predicate::str::contains("Effort: low (stretched)"))
        .stdout(predicate::str::contains("Hours per day required: 3.3"));
}

#[test]
fn estimate_explain_shows_figures() {
    studyplan()
        .args([
            "estimate", "--days-left", "93", "--target", "85", "--hours", "2", "--explain",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Effort ratio"))
        .stdout(predicate::str::contains("assumed"));
}

#[test]
fn estimate_json() {
    let value = json_stdout(studyplan().args([
        "estimate",
        "--days-left",
        "93",
        "--target",
        "85",
        "--hours",
        "2",
        "--format",
        "json",
    ]));
    assert_eq!(value["realistic_min"], 83);
    assert_eq!(value["realistic_max"], 93);
    assert_eq!(value["effort_status"], "high");
}

#[test]
fn estimate_clamps_degenerate_input() {
    let value = json_stdout(studyplan().args([
        "estimate",
        "--days-left",
        "-5",
        "--target",
        "85",
        "--hours",
        "0",
        "--format",
        "json",
    ]));
    let min = value["realistic_min"].as_i64().unwrap();
    let max = value["realistic_max"].as_i64().unwrap();
    assert!(min >= 30 && max > min && max <= 98);
    assert_eq!(value["effort_status"], "low");
}

#[test]
fn rust_log_overrides_default_filter() {
    studyplan()
        .env("RUST_LOG", "studyplan=debug")
        .args(["estimate", "--days-left", "0", "--target", "80", "--hours", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("days_left 0 clamped to 1"));
}

#[test]
fn debug_lines_hidden_by_default() {
    studyplan()
        .args(["estimate", "--days-left", "0", "--target", "80", "--hours", "0"])
        .assert()
        .success()
        .stderr(predicate::str::contains("clamped").not());
}

#[test]
fn config_under_home_is_picked_up() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join(".config").join("studyplan");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "[allocation]\nmethod = \"largest-remainder\"\ndefault_total = 30\n",
    )
    .unwrap();

    let value = json_stdout(
        studyplan()
            .env("HOME", home.path())
            .args(["allocate", "--bank", PHYSICS, "--format", "json"]),
    );
    assert_eq!(counts(&value), vec![9, 8, 7, 6]);
}

#[test]
fn estimate_requires_profile_or_flags() {
    studyplan()
        .args(["estimate", "--target", "85"])
        .assert()
        .failure();
}

#[test]
fn allocate_table() {
    studyplan()
        .args(["allocate", "--bank", PHYSICS, "--total", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Class 12 Physics — 30 questions (last-remainder)",
        ))
        .stdout(predicate::str::contains("Modern Physics"));
}

#[test]
fn allocate_methods_differ_on_ties() {
    let last = json_stdout(studyplan().args([
        "allocate", "--bank", PHYSICS, "--total", "30", "--format", "json",
    ]));
    assert_eq!(counts(&last), vec![9, 8, 8, 5]);

    let hamilton = json_stdout(studyplan().args([
        "allocate",
        "--bank",
        PHYSICS,
        "--total",
        "30",
        "--method",
        "largest-remainder",
        "--format",
        "json",
    ]));
    assert_eq!(counts(&hamilton), vec![9, 8, 7, 6]);
}

#[test]
fn allocate_method_from_environment() {
    let value = json_stdout(
        studyplan()
            .env("STUDYPLAN_ALLOCATION_METHOD", "hamilton")
            .args([
                "allocate", "--bank", PHYSICS, "--total", "30", "--format", "json",
            ]),
    );
    assert_eq!(counts(&value), vec![9, 8, 7, 6]);
}

#[test]
fn allocate_unknown_method() {
    studyplan()
        .args(["allocate", "--bank", PHYSICS, "--method", "dhondt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown allocation method"));
}

#[test]
fn sample_from_topic() {
    let value = json_stdout(studyplan().args([
        "sample", "--bank", PHYSICS, "--topic", "optics", "--count", "2", "--seed", "7",
        "--format", "json",
    ]));
    let questions = value.as_array().unwrap();
    assert_eq!(questions.len(), 2);
    assert!(questions
        .iter()
        .all(|q| q["id"].as_str().unwrap().starts_with("op-")));
    assert_ne!(questions[0]["id"], questions[1]["id"]);
}

#[test]
fn sample_is_reproducible_with_seed() {
    let args = [
        "sample", "--bank", PHYSICS, "--topic", "Electrostatics", "--count", "3", "--seed",
        "42",
    ];
    let first = studyplan().args(args).assert().success().get_output().stdout.clone();
    let second = studyplan().args(args).assert().success().get_output().stdout.clone();
    assert_eq!(first, second);
}

#[test]
fn sample_caps_at_pool_size() {
    let value = json_stdout(studyplan().args([
        "sample",
        "--bank",
        PHYSICS,
        "--topic",
        "Modern Physics",
        "--count",
        "10",
        "--format",
        "json",
    ]));
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn sample_unknown_topic() {
    studyplan()
        .args(["sample", "--bank", PHYSICS, "--topic", "Thermodynamics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn mock_test_fills_quota() {
    let value = json_stdout(studyplan().args([
        "mock", "--bank", PHYSICS, "--total", "10", "--seed", "3", "--format", "json",
    ]));
    let sections = value["sections"].as_array().unwrap();
    let drawn: usize = sections
        .iter()
        .map(|s| s["questions"].as_array().unwrap().len())
        .sum();
    assert_eq!(drawn, 10);
    assert!(sections.iter().all(|s| s["shortfall"] == 0));
}

#[test]
fn mock_test_reports_shortfall() {
    studyplan()
        .args(["mock", "--bank", PHYSICS, "--total", "30", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 of 30 questions"))
        .stderr(predicate::str::contains("18 question(s) short"));
}

#[test]
fn plan_writes_all_formats() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out");

    studyplan()
        .args(["plan", "--profile", PROFILE, "--bank", PHYSICS, "--format", "all"])
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("83–93%"))
        .stderr(predicate::str::contains("Plan saved to"));

    let mut extensions: Vec<String> = std::fs::read_dir(&output)
        .unwrap()
        .map(|e| {
            e.unwrap()
                .path()
                .extension()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    extensions.sort();
    assert_eq!(extensions, vec!["html", "json", "md"]);
}

#[test]
fn plan_uses_config_defaults() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("studyplan.toml");
    std::fs::write(
        &config,
        "[allocation]\nmethod = \"largest-remainder\"\ndefault_total = 10\n",
    )
    .unwrap();

    studyplan()
        .args(["plan", "--profile", PROFILE, "--bank", PHYSICS])
        .arg("--config")
        .arg(&config)
        .arg("--output")
        .arg(dir.path().join("out"))
        .assert()
        .success();

    let json_path = std::fs::read_dir(dir.path().join("out"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .find(|p| p.extension().is_some_and(|ext| ext == "json"))
        .unwrap();
    let report: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
    assert_eq!(report["total_questions"], 10);
    assert_eq!(report["method"], "largest-remainder");
}

#[test]
fn invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("studyplan.toml");
    std::fs::write(&config, "[strategy]\nhour_steps = []\n").unwrap();

    studyplan()
        .args(["estimate", "--days-left", "30", "--target", "70", "--hours", "1"])
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hour_steps"));
}

#[test]
fn validate_bank_file() {
    studyplan()
        .args(["validate", "--bank", PHYSICS])
        .assert()
        .success()
        .stdout(predicate::str::contains("4 topics, 12 questions"))
        .stdout(predicate::str::contains("All banks valid"));
}

#[test]
fn validate_directory() {
    studyplan()
        .args(["validate", "--bank", BANKS])
        .assert()
        .success()
        .stdout(predicate::str::contains("Class 12 Chemistry"))
        .stdout(predicate::str::contains("Class 12 Physics"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drift.toml");
    std::fs::write(
        &path,
        r#"
[bank]
id = "drift"
name = "Drift"

[[topics]]
name = "Only"
weightage_percent = 90.0

[[topics.questions]]
id = "q1"
prompt = "Pick one"
options = ["yes"]
correct_index = 0
"#,
    )
    .unwrap();

    studyplan()
        .args(["validate", "--bank"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("sum to 90.0%"))
        .stdout(predicate::str::contains("[Only] WARNING"))
        .stdout(predicate::str::contains("2 warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    studyplan()
        .args(["validate", "--bank", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    studyplan()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created studyplan.toml"))
        .stdout(predicate::str::contains("Created content/banks/example.toml"));

    assert!(dir.path().join("studyplan.toml").exists());
    assert!(dir.path().join("content/profiles/me.toml").exists());

    // The starter files are usable as written.
    studyplan()
        .current_dir(dir.path())
        .args(["validate", "--bank", "content/banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All banks valid"));
    studyplan()
        .current_dir(dir.path())
        .args(["estimate", "--profile", "content/profiles/me.toml"])
        .assert()
        .success();
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    studyplan()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    studyplan()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    studyplan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exam study strategy"));
}

#[test]
fn version_output() {
    studyplan()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("studyplan"));
}
