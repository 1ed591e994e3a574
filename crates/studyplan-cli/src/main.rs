//! studyplan CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "studyplan",
    version,
    about = "Exam study strategy and practice planner"
)]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a realistic score band and the study effort it needs
    Estimate {
        /// Days until the exam
        #[arg(long, allow_negative_numbers = true, required_unless_present = "profile")]
        days_left: Option<i64>,

        /// Target score in percent
        #[arg(long, required_unless_present = "profile")]
        target: Option<f64>,

        /// Study hours available per day
        #[arg(long, required_unless_present = "profile")]
        hours: Option<f64>,

        /// Current score level in percent
        #[arg(long)]
        current: Option<f64>,

        /// Profile TOML file (instead of the flags above)
        #[arg(long, conflicts_with_all = ["days_left", "target", "hours", "current"])]
        profile: Option<PathBuf>,

        /// Show the intermediate figures behind the estimate
        #[arg(long)]
        explain: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Split a mock test's questions across a bank's topics
    Allocate {
        /// Question bank TOML file
        #[arg(long)]
        bank: PathBuf,

        /// Questions in the mock test (default from config)
        #[arg(long)]
        total: Option<u32>,

        /// Allocation method: last-remainder, largest-remainder
        #[arg(long)]
        method: Option<String>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Draw practice questions from one topic
    Sample {
        /// Question bank TOML file
        #[arg(long)]
        bank: PathBuf,

        /// Topic name (case-insensitive)
        #[arg(long)]
        topic: String,

        /// Number of questions to draw
        #[arg(long, default_value = "5")]
        count: usize,

        /// RNG seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Assemble a mock test from a question bank
    Mock {
        /// Question bank TOML file
        #[arg(long)]
        bank: PathBuf,

        /// Questions in the mock test (default from config)
        #[arg(long)]
        total: Option<u32>,

        /// Allocation method: last-remainder, largest-remainder
        #[arg(long)]
        method: Option<String>,

        /// RNG seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Build a full study plan and write it to disk
    Plan {
        /// Profile TOML file
        #[arg(long)]
        profile: PathBuf,

        /// Question bank TOML file
        #[arg(long)]
        bank: PathBuf,

        /// Questions per mock test (default from config)
        #[arg(long)]
        total: Option<u32>,

        /// Allocation method: last-remainder, largest-remainder
        #[arg(long)]
        method: Option<String>,

        /// Output directory
        #[arg(long, default_value = "./studyplan-output")]
        output: PathBuf,

        /// Output format: json, markdown, html, all
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create starter config and sample content
    Init,
}

fn main() {
    // RUST_LOG replaces the default filter entirely when set.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("studyplan=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Estimate {
            days_left,
            target,
            hours,
            current,
            profile,
            explain,
            format,
        } => commands::estimate::execute(
            commands::estimate::ProfileSource::from_args(
                days_left, target, hours, current, profile,
            ),
            explain,
            format,
            config,
        ),
        Commands::Allocate {
            bank,
            total,
            method,
            format,
        } => commands::allocate::execute(bank, total, method, format, config),
        Commands::Sample {
            bank,
            topic,
            count,
            seed,
            format,
        } => commands::sample::execute(bank, topic, count, seed, format, config),
        Commands::Mock {
            bank,
            total,
            method,
            seed,
            format,
        } => commands::mock::execute(bank, total, method, seed, format, config),
        Commands::Plan {
            profile,
            bank,
            total,
            method,
            output,
            format,
        } => commands::plan::execute(profile, bank, total, method, output, format, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
