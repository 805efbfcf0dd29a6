use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use recoveryrs::config::{AppConfig, OutputFormat};
use recoveryrs::error::{ErrorSeverity, ImportError, RecoveryRsError};
use recoveryrs::export::{self, ExportFormat};
use recoveryrs::import::ImportManager;
use recoveryrs::logging::{init_logging, LogLevel};
use recoveryrs::models::{parse_timestamp, ExercisePerformanceEntry};
use recoveryrs::{ExerciseProgress, Muscle, RecoveryEstimator, RecoveryReport, RecoveryStatus};

/// RecoveryRS - Muscle Recovery CLI
///
/// Estimates how recovered each muscle group is from a strength-training
/// history and suggests what to train today.
#[derive(Parser)]
#[command(name = "recoveryrs")]
#[command(author = "RecoveryRS Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Muscle recovery and readiness CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show per-muscle recovery, readiness and today's recommendation
    Status {
        /// History file (JSON or CSV); defaults to the configured history
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format (table, json)
        #[arg(short = 'F', long)]
        format: Option<OutputFormat>,

        /// Evaluate at this instant instead of now (RFC 3339)
        #[arg(long)]
        at: Option<String>,
    },

    /// Show session history and personal bests for one exercise
    Progress {
        /// Exercise name (case-insensitive)
        #[arg(short, long)]
        exercise: String,

        /// History file (JSON or CSV)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Write the recovery report to a file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (json, text)
        #[arg(short = 'F', long, default_value = "json")]
        format: ExportFormat,

        /// History file (JSON or CSV)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Evaluate at this instant instead of now (RFC 3339)
        #[arg(long)]
        at: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Print the active configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,
    },
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Muscle")]
    muscle: String,
    #[tabled(rename = "Recovery")]
    recovery: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Trained")]
    last_trained: String,
}

#[derive(Tabled)]
struct ProgressRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Top Weight")]
    top_weight: String,
    #[tabled(rename = "Reps")]
    reps: u64,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Est. 1RM")]
    estimated_1rm: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(AppConfig::default_config_path);
    let (mut config, config_err) = AppConfig::load_or_default(Some(config_path.as_path()));

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(cli.verbose, log_config.level);
    init_logging(&log_config)?;

    if let Some(err) = config_err {
        tracing::debug!(path = %config_path.display(), error = %err, "Using default configuration");
    }

    if !config.settings.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Status { file, format, at } => {
            let entries = load_history(file.as_deref(), &config)?;
            let now = evaluation_time(at.as_deref())?;
            let report = RecoveryEstimator::estimate_at(&entries, now);

            match format.unwrap_or(config.settings.default_output) {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Table => print_status(&report),
            }
        }

        Commands::Progress { exercise, file } => {
            let entries = load_history(file.as_deref(), &config)?;
            let progress = ExerciseProgress::from_entries(&exercise, &entries);
            print_progress(&progress);
        }

        Commands::Export {
            output,
            format,
            file,
            at,
        } => {
            let entries = load_history(file.as_deref(), &config)?;
            let now = evaluation_time(at.as_deref())?;
            let report = RecoveryEstimator::estimate_at(&entries, now);

            export::export_report(&report, format, &output)
                .with_context(|| format!("Failed to export report to {}", output.display()))?;
            println!("{}", format!("✓ Report written to {}", output.display()).green());
        }

        Commands::Config { show, init } => {
            if init {
                config.save_to_file(&config_path)?;
                println!(
                    "{}",
                    format!("✓ Configuration written to {}", config_path.display()).green()
                );
            }
            if show || !init {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn load_history(file: Option<&Path>, config: &AppConfig) -> Result<Vec<ExercisePerformanceEntry>> {
    let path = file.unwrap_or(config.settings.history_file.as_path());

    let manager = ImportManager::new();
    manager.import_file(path).map_err(|err| {
        match err.severity() {
            ErrorSeverity::Warning => tracing::warn!(error = %err, "History import failed"),
            ErrorSeverity::Error => tracing::error!(error = %err, "History import failed"),
        }
        match err {
            RecoveryRsError::Import(ImportError::UnsupportedFormat { .. }) => anyhow::anyhow!(
                "{} Supported formats: {}",
                err.user_message(),
                manager.supported_formats().join(", ")
            ),
            _ => anyhow::anyhow!(err.user_message()),
        }
    })
}

fn evaluation_time(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => {
            parse_timestamp(raw).ok_or_else(|| anyhow::anyhow!("Invalid --at timestamp: {}", raw))
        }
        None => Ok(Utc::now()),
    }
}

fn colorize_status(status: RecoveryStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        RecoveryStatus::Fatigued => label.red().bold(),
        RecoveryStatus::Recovering => label.yellow(),
        RecoveryStatus::Ready => label.green(),
    }
}

fn print_status(report: &RecoveryReport) {
    let rows: Vec<StatusRow> = Muscle::ALL
        .iter()
        .filter_map(|muscle| report.status(*muscle))
        .map(|status| StatusRow {
            muscle: status.name().to_string(),
            recovery: format!("{}%", status.recovery_percentage()),
            status: colorize_status(status.status()).to_string(),
            last_trained: match status.last_trained() {
                Some(at) => format!("{} ({:.0}h ago)", at.format("%Y-%m-%d %H:%M"), status.hours_since()),
                None => "never".dimmed().to_string(),
            },
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();

    let readiness = format!("{}%", report.global_readiness);
    let readiness = match RecoveryStatus::from_percentage(report.global_readiness) {
        RecoveryStatus::Ready => readiness.green().bold(),
        RecoveryStatus::Recovering => readiness.yellow().bold(),
        RecoveryStatus::Fatigued => readiness.red().bold(),
    };
    println!("{} {}", "Global readiness:".bold(), readiness);
    println!("{} {}", "Muscles not ready:".bold(), report.fatigued_count);
    println!();
    println!("{}", report.recommendation.to_string().cyan());
}

fn print_progress(progress: &ExerciseProgress) {
    if progress.is_empty() {
        println!(
            "{}",
            format!("No sessions found for '{}'", progress.exercise).yellow()
        );
        return;
    }

    let rows: Vec<ProgressRow> = progress
        .points
        .iter()
        .map(|point| ProgressRow {
            date: point.date.format("%Y-%m-%d").to_string(),
            top_weight: format!("{:.1}", point.top_weight),
            reps: point.total_reps,
            volume: format!("{:.0}", point.volume),
            estimated_1rm: format!("{:.1}", point.estimated_1rm),
        })
        .collect();

    println!("{}", progress.exercise.bold());
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!();
    println!("{} {:.1}", "Best weight:".bold(), progress.best_weight);
    println!("{} {:.1}", "Best estimated 1RM:".bold(), progress.best_estimated_1rm);
    println!("{} {:.0}", "Total volume:".bold(), progress.total_volume);
    if let Some(change) = progress.estimated_1rm_change() {
        let change_text = format!("{:+.1}", change);
        let change_text = if change >= 0.0 {
            change_text.green()
        } else {
            change_text.red()
        };
        println!("{} {}", "Est. 1RM change:".bold(), change_text);
    }
}
