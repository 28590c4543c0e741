//! NutriGenius CLI - Command-line interface for the nutrition engine
//!
//! Commands:
//! - summary: daily nutrition summary for a calendar date
//! - trend: 7-day sliding-window trend
//! - progress: percentage-of-goal progress for a calendar date
//! - insights: local rule-based nutrition analysis
//! - validate: validate food-log records against the wire schema

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use nutrigenius_core::aggregator::NutritionAggregator;
use nutrigenius_core::goals::GoalResolver;
use nutrigenius_core::insights::LocalInsightEngine;
use nutrigenius_core::progress::ProgressCalculator;
use nutrigenius_core::schema::{FoodLogRecord, SCHEMA_VERSION};
use nutrigenius_core::types::FoodLogEntry;
use nutrigenius_core::CORE_VERSION;

/// NutriGenius - deterministic nutrition engine for food-log data
#[derive(Parser)]
#[command(name = "nutrigenius")]
#[command(author = "NutriGenius")]
#[command(version = CORE_VERSION)]
#[command(about = "Aggregate food logs into summaries, trends, progress, and insights", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Daily nutrition summary for a calendar date
    Summary {
        #[command(flatten)]
        input: InputArgs,

        /// Calendar date (YYYY-MM-DD); defaults to today in the given offset
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// 7-day sliding-window trend ending at a reference instant
    Trend {
        #[command(flatten)]
        input: InputArgs,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Percentage-of-goal progress for a calendar date
    Progress {
        #[command(flatten)]
        input: InputArgs,

        /// Fitness goal label (e.g. "weight loss", "muscle gain")
        #[arg(long, default_value = "general health")]
        goal: String,

        /// Calendar date (YYYY-MM-DD); defaults to today in the given offset
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Local rule-based nutrition analysis
    Insights {
        #[command(flatten)]
        input: InputArgs,

        /// Reference instant (RFC 3339); defaults to the current time
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },

    /// Validate food-log records against the wire schema
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct InputArgs {
    /// Input file path (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Input format
    #[arg(long, default_value = "ndjson")]
    input_format: InputFormat,

    /// UTC offset of the user's calendar day, in minutes east
    #[arg(long, default_value = "0")]
    utc_offset_minutes: i32,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one record per line)
    Ndjson,
    /// JSON array of records
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), NutriCliError> {
    match cli.command {
        Commands::Summary { input, date } => cmd_summary(&input, date),
        Commands::Trend { input, now } => cmd_trend(&input, now),
        Commands::Progress { input, goal, date } => cmd_progress(&input, &goal, date),
        Commands::Insights { input, now } => cmd_insights(&input, now),
        Commands::Validate { input, json } => cmd_validate(&input, json),
    }
}

fn cmd_summary(input: &InputArgs, date: Option<NaiveDate>) -> Result<(), NutriCliError> {
    let aggregator = aggregator_for(input)?;
    let entries = load_entries(input)?;
    let date = date.unwrap_or_else(|| aggregator.local_date(Utc::now()));

    let summary = aggregator.daily_summary(&entries, date);
    print_json(&summary, input.pretty)
}

fn cmd_trend(input: &InputArgs, now: Option<DateTime<Utc>>) -> Result<(), NutriCliError> {
    let aggregator = aggregator_for(input)?;
    let entries = load_entries(input)?;
    let now = now.unwrap_or_else(Utc::now);

    let trend = aggregator.weekly_trend(&entries, now);
    print_json(&trend, input.pretty)
}

fn cmd_progress(
    input: &InputArgs,
    goal_label: &str,
    date: Option<NaiveDate>,
) -> Result<(), NutriCliError> {
    let aggregator = aggregator_for(input)?;
    let entries = load_entries(input)?;
    let date = date.unwrap_or_else(|| aggregator.local_date(Utc::now()));

    let summary = aggregator.daily_summary(&entries, date);
    let goal = GoalResolver::resolve(goal_label);
    let report = ProgressCalculator::progress(&summary, &goal);
    print_json(&report, input.pretty)
}

fn cmd_insights(input: &InputArgs, now: Option<DateTime<Utc>>) -> Result<(), NutriCliError> {
    let aggregator = aggregator_for(input)?;
    let entries = load_entries(input)?;
    let now = now.unwrap_or_else(Utc::now);

    let summary = aggregator.daily_summary(&entries, aggregator.local_date(now));
    let trend = aggregator.weekly_trend(&entries, now);
    let analysis = LocalInsightEngine::new().fallback_analysis(&summary, &trend);
    print_json(&analysis, input.pretty)
}

fn cmd_validate(input: &InputArgs, json: bool) -> Result<(), NutriCliError> {
    let records = parse_records(input)?;
    let now = Utc::now();

    let mut errors: Vec<ValidationErrorDetail> = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if let Err(e) = record.clone().into_entry(now) {
            errors.push(ValidationErrorDetail {
                index,
                meal_name: record.meal_name.clone(),
                error: e.to_string(),
            });
        }
    }

    let report = ValidationReport {
        schema: SCHEMA_VERSION.to_string(),
        total_records: records.len(),
        valid_records: records.len() - errors.len(),
        invalid_records: errors.len(),
        errors,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Schema:          {}", report.schema);
        println!("Total records:   {}", report.total_records);
        println!("Valid records:   {}", report.valid_records);
        println!("Invalid records: {}", report.invalid_records);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Record '{}' (index {}): {}", err.meal_name, err.index, err.error);
            }
        }
    }

    if report.invalid_records > 0 {
        Err(NutriCliError::ValidationFailed(report.invalid_records))
    } else {
        Ok(())
    }
}

// Helper functions

fn aggregator_for(input: &InputArgs) -> Result<NutritionAggregator, NutriCliError> {
    let offset = FixedOffset::east_opt(input.utc_offset_minutes * 60)
        .ok_or(NutriCliError::InvalidOffset(input.utc_offset_minutes))?;
    Ok(NutritionAggregator::new(offset))
}

fn read_input(input: &InputArgs) -> Result<String, NutriCliError> {
    if input.input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("reading food-log records from stdin (end with EOF)...");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(&input.input)?)
    }
}

fn parse_records(input: &InputArgs) -> Result<Vec<FoodLogRecord>, NutriCliError> {
    let data = read_input(input)?;
    match input.input_format {
        InputFormat::Ndjson => data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_str(line).map_err(NutriCliError::from))
            .collect(),
        InputFormat::Json => Ok(serde_json::from_str(&data)?),
    }
}

fn load_entries(input: &InputArgs) -> Result<Vec<FoodLogEntry>, NutriCliError> {
    let records = parse_records(input)?;
    if records.is_empty() {
        return Err(NutriCliError::NoRecords);
    }

    let now = Utc::now();
    records
        .into_iter()
        .map(|record| record.into_entry(now).map_err(NutriCliError::from))
        .collect()
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<(), NutriCliError> {
    if pretty {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", serde_json::to_string(value)?);
    }
    Ok(())
}

// Error handling

enum NutriCliError {
    Io(io::Error),
    Json(serde_json::Error),
    Record(nutrigenius_core::NutritionError),
    InvalidOffset(i32),
    NoRecords,
    ValidationFailed(usize),
}

impl From<io::Error> for NutriCliError {
    fn from(e: io::Error) -> Self {
        NutriCliError::Io(e)
    }
}

impl From<serde_json::Error> for NutriCliError {
    fn from(e: serde_json::Error) -> Self {
        NutriCliError::Json(e)
    }
}

impl From<nutrigenius_core::NutritionError> for NutriCliError {
    fn from(e: nutrigenius_core::NutritionError) -> Self {
        NutriCliError::Record(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<NutriCliError> for CliError {
    fn from(e: NutriCliError) -> Self {
        match e {
            NutriCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            NutriCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            NutriCliError::Record(e) => CliError {
                code: "RECORD_ERROR".to_string(),
                message: e.to_string(),
                hint: Some(format!("Ensure input matches the {SCHEMA_VERSION} schema")),
            },
            NutriCliError::InvalidOffset(minutes) => CliError {
                code: "INVALID_OFFSET".to_string(),
                message: format!("{minutes} minutes is not a valid UTC offset"),
                hint: Some("Offsets must be within +/- 24 hours".to_string()),
            },
            NutriCliError::NoRecords => CliError {
                code: "NO_RECORDS".to_string(),
                message: "Input contained no food-log records".to_string(),
                hint: Some("Provide at least one record".to_string()),
            },
            NutriCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{count} invalid record(s)"),
                hint: None,
            },
        }
    }
}

#[derive(serde::Serialize)]
struct ValidationReport {
    schema: String,
    total_records: usize,
    valid_records: usize,
    invalid_records: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    meal_name: String,
    error: String,
}
