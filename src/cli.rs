use crate::report::{render_brackets, render_outcome};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tacf_score::config::AppConfig;
use tacf_score::error::AppError;
use tacf_score::scoring::{
    age_on, resolve_age_bracket, resolve_height_bracket, CandidateInput, EvaluationEngine,
    Measurements, ReferenceTables, Sex, ThresholdStore,
};
use tacf_score::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "tacf",
    about = "Score TACF physical fitness test results against the reference tables",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one candidate and print the evaluation
    Evaluate(EvaluateArgs),
    /// Show which age and height brackets a candidate falls into
    Brackets(BracketArgs),
    /// Inspect reference threshold tables
    Tables {
        #[command(subcommand)]
        command: TablesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum TablesCommand {
    /// Load and validate a reference CSV (defaults to the configured tables)
    Check(TablesCheckArgs),
}

#[derive(Args, Debug)]
struct DemographicArgs {
    /// Candidate sex (male/female)
    #[arg(long, value_parser = parse_sex)]
    sex: Sex,
    /// Age in completed years
    #[arg(long, required_unless_present = "birth_date", conflicts_with = "birth_date")]
    age: Option<u16>,
    /// Birth date (YYYY-MM-DD), used instead of --age
    #[arg(long, value_parser = parse_date)]
    birth_date: Option<NaiveDate>,
    /// Assessment date for --birth-date (defaults to today)
    #[arg(long, value_parser = parse_date, requires = "birth_date")]
    assessed_on: Option<NaiveDate>,
    /// Height in centimetres
    #[arg(long, value_parser = parse_measurement)]
    height: f64,
}

impl DemographicArgs {
    fn age(&self) -> Result<u16, AppError> {
        match (self.age, self.birth_date) {
            (Some(age), _) => Ok(age),
            (None, Some(birth_date)) => {
                let assessed_on = self
                    .assessed_on
                    .unwrap_or_else(|| Local::now().date_naive());
                Ok(age_on(birth_date, assessed_on))
            }
            (None, None) => Err(AppError::InvalidInput(
                "either --age or --birth-date is required".to_string(),
            )),
        }
    }
}

#[derive(Args, Debug)]
struct EvaluateArgs {
    #[command(flatten)]
    demographics: DemographicArgs,
    /// Waist circumference in centimetres
    #[arg(long, value_parser = parse_measurement)]
    waist: Option<f64>,
    /// Upper-body flexion/extension repetitions
    #[arg(long, value_parser = parse_measurement)]
    upper_body: Option<f64>,
    /// Trunk flexion repetitions
    #[arg(long, value_parser = parse_measurement)]
    trunk_flexion: Option<f64>,
    /// Distance covered in the 12-minute run, in metres
    #[arg(long, value_parser = parse_measurement)]
    run: Option<f64>,
    /// Print the evaluation as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BracketArgs {
    #[command(flatten)]
    demographics: DemographicArgs,
}

#[derive(Args, Debug)]
struct TablesCheckArgs {
    /// Reference CSV to validate
    #[arg(long)]
    path: Option<PathBuf>,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "configuration loaded");

    match cli.command {
        Command::Evaluate(args) => run_evaluate(&config, args),
        Command::Brackets(args) => run_brackets(args),
        Command::Tables {
            command: TablesCommand::Check(args),
        } => run_tables_check(&config, args),
    }
}

fn parse_sex(raw: &str) -> Result<Sex, String> {
    Sex::parse(raw).ok_or_else(|| format!("unknown sex '{raw}' (expected male or female)"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_measurement(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("'{raw}' is not a number ({err})"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be a non-negative number"));
    }
    Ok(value)
}

fn load_store(
    config: &AppConfig,
    override_path: Option<PathBuf>,
) -> Result<ThresholdStore, AppError> {
    let path = override_path.or_else(|| config.reference.thresholds_path.clone());
    let store = match path {
        Some(path) => {
            info!(path = %path.display(), "loading reference tables from file");
            ReferenceTables::from_path(path)?
        }
        None => ReferenceTables::embedded()?,
    };
    Ok(store)
}

fn run_evaluate(config: &AppConfig, args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        demographics,
        waist,
        upper_body,
        trunk_flexion,
        run,
        json,
    } = args;

    let engine = EvaluationEngine::new(load_store(config, None)?);
    let input = CandidateInput {
        sex: demographics.sex,
        age: demographics.age()?,
        height_cm: demographics.height,
        measurements: Measurements {
            waist_cm: waist,
            upper_body_reps: upper_body,
            trunk_flexion_reps: trunk_flexion,
            run_meters: run,
        },
    };

    let outcome = engine.evaluate(&input);
    info!(
        grade = outcome.final_grade,
        verdict = %outcome.verdict,
        rating = outcome.rating.code(),
        "candidate evaluated"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        render_outcome(&input, &outcome);
    }
    Ok(())
}

fn run_brackets(args: BracketArgs) -> Result<(), AppError> {
    let demographics = args.demographics;
    let age = demographics.age()?;
    render_brackets(
        demographics.sex,
        age,
        demographics.height,
        resolve_age_bracket(age, demographics.sex),
        resolve_height_bracket(demographics.height, demographics.sex),
    );
    Ok(())
}

fn run_tables_check(config: &AppConfig, args: TablesCheckArgs) -> Result<(), AppError> {
    let store = load_store(config, args.path)?;
    println!(
        "Reference tables OK: version {}, {} records",
        store.version(),
        store.len()
    );
    Ok(())
}
