use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use cloud_footprint::billing::{BillingExport, JsonFileExport};
use cloud_footprint::config::{ensure_initialized, load_config};
use cloud_footprint::engine::FootprintEngine;
use cloud_footprint::error::AppError;
use cloud_footprint::models::{CloudProvider, DateRange, EstimationResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cloud-footprint")]
#[command(about = "Energy and carbon estimates from cloud billing usage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Init,
    Estimate {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long, default_value = "json")]
        format: String,
    },
    Constants {
        #[arg(long)]
        provider: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
}

fn validate_format(input: &str) -> Result<OutputFormat, AppError> {
    if input.eq_ignore_ascii_case("json") {
        Ok(OutputFormat::Json)
    } else if input.eq_ignore_ascii_case("csv") {
        Ok(OutputFormat::Csv)
    } else {
        Err(AppError::Config(
            "Unsupported output format. Use json or csv".into(),
        ))
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(input.to_string()))
}

/// Open-ended bounds cover every row in the export.
fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<DateRange, AppError> {
    let start = start.map(parse_date).transpose()?.unwrap_or(NaiveDate::MIN);
    let end = end.map(parse_date).transpose()?.unwrap_or(NaiveDate::MAX);
    if start >= end {
        return Err(AppError::Config(format!(
            "start date {start} must be before end date {end}."
        )));
    }
    Ok(DateRange::new(start, end))
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn render_csv(results: &[EstimationResult]) -> String {
    let mut out = String::from(
        "timestamp,cloudProvider,accountId,accountName,serviceName,region,kilowattHours,co2e,cost,usesAverageCPUConstant\n",
    );
    for day in results {
        for e in &day.service_estimates {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{},{},{}\n",
                e.timestamp,
                e.cloud_provider,
                csv_field(&e.account_id),
                csv_field(&e.account_name),
                csv_field(&e.service_name),
                csv_field(&e.region),
                e.kilowatt_hours,
                e.co2e,
                e.cost,
                e.uses_average_cpu_constant,
            ));
        }
    }
    out
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Init => {
            ensure_initialized()?;
            println!("Initialized cloud-footprint config directory.");
        }
        Commands::Estimate {
            input,
            start,
            end,
            format,
        } => {
            let format = validate_format(&format)?;
            let range = parse_range(start.as_deref(), end.as_deref())?;
            let cfg = load_config()?;
            let export = JsonFileExport::new(input, cfg.default_provider()?);
            let rows = export.fetch_rows(range).await?;

            let engine = FootprintEngine::new(&cfg.constants_catalog());
            let results = engine.estimate(&rows);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
                OutputFormat::Csv => print!("{}", render_csv(&results)),
            }
        }
        Commands::Constants { provider } => {
            let provider: CloudProvider = provider.parse().map_err(AppError::Config)?;
            let cfg = load_config()?;
            let catalog = cfg.constants_catalog();
            let constants = catalog.get(provider).ok_or_else(|| {
                AppError::Config(format!("No constants available for {provider}."))
            })?;
            println!("{}", serde_json::to_string_pretty(constants.table())?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
