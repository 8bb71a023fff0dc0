//! CLI entry point for the churn insights tool.
//!
//! Loads the customer churn CSV once and runs one of the analysis
//! subcommands over it: individual sections, the full pipeline, the
//! interactive menu, or the dated text report.

use anyhow::Result;
use chrono::Local;
use churn_insights::analyzers::high_risk::{DEFAULT_MAX_TENURE, high_risk_customers};
use churn_insights::analyzers::summary::summary_insights;
use churn_insights::charts::ChartWriter;
use churn_insights::config::{DEFAULT_DATA_PATH, DEFAULT_REPORT_DIR, LogConfig};
use churn_insights::dataset::{Column, Dataset};
use churn_insights::output;
use churn_insights::report::write_weekly_report;
use churn_insights::runner::{Runner, run_menu};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "churn_insights")]
#[command(about = "Exploratory churn analysis over a customer CSV", long_about = None)]
struct Cli {
    /// Path to the customer churn CSV
    #[arg(short, long, env = "CHURN_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Directory to write PNG charts into (no charts when omitted)
    #[arg(long, env = "CHURN_CHART_DIR")]
    charts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every analysis section followed by the executive summary
    Full,
    /// Dataset shape and overall churn rate
    Overview,
    /// Churn by gender and senior-citizen status
    Demographics,
    /// Tenure distribution and churn by contract type
    TenureContract,
    /// Churn by subscribed service
    Services,
    /// Churn by payment method
    Payment,
    /// Overall churn, high-risk segments and recommendations
    Summary {
        /// Print the summary as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Churn rate for every category of one column
    Breakdown {
        /// Column to group by
        #[arg(short, long, value_enum)]
        by: Column,
    },
    /// Total customers and churn rate
    Quick,
    /// Write the dated plain-text churn report
    Weekly {
        /// Directory the report file is written into
        #[arg(short, long, env = "CHURN_REPORT_DIR", default_value = DEFAULT_REPORT_DIR)]
        report_dir: PathBuf,
    },
    /// List month-to-month customers with short tenure
    HighRisk {
        /// Tenure (months) below which a customer is listed
        #[arg(short, long, default_value_t = DEFAULT_MAX_TENURE)]
        max_tenure: u32,

        /// Maximum number of customers to list
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Export the cleaned dataset as CSV
    Clean {
        /// Destination CSV file
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Interactive menu over the loaded dataset
    Menu,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let file_guard = init_tracing();

    let cli = Cli::parse();

    let dataset = match Dataset::load_and_clean(&cli.data) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!(path = %cli.data.display(), error = %e, "Failed to load dataset");
            eprintln!("Error: {e}");
            drop(file_guard);
            std::process::exit(1);
        }
    };

    let charts = cli.charts.map(ChartWriter::new).transpose()?;
    let runner = Runner::new(&dataset, charts);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Full => {
            writeln!(out, "Customer Churn Analysis Starting...")?;
            writeln!(out, "{}", output::banner())?;
            runner.full(&mut out)?;
            output::write_heading(&mut out, "Analysis Complete!")?;
        }
        Commands::Overview => runner.overview(&mut out)?,
        Commands::Demographics => runner.demographics(&mut out)?,
        Commands::TenureContract => runner.tenure_contract(&mut out)?,
        Commands::Services => runner.services(&mut out)?,
        Commands::Payment => runner.payment(&mut out)?,
        Commands::Summary { json } => {
            if json {
                let insights = summary_insights(&dataset);
                output::print_json(&mut out, &insights)?;
            } else {
                runner.summary(&mut out)?;
            }
        }
        Commands::Breakdown { by } => runner.breakdown(&mut out, by)?,
        Commands::Quick => {
            output::write_quick_report(&mut out, &cli.data.display().to_string(), &dataset)?
        }
        Commands::Weekly { report_dir } => {
            let today = Local::now().date_naive();
            let path = write_weekly_report(&dataset, &report_dir, today)?;
            writeln!(out, "Report saved as {}", path.display())?;
        }
        Commands::HighRisk { max_tenure, limit } => {
            let customers = high_risk_customers(&dataset, max_tenure);
            info!(count = customers.len(), max_tenure, "High-risk customers selected");
            output::write_high_risk(&mut out, &customers, max_tenure, limit)?;
        }
        Commands::Clean { output: path } => {
            dataset.write_csv_path(&path)?;
            writeln!(
                out,
                "Wrote {} cleaned records to {}",
                dataset.len(),
                path.display()
            )?;
        }
        Commands::Menu => {
            let stdin = io::stdin();
            run_menu(&runner, stdin.lock(), &mut out)?;
        }
    }

    out.flush()?;
    drop(file_guard);
    Ok(())
}

/// Logging setup: colored stderr + JSON rolling log file.
fn init_tracing() -> WorkerGuard {
    let log_config = LogConfig::from_env();

    let file_appender = tracing_appender::rolling::daily(&log_config.dir, &log_config.file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", "info"));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", "debug"));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}

fn env_filter(var: &str, default_level: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(
            default_level
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        )
        .with_env_var(var)
        .from_env_lossy()
}
