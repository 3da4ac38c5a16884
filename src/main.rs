use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shift_scheduler::config::SchedulerConfig;
use shift_scheduler::display::{
    print_schedule, write_report_json, write_schedule_to_file, UNFILLED_LABEL,
};
use shift_scheduler::parser::{load_workers, reject_reserved_identities};
use shift_scheduler::schedule::{AssignmentEngine, PoolLimits, ScheduleReport, WorkerPool};
use shift_scheduler::web;

#[derive(Parser)]
#[command(name = "shift-scheduler", version, about = "Weekly shift assignment with supervisor fallback")]
struct Cli {
    /// Optional TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a schedule from a preference CSV
    Generate {
        csv_path: PathBuf,

        /// Seed for the random fill, overrides the config file
        #[arg(long)]
        seed: Option<u64>,

        /// Also write the text schedule to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the report as JSON to this file
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Serve the upload and schedule API
    Web {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

fn generate(
    config: &SchedulerConfig,
    csv_path: PathBuf,
    output: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let workers = load_workers(&csv_path)
        .with_context(|| format!("Failed to load preferences from {}", csv_path.display()))?;
    reject_reserved_identities(&workers, &[config.supervisor_label.as_str(), UNFILLED_LABEL])?;
    let mut pool = WorkerPool::with_limits(workers, PoolLimits::from(config));
    if pool.is_empty() {
        warn!("Preference table has no workers, only the supervisor can be scheduled");
    }

    let mut engine = AssignmentEngine::from_config(config);
    let report = ScheduleReport::new(engine.generate(&mut pool), config.seed);

    print_schedule(&report, &config.supervisor_label)?;

    if let Some(path) = output {
        write_schedule_to_file(&report, &config.supervisor_label, &path)?;
        info!(path = %path.display(), "Schedule written");
    }
    if let Some(path) = json {
        write_report_json(&report, &path)?;
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SchedulerConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Command::Generate {
            csv_path,
            seed,
            output,
            json,
        } => {
            if seed.is_some() {
                config.seed = seed;
            }
            generate(&config, csv_path, output, json)
        }
        Command::Web { port } => {
            let password = config
                .admin_password
                .clone()
                .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
                .context("Set admin_password in the config or ADMIN_PASSWORD in the environment")?;

            info!(port, "Starting web server");
            web::start_server(port, config, password).await?;
            Ok(())
        }
    }
}
