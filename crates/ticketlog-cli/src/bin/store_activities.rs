use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ticketlog_cli::{AppConfig, CliError, init_logging, paths};
use ticketlog_load::load_file;

#[derive(Parser, Debug)]
#[command(
    name = "store_activities",
    version,
    about = "Load an activity document into a new SQLite store"
)]
struct Cli {
    /// Input document; must be an existing `.json` file.
    #[arg(short = 'i', long = "input")]
    input: PathBuf,
    /// Output SQLite path; `.db` is appended when no extension is given.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
    /// Optional TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also append JSON log lines to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("store_activities: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let input = paths::require_existing(&cli.input, "json")?;
    let output = paths::with_default_extension(&cli.output, "db")?;
    let config = AppConfig::load(cli.config.as_deref())?;
    init_logging(cli.log_file.as_deref())?;

    let report = load_file(&input, &output, &config.load).await?;

    tracing::info!(
        event = "store_written",
        run_id = %report.run_id,
        path = %output.display(),
        tickets = report.tickets,
        last_task_id = report.last_task_id,
        duration_ms = report.duration_ms
    );
    Ok(())
}
