use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ticketlog_cli::{AppConfig, CliError, init_logging, paths};
use ticketlog_generate::{GenerationEngine, validate_number, write_document};

#[derive(Parser, Debug)]
#[command(name = "ticket_gen", version, about = "Generate a synthetic helpdesk activity document")]
struct Cli {
    /// Number of tickets to generate (1 or greater).
    #[arg(short = 'n', long = "number", allow_negative_numbers = true)]
    number: i64,
    /// Output JSON path; `.json` is appended when no extension is given.
    #[arg(short = 'o', long = "output")]
    output: PathBuf,
    /// Seed for reproducible documents.
    #[arg(long)]
    seed: Option<u64>,
    /// Optional TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also append JSON log lines to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ticket_gen: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    validate_number(cli.number)?;
    let output = paths::with_default_extension(&cli.output, "json")?;
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.seed.is_some() {
        config.generate.seed = cli.seed;
    }
    init_logging(cli.log_file.as_deref())?;

    let engine = GenerationEngine::new(config.generate);
    let document = engine.run(cli.number)?;
    let bytes = write_document(&output, &document)?;

    tracing::info!(
        event = "document_written",
        path = %output.display(),
        tickets = document.metadata.activities_count,
        bytes
    );
    Ok(())
}
