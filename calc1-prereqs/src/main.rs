use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use calc1_prereqs::config::ScraperConfig;
use calc1_prereqs::pipeline::{self, RunOptions, DEFAULT_OUTPUT};

#[derive(Parser)]
#[command(
    name = "calc1-prereqs",
    about = "Find UCLA courses that require Mathematics 31A.",
    version
)]
struct Cli {
    /// Output Excel filename
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Also save a CSV copy alongside the Excel file
    #[arg(long)]
    csv: bool,

    /// Fetch every subject area individually (slower, ~5 min) instead of
    /// using the search endpoint
    #[arg(long)]
    all_subjects: bool,

    /// TOML config file (API base, retry and logging settings)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log level for diagnostics: trace, debug, info, warn, error
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let mut config = match &cli.config {
        Some(path) => ScraperConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScraperConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    let _logging_guard = calc1_prereqs::logging::init_logging(
        config.log_dir.as_deref().map(Path::new),
        "calc1-prereqs",
        &config.log_level,
    )?;

    pipeline::print_banner();

    let options = RunOptions {
        out: cli.out,
        csv: cli.csv,
        all_subjects: cli.all_subjects,
    };
    let outcome = pipeline::run(&options, &config).await?;
    tracing::debug!("Run finished: {:?}", outcome);

    Ok(outcome.is_success())
}
