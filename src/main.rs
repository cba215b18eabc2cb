use repeat_donors::{config::Config, process_files};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let config = Config::parse();
    validate_input_files(&config)?;

    let start = config.time.then(Instant::now);
    let summary = process_files(&config)
        .with_context(|| format!("Failed to process '{}'", config.input.display()))?;

    info!(
        lines = summary.lines_read,
        rejected = summary.rejected,
        rows = summary.rows_written,
        donors = summary.donors,
        pools = summary.pools,
        "Finished"
    );

    if let Some(start) = start {
        info!(elapsed = ?start.elapsed(), "Running time");
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "repeat_donors=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn validate_input_files(config: &Config) -> Result<()> {
    for path in [&config.input, &config.percentile_file] {
        ensure!(path.is_file(), "File '{}' does not exist", path.display());
    }
    Ok(())
}
