use clap::Parser;
use std::path::PathBuf;

/// Reports running percentiles and totals of contributions from repeat donors.
#[derive(Debug, Clone, Parser)]
#[command(name = "repeat-donors", version)]
pub struct Config {
    /// Pipe-delimited FEC individual contributions file
    pub input: PathBuf,

    /// File whose first line holds the percentile to report (1-100)
    pub percentile_file: PathBuf,

    /// Where to write the repeat donor report
    pub output: PathBuf,

    /// Log how long the run took
    #[arg(long)]
    pub time: bool,
}
