use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Percentile must be between 1 and 100, got {0}")]
    PercentileOutOfRange(i64),

    #[error("Percentile is not an integer: {value:?}")]
    PercentileNotInteger { value: String },

    #[error("Percentile source is empty")]
    MissingPercentile,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
