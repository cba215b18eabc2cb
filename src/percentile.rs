use crate::error::{ConfigError, PipelineError};

use std::fmt;
use std::io::BufRead;
use std::str::FromStr;

/// A percentile in the range `1..=100`, validated once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percentile(u8);

impl Percentile {
    pub fn new(value: i64) -> Result<Self, ConfigError> {
        if !(1..=100).contains(&value) {
            return Err(ConfigError::PercentileOutOfRange(value));
        }
        Ok(Self(value as u8))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Zero-based nearest-rank index into `count` ascending values,
    /// i.e. `ceil(p / 100 * count) - 1`. `count` must be non-zero.
    pub fn rank_index(self, count: usize) -> usize {
        (usize::from(self.0) * count).div_ceil(100) - 1
    }

    /// Reads the percentile from the first line of `reader`.
    pub fn read_from<R: BufRead>(mut reader: R) -> Result<Self, PipelineError> {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(ConfigError::MissingPercentile.into());
        }
        Ok(line.parse()?)
    }
}

impl FromStr for Percentile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::MissingPercentile);
        }

        let value = trimmed
            .parse::<i64>()
            .map_err(|_| ConfigError::PercentileNotInteger {
                value: trimmed.to_string(),
            })?;

        Self::new(value)
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returns the nearest-rank percentile of an ascending slice, or `None` when
/// it is empty.
pub fn nearest_rank<T: Copy>(sorted: &[T], percentile: Percentile) -> Option<T> {
    if sorted.is_empty() {
        return None;
    }
    sorted.get(percentile.rank_index(sorted.len())).copied()
}
