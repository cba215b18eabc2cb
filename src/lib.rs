pub mod amount;
pub mod config;
pub mod engine;
pub mod error;
pub mod percentile;
pub mod record;
pub mod report;

use crate::config::Config;
use crate::engine::engine::Engine;
use crate::error::PipelineError;
use crate::percentile::Percentile;
use crate::record::{Contribution, RawRecord, Rejection};
use crate::report::ReportWriter;

use csv::{ByteRecord, ByteRecordsIntoIter, ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Valid contributions read from a pipe-delimited FEC stream, in arrival
/// order. Malformed records are skipped and counted.
pub struct ContributionStream<R> {
    records: ByteRecordsIntoIter<R>,
    lines_read: u64,
    rejected: u64,
}

impl<R: Read> ContributionStream<R> {
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    fn reject(&mut self, reason: Rejection) {
        self.rejected += 1;
        debug!(line = self.lines_read, %reason, "Skipping record");
    }
}

impl<R: Read> Iterator for ContributionStream<R> {
    type Item = Result<Contribution, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let result: Result<ByteRecord, csv::Error> = self.records.next()?;
            self.lines_read += 1;

            // Names in FEC files are not always valid UTF-8
            let record = match result {
                Ok(bytes) => StringRecord::from_byte_record_lossy(bytes),
                Err(e) if e.is_io_error() => return Some(Err(e.into())),
                Err(_) => {
                    self.reject(Rejection::Undecodable);
                    continue;
                }
            };

            match RawRecord::from_record(&record).and_then(Contribution::try_from) {
                Ok(contribution) => return Some(Ok(contribution)),
                Err(reason) => self.reject(reason),
            }
        }
    }
}

pub fn stream_records<R: Read>(reader: R) -> ContributionStream<R> {
    let records = ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
        .into_byte_records();

    ContributionStream {
        records,
        lines_read: 0,
        rejected: 0,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub lines_read: u64,
    pub rejected: u64,
    pub rows_written: u64,
    pub donors: usize,
    pub pools: usize,
}

/// Runs the whole pipeline over `input`, writing one report row to `output`
/// per repeat contribution as soon as it is seen.
pub fn process_stream<R: Read, W: Write>(
    input: R,
    output: W,
    percentile: Percentile,
) -> Result<RunSummary, PipelineError> {
    let mut engine = Engine::new(percentile);
    let mut report = ReportWriter::new(output);
    let mut contributions = stream_records(input);
    let mut rows_written = 0;

    for contribution in contributions.by_ref() {
        if let Some(row) = engine.apply_contribution(contribution?) {
            report.write_row(&row)?;
            rows_written += 1;
        }
    }

    report.into_inner()?;

    Ok(RunSummary {
        lines_read: contributions.lines_read(),
        rejected: contributions.rejected(),
        rows_written,
        donors: engine.donors().len(),
        pools: engine.pools().len(),
    })
}

pub fn process_files(config: &Config) -> Result<RunSummary, PipelineError> {
    let percentile = Percentile::read_from(BufReader::new(open(&config.percentile_file)?))?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        %percentile,
        "Processing contributions"
    );

    let input = open(&config.input)?;
    let output = File::create(&config.output).map_err(|source| PipelineError::Open {
        path: config.output.clone(),
        source,
    })?;

    process_stream(input, output, percentile)
}

fn open(path: &Path) -> Result<File, PipelineError> {
    File::open(path).map_err(|source| PipelineError::Open {
        path: path.to_path_buf(),
        source,
    })
}
