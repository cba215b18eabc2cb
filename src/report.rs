use crate::amount::round_dollars;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// One output line: `CMTE_ID|ZIP|YEAR|PERCENTILE|TOTAL|COUNT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub recipient: String,
    pub zip: String,
    pub year: u16,
    pub percentile: Decimal,
    pub total: Decimal,
    pub count: usize,
}

impl ReportRow {
    /// Builds a row, rounding the percentile and total to whole dollars.
    pub fn new(
        recipient: impl Into<String>,
        zip: impl Into<String>,
        year: u16,
        percentile: Decimal,
        total: Decimal,
        count: usize,
    ) -> Self {
        Self {
            recipient: recipient.into(),
            zip: zip.into(),
            year,
            percentile: round_dollars(percentile),
            total: round_dollars(total),
            count,
        }
    }
}

pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(b'|')
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(inner);

        Self { writer }
    }

    /// Writes one row and flushes it through to the underlying writer.
    pub fn write_row(&mut self, row: &ReportRow) -> Result<(), csv::Error> {
        self.writer.serialize(row)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}
