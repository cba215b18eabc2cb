use crate::engine::aggregator::{Aggregator, PoolKey};
use crate::engine::donors::{Classification, DonorHistory, DonorId};
use crate::percentile::Percentile;
use crate::record::Contribution;
use crate::report::ReportRow;

use tracing::trace;

pub struct Engine {
    donors: DonorHistory,
    pools: Aggregator,
    percentile: Percentile,
}

impl Engine {
    pub fn new(percentile: Percentile) -> Self {
        Self {
            donors: DonorHistory::new(),
            pools: Aggregator::new(),
            percentile,
        }
    }

    /// Classifies the contribution and, when it comes from a repeat donor,
    /// folds it into its (recipient, zip, year) pool and returns the row to
    /// report.
    pub fn apply_contribution(&mut self, contribution: Contribution) -> Option<ReportRow> {
        let Contribution {
            recipient,
            donor_name,
            zip,
            year,
            amount,
        } = contribution;

        let donor = DonorId::new(donor_name, zip.clone());
        let classification = self.donors.classify(donor, year);
        trace!(?classification, %recipient, %zip, year, "classified contribution");

        if classification != Classification::Repeat {
            return None;
        }

        let key = PoolKey::new(recipient, zip, year);
        let snapshot = self
            .pools
            .record_and_query(key.clone(), amount, self.percentile);

        Some(ReportRow::new(
            key.recipient,
            key.zip,
            key.year,
            snapshot.percentile,
            snapshot.total,
            snapshot.count,
        ))
    }

    pub fn donors(&self) -> &DonorHistory {
        &self.donors
    }

    pub fn pools(&self) -> &Aggregator {
        &self.pools
    }
}
