use crate::percentile::{nearest_rank, Percentile};

use rust_decimal::Decimal;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PoolKey {
    pub recipient: String,
    pub zip: String,
    pub year: u16,
}

impl PoolKey {
    pub fn new(recipient: impl Into<String>, zip: impl Into<String>, year: u16) -> Self {
        Self {
            recipient: recipient.into(),
            zip: zip.into(),
            year,
        }
    }
}

/// Repeat-donor contributions for one (recipient, zip, year), kept in
/// ascending order along with their exact sum.
#[derive(Debug, Clone, Default)]
pub struct ContributionPool {
    amounts: Vec<Decimal>,
    total: Decimal,
}

impl ContributionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts after any equal amounts so ordering stays stable.
    pub fn insert(&mut self, amount: Decimal) {
        let pos = self.amounts.partition_point(|existing| *existing <= amount);
        self.amounts.insert(pos, amount);
        self.total += amount;
    }

    pub fn amounts(&self) -> &[Decimal] {
        &self.amounts
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn count(&self) -> usize {
        self.amounts.len()
    }

    pub fn percentile(&self, percentile: Percentile) -> Option<Decimal> {
        nearest_rank(&self.amounts, percentile)
    }

    pub fn is_valid(&self) -> bool {
        let sorted = self.amounts.windows(2).all(|pair| pair[0] <= pair[1]);
        let expected_total: Decimal = self.amounts.iter().copied().sum();

        sorted && self.total == expected_total
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub percentile: Decimal,
    pub total: Decimal,
    pub count: usize,
}

#[derive(Debug, Default)]
pub struct Aggregator {
    pools: HashMap<PoolKey, ContributionPool>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to the pool for `key` and reports the pool's percentile,
    /// total and count including it.
    pub fn record_and_query(
        &mut self,
        key: PoolKey,
        amount: Decimal,
        percentile: Percentile,
    ) -> PoolSnapshot {
        let pool = self.pools.entry(key).or_default();
        pool.insert(amount);

        PoolSnapshot {
            // The pool holds at least the amount just inserted
            percentile: pool.percentile(percentile).unwrap_or(amount),
            total: pool.total(),
            count: pool.count(),
        }
    }

    pub fn pool(&self, key: &PoolKey) -> Option<&ContributionPool> {
        self.pools.get(key)
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn p(value: i64) -> Percentile {
        Percentile::new(value).unwrap()
    }

    #[test]
    fn test_pool_keeps_ascending_order() {
        let mut pool = ContributionPool::new();
        for amount in ["150.45", "34.00", "100.24", "34", "500", "0.01"] {
            pool.insert(dec(amount));
            assert!(pool.is_valid());
        }

        assert_eq!(
            pool.amounts(),
            &[dec("0.01"), dec("34"), dec("34.00"), dec("100.24"), dec("150.45"), dec("500")]
        );
        assert_eq!(pool.total(), dec("818.70"));
        assert_eq!(pool.count(), 6);
    }

    #[test]
    fn test_pool_invalid_when_total_drifts() {
        let mut pool = ContributionPool::new();
        pool.insert(dec("10"));
        pool.total += Decimal::ONE;

        assert!(!pool.is_valid());
    }

    #[test]
    fn test_record_and_query_evolution() {
        let mut aggregator = Aggregator::new();
        let key = PoolKey::new("C00384516", "02895", 2017);

        let snapshot = aggregator.record_and_query(key.clone(), dec("150.45"), p(30));
        assert_eq!(
            snapshot,
            PoolSnapshot {
                percentile: dec("150.45"),
                total: dec("150.45"),
                count: 1
            }
        );

        let snapshot = aggregator.record_and_query(key.clone(), dec("34.00"), p(30));
        assert_eq!(snapshot.percentile, dec("34.00"));
        assert_eq!(snapshot.total, dec("184.45"));
        assert_eq!(snapshot.count, 2);

        let snapshot = aggregator.record_and_query(key.clone(), dec("100.24"), p(30));
        assert_eq!(snapshot.percentile, dec("34.00"));
        assert_eq!(snapshot.total, dec("284.69"));
        assert_eq!(snapshot.count, 3);

        let pool = aggregator.pool(&key).unwrap();
        assert_eq!(pool.amounts(), &[dec("34.0"), dec("100.24"), dec("150.45")]);
        assert_eq!(pool.total(), dec("284.69"));
        assert!(pool.is_valid());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut aggregator = Aggregator::new();
        let first = PoolKey::new("C00384516", "02895", 2017);
        let second = PoolKey::new("C02244516", "02615", 2015);

        aggregator.record_and_query(first.clone(), dec("150.45"), p(50));
        aggregator.record_and_query(second.clone(), dec("12"), p(50));
        aggregator.record_and_query(first.clone(), dec("34.0"), p(50));

        assert_eq!(aggregator.len(), 2);
        assert_eq!(aggregator.pool(&first).unwrap().count(), 2);
        assert_eq!(aggregator.pool(&second).unwrap().amounts(), &[dec("12")]);
        assert_eq!(aggregator.pool(&second).unwrap().total(), dec("12"));
    }

    #[test]
    fn test_year_is_part_of_key() {
        let mut aggregator = Aggregator::new();

        aggregator.record_and_query(PoolKey::new("C00384516", "02895", 2017), dec("1"), p(50));
        aggregator.record_and_query(PoolKey::new("C00384516", "02895", 2018), dec("2"), p(50));

        assert_eq!(aggregator.len(), 2);
    }

    #[test]
    fn test_percentile_tracks_new_values() {
        let mut aggregator = Aggregator::new();
        let key = PoolKey::new("C00384516", "02895", 2017);

        let results: Vec<Decimal> = [40, 15, 50, 20, 35]
            .into_iter()
            .map(|v| {
                aggregator
                    .record_and_query(key.clone(), Decimal::from(v), p(40))
                    .percentile
            })
            .collect();

        // [40] [15,40] [15,40,50] [15,20,40,50] [15,20,35,40,50]
        let expected: Vec<Decimal> = [40, 15, 40, 20, 20].into_iter().map(Decimal::from).collect();
        assert_eq!(results, expected);
    }
}
