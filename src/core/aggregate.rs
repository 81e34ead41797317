use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::core::record::{FieldValue, Record};

/// Group a numeric field into integer buckets over a fixed domain.
///
/// Discretization is **floor**: a 4.8 rating lands in bucket 4, consistent
/// with the `rating >= 4` reading of the "N stars and up" filter.
#[derive(Debug, Clone)]
pub struct AggregationSpec {
    pub field: &'static str,
    pub domain: RangeInclusive<i64>,
}

impl AggregationSpec {
    pub fn new(field: &'static str, domain: RangeInclusive<i64>) -> Self {
        Self { field, domain }
    }
}

/// Per-bucket counts over a collection, with the collection size kept as the
/// percentage denominator. Buckets cover the whole domain (zero-filled);
/// values outside the domain are dropped from the histogram but still count
/// toward the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    counts: BTreeMap<i64, u64>,
    total: u64,
}

impl Histogram {
    pub fn over<T: Record>(records: &[T], spec: &AggregationSpec) -> Self {
        debug_assert!(
            T::FIELDS.contains(&spec.field),
            "aggregation references unknown field `{}`",
            spec.field
        );

        let mut counts: BTreeMap<i64, u64> =
            spec.domain.clone().map(|key| (key, 0)).collect();

        for record in records {
            if let Some(FieldValue::Number(n)) = record.field(spec.field) {
                if n.is_finite() {
                    if let Some(slot) = counts.get_mut(&(n.floor() as i64)) {
                        *slot += 1;
                    }
                }
            }
        }

        Self { counts, total: records.len() as u64 }
    }

    pub fn count(&self, key: i64) -> u64 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    /// Share of the whole collection in this bucket, in percent. Defined as
    /// 0 for every bucket when the collection is empty.
    pub fn percentage(&self, key: i64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(key) as f64 / self.total as f64 * 100.0
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn counts(&self) -> &BTreeMap<i64, u64> {
        &self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::testing::Sample;

    fn spec() -> AggregationSpec {
        AggregationSpec::new("rating", 1..=5)
    }

    #[test]
    fn test_floor_bucketing() {
        let records = vec![
            Sample::new("a", 4.8),
            Sample::new("b", 4.0),
            Sample::new("c", 3.2),
        ];

        let histogram = Histogram::over(&records, &spec());
        assert_eq!(histogram.count(4), 2);
        assert_eq!(histogram.count(3), 1);
        assert_eq!(histogram.count(5), 0);
    }

    #[test]
    fn test_out_of_domain_dropped_but_counted_in_total() {
        let records = vec![Sample::new("a", 4.5), Sample::new("zero", 0.0)];

        let histogram = Histogram::over(&records, &spec());
        assert_eq!(histogram.count(4), 1);
        assert_eq!(histogram.total(), 2);
        // Half the collection is in-domain, so percentages sum to 50.
        let sum: f64 = (1..=5).map(|k| histogram.percentage(k)).sum();
        assert!((sum - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentages_sum_to_hundred_when_all_in_domain() {
        let records = vec![
            Sample::new("a", 5.0),
            Sample::new("b", 4.1),
            Sample::new("c", 4.9),
            Sample::new("d", 2.0),
        ];

        let histogram = Histogram::over(&records, &spec());
        let sum: f64 = (1..=5).map(|k| histogram.percentage(k)).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_collection_has_zero_percentages() {
        let histogram = Histogram::over(&[] as &[Sample], &spec());

        for key in 1..=5 {
            assert_eq!(histogram.percentage(key), 0.0);
        }
        assert_eq!(histogram.total(), 0);
    }
}
