use crate::core::aggregate::{AggregationSpec, Histogram};
use crate::core::ordering::{sort_stable, SortSpec};
use crate::core::predicate::{Criterion, Predicate};
use crate::core::record::Record;

/// Everything one query call needs: filter criteria, at most one sort
/// field, and an optional aggregation. All transient values, rebuilt per
/// call from UI state; the default spec is the identity query.
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    pub criteria: Vec<Criterion>,
    pub sort: Option<SortSpec>,
    pub aggregate: Option<AggregationSpec>,
}

/// A freshly allocated result; the input collection is never touched.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    /// Filtered, then stably sorted.
    pub items: Vec<T>,
    /// Histogram over the *filtered* collection, when aggregation was
    /// requested.
    pub stats: Option<Histogram>,
}

/// Run a query over an in-memory collection.
///
/// Evaluation order is fixed: filter (preserving input order), then
/// aggregate over the filtered set, then stable-sort. Stats must reflect
/// what the user currently sees, so aggregation always runs after the
/// filter and never after a limit applied by the caller.
///
/// Nothing here fails on data: inactive criteria are skipped and records
/// missing a field are excluded or sorted first per the criterion and
/// comparator rules. Cost is one filter pass plus one sort, cheap enough to
/// run on every keystroke.
pub fn query<T: Record + Clone>(collection: &[T], spec: &QuerySpec) -> QueryResult<T> {
    let predicate = Predicate::new::<T>(spec.criteria.clone());

    let mut items: Vec<T> = collection
        .iter()
        .filter(|record| predicate.matches(*record))
        .cloned()
        .collect();

    let stats = spec
        .aggregate
        .as_ref()
        .map(|aggregate| Histogram::over(&items, aggregate));

    if let Some(sort) = &spec.sort {
        sort_stable(&mut items, sort);
    }

    QueryResult { items, stats }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ordering::SortSpec;
    use crate::core::record::testing::Sample;

    fn collection() -> Vec<Sample> {
        vec![
            Sample::new("Skyline Lounge", 4.8),
            Sample::new("Neon Club", 3.2),
            Sample::new("Velvet Underground", 4.8),
        ]
    }

    #[test]
    fn test_default_spec_is_identity() {
        let venues = collection();
        let result = query(&venues, &QuerySpec::default());

        assert_eq!(result.items, venues);
        assert!(result.stats.is_none());
    }

    #[test]
    fn test_filter_then_aggregate_then_sort() {
        let venues = collection();
        let spec = QuerySpec {
            criteria: vec![Criterion::AtLeast { field: "rating", threshold: 4.0 }],
            sort: Some(SortSpec::descending("rating")),
            aggregate: Some(AggregationSpec::new("rating", 1..=5)),
        };

        let result = query(&venues, &spec);

        // The two 4.8 venues survive in their original relative order.
        let names: Vec<&str> = result.items.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Skyline Lounge", "Velvet Underground"]);

        // Stats run over the filtered set: the 3.2 venue is gone entirely.
        let stats = result.stats.unwrap();
        assert_eq!(stats.count(4), 2);
        assert_eq!(stats.count(3), 0);
        assert_eq!(stats.total(), 2);
    }

    #[test]
    fn test_input_collection_untouched() {
        let venues = collection();
        let spec = QuerySpec {
            criteria: vec![],
            sort: Some(SortSpec::ascending("rating")),
            aggregate: None,
        };

        let _ = query(&venues, &spec);

        // The caller's collection keeps its original order.
        assert_eq!(venues[0].name, "Skyline Lounge");
        assert_eq!(venues[1].name, "Neon Club");
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let venues = collection();
        let spec = QuerySpec {
            criteria: vec![Criterion::AtLeast { field: "rating", threshold: 4.0 }],
            ..QuerySpec::default()
        };

        let once = query(&venues, &spec);
        let twice = query(&once.items, &spec);

        assert_eq!(once.items, twice.items);
    }
}
