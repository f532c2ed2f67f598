use std::collections::BTreeMap;

use crate::analysis::BandAssignment;
use crate::types::{AggregateRow, Band, Dimension, Metric, Record, View};

/// Group `records` by `key_fn` and sum each of `metrics` per group.
///
/// Rows come out in ascending key order. Only keys that occur in the input
/// produce a row; absent groups are never zero-filled.
pub fn aggregate_by<'a, K, I, F>(
    records: I,
    mut key_fn: F,
    metrics: &[Metric],
) -> Vec<AggregateRow<K>>
where
    K: Ord,
    I: IntoIterator<Item = &'a Record>,
    F: FnMut(&'a Record) -> K,
{
    sum_groups(records.into_iter().map(|record| (key_fn(record), record)), metrics)
}

fn sum_groups<'a, K, I>(keyed: I, metrics: &[Metric]) -> Vec<AggregateRow<K>>
where
    K: Ord,
    I: IntoIterator<Item = (K, &'a Record)>,
{
    let mut groups: BTreeMap<K, Vec<u64>> = BTreeMap::new();

    for (key, record) in keyed {
        let totals = groups.entry(key).or_insert_with(|| vec![0; metrics.len()]);
        for (total, metric) in totals.iter_mut().zip(metrics) {
            *total += metric.value(record);
        }
    }

    groups
        .into_iter()
        .map(|(key, totals)| AggregateRow { key, totals })
        .collect()
}

/// Group a view by the codes of `keys` (in the given order) and sum `metrics`.
pub fn aggregate(
    view: &View<'_>,
    keys: &[Dimension],
    metrics: &[Metric],
) -> Vec<AggregateRow<Vec<i64>>> {
    aggregate_by(
        view.iter(),
        |record| keys.iter().map(|key| key.code(record)).collect::<Vec<_>>(),
        metrics,
    )
}

/// Group a view by the band each record was assigned, summing `metrics`.
///
/// # Panics
///
/// Panics if `assignment` does not hold exactly one label per record of
/// `view`, i.e. it was bucketized from another view.
pub fn aggregate_bands(
    view: &View<'_>,
    assignment: &BandAssignment,
    metrics: &[Metric],
) -> Vec<AggregateRow<Band>> {
    assert_eq!(view.len(), assignment.len(), "band assignment belongs to another view");

    sum_groups(assignment.labels.iter().copied().zip(view.iter()), metrics)
}

/// Sum each of `metrics` over all of `records`.
pub fn grand_totals<'a, I>(records: I, metrics: &[Metric]) -> Vec<u64>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut totals = vec![0; metrics.len()];
    for record in records {
        for (total, metric) in totals.iter_mut().zip(metrics) {
            *total += metric.value(record);
        }
    }
    totals
}
