use chrono::NaiveDate;

use crate::types::{Dataset, DateRange, View};

/// Narrow `dataset` to records dated within `[start, end]`, inclusive.
///
/// Callers are expected to pass `start <= end`; [`DateRange::new`] performs
/// that normalization for user input. The dataset itself is never touched.
pub fn filter(dataset: &Dataset, start: NaiveDate, end: NaiveDate) -> View<'_> {
    debug_assert!(start <= end, "filter bounds must be ordered");
    let range = DateRange { start, end };
    View::new(
        dataset
            .records()
            .iter()
            .filter(|r| range.contains(r.date))
            .collect(),
    )
}

/// Convenience wrapper over [`filter`] for an already normalized range.
pub fn filter_range(dataset: &Dataset, range: DateRange) -> View<'_> {
    filter(dataset, range.start, range.end)
}
