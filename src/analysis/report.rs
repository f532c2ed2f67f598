use serde::Serialize;
use std::time::Instant;

use super::bucket::{bucketize, BandBoundaries};
use super::filter::filter_range;
use crate::types::{AggregateRow, Band, Dataset, DateRange, Dimension, Measure, Metric, View};
use crate::utils::{aggregate, aggregate_bands, grand_totals};

/// Metrics shown per user type.
pub const USER_TYPE_METRICS: [Metric; 2] = [Metric::Casual, Metric::Registered];

/// Band rows for one bucketized measure, with the edges they were cut at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandBreakdown {
    pub measure: Measure,
    pub boundaries: Option<BandBoundaries>,
    /// Total rentals per band
    pub rows: Vec<AggregateRow<Band>>,
}

impl BandBreakdown {
    fn compute(view: &View<'_>, measure: Measure) -> Self {
        let assignment = bucketize(view, measure);
        Self {
            measure,
            boundaries: assignment.boundaries,
            rows: aggregate_bands(view, &assignment, &[Metric::Total]),
        }
    }
}

/// Everything one render pass of the dashboard shows.
///
/// Summary metrics and the progress series always cover the whole dataset;
/// the remaining breakdowns cover only the selected range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub range: DateRange,
    /// Records inside `range`
    pub record_count: usize,
    pub total_casual: u64,
    pub total_registered: u64,
    /// Keyed by (yr, mnth); casual and registered
    pub progress: Vec<AggregateRow<Vec<i64>>>,
    /// Keyed by season; casual and registered
    pub by_season: Vec<AggregateRow<Vec<i64>>>,
    /// Keyed by working-day flag; casual and registered
    pub by_working_day: Vec<AggregateRow<Vec<i64>>>,
    /// Keyed by weekday; casual and registered
    pub by_weekday: Vec<AggregateRow<Vec<i64>>>,
    pub humidity: BandBreakdown,
    pub temperature: BandBreakdown,
    pub feels_like: BandBreakdown,
    /// Keyed by (season, weathersit); total rentals
    pub season_weather: Vec<AggregateRow<Vec<i64>>>,
}

impl DashboardReport {
    /// Recompute every breakdown from scratch for `range`.
    pub fn compute(dataset: &Dataset, range: DateRange) -> Self {
        let start_time = Instant::now();
        let all = dataset.view();
        let view = filter_range(dataset, range);

        let totals = grand_totals(dataset.records(), &USER_TYPE_METRICS);

        let report = Self {
            range,
            record_count: view.len(),
            total_casual: totals[0],
            total_registered: totals[1],
            progress: aggregate(&all, &[Dimension::Year, Dimension::Month], &USER_TYPE_METRICS),
            by_season: aggregate(&view, &[Dimension::Season], &USER_TYPE_METRICS),
            by_working_day: aggregate(&view, &[Dimension::WorkingDay], &USER_TYPE_METRICS),
            by_weekday: aggregate(&view, &[Dimension::Weekday], &USER_TYPE_METRICS),
            humidity: BandBreakdown::compute(&view, Measure::Humidity),
            temperature: BandBreakdown::compute(&view, Measure::Temperature),
            feels_like: BandBreakdown::compute(&view, Measure::FeelsLike),
            season_weather: aggregate(
                &view,
                &[Dimension::Season, Dimension::WeatherSit],
                &[Metric::Total],
            ),
        };

        tracing::debug!(
            %range,
            records = report.record_count,
            elapsed_us = start_time.elapsed().as_micros() as u64,
            "report recomputed"
        );
        report
    }
}
