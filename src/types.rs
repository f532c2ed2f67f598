//! # Common Types
//!
//! This module contains the common types used throughout the application for
//! representing daily bike-rental records, filtered views of them and the
//! summary rows produced by aggregation.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Calendar year that a `yr` code of 0 refers to.
pub const BASE_YEAR: i32 = 2011;

/// One day's bike-rental observation.
///
/// Categorical columns keep the codes used by the CSV so that the data shape
/// stays compatible with existing consumers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    /// Row index as recorded in the source, if present
    pub instant: Option<u32>,
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Year code (0 = 2011, 1 = 2012)
    pub year: u8,
    /// Month, 1-12
    pub month: u8,
    /// Season code, 1-4
    pub season: u8,
    /// Holiday flag, if present
    pub holiday: Option<bool>,
    /// Day of week, 0 (Sunday) to 6
    pub weekday: u8,
    /// Whether the day is neither a weekend nor a holiday
    pub working_day: bool,
    /// Weather situation code, 1-4
    pub weather_sit: u8,
    /// Normalized temperature
    pub temp: f64,
    /// Normalized feels-like temperature
    pub atemp: f64,
    /// Normalized humidity in [0, 1]
    pub humidity: f64,
    /// Normalized wind speed, if present
    pub windspeed: Option<f64>,
    /// Casual riders
    pub casual: u32,
    /// Registered riders
    pub registered: u32,
    /// Total riders (casual + registered)
    pub total: u32,
}

/// The fully materialized dataset. Immutable after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A view over every record.
    pub fn view(&self) -> View<'_> {
        View::new(self.records.iter().collect())
    }

    /// Earliest and latest dates present. Does not assume the records are sorted.
    pub fn date_bounds(&self) -> Option<DateRange> {
        let start = self.records.iter().map(|r| r.date).min()?;
        let end = self.records.iter().map(|r| r.date).max()?;
        Some(DateRange { start, end })
    }
}

/// A read-only, possibly filtered, subsequence of a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct View<'a> {
    records: Vec<&'a Record>,
}

impl<'a> View<'a> {
    pub fn new(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// An inclusive date interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(a: NaiveDate, b: NaiveDate) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Restrict the range to lie within `bounds`.
    pub fn clamp_to(self, bounds: DateRange) -> Self {
        let clamp = |d: NaiveDate| d.clamp(bounds.start, bounds.end);
        Self::new(clamp(self.start), clamp(self.end))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Categorical columns that rows can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Dimension {
    Year,
    Month,
    Season,
    Weekday,
    WorkingDay,
    WeatherSit,
}

impl Dimension {
    /// The CSV code of this column for `record`.
    pub fn code(self, record: &Record) -> i64 {
        match self {
            Dimension::Year => i64::from(record.year),
            Dimension::Month => i64::from(record.month),
            Dimension::Season => i64::from(record.season),
            Dimension::Weekday => i64::from(record.weekday),
            Dimension::WorkingDay => i64::from(record.working_day),
            Dimension::WeatherSit => i64::from(record.weather_sit),
        }
    }
}

/// Count columns that can be summed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Metric {
    Casual,
    Registered,
    Total,
}

impl Metric {
    pub fn value(self, record: &Record) -> u64 {
        match self {
            Metric::Casual => u64::from(record.casual),
            Metric::Registered => u64::from(record.registered),
            Metric::Total => u64::from(record.total),
        }
    }

    /// Legend label used on charts.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Casual => "Casual Users",
            Metric::Registered => "Registered Users",
            Metric::Total => "Total Rental Bikes",
        }
    }
}

/// Continuous columns that can be split into bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Measure {
    Humidity,
    Temperature,
    FeelsLike,
}

impl Measure {
    pub fn value(self, record: &Record) -> f64 {
        match self {
            Measure::Humidity => record.humidity,
            Measure::Temperature => record.temp,
            Measure::FeelsLike => record.atemp,
        }
    }

    /// Display labels for the three bands of this measure.
    pub fn band_labels(self) -> [&'static str; 3] {
        match self {
            Measure::Humidity => ["low", "moderate", "high"],
            Measure::Temperature | Measure::FeelsLike => ["cool", "moderate", "warm"],
        }
    }
}

/// One of three ordinal categories of a bucketized column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Low,
    Mid,
    High,
}

impl Band {
    pub const ALL: [Band; 3] = [Band::Low, Band::Mid, Band::High];

    /// Label of this band under the naming of `measure`.
    pub fn label(self, measure: Measure) -> &'static str {
        let labels = measure.band_labels();
        match self {
            Band::Low => labels[0],
            Band::Mid => labels[1],
            Band::High => labels[2],
        }
    }
}

/// One group's key plus the summed value of each requested metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow<K> {
    pub key: K,
    /// Sums in the same order as the metrics that were requested
    pub totals: Vec<u64>,
}

/// Display name of a season code.
pub fn season_name(code: i64) -> Option<&'static str> {
    match code {
        1 => Some("Spring"),
        2 => Some("Summer"),
        3 => Some("Fall"),
        4 => Some("Winter"),
        _ => None,
    }
}

/// Short display name of a weekday code.
pub fn weekday_name(code: i64) -> Option<&'static str> {
    const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
    usize::try_from(code).ok().and_then(|i| NAMES.get(i).copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_date_range_swaps_reversed_bounds() {
        let range = DateRange::new(date("2012-03-01"), date("2011-05-01"));
        assert_eq!(range.start, date("2011-05-01"));
        assert_eq!(range.end, date("2012-03-01"));
    }

    #[test]
    fn test_date_range_clamp() {
        let bounds = DateRange::new(date("2011-01-01"), date("2012-12-31"));
        let range = DateRange::new(date("2010-06-01"), date("2013-01-05")).clamp_to(bounds);
        assert_eq!(range, bounds);
        assert!(range.contains(date("2011-01-01")));
        assert!(range.contains(date("2012-12-31")));
        assert!(!range.contains(date("2013-01-01")));
    }

    #[test]
    fn test_band_labels() {
        assert_eq!(Band::Mid.label(Measure::Humidity), "moderate");
        assert_eq!(Band::High.label(Measure::Humidity), "high");
        assert_eq!(Band::Low.label(Measure::Temperature), "cool");
        assert_eq!(Band::High.label(Measure::FeelsLike), "warm");
        assert!(Band::Low < Band::Mid && Band::Mid < Band::High);
    }

    #[test]
    fn test_category_names() {
        assert_eq!(season_name(1), Some("Spring"));
        assert_eq!(season_name(4), Some("Winter"));
        assert_eq!(season_name(5), None);
        assert_eq!(weekday_name(0), Some("Sun"));
        assert_eq!(weekday_name(6), Some("Sat"));
        assert_eq!(weekday_name(-1), None);
    }
}
