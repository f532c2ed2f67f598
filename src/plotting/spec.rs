//! Chart descriptions built from a [`DashboardReport`].
//!
//! A spec fixes everything about a chart except pixels: title, axis labels,
//! category order and one value per (category, series). Categories follow a
//! declared display order rather than the aggregate row order, and a category
//! absent from the data is simply not listed.

use crate::analysis::{BandBreakdown, DashboardReport, USER_TYPE_METRICS};
use crate::types::{season_name, weekday_name, AggregateRow, Band, Metric, BASE_YEAR};

/// The charts of the dashboard, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartId {
    Progress,
    Season,
    WorkingDay,
    Weekday,
    Humidity,
    Temperature,
    FeelsLike,
    SeasonWeather,
}

impl ChartId {
    pub const ALL: [ChartId; 8] = [
        ChartId::Progress,
        ChartId::Season,
        ChartId::WorkingDay,
        ChartId::Weekday,
        ChartId::Humidity,
        ChartId::Temperature,
        ChartId::FeelsLike,
        ChartId::SeasonWeather,
    ];

    /// File name used when exporting this chart.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartId::Progress => "progress.png",
            ChartId::Season => "season.png",
            ChartId::WorkingDay => "workingday.png",
            ChartId::Weekday => "weekday.png",
            ChartId::Humidity => "humidity.png",
            ChartId::Temperature => "temperature.png",
            ChartId::FeelsLike => "feels_like.png",
            ChartId::SeasonWeather => "season_weathersit.png",
        }
    }
}

/// Which colors a chart draws its bars or lines with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    /// One fixed color per user type
    UserType,
    /// Sequential colors, one per series or per category
    Sequential,
}

/// One named sequence of values, aligned with the chart's categories.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    /// `None` draws nothing for that category
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
    pub palette: Palette,
    /// Color each category differently (single-series charts)
    pub color_by_category: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChartSpec {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub x_values: Vec<f64>,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    Line(LineChartSpec),
    Bar(BarChartSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Line(spec) => &spec.title,
            ChartSpec::Bar(spec) => &spec.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartSpec::Line(spec) => spec.x_values.is_empty(),
            ChartSpec::Bar(spec) => spec.categories.is_empty(),
        }
    }
}

const SEASON_ORDER: [i64; 4] = [1, 2, 3, 4];
const WEEKDAY_ORDER: [i64; 7] = [0, 1, 2, 3, 4, 5, 6];
const WORKING_DAY_ORDER: [i64; 2] = [0, 1];

fn working_day_name(code: i64) -> Option<&'static str> {
    match code {
        0 => Some("No"),
        1 => Some("Yes"),
        _ => None,
    }
}

/// Codes present in `present`, arranged by `declared`; undeclared codes follow in ascending order.
fn display_order(declared: &[i64], present: &[i64]) -> Vec<i64> {
    let mut order: Vec<i64> = declared
        .iter()
        .copied()
        .filter(|code| present.contains(code))
        .collect();
    let mut extra: Vec<i64> = present
        .iter()
        .copied()
        .filter(|code| !declared.contains(code))
        .collect();
    extra.sort_unstable();
    extra.dedup();
    order.extend(extra);
    order
}

fn label_for(code: i64, name: fn(i64) -> Option<&'static str>) -> String {
    name(code).map_or_else(|| code.to_string(), str::to_string)
}

fn user_type_bars(
    rows: &[AggregateRow<Vec<i64>>],
    declared: &[i64],
    name: fn(i64) -> Option<&'static str>,
    title: &str,
    x_desc: &str,
) -> BarChartSpec {
    let present: Vec<i64> = rows.iter().map(|r| r.key[0]).collect();
    let order = display_order(declared, &present);

    let series = USER_TYPE_METRICS
        .iter()
        .enumerate()
        .map(|(i, metric)| Series {
            name: metric.label().to_string(),
            values: order
                .iter()
                .map(|code| {
                    rows.iter()
                        .find(|r| r.key[0] == *code)
                        .map(|r| r.totals[i] as f64)
                })
                .collect(),
        })
        .collect();

    BarChartSpec {
        title: title.to_string(),
        x_desc: x_desc.to_string(),
        y_desc: "Total Users".to_string(),
        categories: order.iter().map(|&code| label_for(code, name)).collect(),
        series,
        palette: Palette::UserType,
        color_by_category: false,
    }
}

fn band_bars(breakdown: &BandBreakdown, title: &str, x_desc: &str) -> BarChartSpec {
    let order: Vec<Band> = Band::ALL
        .into_iter()
        .filter(|band| breakdown.rows.iter().any(|r| r.key == *band))
        .collect();

    let values = order
        .iter()
        .map(|band| {
            breakdown
                .rows
                .iter()
                .find(|r| r.key == *band)
                .map(|r| r.totals[0] as f64)
        })
        .collect();

    BarChartSpec {
        title: title.to_string(),
        x_desc: x_desc.to_string(),
        y_desc: "Total Rental Bikes".to_string(),
        categories: order
            .iter()
            .map(|band| band.label(breakdown.measure).to_string())
            .collect(),
        series: vec![Series {
            name: Metric::Total.label().to_string(),
            values,
        }],
        palette: Palette::Sequential,
        color_by_category: true,
    }
}

fn season_weather_bars(rows: &[AggregateRow<Vec<i64>>]) -> BarChartSpec {
    let seasons: Vec<i64> = rows.iter().map(|r| r.key[0]).collect();
    let order = display_order(&SEASON_ORDER, &seasons);

    let mut weathers: Vec<i64> = rows.iter().map(|r| r.key[1]).collect();
    weathers.sort_unstable();
    weathers.dedup();

    let series = weathers
        .iter()
        .map(|&weather| Series {
            name: format!("Weather Sit {}", weather),
            values: order
                .iter()
                .map(|&season| {
                    rows.iter()
                        .find(|r| r.key[0] == season && r.key[1] == weather)
                        .map(|r| r.totals[0] as f64)
                })
                .collect(),
        })
        .collect();

    BarChartSpec {
        title: "Total Rental Bikes by Season and Weathersit".to_string(),
        x_desc: "Season".to_string(),
        y_desc: "Total Rental Bikes".to_string(),
        categories: order.iter().map(|&code| label_for(code, season_name)).collect(),
        series,
        palette: Palette::Sequential,
        color_by_category: false,
    }
}

fn progress_line(rows: &[AggregateRow<Vec<i64>>]) -> LineChartSpec {
    let year_of = |row: &AggregateRow<Vec<i64>>| i64::from(BASE_YEAR) + row.key[0];
    let title = match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => format!(
            "Total Casual and Registered Users of All Time ({}-{})",
            year_of(first),
            year_of(last)
        ),
        _ => "Total Casual and Registered Users of All Time".to_string(),
    };

    let series = USER_TYPE_METRICS
        .iter()
        .enumerate()
        .map(|(i, metric)| Series {
            name: metric.label().to_string(),
            values: rows.iter().map(|r| Some(r.totals[i] as f64)).collect(),
        })
        .collect();

    LineChartSpec {
        title,
        x_desc: "Month".to_string(),
        y_desc: "Total Users".to_string(),
        x_values: rows.iter().map(|r| (r.key[0] * 12 + r.key[1]) as f64).collect(),
        x_labels: rows
            .iter()
            .map(|r| format!("{}-{:02}", year_of(r), r.key[1]))
            .collect(),
        series,
        palette: Palette::UserType,
    }
}

/// Describe chart `id` for `report`.
pub fn chart_spec(report: &DashboardReport, id: ChartId) -> ChartSpec {
    match id {
        ChartId::Progress => ChartSpec::Line(progress_line(&report.progress)),
        ChartId::Season => ChartSpec::Bar(user_type_bars(
            &report.by_season,
            &SEASON_ORDER,
            season_name,
            "Total Casual and Registered Users by Season",
            "Season",
        )),
        ChartId::WorkingDay => ChartSpec::Bar(user_type_bars(
            &report.by_working_day,
            &WORKING_DAY_ORDER,
            working_day_name,
            "Total Casual and Registered Users by Working Day",
            "Working Day",
        )),
        ChartId::Weekday => ChartSpec::Bar(user_type_bars(
            &report.by_weekday,
            &WEEKDAY_ORDER,
            weekday_name,
            "Total Casual and Registered Users by Weekday",
            "Weekday",
        )),
        ChartId::Humidity => ChartSpec::Bar(band_bars(
            &report.humidity,
            "Total Rental Bikes by Humidity",
            "Humidity Category",
        )),
        ChartId::Temperature => ChartSpec::Bar(band_bars(
            &report.temperature,
            "Total Rental Bikes by Normalized Temperature",
            "Category",
        )),
        ChartId::FeelsLike => ChartSpec::Bar(band_bars(
            &report.feels_like,
            "Total Rental Bikes by Normalized Feeling Temperature",
            "Category",
        )),
        ChartId::SeasonWeather => ChartSpec::Bar(season_weather_bars(&report.season_weather)),
    }
}
