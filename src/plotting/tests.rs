use super::chart::{axis_max, format_count};
use super::*;
use crate::analysis::tests::{date, sample_dataset};
use crate::analysis::DashboardReport;
use crate::types::DateRange;
use plotters::prelude::IntoFont;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn full_report() -> DashboardReport {
    let dataset = sample_dataset();
    let range = dataset.date_bounds().unwrap();
    DashboardReport::compute(&dataset, range)
}

fn bar(spec: ChartSpec) -> BarChartSpec {
    match spec {
        ChartSpec::Bar(bar) => bar,
        ChartSpec::Line(_) => panic!("expected a bar chart"),
    }
}

/// Text rendering needs a system font; rendering tests are skipped without one.
fn fonts_available() -> bool {
    ("sans-serif", 12).into_font().box_size("0").is_ok()
}

#[test]
fn test_season_categories_use_display_order() {
    let spec = bar(chart_spec(&full_report(), ChartId::Season));
    assert_eq!(spec.categories, vec!["Spring", "Summer", "Fall", "Winter"]);
    assert_eq!(spec.series.len(), 2);
    assert_eq!(spec.series[0].name, "Casual Users");
    assert_eq!(spec.series[1].name, "Registered Users");
    assert_eq!(spec.series[0].values[2], Some((3065 + 1031) as f64));
}

#[test]
fn test_weekday_labels() {
    let spec = bar(chart_spec(&full_report(), ChartId::Weekday));
    // Friday never appears in the sample.
    assert_eq!(spec.categories, vec!["Sun", "Mon", "Tue", "Wed", "Thu", "Sat"]);
}

#[test]
fn test_missing_season_is_dropped_not_zeroed() {
    let dataset = sample_dataset();
    let range = DateRange::new(date("2011-01-01"), date("2011-07-31"));
    let report = DashboardReport::compute(&dataset, range);

    let spec = bar(chart_spec(&report, ChartId::Season));
    assert_eq!(spec.categories, vec!["Spring", "Summer", "Fall"]);
    assert!(spec.series.iter().all(|s| s.values.iter().all(Option::is_some)));
}

#[test]
fn test_band_chart_labels() {
    let report = full_report();
    let humidity = bar(chart_spec(&report, ChartId::Humidity));
    assert_eq!(humidity.categories, vec!["low", "moderate", "high"]);
    assert!(humidity.color_by_category);

    let temperature = bar(chart_spec(&report, ChartId::Temperature));
    assert_eq!(temperature.categories, vec!["cool", "moderate", "warm"]);

    let total: f64 = humidity.series[0].values.iter().flatten().sum();
    assert_eq!(total, 34_536.0);
}

#[test]
fn test_season_weather_gaps() {
    let spec = bar(chart_spec(&full_report(), ChartId::SeasonWeather));
    assert_eq!(spec.categories, vec!["Spring", "Summer", "Fall", "Winter"]);

    let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Weather Sit 1", "Weather Sit 2", "Weather Sit 3"]);

    // Only winter had a weather situation 3 day.
    assert_eq!(spec.series[2].values, vec![None, None, None, Some(627.0)]);
    // Fall had only clear days.
    assert_eq!(spec.series[1].values[2], None);
}

#[test]
fn test_progress_line() {
    match chart_spec(&full_report(), ChartId::Progress) {
        ChartSpec::Line(line) => {
            assert_eq!(
                line.title,
                "Total Casual and Registered Users of All Time (2011-2012)"
            );
            assert_eq!(line.x_values.first(), Some(&1.0));
            assert_eq!(line.x_values.last(), Some(&24.0));
            assert_eq!(line.x_labels.first().map(String::as_str), Some("2011-01"));
            assert_eq!(line.x_labels.last().map(String::as_str), Some("2012-12"));
            assert_eq!(line.series.len(), 2);
        }
        ChartSpec::Bar(_) => panic!("progress should be a line chart"),
    }
}

#[test]
fn test_empty_range_gives_empty_specs() {
    let dataset = sample_dataset();
    let day = date("2011-04-11");
    let report = DashboardReport::compute(&dataset, DateRange::new(day, day));

    for id in ChartId::ALL {
        let spec = chart_spec(&report, id);
        // Progress always covers the whole dataset.
        assert_eq!(spec.is_empty(), id != ChartId::Progress, "{:?}", id);
    }
}

#[test]
fn test_theme_palette_wraps() {
    let theme = ChartTheme::default();
    let rgb = |c: plotters::style::RGBColor| (c.0, c.1, c.2);
    let n = theme.sequential_colors.len();
    assert_eq!(
        rgb(theme.color(Palette::Sequential, 0)),
        rgb(theme.color(Palette::Sequential, n))
    );
    assert_ne!(
        rgb(theme.color(Palette::UserType, 0)),
        rgb(theme.color(Palette::UserType, 1))
    );

    // Any index maps onto a palette entry.
    for index in 0..3 * n {
        assert_eq!(
            rgb(theme.color(Palette::Sequential, index)),
            rgb(theme.sequential_colors[index % n])
        );
        assert_eq!(
            rgb(theme.color(Palette::UserType, index)),
            rgb(theme.user_type_colors[index % 2])
        );
    }
}

#[test]
fn test_axis_helpers() {
    assert_eq!(axis_max(std::iter::empty()), 1.0);
    assert!((axis_max([10.0, 50.0].into_iter()) - 55.0).abs() < 1e-9);
    assert_eq!(format_count(&950.0), "950");
    assert_eq!(format_count(&12_300.0), "12.3K");
    assert_eq!(format_count(&2_500_000.0), "2.5M");
}

#[test]
fn test_render_every_chart() {
    if !fonts_available() {
        return;
    }
    let report = full_report();
    let charts = render_dashboard(
        &report,
        (640, 480),
        &ChartTheme::default(),
        &ChartStyle::default(),
    )
    .unwrap();

    assert_eq!(charts.len(), ChartId::ALL.len());
    for (_, chart) in &charts {
        assert_eq!(chart.pixels.len(), 640 * 480 * 3);
        // Something other than the background was drawn.
        let first = &chart.pixels[..3];
        assert!(chart.pixels.chunks(3).any(|px| px != first));
    }
}

#[test]
fn test_render_empty_chart() {
    if !fonts_available() {
        return;
    }
    let dataset = sample_dataset();
    let day = date("2011-04-11");
    let report = DashboardReport::compute(&dataset, DateRange::new(day, day));

    let spec = chart_spec(&report, ChartId::Season);
    let chart = render_chart(&spec, (400, 300), &ChartTheme::default(), &ChartStyle::default());
    assert!(chart.is_ok());
}

#[test]
fn test_export_writes_files() {
    if !fonts_available() {
        return;
    }
    let temp_dir = TempDir::new().unwrap();
    let out = temp_dir.path().join("charts");

    let written = export_dashboard(&full_report(), &out, (480, 360)).unwrap();
    assert_eq!(written.len(), ChartId::ALL.len() + 1);
    for path in &written {
        let metadata = std::fs::metadata(path).unwrap();
        assert!(metadata.len() > 0);
    }

    let json = std::fs::read_to_string(out.join(REPORT_FILE_NAME)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_casual"], 8_551);
    assert_eq!(value["humidity"]["rows"][0]["key"], "low");
}
