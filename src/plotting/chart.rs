use plotters::coord::combinators::BindKeyPoints;
use plotters::coord::ranged1d::ValueFormatter;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::Path;

use super::spec::{chart_spec, BarChartSpec, ChartId, ChartSpec, LineChartSpec};
use super::styles::{ChartStyle, ChartTheme};
use crate::analysis::DashboardReport;

/// Transparent wrapper around `WithKeyPoints<RangedCoordf64>`: plotters does not
/// implement `ValueFormatter` for it (required by `configure_mesh`), so this
/// delegates every `Ranged` method to the inner coord and formats like `f64`.
struct KeyPointsF64(plotters::coord::combinators::WithKeyPoints<RangedCoordf64>);

impl Ranged for KeyPointsF64 {
    type FormatOption = plotters::coord::ranged1d::NoDefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        self.0.map(value, limit)
    }

    fn key_points<Hint: plotters::coord::ranged1d::KeyPointHint>(&self, hint: Hint) -> Vec<f64> {
        self.0.key_points(hint)
    }

    fn range(&self) -> std::ops::Range<f64> {
        self.0.range()
    }

    fn axis_pixel_range(&self, limit: (i32, i32)) -> std::ops::Range<i32> {
        self.0.axis_pixel_range(limit)
    }
}

impl ValueFormatter<f64> for KeyPointsF64 {
    fn format(value: &f64) -> String {
        <RangedCoordf64 as ValueFormatter<f64>>::format(value)
    }
}

pub type PlotError = Box<dyn Error + Send + Sync>;

/// An RGB8 raster of one chart.
#[derive(Clone)]
pub struct RenderedChart {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RenderedChart {
    pub fn to_image(&self) -> Result<image::RgbImage, PlotError> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| "chart buffer does not match its dimensions".into())
    }

    pub fn save_png(&self, path: &Path) -> Result<(), PlotError> {
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

/// Render `spec` into a fresh RGB buffer of `width` x `height` pixels.
pub fn render_chart(
    spec: &ChartSpec,
    (width, height): (u32, u32),
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<RenderedChart, PlotError> {
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        draw_chart(spec, &root, theme, style)?;
        root.present()?;
    }
    Ok(RenderedChart {
        width,
        height,
        pixels,
    })
}

/// Render every dashboard chart for `report`, in display order.
pub fn render_dashboard(
    report: &DashboardReport,
    size: (u32, u32),
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<Vec<(ChartId, RenderedChart)>, PlotError> {
    ChartId::ALL
        .iter()
        .map(|&id| Ok((id, render_chart(&chart_spec(report, id), size, theme, style)?)))
        .collect()
}

/// Draw `spec` onto an existing drawing area.
pub fn draw_chart(
    spec: &ChartSpec,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    root.fill(&theme.background_color)?;

    match spec {
        ChartSpec::Line(line) => draw_line_chart(line, root, theme, style)?,
        ChartSpec::Bar(bar) => draw_bar_chart(bar, root, theme, style)?,
    }

    if spec.is_empty() {
        draw_empty_notice(root, theme, style)?;
    }
    Ok(())
}

fn draw_bar_chart(
    spec: &BarChartSpec,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let n = spec.categories.len();
    // One tick at the center of every category slot.
    let key_points: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let x_range = KeyPointsF64((-0.5..(n.max(1) as f64 - 0.5)).with_key_points(key_points));
    let y_max = axis_max(
        spec.series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied()),
    );

    let text_font = (style.font_family, style.font_size)
        .into_font()
        .color(&theme.text_color);

    let mut chart = ChartBuilder::on(root)
        .caption(
            &spec.title,
            (style.font_family, style.title_font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .x_label_area_size(style.label_area_size)
        .y_label_area_size(style.label_area_size + 10)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    let categories = spec.categories.clone();
    let x_label_formatter = move |x: &f64| {
        let idx = x.round();
        if idx >= 0.0 && (x - idx).abs() < 1e-6 {
            categories.get(idx as usize).cloned().unwrap_or_default()
        } else {
            String::new()
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .label_style(text_font.clone())
        .axis_desc_style(text_font.clone())
        .x_label_formatter(&x_label_formatter)
        .y_label_formatter(&format_count)
        .draw()?;

    let bar_width = style.bar_group_width / spec.series.len().max(1) as f64;
    let group_start = style.bar_group_width / 2.0;

    for (j, series) in spec.series.iter().enumerate() {
        let color = theme.color(spec.palette, j);
        let bars = series
            .values
            .iter()
            .enumerate()
            .filter_map(|(i, value)| value.map(|v| (i, v)))
            .map(|(i, v)| {
                let x0 = i as f64 - group_start + j as f64 * bar_width;
                let fill = if spec.color_by_category {
                    theme.color(spec.palette, i)
                } else {
                    color
                };
                Rectangle::new([(x0, 0.0), (x0 + bar_width, v)], fill.filled())
            });

        let annotation = chart.draw_series(bars)?;
        if !spec.color_by_category {
            annotation
                .label(series.name.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled())
                });
        }
    }

    if !spec.color_by_category && !spec.series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(theme.background_color.mix(0.8))
            .border_style(theme.axis_color)
            .label_font(text_font)
            .position(SeriesLabelPosition::UpperRight)
            .draw()?;
    }

    Ok(())
}

fn draw_line_chart(
    spec: &LineChartSpec,
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let (x_min, x_max) = match (spec.x_values.first(), spec.x_values.last()) {
        (Some(&first), Some(&last)) if last > first => (first, last),
        (Some(&only), _) => (only - 1.0, only + 1.0),
        _ => (0.0, 1.0),
    };
    let x_range = KeyPointsF64((x_min..x_max).with_key_points(spec.x_values.clone()));
    let y_max = axis_max(
        spec.series
            .iter()
            .flat_map(|s| s.values.iter().flatten().copied()),
    );

    let text_font = (style.font_family, style.font_size)
        .into_font()
        .color(&theme.text_color);

    let mut chart = ChartBuilder::on(root)
        .caption(
            &spec.title,
            (style.font_family, style.title_font_size)
                .into_font()
                .color(&theme.text_color),
        )
        .margin(style.margin)
        .x_label_area_size(style.label_area_size + 20)
        .y_label_area_size(style.label_area_size + 10)
        .build_cartesian_2d(x_range, 0f64..y_max)?;

    let x_values = spec.x_values.clone();
    let x_labels = spec.x_labels.clone();
    let x_label_formatter = move |x: &f64| {
        x_values
            .iter()
            .position(|v| (v - x).abs() < 1e-6)
            .and_then(|i| x_labels.get(i).cloned())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_desc(spec.x_desc.as_str())
        .y_desc(spec.y_desc.as_str())
        .label_style(text_font.clone())
        .axis_desc_style(text_font.clone())
        .x_label_formatter(&x_label_formatter)
        // Rotate x labels for better readability
        .x_label_style(
            (style.font_family, style.font_size)
                .into_font()
                .color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .y_label_formatter(&format_count)
        .draw()?;

    for (j, series) in spec.series.iter().enumerate() {
        let color = theme.color(spec.palette, j);
        let points: Vec<(f64, f64)> = spec
            .x_values
            .iter()
            .zip(&series.values)
            .filter_map(|(&x, value)| value.map(|v| (x, v)))
            .collect();

        chart
            .draw_series(LineSeries::new(
                points.clone(),
                color.stroke_width(style.line_width),
            ))?
            .label(series.name.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });

        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))?;
    }

    if !spec.series.is_empty() {
        chart
            .configure_series_labels()
            .background_style(theme.background_color.mix(0.8))
            .border_style(theme.axis_color)
            .label_font(text_font)
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    Ok(())
}

fn draw_empty_notice(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    theme: &ChartTheme,
    style: &ChartStyle,
) -> Result<(), PlotError> {
    let (width, height) = root.dim_in_pixel();
    let font = (style.font_family, style.font_size + 3)
        .into_font()
        .color(&theme.text_color)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        "No data in the selected range",
        (width as i32 / 2, height as i32 / 2),
        font,
    ))?;
    Ok(())
}

/// Upper end of the value axis, leaving headroom above the tallest value.
pub(crate) fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Use K/M formatting for large numbers
pub(crate) fn format_count(y: &f64) -> String {
    if y.abs() >= 1_000_000.0 {
        format!("{:.1}M", y / 1_000_000.0)
    } else if y.abs() >= 1_000.0 {
        format!("{:.1}K", y / 1_000.0)
    } else {
        format!("{:.0}", y)
    }
}
