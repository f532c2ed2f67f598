mod chart;
mod export;
mod spec;
pub mod styles;
#[cfg(test)]
mod tests;

pub use chart::{draw_chart, render_chart, render_dashboard, PlotError, RenderedChart};
pub use export::{export_dashboard, REPORT_FILE_NAME};
pub use spec::{chart_spec, BarChartSpec, ChartId, ChartSpec, LineChartSpec, Palette, Series};
pub use styles::{ChartStyle, ChartTheme};
