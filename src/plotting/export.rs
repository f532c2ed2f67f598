use std::fs;
use std::path::{Path, PathBuf};

use super::chart::{render_dashboard, PlotError};
use super::spec::ChartId;
use super::styles::{ChartStyle, ChartTheme};
use crate::analysis::DashboardReport;

/// Name of the JSON file holding the aggregate rows behind the charts.
pub const REPORT_FILE_NAME: &str = "report.json";

/// Write every chart as a PNG plus the report as JSON into `dir`.
///
/// Returns the written paths, charts first in [`ChartId::ALL`] order.
pub fn export_dashboard(
    report: &DashboardReport,
    dir: &Path,
    size: (u32, u32),
) -> Result<Vec<PathBuf>, PlotError> {
    fs::create_dir_all(dir)?;

    let theme = ChartTheme::default();
    let style = ChartStyle::default();
    let mut written = Vec::with_capacity(ChartId::ALL.len() + 1);

    for (id, chart) in render_dashboard(report, size, &theme, &style)? {
        let path = dir.join(id.file_name());
        chart.save_png(&path)?;
        tracing::debug!(path = %path.display(), "chart written");
        written.push(path);
    }

    let report_path = dir.join(REPORT_FILE_NAME);
    fs::write(&report_path, serde_json::to_string_pretty(report)?)?;
    written.push(report_path);

    tracing::info!(dir = %dir.display(), files = written.len(), "dashboard exported");
    Ok(written)
}
