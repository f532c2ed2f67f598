use chrono::NaiveDate;
use eframe::App as EApp;
use egui::TextureHandle;

use crate::analysis::DashboardReport;
use crate::error::LoadError;
use crate::plotting::{ChartId, ChartStyle, ChartTheme};
use crate::types::{Dataset, DateRange};

/// Main application state
pub struct App {
    dataset: Dataset,
    /// Earliest and latest dates the pickers may select
    pub bounds: DateRange,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub report: DashboardReport,
    pub chart_size: (u32, u32),
    pub theme: ChartTheme,
    pub style: ChartStyle,
    pub textures: Vec<(ChartId, TextureHandle)>,
    pub update_needed: bool,
    pub error_message: Option<String>,
}

impl App {
    /// Build the dashboard for `dataset`, initially showing `range` clamped to the data.
    pub fn new(
        dataset: Dataset,
        range: DateRange,
        chart_size: (u32, u32),
    ) -> Result<Self, LoadError> {
        let bounds = dataset.date_bounds().ok_or(LoadError::Empty)?;
        let range = range.clamp_to(bounds);
        let report = DashboardReport::compute(&dataset, range);

        Ok(Self {
            dataset,
            bounds,
            start_date: range.start,
            end_date: range.end,
            report,
            chart_size,
            theme: ChartTheme::default(),
            style: ChartStyle::default(),
            textures: Vec::new(),
            update_needed: true,
            error_message: None,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Apply a new selection from the date pickers.
    ///
    /// Reversed bounds are swapped and both ends are clamped to the dataset.
    /// A changed range recomputes the whole report and schedules a re-render.
    pub fn set_range(&mut self, start: NaiveDate, end: NaiveDate) {
        let range = DateRange::new(start, end).clamp_to(self.bounds);
        self.start_date = range.start;
        self.end_date = range.end;

        if range != self.report.range {
            tracing::debug!(%range, "date range changed");
            self.report = DashboardReport::compute(&self.dataset, range);
            self.update_needed = true;
        }
    }

    pub fn texture(&self, id: ChartId) -> Option<&TextureHandle> {
        self.textures
            .iter()
            .find(|(chart, _)| *chart == id)
            .map(|(_, texture)| texture)
    }
}

impl EApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}
