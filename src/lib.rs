//! # Bike Sharing Dashboard Library
//!
//! `bikeshare_dashboard` loads the daily bike-sharing dataset, narrows it to a
//! date range and turns it into a fixed set of aggregate charts: rider totals
//! by month, season, weekday and working day, rentals by humidity and
//! temperature band, and rentals by season and weather situation.
//!
//! ## Features
//!
//! - Load the dataset from a CSV file or an http(s) URL
//! - Filter by an inclusive date range
//! - Split continuous columns into low/mid/high bands relative to the view
//! - Group and sum rider counts by any categorical columns
//! - Render charts with plotters, either in an egui window or as PNG files
//!
//! ## Example
//!
//! ```no_run
//! use bikeshare_dashboard::analysis::{load_dataset, DashboardReport, DataSource};
//!
//! let dataset = load_dataset(&DataSource::parse("day.csv")).unwrap();
//! let range = dataset.date_bounds().unwrap();
//! let report = DashboardReport::compute(&dataset, range);
//! println!("{} casual riders in total", report.total_casual);
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{load_dataset, DashboardReport, DataSource};
pub use app::App as DashboardApp;
pub use error::LoadError;
pub use types::{AggregateRow, Band, Dataset, DateRange, Record, View};
