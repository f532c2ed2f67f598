//! Bike Sharing Dashboard
//!
//! Opens the dashboard window, or with `--export` writes every chart to disk
//! and exits.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bikeshare_dashboard::analysis::{load_dataset, DashboardReport, DataSource};
use bikeshare_dashboard::app::{App, WINDOW_TITLE};
use bikeshare_dashboard::config::DashboardConfig;
use bikeshare_dashboard::plotting::export_dashboard;
use bikeshare_dashboard::types::DateRange;

#[derive(Debug, Parser)]
#[command(name = "bikeshare-dashboard", version, about = "Bike-sharing analytics dashboard")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Dataset CSV path or http(s) URL
    #[arg(short, long, env = "BIKESHARE_SOURCE")]
    source: Option<String>,

    /// First day of the initial range (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last day of the initial range (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Write the charts and report.json to DIR instead of opening a window
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

fn init_tracing() {
    let default_filter = if cfg!(feature = "dev") {
        "bikeshare_dashboard=debug"
    } else {
        "bikeshare_dashboard=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config =
        DashboardConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(source) = args.source {
        config.data.source = source;
    }

    let source = DataSource::parse(&config.data.source);
    let dataset =
        load_dataset(&source).with_context(|| format!("failed to load dataset from {}", source))?;
    let bounds = dataset
        .date_bounds()
        .context("dataset contains no dates")?;
    let range = DateRange::new(
        args.start.unwrap_or(bounds.start),
        args.end.unwrap_or(bounds.end),
    )
    .clamp_to(bounds);

    if let Some(dir) = args.export {
        let report = DashboardReport::compute(&dataset, range);
        export_dashboard(&report, &dir, config.charts.size()).map_err(|e| {
            anyhow::anyhow!("failed to export dashboard to {}: {}", dir.display(), e)
        })?;
        return Ok(());
    }

    let app = App::new(dataset, range, config.charts.size())?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([800.0, 600.0])
            .with_title(WINDOW_TITLE),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
    ) {
        anyhow::bail!("error running application: {}", e);
    }

    Ok(())
}
