use egui::{Context, RichText, Ui};
use egui_extras::DatePickerButton;

use super::App;
use crate::plotting::{render_dashboard, ChartId};

/// Draw the main application UI
pub fn draw_ui(app: &mut App, ctx: &Context) {
    egui::SidePanel::left("side_panel").show(ctx, |ui| {
        ui.heading("Range");
        ui.separator();

        let mut start = app.start_date;
        let mut end = app.end_date;

        ui.label("Start date:");
        ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
        ui.label("End date:");
        ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));

        if start != app.start_date || end != app.end_date {
            app.set_range(start, end);
        }

        ui.separator();
        ui.label(format!("Available: {}", app.bounds));
        ui.label(format!("Days in range: {}", app.report.record_count));
    });

    // Re-render every chart after a range change
    if app.update_needed {
        load_chart_textures(app, ctx);
        app.update_needed = false;
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading(RichText::new("Bike Sharing Dataset Analysis").size(30.0));
            ui.separator();

            if let Some(message) = &app.error_message {
                ui.colored_label(egui::Color32::LIGHT_RED, message);
            }

            ui.heading("Bike Rental Demand based on User Types");
            subheader(ui, "Yearly and Monthly Progression");
            ui.columns(2, |columns| {
                metric(&mut columns[0], "Total casual users", app.report.total_casual);
                metric(&mut columns[1], "Total registered users", app.report.total_registered);
            });
            chart(ui, app, ChartId::Progress);

            subheader(ui, "Geographic");
            chart(ui, app, ChartId::Season);

            subheader(ui, "Day Types");
            ui.columns(2, |columns| {
                chart(&mut columns[0], app, ChartId::WorkingDay);
                chart(&mut columns[1], app, ChartId::Weekday);
            });

            ui.separator();
            ui.heading("Bike Rental Demand based on Weather");

            subheader(ui, "Humidity");
            chart(ui, app, ChartId::Humidity);

            subheader(ui, "Temperature");
            ui.columns(2, |columns| {
                chart(&mut columns[0], app, ChartId::Temperature);
                chart(&mut columns[1], app, ChartId::FeelsLike);
            });

            subheader(ui, "Geographic Analysis");
            chart(ui, app, ChartId::SeasonWeather);
        });
    });
}

fn subheader(ui: &mut Ui, text: &str) {
    ui.add_space(8.0);
    ui.label(RichText::new(text).size(20.0).strong());
}

fn metric(ui: &mut Ui, label: &str, value: u64) {
    ui.label(label);
    ui.label(RichText::new(value.to_string()).size(32.0));
}

fn chart(ui: &mut Ui, app: &App, id: ChartId) {
    if let Some(texture) = app.texture(id) {
        ui.add(egui::Image::new(texture).shrink_to_fit());
    }
}

fn load_chart_textures(app: &mut App, ctx: &Context) {
    match render_dashboard(&app.report, app.chart_size, &app.theme, &app.style) {
        Ok(charts) => {
            app.textures = charts
                .into_iter()
                .map(|(id, chart)| {
                    let size = [chart.width as usize, chart.height as usize];
                    let image = egui::ColorImage::from_rgb(size, &chart.pixels);
                    let texture =
                        ctx.load_texture(id.file_name(), image, egui::TextureOptions::LINEAR);
                    (id, texture)
                })
                .collect();
            app.error_message = None;
        }
        Err(e) => {
            tracing::error!(error = %e, "plotting error");
            app.error_message = Some(format!("Plotting error: {}", e));
        }
    }
}
