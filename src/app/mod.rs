mod state;
mod ui;

pub use state::App;
pub use ui::draw_ui;

/// Window and page title.
pub const WINDOW_TITLE: &str = "Bike Sharing Dataset Analysis";
