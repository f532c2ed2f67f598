use plotters::style::{RGBAColor, RGBColor};

use super::spec::Palette;

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    /// Casual, then registered
    pub user_type_colors: [RGBColor; 2],
    pub sequential_colors: [RGBColor; 5],
}

impl ChartTheme {
    /// Color of the `index`-th series or category under `palette`.
    pub fn color(&self, palette: Palette, index: usize) -> RGBColor {
        let colors: &[RGBColor] = match palette {
            Palette::UserType => &self.user_type_colors,
            Palette::Sequential => &self.sequential_colors,
        };
        colors[index % colors.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(0, 0, 0, 0.94),
            text_color: RGBAColor(255, 255, 255, 0.8),
            grid_color: RGBAColor(255, 255, 255, 0.15),
            axis_color: RGBAColor(255, 255, 255, 0.8),
            user_type_colors: [RGBColor(100, 149, 237), RGBColor(255, 165, 0)],
            // viridis
            sequential_colors: [
                RGBColor(68, 1, 84),
                RGBColor(59, 82, 139),
                RGBColor(33, 145, 140),
                RGBColor(94, 201, 98),
                RGBColor(253, 231, 37),
            ],
        }
    }
}

/// Chart style configuration
pub struct ChartStyle {
    pub font_family: &'static str,
    pub line_width: u32,
    pub font_size: u32,
    pub title_font_size: u32,
    pub margin: u32,
    pub label_area_size: u32,
    /// Fraction of a category slot covered by its bars
    pub bar_group_width: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif",
            line_width: 2,
            font_size: 15,
            title_font_size: 22,
            margin: 10,
            label_area_size: 50,
            bar_group_width: 0.8,
        }
    }
}
