use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub positive_change: Color32,
    pub negative_change: Color32,
    pub status_busy: Color32,
    pub status_done: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Rows shown by every tail table
    pub table_rows: usize,
    pub side_panel_min_width: f32,
    pub selector_max_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::YELLOW,
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(30, 30, 36),
        side_panel: Color32::from_rgb(25, 25, 25),
        positive_change: Color32::from_rgb(100, 200, 120),
        negative_change: Color32::from_rgb(230, 110, 110),
        status_busy: Color32::from_rgb(255, 215, 0),
        status_done: Color32::from_rgb(100, 200, 100),
    },
    table_rows: 5,
    side_panel_min_width: 220.0,
    selector_max_height: 320.0,
};
