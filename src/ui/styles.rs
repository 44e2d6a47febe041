use eframe::egui::{Color32, RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Semantic label helpers on `egui::Ui` so panels never pick colors inline.
pub trait UiStyleExt {
    /// Small gray caption text.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Bold "Label:" followed by a colored value, one statistic per line.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    fn label_header(&mut self, text: impl Into<String>);

    fn label_subheader(&mut self, text: impl Into<String>);

    fn label_error(&mut self, text: impl Into<String>);

    /// Monospace table cell; a leading sign picks the gain/loss color.
    fn label_signed_cell(&mut self, text: &str);

    /// Status bar text in the busy or done color.
    fn label_status(&mut self, text: &str, busy: bool);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.label(RichText::new(format!("{}:", label)).strong());
            ui.label(RichText::new(value).color(color));
        });
    }

    fn label_header(&mut self, text: impl Into<String>) {
        self.heading(RichText::new(text).color(UI_CONFIG.colors.heading));
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.subsection_heading));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(Color32::from_rgb(255, 100, 100)));
    }

    fn label_signed_cell(&mut self, text: &str) {
        let cell = RichText::new(text).monospace();
        let cell = match text.chars().next() {
            Some('+') => cell.color(UI_CONFIG.colors.positive_change),
            Some('-') => cell.color(UI_CONFIG.colors.negative_change),
            _ => cell,
        };
        self.label(cell);
    }

    fn label_status(&mut self, text: &str, busy: bool) {
        let color = if busy {
            UI_CONFIG.colors.status_busy
        } else {
            UI_CONFIG.colors.status_done
        };
        self.label(RichText::new(text).small().color(color));
    }
}
