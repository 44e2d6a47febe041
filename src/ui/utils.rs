use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::ui::config::{UI_CONFIG, UI_TEXT};

/// Creates a colored heading
pub fn colored_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.heading)
}

/// Creates a colored sub-section heading using the configured label color
pub fn colored_subsection_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into()).color(UI_CONFIG.colors.subsection_heading)
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// `$` with two decimals, sign before the symbol.
pub fn format_price(price: f64) -> String {
    if price < 0.0 {
        format!("-${:.2}", -price)
    } else {
        format!("${:.2}", price)
    }
}

/// Integer with `,` thousands separators.
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Plain number cell with two decimals.
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

/// Signed change with two decimals, or the missing-value marker.
pub fn format_change(change: Option<f64>) -> String {
    match change {
        Some(c) => format!("{:+.2}", c),
        None => UI_TEXT.missing_value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_are_separated() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1_000), "1,000");
        assert_eq!(format_thousands(3_450_000_000_000), "3,450,000,000,000");
        assert_eq!(format_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn prices_use_two_decimals() {
        assert_eq!(format_price(237.234), "$237.23");
        assert_eq!(format_price(164.0), "$164.00");
        assert_eq!(format_price(-1.5), "-$1.50");
    }

    #[test]
    fn changes_are_signed_or_missing() {
        assert_eq!(format_change(Some(1.25)), "+1.25");
        assert_eq!(format_change(Some(-0.5)), "-0.50");
        assert_eq!(format_change(None), "n/a");
        assert_eq!(format_value(99.5), "99.50");
    }
}
