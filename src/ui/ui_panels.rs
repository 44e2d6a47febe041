use eframe::egui::{ComboBox, Slider, Ui};

use crate::config::{HORIZON, TICKER_CATALOG, company_name};
use crate::domain::UserSelection;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Panel for the two user inputs: ticker and forecast horizon
pub struct SelectionPanel {
    ticker: String,
    horizon_years: u32,
}

impl SelectionPanel {
    pub fn new(selection: &UserSelection) -> Self {
        Self {
            ticker: selection.ticker.clone(),
            horizon_years: selection.horizon.years(),
        }
    }

    fn render_ticker_selector(&mut self, ui: &mut Ui) -> Option<String> {
        let previously_selected = self.ticker.clone();

        ui.label(colored_subsection_heading(UI_TEXT.ticker_selector_heading));
        ComboBox::from_id_salt("ticker_selector")
            .selected_text(self.ticker.as_str())
            .height(UI_CONFIG.selector_max_height)
            .width(UI_CONFIG.side_panel_min_width - 20.0)
            .show_ui(ui, |ui| {
                for (symbol, name) in TICKER_CATALOG {
                    ui.selectable_value(
                        &mut self.ticker,
                        symbol.to_string(),
                        format!("{} ({})", symbol, name),
                    );
                }
            });
        if let Some(name) = company_name(&self.ticker) {
            ui.label_subdued(name);
        }

        if self.ticker != previously_selected {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("A new ticker was selected: {}", self.ticker);
            }
            return Some(self.ticker.clone());
        }
        None
    }

    fn render_horizon_slider(&mut self, ui: &mut Ui) -> Option<u32> {
        ui.add_space(5.0);
        ui.label(colored_subsection_heading(UI_TEXT.horizon_slider_heading));

        let response = ui.add(
            Slider::new(&mut self.horizon_years, HORIZON.min_years..=HORIZON.max_years)
                .integer()
                .suffix(UI_TEXT.horizon_slider_suffix),
        );

        // Fires once per distinct value while dragging
        if response.changed() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Horizon changed to {} years", self.horizon_years);
            }
            return Some(self.horizon_years);
        }
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionEvent {
    Ticker(String),
    HorizonYears(u32),
}

impl Panel for SelectionPanel {
    type Event = SelectionEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.user_inputs_heading);

        if let Some(ticker) = self.render_ticker_selector(ui) {
            events.push(SelectionEvent::Ticker(ticker));
        }
        spaced_separator(ui);

        if let Some(years) = self.render_horizon_slider(ui) {
            events.push(SelectionEvent::HorizonYears(years));
        }
        ui.add_space(20.0);
        events
    }
}

/// Applies panel events to a selection. Returns true if anything changed.
pub fn apply_selection_events(selection: &mut UserSelection, events: &[SelectionEvent]) -> bool {
    let before = selection.clone();
    for event in events {
        match event {
            SelectionEvent::Ticker(ticker) => selection.ticker = ticker.clone(),
            SelectionEvent::HorizonYears(years) => {
                *selection = UserSelection::new(selection.ticker.clone(), *years)
            }
        }
    }
    *selection != before
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_and_horizon_events_update_selection() {
        let mut selection = UserSelection::new("AAPL", 1);
        let changed = apply_selection_events(
            &mut selection,
            &[
                SelectionEvent::Ticker("MSFT".to_string()),
                SelectionEvent::HorizonYears(3),
            ],
        );

        assert!(changed);
        assert_eq!(selection, UserSelection::new("MSFT", 3));
        assert_eq!(selection.horizon_days(), 3 * 365);
    }

    #[test]
    fn repeated_values_are_not_changes() {
        let mut selection = UserSelection::new("AAPL", 2);
        assert!(!apply_selection_events(&mut selection, &[]));
        assert!(!apply_selection_events(
            &mut selection,
            &[SelectionEvent::HorizonYears(2)]
        ));
    }

    #[test]
    fn out_of_range_years_are_clamped() {
        let mut selection = UserSelection::new("AAPL", 1);
        apply_selection_events(&mut selection, &[SelectionEvent::HorizonYears(9)]);
        assert_eq!(selection.horizon.years(), 4);
    }
}
