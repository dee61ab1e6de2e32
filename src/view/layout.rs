//! Widget layout.
//!
//! Pure layout logic: input at the top, detail card below it, status bar
//! at the bottom. The dropdown floats over the detail card, directly under
//! the input, while it is open.

use super::constants::{INPUT_HEIGHT, STATUS_BAR_HEIGHT};
use super::detail_card::DetailCard;
use super::dropdown::{dropdown_height, ResultDropdown};
use super::help::render_help_overlay;
use super::search_input::SearchInput;
use super::status_bar::StatusBar;
use super::styles::WidgetStyles;
use crate::state::{AppState, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Screen regions for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetAreas {
    /// Search input.
    pub input: Rect,
    /// Dropdown overlay, only while open.
    pub dropdown: Option<Rect>,
    /// Detail card.
    pub details: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Compute the regions for `state` in `frame_area`.
pub fn calculate_areas(frame_area: Rect, state: &AppState) -> WidgetAreas {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(INPUT_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(frame_area);

    let (input, details, status) = (chunks[0], chunks[1], chunks[2]);

    let dropdown = state.selection().is_open().then(|| {
        let height = dropdown_height(&state.results_view()).min(details.height);
        Rect {
            x: details.x,
            y: details.y,
            width: details.width,
            height,
        }
    });

    WidgetAreas {
        input,
        dropdown: dropdown.filter(|area| area.height > 0),
        details,
        status,
    }
}

/// Render the whole widget and return the regions used.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &WidgetStyles) -> WidgetAreas {
    let areas = calculate_areas(frame.area(), state);

    frame.render_widget(
        SearchInput::new(state.input(), state.focus == FocusPane::Input, styles),
        areas.input,
    );
    frame.render_widget(
        DetailCard::new(
            state.selection().selected(),
            state.focus == FocusPane::Details,
            styles,
        ),
        areas.details,
    );
    if let Some(dropdown_area) = areas.dropdown {
        frame.render_widget(
            ResultDropdown::new(state.results_view(), state.selection().active_index(), styles),
            dropdown_area,
        );
    }
    frame.render_widget(StatusBar::new(state, styles), areas.status);

    if state.help_visible {
        render_help_overlay(frame, styles);
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NavPolicy;
    use std::time::{Duration, Instant};

    fn state() -> AppState {
        AppState::new(Duration::from_millis(300), NavPolicy::Wrap)
    }

    #[test]
    fn closed_dropdown_has_no_area() {
        let areas = calculate_areas(Rect::new(0, 0, 80, 24), &state());
        assert_eq!(areas.input, Rect::new(0, 0, 80, 3));
        assert_eq!(areas.status, Rect::new(0, 23, 80, 1));
        assert_eq!(areas.details, Rect::new(0, 3, 80, 20));
        assert!(areas.dropdown.is_none());
    }

    #[test]
    fn open_dropdown_sits_under_input() {
        let mut state = state();
        state.set_input_text("shirt", Instant::now());

        let areas = calculate_areas(Rect::new(0, 0, 80, 24), &state);
        // Loading body: one line plus borders
        assert_eq!(areas.dropdown, Some(Rect::new(0, 3, 80, 3)));
    }

    #[test]
    fn dropdown_is_clipped_to_available_height() {
        let mut state = state();
        state.set_input_text("shirt", Instant::now());

        let areas = calculate_areas(Rect::new(0, 0, 80, 5), &state);
        assert_eq!(areas.dropdown.map(|r| r.height), Some(1));
    }
}
