//! One-line status bar: page, result count, last fetch time, key hints.

use super::styles::WidgetStyles;
use crate::state::{AppState, FetchStatus};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Build the status text for `state`.
pub fn status_text(state: &AppState) -> String {
    let fetch = match state.status() {
        FetchStatus::Idle => "idle".to_string(),
        FetchStatus::Loading => "loading".to_string(),
        FetchStatus::Failed(reason) => format!("error: {reason}"),
        FetchStatus::Loaded => match state.last_fetched_at() {
            Some(at) => format!("fetched {}", at.format("%H:%M:%S")),
            None => "loaded".to_string(),
        },
    };

    let count = state.ranked().len();
    let noun = if count == 1 { "result" } else { "results" };

    format!(
        " Page {} | {} {} | {} | F1: help | Ctrl+C: quit",
        state.controller().page(),
        count,
        noun,
        fetch
    )
}

/// Status bar widget.
pub struct StatusBar<'a> {
    state: &'a AppState,
    styles: &'a WidgetStyles,
}

impl<'a> StatusBar<'a> {
    /// Create a status bar for `state`.
    pub fn new(state: &'a AppState, styles: &'a WidgetStyles) -> Self {
        Self { state, styles }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = match self.state.status() {
            FetchStatus::Failed(_) => self.styles.error,
            _ => self.styles.muted,
        };
        Paragraph::new(Line::from(Span::styled(status_text(self.state), style))).render(area, buf);
    }
}
