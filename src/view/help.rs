//! Help overlay widget displaying keyboard shortcuts.
//!
//! Shows a centered modal overlay with all keyboard shortcuts grouped by
//! category. Toggled with F1; Esc also closes it.

use super::constants::{HELP_POPUP_HEIGHT_PERCENT, HELP_POPUP_WIDTH_PERCENT};
use super::styles::WidgetStyles;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the help overlay centered on the screen.
pub fn render_help_overlay(frame: &mut Frame, styles: &WidgetStyles) {
    let popup_area = centered_rect(HELP_POPUP_WIDTH_PERCENT, HELP_POPUP_HEIGHT_PERCENT, frame.area());

    frame.render_widget(Clear, popup_area);

    let help_paragraph = Paragraph::new(build_help_content(styles))
        .block(
            Block::default()
                .title(" Keyboard Shortcuts ")
                .borders(Borders::ALL)
                .border_style(styles.border_focused),
        )
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

/// Calculate a rect centered in `area` with the given percentage size.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_width = area.width * percent_x / 100;
    let popup_height = area.height * percent_y / 100;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x: area.x + popup_x,
        y: area.y + popup_y,
        width: popup_width,
        height: popup_height,
    }
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Results",
        &[
            ("↓ / ↑", "Highlight next / previous result"),
            ("Enter", "Select highlighted result"),
            ("Click", "Select a result"),
            ("Esc", "Close the dropdown"),
            ("Tab", "Close and switch to details"),
        ],
    ),
    (
        "Input",
        &[
            ("Type", "Search (after a short pause)"),
            ("← / →  Home / End", "Move cursor"),
            ("Backspace / Delete", "Edit"),
            ("Ctrl+u", "Clear the search"),
        ],
    ),
    (
        "Pages",
        &[("Page Down / Page Up", "Next / previous page")],
    ),
    (
        "Application",
        &[("F1", "Toggle this help"), ("Ctrl+c", "Quit")],
    ),
];

/// Build the help content lines grouped by category.
fn build_help_content(styles: &WidgetStyles) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (title, keys)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(*title, styles.section_header)));
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {key:<22}"), styles.key),
                Span::raw(*desc),
            ]));
        }
    }
    lines
}
