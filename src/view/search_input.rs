//! Search input widget.

use super::styles::WidgetStyles;
use crate::state::InputBuffer;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Placeholder shown while the input is empty.
pub const PLACEHOLDER: &str = "Search products...";

/// Bordered single-line text box with a block cursor while focused.
pub struct SearchInput<'a> {
    buffer: &'a InputBuffer,
    focused: bool,
    styles: &'a WidgetStyles,
}

impl<'a> SearchInput<'a> {
    /// Create new SearchInput widget.
    pub fn new(buffer: &'a InputBuffer, focused: bool, styles: &'a WidgetStyles) -> Self {
        Self {
            buffer,
            focused,
            styles,
        }
    }

    fn line(&self) -> Line<'static> {
        let text = self.buffer.text();

        if text.is_empty() && !self.focused {
            return Line::from(Span::styled(PLACEHOLDER, self.styles.muted));
        }

        let cursor = self.buffer.cursor();
        let before: String = text.chars().take(cursor).collect();
        let mut rest = text.chars().skip(cursor);
        let at_cursor = rest.next().map(String::from).unwrap_or_else(|| " ".to_string());
        let after: String = rest.collect();

        let mut spans = vec![Span::raw(before)];
        if self.focused {
            spans.push(Span::styled(
                at_cursor,
                Style::default()
                    .bg(Color::White)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(at_cursor));
        }
        spans.push(Span::raw(after));
        Line::from(spans)
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.styles.border_focused
        } else {
            self.styles.border
        };

        Paragraph::new(self.line())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Search ")
                    .border_style(border_style),
            )
            .render(area, buf);
    }
}
