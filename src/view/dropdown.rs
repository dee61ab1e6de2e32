//! Results dropdown widget.
//!
//! Renders one of four bodies (spinner, error, empty, rows) in that
//! priority order. Each row shows where the thumbnail lives, the title and
//! the category; terminals cannot show the image itself.

use super::constants::{DROPDOWN_MAX_ROWS, DROPDOWN_MESSAGE_ROWS};
use super::styles::WidgetStyles;
use crate::model::Product;
use crate::state::ResultsView;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use url::Url;

/// Shown while a fetch is outstanding.
pub const LOADING_TEXT: &str = "Loading...";
/// Shown when the latest fetch failed.
pub const ERROR_TEXT: &str = "Error fetching products";
/// Shown when the latest fetch matched nothing.
pub const EMPTY_TEXT: &str = "No products found";

/// Truncate `text` to at most `max_width` terminal columns, appending an
/// ellipsis when anything was cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

/// Short label for a product thumbnail: the image URL's host.
pub fn thumbnail_label(product: &Product) -> String {
    Url::parse(&product.image)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "no image".to_string())
}

/// Index of the first visible row so that `active` stays on screen.
pub fn scroll_offset(len: usize, active: Option<usize>, visible_rows: usize) -> usize {
    match active {
        Some(i) if visible_rows > 0 && i < len => i.saturating_sub(visible_rows - 1),
        _ => 0,
    }
}

/// Total height (borders included) the dropdown needs for `view`.
pub fn dropdown_height(view: &ResultsView<'_>) -> u16 {
    let body = match view {
        ResultsView::Populated(rows) => {
            u16::try_from(rows.len()).unwrap_or(u16::MAX).min(DROPDOWN_MAX_ROWS)
        }
        _ => DROPDOWN_MESSAGE_ROWS,
    };
    body + 2
}

/// Map a click at terminal `row` to a result index.
///
/// `area` is where the dropdown was last drawn. Clicks on the border or
/// below the last row return `None`.
pub fn row_at(area: Rect, column: u16, row: u16, len: usize, active: Option<usize>) -> Option<usize> {
    let inner_top = area.y.saturating_add(1);
    let inner_bottom = area.y.saturating_add(area.height).saturating_sub(1);
    let inner_left = area.x.saturating_add(1);
    let inner_right = area.x.saturating_add(area.width).saturating_sub(1);

    if row < inner_top || row >= inner_bottom || column < inner_left || column >= inner_right {
        return None;
    }

    let visible = usize::from(inner_bottom - inner_top);
    let index = scroll_offset(len, active, visible) + usize::from(row - inner_top);
    (index < len).then_some(index)
}

/// Dropdown widget.
pub struct ResultDropdown<'a> {
    view: ResultsView<'a>,
    active: Option<usize>,
    styles: &'a WidgetStyles,
}

impl<'a> ResultDropdown<'a> {
    /// Create a dropdown for `view` with `active` highlighted.
    pub fn new(view: ResultsView<'a>, active: Option<usize>, styles: &'a WidgetStyles) -> Self {
        Self {
            view,
            active,
            styles,
        }
    }

    fn row_line(&self, product: &Product, highlighted: bool, width: usize) -> Line<'static> {
        let marker = if highlighted { "> " } else { "  " };
        let host = format!("[{}] ", thumbnail_label(product));
        let category = format!("  {}", product.category);

        let fixed = marker.width() + host.width() + category.width();
        let title = truncate_to_width(product.display_title(), width.saturating_sub(fixed).max(1));

        let line = Line::from(vec![
            Span::raw(marker),
            Span::styled(host, self.styles.muted),
            Span::raw(title),
            Span::styled(category, self.styles.muted),
        ]);

        if highlighted {
            line.style(self.styles.active_row)
        } else {
            line
        }
    }
}

impl Widget for ResultDropdown<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.styles.border_focused);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = match self.view {
            ResultsView::Loading => vec![Line::from(Span::styled(LOADING_TEXT, self.styles.muted))],
            ResultsView::Error(_) => vec![Line::from(Span::styled(ERROR_TEXT, self.styles.error))],
            ResultsView::Empty => vec![Line::from(Span::styled(EMPTY_TEXT, self.styles.muted))],
            ResultsView::Populated(rows) => {
                let visible = usize::from(inner.height);
                let offset = scroll_offset(rows.len(), self.active, visible);
                rows.iter()
                    .enumerate()
                    .skip(offset)
                    .take(visible)
                    .map(|(i, p)| self.row_line(p, self.active == Some(i), usize::from(inner.width)))
                    .collect()
            }
        };

        Paragraph::new(lines).render(inner, buf);
    }
}
