//! Product detail card.

use super::styles::WidgetStyles;
use crate::model::Product;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

/// Shown when nothing has been selected yet.
pub const NO_SELECTION_TEXT: &str = "Select a product to see its details.";

/// Card for the selected product. Price and description appear only when
/// the catalog supplied them.
pub struct DetailCard<'a> {
    product: Option<&'a Product>,
    focused: bool,
    styles: &'a WidgetStyles,
}

impl<'a> DetailCard<'a> {
    /// Create a card for `product`.
    pub fn new(product: Option<&'a Product>, focused: bool, styles: &'a WidgetStyles) -> Self {
        Self {
            product,
            focused,
            styles,
        }
    }

    fn lines(&self, product: &'a Product) -> Vec<Line<'a>> {
        let mut lines = vec![
            Line::from(Span::styled(product.display_title(), self.styles.title)),
            Line::from(vec![
                Span::styled("Category: ", self.styles.muted),
                Span::raw(product.category.as_str()),
            ]),
        ];

        if !product.image.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Image: ", self.styles.muted),
                Span::raw(product.image.as_str()),
            ]));
        }

        if let Some(price) = product.formatted_price() {
            lines.push(Line::from(Span::styled(price, self.styles.price)));
        }

        if let Some(description) = product.description_text() {
            lines.push(Line::default());
            lines.push(Line::from(description));
        }

        lines
    }
}

impl Widget for DetailCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            self.styles.border_focused
        } else {
            self.styles.border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Details ")
            .border_style(border_style);

        let lines = match self.product {
            Some(product) => self.lines(product),
            None => vec![Line::from(Span::styled(NO_SELECTION_TEXT, self.styles.muted))],
        };

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
