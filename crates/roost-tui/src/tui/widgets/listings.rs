//! Listings view: shows the search that produced it.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::tui::theme::{Component, Theme};

pub struct ListingsView<'a> {
    search_query: &'a str,
    theme: &'a Theme,
}

impl<'a> ListingsView<'a> {
    pub fn new(search_query: &'a str, theme: &'a Theme) -> Self {
        Self {
            search_query,
            theme,
        }
    }
}

impl Widget for ListingsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.style(Component::Border))
            .title(" Listings ");

        let lines = vec![
            Line::styled("Showing results for", self.theme.style(Component::DimText)),
            Line::styled(
                self.search_query.to_string(),
                self.theme.style(Component::SearchSummary),
            ),
        ];

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
