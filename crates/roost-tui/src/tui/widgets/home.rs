//! Landing view: title and the search box.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};
use tui_textarea::TextArea;

use crate::tui::theme::{Component, Theme};

const SEARCH_BOX_WIDTH: u16 = 64;

pub struct HomeView<'a> {
    input: &'a TextArea<'static>,
    theme: &'a Theme,
}

impl<'a> HomeView<'a> {
    pub fn new(input: &'a TextArea<'static>, theme: &'a Theme) -> Self {
        Self { input, theme }
    }
}

impl Widget for HomeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [title, subtitle, _gap, search] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .flex(Flex::Center)
        .areas(area);

        Paragraph::new(Line::styled("R O O S T", self.theme.style(Component::Title)))
            .alignment(Alignment::Center)
            .render(title, buf);
        Paragraph::new(Line::styled(
            "Describe the home you're looking for, or just say hello.",
            self.theme.style(Component::Subtitle),
        ))
        .alignment(Alignment::Center)
        .render(subtitle, buf);

        let [search] = Layout::horizontal([Constraint::Length(SEARCH_BOX_WIDTH.min(search.width))])
            .flex(Flex::Center)
            .areas(search);
        self.input.render(search, buf);
    }
}
