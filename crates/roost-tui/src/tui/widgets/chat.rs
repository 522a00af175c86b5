//! Chat view: initial query header, scrolling message thread, message box.
//!
//! The thread is rebuilt from the session history on every render and always
//! pinned to its last line.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};
use roost_core::{Sender, SessionState};
use tui_textarea::TextArea;

use crate::tui::theme::{Component, Theme};

pub struct ChatView<'a> {
    state: &'a SessionState,
    input: &'a TextArea<'static>,
    theme: &'a Theme,
}

impl<'a> ChatView<'a> {
    pub fn new(state: &'a SessionState, input: &'a TextArea<'static>, theme: &'a Theme) -> Self {
        Self {
            state,
            input,
            theme,
        }
    }
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(width.max(1)))
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
}

/// The initial query wrapped to `width`, empty when there is none yet
pub fn header_lines(state: &SessionState, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let Some(initial) = state.initial_query() else {
        return Vec::new();
    };
    let style = theme.style(Component::InitialQuery);
    textwrap::wrap(&initial.text, &wrap_options(width))
        .into_iter()
        .map(|wrapped| Line::styled(wrapped.into_owned(), style))
        .collect()
}

/// Wrap every non-initial message to `width`, user messages right-aligned,
/// with a blank line between messages.
pub fn thread_lines(state: &SessionState, width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let options = wrap_options(width);
    let mut lines = Vec::new();

    for (i, message) in state.thread().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        let (style, alignment) = match message.sender {
            Sender::User => (theme.style(Component::UserMessage), Alignment::Right),
            Sender::Bot => (theme.style(Component::BotMessage), Alignment::Left),
        };
        for wrapped in textwrap::wrap(&message.text, &options) {
            lines.push(Line::styled(wrapped.into_owned(), style).alignment(alignment));
        }
    }

    lines
}

impl Widget for ChatView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Header grows with the wrapped query, up to half the view
        let header_width = area.width.saturating_sub(2);
        let header = header_lines(self.state, header_width, self.theme);
        let max_header = (area.height / 2).max(3);
        let header_height = u16::try_from(header.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(2)
            .min(max_header);

        let [header_area, thread, input] = Layout::vertical([
            Constraint::Length(header_height),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .areas(area);

        Paragraph::new(header)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.theme.style(Component::Border))
                    .title(" Your search "),
            )
            .render(header_area, buf);

        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(self.theme.style(Component::Border));
        let inner = block.inner(thread);
        let lines = thread_lines(self.state, inner.width, self.theme);
        let offset = lines.len().saturating_sub(usize::from(inner.height));
        Paragraph::new(lines)
            .block(block)
            .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
            .render(thread, buf);

        self.input.render(input, buf);
    }
}
