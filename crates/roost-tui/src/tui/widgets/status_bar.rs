//! Status bar: active view, busy spinner, failure notice and key hints

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use roost_core::{SessionState, View};

use crate::tui::theme::{Component, Theme};

const SPINNER_CHARS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_char(state: usize) -> &'static str {
    SPINNER_CHARS[state % SPINNER_CHARS.len()]
}

pub struct StatusBar<'a> {
    state: &'a SessionState,
    theme: &'a Theme,
    spinner_state: usize,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a SessionState, theme: &'a Theme) -> Self {
        Self {
            state,
            theme,
            spinner_state: 0,
        }
    }

    pub fn with_spinner_state(mut self, spinner_state: usize) -> Self {
        self.spinner_state = spinner_state;
        self
    }
}

fn key_hints(state: &SessionState) -> &'static str {
    match (state.current_view(), state.last_failure().is_some()) {
        (View::Listings, _) => "Esc quit ",
        (_, true) => "Ctrl+R retry │ Esc quit ",
        (_, false) => "Enter send │ Esc quit ",
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = self.theme.style(Component::StatusBar);

        // Left: view name, then either the busy spinner or the last failure
        let mut left_spans = vec![Span::raw(format!(" {} ", self.state.current_view()))];
        if self.state.is_busy() {
            left_spans.push(Span::styled(
                format!("{} Thinking… ", spinner_char(self.spinner_state)),
                self.theme.style(Component::Spinner),
            ));
        } else if let Some(failure) = self.state.last_failure() {
            left_spans.push(Span::styled(
                format!("✗ {} ", failure.reason),
                self.theme.style(Component::NoticeError),
            ));
        }

        // Hints keep their own segment so a long failure is cut, not overdrawn
        let hints = Line::from(Span::styled(
            key_hints(self.state),
            self.theme.style(Component::DimText),
        ));
        let hints_width = u16::try_from(hints.width()).unwrap_or(u16::MAX);
        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hints_width)]).areas(area);

        Paragraph::new(Line::from(left_spans))
            .style(style)
            .alignment(Alignment::Left)
            .render(left, buf);

        Paragraph::new(hints)
            .style(style)
            .alignment(Alignment::Right)
            .render(right, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roost_core::controller::{begin_submit, complete_submit};
    use roost_core::ClassifyError;

    #[test]
    fn spinner_wraps_around() {
        assert_eq!(spinner_char(0), "⠋");
        assert_eq!(spinner_char(SPINNER_CHARS.len()), "⠋");
        assert_eq!(spinner_char(3), "⠸");
    }

    fn row(buf: &Buffer) -> String {
        buf.content.iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn long_failure_does_not_overlap_hints() {
        let mut state = SessionState::new();
        let accepted = begin_submit(&mut state, "hello").unwrap();
        complete_submit(
            &mut state,
            accepted,
            Err(ClassifyError::Timeout {
                after: std::time::Duration::from_millis(5000),
            }),
        );

        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        StatusBar::new(&state, &theme).render(area, &mut buf);

        let text = row(&buf);
        let hints = "Ctrl+R retry │ Esc quit ";
        assert!(text.ends_with(hints));
        let left = &text[..text.len() - hints.len()];
        assert!(left.starts_with(" home ✗ classification timed out"));
        assert!(!left.contains("Ctrl+R"));
    }

    #[test]
    fn hints_offer_retry_after_failure() {
        let mut state = SessionState::new();
        assert_eq!(key_hints(&state), "Enter send │ Esc quit ");

        let accepted = begin_submit(&mut state, "hello").unwrap();
        complete_submit(
            &mut state,
            accepted,
            Err(ClassifyError::Unavailable("offline".to_string())),
        );
        assert_eq!(key_hints(&state), "Ctrl+R retry │ Esc quit ");
    }
}
