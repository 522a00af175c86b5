//! Single-line text input backed by `tui-textarea`.

use ratatui::crossterm::event::KeyEvent;
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::tui::theme::{Component, Theme};

/// One of the two input surfaces (home search box, chat message box)
pub struct InputBox {
    title: &'static str,
    placeholder: &'static str,
    theme: Theme,
    textarea: TextArea<'static>,
}

impl InputBox {
    pub fn new(title: &'static str, placeholder: &'static str, theme: &Theme) -> Self {
        let mut input = Self {
            title,
            placeholder,
            theme: theme.clone(),
            textarea: TextArea::default(),
        };
        input.textarea = input.fresh_textarea();
        input
    }

    fn fresh_textarea(&self) -> TextArea<'static> {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(self.placeholder);
        textarea.set_placeholder_style(self.theme.style(Component::Placeholder));
        textarea.set_cursor_line_style(ratatui::style::Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.style(Component::InputBorder))
                .title(self.title),
        );
        textarea
    }

    /// Forward an editing key. Returns true when the content changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        self.textarea.input(key)
    }

    /// Insert pasted text, flattened onto one line
    pub fn paste(&mut self, data: &str) -> bool {
        let flattened = data.replace("\r\n", " ").replace(['\r', '\n'], " ");
        self.textarea.insert_str(flattened)
    }

    pub fn content(&self) -> String {
        self.textarea.lines().join(" ")
    }

    /// Take the trimmed content and clear the field
    pub fn take_submission(&mut self) -> String {
        let text = self.content().trim().to_string();
        self.textarea = self.fresh_textarea();
        text
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    fn type_str(input: &mut InputBox, text: &str) {
        for c in text.chars() {
            input.input(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn take_submission_trims_and_clears() {
        let mut input = InputBox::new(" Search ", "type here", &Theme::default());
        type_str(&mut input, "  hello  ");

        assert_eq!(input.take_submission(), "hello");
        assert_eq!(input.content(), "");
    }

    #[test]
    fn paste_stays_on_one_line() {
        let mut input = InputBox::new(" Message ", "", &Theme::default());
        input.paste("two\r\nbedrooms\nplease");

        assert_eq!(input.textarea().lines().len(), 1);
        assert_eq!(input.content(), "two bedrooms please");
    }
}
