//! Styles for each part of the UI.

use ratatui::style::{Color, Modifier, Style};

/// Named parts of the UI that carry their own style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Title,
    Subtitle,
    Border,
    InputBorder,
    Placeholder,
    InitialQuery,
    UserMessage,
    BotMessage,
    SearchSummary,
    StatusBar,
    Spinner,
    NoticeError,
    DimText,
}

#[derive(Debug, Clone)]
pub struct Theme {
    accent: Color,
    text: Color,
    dim: Color,
    error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Cyan,
            text: Color::White,
            dim: Color::DarkGray,
            error: Color::Red,
        }
    }
}

impl Theme {
    pub fn style(&self, component: Component) -> Style {
        match component {
            Component::Title => Style::default()
                .fg(self.accent)
                .add_modifier(Modifier::BOLD),
            Component::Subtitle => Style::default().fg(self.text),
            Component::Border => Style::default().fg(self.dim),
            Component::InputBorder => Style::default().fg(self.accent),
            Component::Placeholder | Component::DimText => Style::default().fg(self.dim),
            Component::InitialQuery => Style::default()
                .fg(self.text)
                .add_modifier(Modifier::ITALIC),
            Component::UserMessage => Style::default().fg(self.accent),
            Component::BotMessage => Style::default().fg(self.text),
            Component::SearchSummary => Style::default()
                .fg(self.text)
                .add_modifier(Modifier::BOLD),
            Component::StatusBar => Style::default().fg(self.text).bg(Color::Black),
            Component::Spinner => Style::default().fg(self.accent).bg(Color::Black),
            Component::NoticeError => Style::default()
                .fg(self.error)
                .bg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}
