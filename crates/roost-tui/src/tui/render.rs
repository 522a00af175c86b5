//! Full-frame rendering.
//!
//! [`render`] reads the app state and draws exactly one view plus the status
//! bar. It never mutates anything, so drawing the same state twice produces
//! the same frame.

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    widgets::Clear,
};
use roost_core::View;

use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::tui::widgets::{ChatView, HomeView, ListingsView, StatusBar};

pub fn render(f: &mut Frame, app: &App, theme: &Theme) {
    let state = app.state();
    let area = f.area();
    let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    // Nothing from the previous view may survive a view change
    f.render_widget(Clear, area);

    match state.current_view() {
        View::Home => f.render_widget(HomeView::new(app.home_input().textarea(), theme), body),
        View::Chat => f.render_widget(ChatView::new(state, app.chat_input().textarea(), theme), body),
        View::Listings => f.render_widget(ListingsView::new(state.search_query(), theme), body),
    }

    f.render_widget(
        StatusBar::new(state, theme).with_spinner_state(app.spinner_state()),
        status,
    );
}
