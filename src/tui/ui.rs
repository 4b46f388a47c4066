//! Main UI rendering coordinator.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use super::app::{App, View};
use super::components::{header, status_bar, tab_bar};
use super::tabs::{chart, settings, statistics, summary};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
            Constraint::Length(2), // Price header
            Constraint::Min(10),   // View body
            Constraint::Length(1), // Keybindings help
        ])
        .split(frame.area());

    tab_bar::render(frame, layout[0], app);
    status_bar::render(frame, layout[1], app);
    header::render(frame, layout[2], app);

    match app.current_view() {
        View::Summary => summary::render(frame, layout[3], app),
        View::Chart => chart::render(frame, layout[3], app),
        View::Statistics => statistics::render(frame, layout[3], app),
        View::Settings => settings::render(frame, layout[3], app),
    }

    render_keybindings(frame, layout[4]);
}

fn render_keybindings(frame: &mut Frame, area: Rect) {
    let help = "[h/l]range [1-7]pick/reload range [r]retry [ ]cursor [Esc]hide cursor [Tab]switch view [q]quit";

    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
