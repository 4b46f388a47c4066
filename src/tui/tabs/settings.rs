//! Settings view: the active configuration.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::App;

/// Renders the settings view into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line> = app
        .settings
        .iter()
        .map(|(key, value)| {
            Line::from(vec![
                Span::styled(format!("{key:<14}"), Style::default().fg(Color::DarkGray)),
                Span::raw(value.clone()),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Settings (from PRICECHART_* environment) ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
