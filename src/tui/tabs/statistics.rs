//! Statistics view: descriptive numbers for the loaded window.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::presentation::{self, format_price, format_volume};
use crate::tui::app::App;

/// Renders the statistics view into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let samples = app.state.window.samples();
    let Some((low, high)) = presentation::price_bounds(samples) else {
        let message = presentation::chart_message(&app.state.window).unwrap_or_default();
        let para = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(para, area);
        return;
    };

    let total_volume: u64 = samples.iter().map(|s| s.volume).fold(0, u64::saturating_add);
    let peak_volume = samples.iter().map(|s| s.volume).max().unwrap_or(0);
    let metrics = &app.state.metrics;

    let rows = [
        ("Samples", samples.len().to_string()),
        ("Open", format_price(samples[0].price)),
        ("Last", format_price(metrics.current_price)),
        ("High", format_price(high)),
        ("Low", format_price(low)),
        ("Spread", format_price(high - low)),
        ("Change", presentation::format_change(metrics)),
        ("Total volume", format_volume(total_volume)),
        ("Peak volume", format_volume(peak_volume)),
    ]
    .into_iter()
    .map(|(name, value)| {
        Row::new(vec![
            Cell::from(name).style(Style::default().fg(Color::DarkGray)),
            Cell::from(value).style(Style::default().add_modifier(Modifier::BOLD)),
        ])
    });

    let table = Table::new(rows, [Constraint::Length(14), Constraint::Min(10)]).block(block);
    frame.render_widget(table, area);
}
