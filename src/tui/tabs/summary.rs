//! Summary view: the window at a glance.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::WindowStatus;
use crate::presentation::{self, CURRENCY, ChangeDirection};
use crate::tui::app::App;

/// Renders the summary view into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let window = &app.state.window;
    let headline = presentation::headline(&app.state.metrics);
    let change_color = match headline.direction {
        ChangeDirection::Up => Color::Green,
        ChangeDirection::Down => Color::Red,
    };
    let label = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Instrument  ", label),
            Span::styled(
                app.symbol.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Range       ", label),
            Span::raw(window.range().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Last        ", label),
            Span::raw(format!("{} {CURRENCY}", headline.price)),
        ]),
        Line::from(vec![
            Span::styled("Change      ", label),
            Span::styled(headline.change, Style::default().fg(change_color)),
        ]),
    ];

    match window.status() {
        WindowStatus::Ready => {
            if let (Some(first), Some(last)) = (window.samples().first(), window.samples().last())
            {
                let [from, ..] = presentation::tooltip_lines(first);
                let [to, ..] = presentation::tooltip_lines(last);
                lines.push(Line::from(vec![
                    Span::styled("Period      ", label),
                    Span::raw(format!("{from} → {to}")),
                ]));
            }
        }
        WindowStatus::Loading => lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        ))),
        WindowStatus::Failed => lines.push(Line::from(Span::styled(
            window.error().unwrap_or_default().to_string(),
            Style::default().fg(Color::Red),
        ))),
    }

    let block = Block::default()
        .title(" Summary ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
