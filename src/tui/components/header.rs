//! Price header shown above every view.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::presentation::{self, CURRENCY, ChangeDirection};
use crate::tui::app::App;

/// Renders the symbol, headline price and change.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let headline = presentation::headline(&app.state.metrics);
    let (change_color, arrow) = match headline.direction {
        ChangeDirection::Up => (Color::Green, "▲"),
        ChangeDirection::Down => (Color::Red, "▼"),
    };

    let lines = vec![
        Line::from(Span::styled(
            format!(" {} ", app.symbol),
            Style::default().fg(Color::Gray),
        )),
        Line::from(vec![
            Span::styled(
                format!(" {} ", headline.price),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{CURRENCY} "), Style::default().fg(Color::DarkGray)),
            Span::styled(arrow, Style::default().fg(change_color)),
            Span::styled(
                format!(" {}", headline.change),
                Style::default().fg(change_color),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}
