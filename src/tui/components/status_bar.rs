//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::models::WindowStatus;
use crate::tui::app::App;

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let window = &app.state.window;

    let status_color = match window.status() {
        WindowStatus::Ready => Color::Green,
        WindowStatus::Loading => Color::Yellow,
        WindowStatus::Failed => Color::Red,
    };

    let error_span = if let Some(ref error) = app.error_message {
        Span::styled(
            format!(" {} ", error.message),
            Style::default().fg(Color::Red),
        )
    } else {
        Span::raw("")
    };

    let view_info = format!(" {}/{} ", app.active_view + 1, app.views.len());

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", window.status().label()),
            Style::default().fg(status_color),
        ),
        Span::raw("│"),
        Span::styled(
            format!(" {} ", app.source_label),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("│"),
        Span::raw(format!(" {} ", window.range())),
        Span::raw("│"),
        Span::raw(format!(" {} samples ", window.samples().len())),
        Span::raw("│"),
        error_span,
        Span::raw(format!(
            "{:>width$}",
            view_info,
            width = area.width.saturating_sub(60) as usize
        )),
    ]);

    let para = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
