//! Chart view: range selector, price line, volume bars and tooltip.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Sparkline},
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::presentation::{self, format_price};
use crate::tui::app::App;
use crate::tui::components::range_bar;

/// Height of the volume panel including borders.
const VOLUME_HEIGHT: u16 = 5;

/// Renders the chart view into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Range selector
            Constraint::Min(8),                // Price chart
            Constraint::Length(VOLUME_HEIGHT), // Volume
            Constraint::Length(1),             // Tooltip
        ])
        .split(area);

    range_bar::render(frame, layout[0], app);

    if let Some(message) = presentation::chart_message(&app.state.window) {
        render_placeholder(frame, layout[1].union(layout[2]), app, message);
    } else {
        render_price(frame, layout[1], app);
        render_volume(frame, layout[2], app);
    }

    render_tooltip(frame, layout[3], app);
}

/// Renders the loading, error or empty placeholder.
fn render_placeholder(frame: &mut Frame, area: Rect, app: &App, message: String) {
    let color = if app.state.window.is_failed() {
        Color::Red
    } else {
        Color::DarkGray
    };

    let block = chart_block(app);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Center vertically
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner);

    let para = Paragraph::new(message)
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    frame.render_widget(para, rows[1]);
}

/// Renders the price line with the tooltip cursor marked.
fn render_price(frame: &mut Frame, area: Rect, app: &App) {
    let samples = app.state.window.samples();
    let points = presentation::price_points(samples);
    let (low, high) = presentation::price_bounds(samples).unwrap_or_default();

    let low_f = low.to_f64().unwrap_or(0.0);
    let high_f = high.to_f64().unwrap_or(0.0);
    let pad = ((high_f - low_f) * 0.05).max(1.0);

    let x_min = points.first().map_or(0.0, |p| p.0);
    let x_max = points.last().map_or(1.0, |p| p.0).max(x_min + 1.0);

    let cursor: Vec<(f64, f64)> = app
        .cursor
        .and_then(|i| points.get(i).copied())
        .into_iter()
        .collect();

    let mut datasets = vec![
        Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::LightBlue))
            .data(&points),
    ];
    if !cursor.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(&cursor),
        );
    }

    let (first, last) = match (samples.first(), samples.last()) {
        (Some(f), Some(l)) => (time_label(f.timestamp), time_label(l.timestamp)),
        _ => (String::new(), String::new()),
    };

    let chart = Chart::new(datasets)
        .block(chart_block(app))
        .legend_position(None)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([x_min, x_max])
                .labels(vec![first, last]),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([low_f - pad, high_f + pad])
                .labels(vec![
                    format_price(low),
                    format_price(low + (high - low) / Decimal::TWO),
                    format_price(high),
                ]),
        );

    frame.render_widget(chart, area);
}

/// Renders volume bars, one bar per column.
fn render_volume(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Volume ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let width = block.inner(area).width as usize;

    let volumes = presentation::volume_buckets(app.state.window.samples(), width);
    let sparkline = Sparkline::default()
        .block(block)
        .data(&volumes)
        .style(Style::default().fg(Color::Gray));
    frame.render_widget(sparkline, area);
}

/// Renders tooltip text for the sample under the cursor.
fn render_tooltip(frame: &mut Frame, area: Rect, app: &App) {
    let sample = app
        .cursor
        .and_then(|i| app.state.window.samples().get(i));

    let line = match sample {
        Some(sample) => {
            let [time, price, volume] = presentation::tooltip_lines(sample);
            Line::from(vec![
                Span::styled(format!(" {time} "), Style::default().fg(Color::Yellow)),
                Span::raw("│"),
                Span::raw(format!(" {price} ")),
                Span::raw("│"),
                Span::raw(format!(" {volume} ")),
            ])
        }
        None => Line::from(Span::styled(
            " [ ] move cursor  { } jump a day",
            Style::default().fg(Color::DarkGray),
        )),
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn chart_block(app: &App) -> Block<'static> {
    Block::default()
        .title(format!(" {} · {} ", app.symbol, app.state.window.range().label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

fn time_label(timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%m-%d %H:%M")
        .to_string()
}
