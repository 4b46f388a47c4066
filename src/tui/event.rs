//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::{mpsc, watch};

use super::app::App;
use crate::pipeline::ChartState;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
    /// The pipeline published a new state.
    State(ChartState),
    /// Request to quit the application.
    Quit,
}

/// Actions that require the pipeline.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Load the range with this label.
    SelectRange(String),
    /// Reload the current range.
    Retry,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Spawns a task forwarding every published pipeline state to the channel.
pub fn spawn_state_forwarder(
    mut rx: watch::Receiver<ChartState>,
    tx: mpsc::UnboundedSender<Message>,
) {
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            if tx.send(Message::State(state)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
        Message::State(state) => {
            app.apply_state(state);
            None
        }
        Message::Quit => {
            app.should_quit = true;
            None
        }
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_errors();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        KeyCode::Char('q') if key.modifiers.is_empty() => {
            app.should_quit = true;
            None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            None
        }

        // View navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_view();
            } else {
                app.next_view();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_view();
            None
        }

        // Range selection
        KeyCode::Char('h') | KeyCode::Left => app
            .selected_range
            .checked_sub(1)
            .and_then(|i| app.select_range_index(i))
            .map(Action::SelectRange),
        KeyCode::Char('l') | KeyCode::Right => app
            .select_range_index(app.selected_range + 1)
            .map(Action::SelectRange),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c.to_digit(10).map_or(0, |d| d as usize) - 1;
            app.select_range_index(index).map(Action::SelectRange)
        }
        KeyCode::Char('r') => Some(Action::Retry),

        // Tooltip cursor
        KeyCode::Char('[') => {
            app.move_cursor(-1);
            None
        }
        KeyCode::Char(']') => {
            app.move_cursor(1);
            None
        }
        KeyCode::Char('{') => {
            app.move_cursor(-24);
            None
        }
        KeyCode::Char('}') => {
            app.move_cursor(24);
            None
        }
        KeyCode::Esc => {
            app.cursor = None;
            None
        }

        _ => None,
    }
}
