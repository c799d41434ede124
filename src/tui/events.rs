//! Event handling for the TUI.

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;
use tokio::sync::mpsc;

/// Events that can occur in the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal event (keyboard input).
    Key(KeyEvent),
    /// Redraw tick.
    Tick,
    /// Resize event.
    Resize(u16, u16),
}

/// Event handler that sends events over a channel.
///
/// Terminal polling blocks, so it runs on a dedicated blocking thread and
/// never stalls the feed timers on the runtime.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Create a new event handler.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::task::spawn_blocking(move || loop {
            let event = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Some(Event::Key(key))
                    }
                    Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                    _ => None,
                }
            } else {
                Some(Event::Tick)
            };

            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receive the next event.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Check if a key event matches a specific key code.
pub fn is_key(event: &KeyEvent, code: KeyCode) -> bool {
    event.code == code && (event.modifiers == KeyModifiers::NONE || event.modifiers == KeyModifiers::SHIFT)
}

/// Check if a key event is Ctrl+C.
pub fn is_interrupt(event: &KeyEvent) -> bool {
    event.code == KeyCode::Char('c') && event.modifiers == KeyModifiers::CONTROL
}

/// Check if a key event is Ctrl+C or q.
pub fn is_quit(event: &KeyEvent) -> bool {
    is_interrupt(event) || is_key(event, KeyCode::Char('q'))
}
