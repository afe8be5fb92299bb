//! Terminal event polling and translation.
//!
//! Raw crossterm events are translated into [`TuiEvent`] values here, so the
//! rest of the TUI never touches crossterm directly. Events stay low-level
//! (chars, arrows, control chords); the event loop decides what they mean
//! for the active view.

use crossterm::event::{self, Event, KeyCode, KeyModifiers};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    /// Ctrl+C — quits regardless of view or modal state.
    ForceQuit,
    /// Ctrl+O — toggle between the compose and sent views.
    SwitchView,
    /// Ctrl+S — submit the compose form.
    Send,
    InputChar(char),
    /// Bracketed paste - preserves newlines
    Paste(String),
    Backspace,
    Delete,
    Tab,
    BackTab,
    /// Enter
    Submit,
    Escape,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Home,
    End,
    PageUp,
    PageDown,
    Resize,
}

/// Poll for an event with timeout (blocks up to `timeout`).
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).ok()? {
        return None;
    }
    translate(event::read().ok()?)
}

/// Poll for an event without blocking (returns immediately).
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

fn translate(raw: Event) -> Option<TuiEvent> {
    match raw {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('o')) => Some(TuiEvent::SwitchView),
                (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::Send),
                // Ctrl+J inserts a newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
                (_, KeyCode::Char(c)) => Some(TuiEvent::InputChar(c)),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::BackTab) => Some(TuiEvent::BackTab),
                (_, KeyCode::Tab) => Some(TuiEvent::Tab),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Home) => Some(TuiEvent::Home),
                (_, KeyCode::End) => Some(TuiEvent::End),
                (_, KeyCode::PageUp) => Some(TuiEvent::PageUp),
                (_, KeyCode::PageDown) => Some(TuiEvent::PageDown),
                _ => None,
            }
        }
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}
