use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    Quit,
    InputChar(char),
    Backspace,
    Submit,
    HistoryUp,
    HistoryDown,
    AcceptCompletion,
    CursorRight,
    Escape,
    ClearScreen,
    ToggleLocale,
    /// Alt+1..9: activate the n-th action (1-based) of the latest entry
    /// that has actions.
    ActivateAction(u8),
    WheelUp,
    WheelDown,
    LeftClick(u16, u16),
}

fn map_key_event(key_event: KeyEvent) -> AppEvent {
    if key_event.kind != KeyEventKind::Press {
        return AppEvent::Tick;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => AppEvent::Quit,
            KeyCode::Char('l') => AppEvent::ClearScreen,
            _ => AppEvent::Tick,
        };
    }
    if key_event.modifiers.contains(KeyModifiers::ALT) {
        return match key_event.code {
            KeyCode::Char(digit @ '1'..='9') => AppEvent::ActivateAction(digit as u8 - b'0'),
            _ => AppEvent::Tick,
        };
    }

    match key_event.code {
        KeyCode::Tab => AppEvent::AcceptCompletion,
        KeyCode::Up => AppEvent::HistoryUp,
        KeyCode::Down => AppEvent::HistoryDown,
        KeyCode::Right => AppEvent::CursorRight,
        KeyCode::Esc => AppEvent::Escape,
        KeyCode::F(2) => AppEvent::ToggleLocale,
        KeyCode::Backspace => AppEvent::Backspace,
        KeyCode::Enter => AppEvent::Submit,
        KeyCode::Char(c) => AppEvent::InputChar(c),
        _ => AppEvent::Tick,
    }
}

fn map_mouse_event_kind(kind: MouseEventKind) -> AppEvent {
    match kind {
        MouseEventKind::ScrollUp => AppEvent::WheelUp,
        MouseEventKind::ScrollDown => AppEvent::WheelDown,
        MouseEventKind::Down(MouseButton::Left) => AppEvent::LeftClick(0, 0),
        _ => AppEvent::Tick,
    }
}

pub fn next_event() -> io::Result<AppEvent> {
    if event::poll(Duration::from_millis(16))? {
        match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                return Ok(map_key_event(key_event));
            }
            Event::Mouse(mouse_event) => {
                if let MouseEventKind::Down(MouseButton::Left) = mouse_event.kind {
                    return Ok(AppEvent::LeftClick(mouse_event.column, mouse_event.row));
                }
                return Ok(map_mouse_event_kind(mouse_event.kind));
            }
            _ => {}
        }
    }

    Ok(AppEvent::Tick)
}
