use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::nav::{NavEvent, Screen};

use super::{Action, PAGE_SIZE};

/// Keys on the tracks, phases, tasks and detail screens
pub(super) fn map_navigate_key(screen: &Screen, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Interrupt),
            _ => None,
        };
    }

    let on_detail = matches!(screen, Screen::Detail { .. });
    // Up/down scroll the detail screen and move the cursor everywhere else
    let step = |delta: isize| {
        Some(Action::Nav(if on_detail {
            NavEvent::MoveScroll(delta)
        } else {
            NavEvent::MoveCursor(delta)
        }))
    };

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => step(-1),
        KeyCode::Down | KeyCode::Char('j') => step(1),
        KeyCode::PageUp => step(-PAGE_SIZE),
        KeyCode::PageDown => step(PAGE_SIZE),
        KeyCode::Home | KeyCode::Char('g') => step(isize::MIN),
        KeyCode::End | KeyCode::Char('G') => step(isize::MAX),
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => Some(Action::Nav(NavEvent::Confirm)),
        KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => Some(Action::Nav(NavEvent::Back)),
        KeyCode::Char('q') => Some(Action::Nav(NavEvent::RequestQuit)),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Char('a') if matches!(screen, Screen::Tracks { .. }) => {
            Some(Action::ToggleArchived)
        }
        _ => None,
    }
}
