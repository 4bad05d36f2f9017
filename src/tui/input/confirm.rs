use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::nav::NavEvent;

use super::Action;

/// Keys while the quit confirmation is showing: y/n answer it, Esc backs out
pub(super) fn map_quit_confirm_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Nav(NavEvent::ConfirmQuit(true))),
        KeyCode::Char('n') | KeyCode::Char('N') => {
            Some(Action::Nav(NavEvent::ConfirmQuit(false)))
        }
        KeyCode::Esc => Some(Action::Nav(NavEvent::Back)),
        _ => None,
    }
}
