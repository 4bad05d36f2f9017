mod confirm;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent};

use super::app::App;
use super::nav::{NavEvent, Screen};

use confirm::map_quit_confirm_key;
use navigate::map_navigate_key;

/// Rows moved by PageUp / PageDown
pub const PAGE_SIZE: isize = 10;

/// What a key press asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Nav(NavEvent),
    /// Show or hide archived tracks (tracks screen only)
    ToggleArchived,
    /// Reload tracks from disk now
    Refresh,
    /// Ctrl-C: back out to the tracks screen and ask to quit
    Interrupt,
}

/// Decode a key for the given screen. Keys with no meaning there map to
/// `None` and are ignored.
pub fn map_key(screen: &Screen, key: KeyEvent) -> Option<Action> {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return None;
    }
    match screen {
        Screen::QuitConfirm => map_quit_confirm_key(key),
        _ => map_navigate_key(screen, key),
    }
}

/// Handle a key event against the current screen
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if let Some(action) = map_key(app.nav.current(), key) {
        app.dispatch(action);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers, ModifierKeyCode};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    const TRACKS: Screen = Screen::Tracks { cursor: 0 };
    const DETAIL: Screen = Screen::Detail {
        track: 0,
        phase: 0,
        task: 0,
        scroll: 0,
    };

    #[test]
    fn test_arrows_move_cursor_or_scroll() {
        assert_eq!(
            map_key(&TRACKS, key(KeyCode::Down)),
            Some(Action::Nav(NavEvent::MoveCursor(1)))
        );
        assert_eq!(
            map_key(&TRACKS, key(KeyCode::Char('k'))),
            Some(Action::Nav(NavEvent::MoveCursor(-1)))
        );
        assert_eq!(
            map_key(&DETAIL, key(KeyCode::Down)),
            Some(Action::Nav(NavEvent::MoveScroll(1)))
        );
        assert_eq!(
            map_key(&DETAIL, key(KeyCode::PageUp)),
            Some(Action::Nav(NavEvent::MoveScroll(-PAGE_SIZE)))
        );
    }

    #[test]
    fn test_enter_and_escape() {
        assert_eq!(
            map_key(&TRACKS, key(KeyCode::Enter)),
            Some(Action::Nav(NavEvent::Confirm))
        );
        assert_eq!(
            map_key(&DETAIL, key(KeyCode::Esc)),
            Some(Action::Nav(NavEvent::Back))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(
            map_key(&TRACKS, key(KeyCode::Char('q'))),
            Some(Action::Nav(NavEvent::RequestQuit))
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&TRACKS, ctrl_c), Some(Action::Interrupt));
        assert_eq!(map_key(&DETAIL, ctrl_c), Some(Action::Interrupt));
        // Plain 'c' means nothing
        assert_eq!(map_key(&TRACKS, key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_quit_confirm_keys() {
        let s = Screen::QuitConfirm;
        assert_eq!(
            map_key(&s, key(KeyCode::Char('y'))),
            Some(Action::Nav(NavEvent::ConfirmQuit(true)))
        );
        assert_eq!(
            map_key(&s, key(KeyCode::Char('n'))),
            Some(Action::Nav(NavEvent::ConfirmQuit(false)))
        );
        assert_eq!(
            map_key(&s, key(KeyCode::Esc)),
            Some(Action::Nav(NavEvent::Back))
        );
        assert_eq!(map_key(&s, key(KeyCode::Down)), None);
        assert_eq!(map_key(&s, key(KeyCode::Char('q'))), None);
    }

    #[test]
    fn test_archive_toggle_only_on_tracks() {
        assert_eq!(
            map_key(&TRACKS, key(KeyCode::Char('a'))),
            Some(Action::ToggleArchived)
        );
        assert_eq!(map_key(&DETAIL, key(KeyCode::Char('a'))), None);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert_eq!(map_key(&TRACKS, key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(&TRACKS, key(KeyCode::F(5))), None);
        assert_eq!(
            map_key(&TRACKS, key(KeyCode::Modifier(ModifierKeyCode::LeftShift))),
            None
        );
    }
}
