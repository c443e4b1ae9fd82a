//! Key mapping for the gallery screen.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entities::MAX_RATING;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// What a key press asks the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryKey {
    /// Leave the application.
    Quit,
    /// Start a new load cycle.
    Reload,
    /// Rate the selected card with `1..=5` stars.
    Rate(u8),
    /// Move the selection by whole cards.
    Move(isize),
    /// Move the selection by whole rows.
    MoveRows(isize),
    /// Move the selection by one screen.
    Page(isize),
}

/// Maps crossterm key events to gallery keys.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('q'),
                modifiers: KeyModifiers::NONE,
                ..
            } | KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            } | KeyEvent {
                code: KeyCode::Esc,
                modifiers: KeyModifiers::NONE,
                ..
            }
        )
    }

    /// Maps a key press. Releases and repeats of non-navigation keys are
    /// dropped so one press rates once.
    #[must_use]
    pub fn gallery_key(key: &KeyEvent) -> Option<GalleryKey> {
        if Self::is_quit_event(key) {
            return (key.kind == KeyEventKind::Press).then_some(GalleryKey::Quit);
        }
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let repeat = key.kind == KeyEventKind::Repeat;
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => Some(GalleryKey::Move(-1)),
            KeyCode::Right | KeyCode::Char('l') => Some(GalleryKey::Move(1)),
            KeyCode::Up | KeyCode::Char('k') => Some(GalleryKey::MoveRows(-1)),
            KeyCode::Down | KeyCode::Char('j') => Some(GalleryKey::MoveRows(1)),
            KeyCode::PageUp => Some(GalleryKey::Page(-1)),
            KeyCode::PageDown => Some(GalleryKey::Page(1)),
            KeyCode::Char('r') if !repeat => Some(GalleryKey::Reload),
            KeyCode::Char(c) if !repeat => c
                .to_digit(10)
                .and_then(|d| u8::try_from(d).ok())
                .filter(|d| (1..=MAX_RATING).contains(d))
                .map(GalleryKey::Rate),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn make_key_event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn test_quit_events() {
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('q'),
            KeyModifiers::NONE
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(EventHandler::is_quit_event(&make_key_event(
            KeyCode::Esc,
            KeyModifiers::NONE
        )));
        assert!(!EventHandler::is_quit_event(&make_key_event(
            KeyCode::Char('a'),
            KeyModifiers::NONE
        )));
    }

    #[test_case(KeyCode::Char('1'), Some(GalleryKey::Rate(1)) ; "one_star")]
    #[test_case(KeyCode::Char('5'), Some(GalleryKey::Rate(5)) ; "five_stars")]
    #[test_case(KeyCode::Char('0'), None ; "zero_is_not_a_star")]
    #[test_case(KeyCode::Char('6'), None ; "six_is_not_a_star")]
    #[test_case(KeyCode::Char('r'), Some(GalleryKey::Reload) ; "reload")]
    #[test_case(KeyCode::Char('j'), Some(GalleryKey::MoveRows(1)) ; "down")]
    #[test_case(KeyCode::Left, Some(GalleryKey::Move(-1)) ; "left")]
    #[test_case(KeyCode::PageDown, Some(GalleryKey::Page(1)) ; "page_down")]
    #[test_case(KeyCode::Char('q'), Some(GalleryKey::Quit) ; "quit")]
    fn test_gallery_key(code: KeyCode, expected: Option<GalleryKey>) {
        assert_eq!(
            EventHandler::gallery_key(&make_key_event(code, KeyModifiers::NONE)),
            expected
        );
    }

    #[test]
    fn test_repeat_does_not_rate_or_reload() {
        let repeat = |code| KeyEvent::new_with_kind(code, KeyModifiers::NONE, KeyEventKind::Repeat);
        assert_eq!(EventHandler::gallery_key(&repeat(KeyCode::Char('3'))), None);
        assert_eq!(EventHandler::gallery_key(&repeat(KeyCode::Char('r'))), None);
        assert_eq!(
            EventHandler::gallery_key(&repeat(KeyCode::Down)),
            Some(GalleryKey::MoveRows(1))
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let release = KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        );
        assert_eq!(EventHandler::gallery_key(&release), None);
    }
}
