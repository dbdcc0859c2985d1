//! Key mapping from terminal events to player actions.

use crate::types::{Category, PlayerAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to player actions.
pub fn handle_key_event(key: KeyEvent) -> Option<PlayerAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        // Bins by position
        KeyCode::Char(c @ '1'..='5') => {
            let index = c as usize - '1' as usize;
            Some(PlayerAction::Drop(Category::ALL[index]))
        }

        // Bins by initial
        KeyCode::Char('p') | KeyCode::Char('P') => Some(PlayerAction::Drop(Category::Paper)),
        KeyCode::Char('l') | KeyCode::Char('L') => Some(PlayerAction::Drop(Category::Plastic)),
        KeyCode::Char('g') | KeyCode::Char('G') => Some(PlayerAction::Drop(Category::Glass)),
        KeyCode::Char('o') | KeyCode::Char('O') => Some(PlayerAction::Drop(Category::Organic)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(PlayerAction::Drop(Category::Metal)),

        // Missed every bin
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(PlayerAction::Discard)
        }

        // Session
        KeyCode::Enter
        | KeyCode::Char('s')
        | KeyCode::Char('S')
        | KeyCode::Char('r')
        | KeyCode::Char('R') => Some(PlayerAction::Start),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(PlayerAction::End),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(PlayerAction::FunFact),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Key hint for a bin, as shown under it.
pub fn bin_key(category: Category) -> char {
    match category {
        Category::Paper => 'P',
        Category::Plastic => 'L',
        Category::Glass => 'G',
        Category::Organic => 'O',
        Category::Metal => 'M',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_number_keys_follow_bin_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            let key = char::from(b'1' + i as u8);
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(key))),
                Some(PlayerAction::Drop(*category))
            );
        }
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('6'))), None);
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_letter_keys_match_hints() {
        for category in Category::ALL {
            let hint = bin_key(category);
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(hint))),
                Some(PlayerAction::Drop(category))
            );
            assert_eq!(
                handle_key_event(KeyEvent::from(KeyCode::Char(hint.to_ascii_lowercase()))),
                Some(PlayerAction::Drop(category))
            );
        }
    }

    #[test]
    fn test_session_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(PlayerAction::Start)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(PlayerAction::Start)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('e'))),
            Some(PlayerAction::End)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('f'))),
            Some(PlayerAction::FunFact)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(PlayerAction::Discard)
        );
    }

    #[test]
    fn test_control_chords_are_not_actions() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
