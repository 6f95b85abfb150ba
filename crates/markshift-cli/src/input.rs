use crossterm::event::{KeyCode, KeyEvent as TermKeyEvent, KeyEventKind, KeyModifiers};
use markshift_engine::{Key, KeyEvent, Modifiers};

/// What the terminal host does with one key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Save,
    Edit(KeyEvent),
    Ignore,
}

pub fn action_for(event: &TermKeyEvent) -> Action {
    if event.kind == KeyEventKind::Release {
        return Action::Ignore;
    }

    let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
    match event.code {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char('q') if ctrl => Action::Quit,
        KeyCode::Char('s') if ctrl => Action::Save,
        _ => to_engine_key(event).map_or(Action::Ignore, Action::Edit),
    }
}

/// Translate a crossterm key into the engine's host-agnostic key event
pub fn to_engine_key(event: &TermKeyEvent) -> Option<KeyEvent> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Esc => Key::Esc,
        _ => return None,
    };

    let modifiers = Modifiers {
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        alt: event.modifiers.contains(KeyModifiers::ALT),
    };
    Some(KeyEvent::new(key, modifiers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> TermKeyEvent {
        TermKeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_and_save_shortcuts() {
        assert_eq!(action_for(&press(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(
            action_for(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            action_for(&press(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Action::Save
        );
    }

    #[test]
    fn test_plain_q_is_typed() {
        assert_eq!(
            action_for(&press(KeyCode::Char('q'), KeyModifiers::NONE)),
            Action::Edit(KeyEvent::plain(Key::Char('q')))
        );
    }

    #[test]
    fn test_space_maps_to_plain_space() {
        let key = to_engine_key(&press(KeyCode::Char(' '), KeyModifiers::NONE)).unwrap();
        assert!(key.is_space());
    }

    #[test]
    fn test_modifiers_are_carried_over() {
        let key = to_engine_key(&press(KeyCode::Enter, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(key, KeyEvent::new(Key::Enter, Modifiers::SHIFT));

        let key = to_engine_key(&press(KeyCode::Char('b'), KeyModifiers::CONTROL)).unwrap();
        assert_eq!(key, KeyEvent::ctrl('b'));
    }

    #[test]
    fn test_unmapped_keys_are_ignored() {
        assert_eq!(to_engine_key(&press(KeyCode::F(1), KeyModifiers::NONE)), None);
        assert_eq!(action_for(&press(KeyCode::PageUp, KeyModifiers::NONE)), Action::Ignore);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut event = press(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(action_for(&event), Action::Ignore);
    }
}
