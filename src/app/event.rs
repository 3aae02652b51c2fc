// Keyboard event handling
//
// The session loop polls for key events between socket reads; the only
// supported interaction is requesting a graceful stop.

use super::SessionState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle a keyboard event and update the session state
///
/// Returns `true` if the session should keep running, `false` once a quit
/// key has been seen.
///
/// # Key Bindings
/// - `Ctrl+C`, `q`, `Q`, `Esc` - stop streaming and print the summary
pub fn handle_key_event(session: &mut SessionState, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            session.running = false;
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            session.running = false;
            false
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        let mut session = SessionState::new();

        assert!(session.running);
        let result = handle_key_event(&mut session, press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!result);
        assert!(!session.running);

        session.running = true;
        let result = handle_key_event(&mut session, press(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!result);
        assert!(!session.running);

        session.running = true;
        let result = handle_key_event(
            &mut session,
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(!result);
        assert!(!session.running);
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let mut session = SessionState::new();

        // A bare 'c' is not a quit request
        let result = handle_key_event(&mut session, press(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(result);
        assert!(session.running);

        let result = handle_key_event(&mut session, press(KeyCode::Up, KeyModifiers::NONE));
        assert!(result);
        assert!(session.running);
    }
}
