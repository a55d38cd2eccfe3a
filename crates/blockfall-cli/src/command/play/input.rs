use blockfall_engine::{Command, SessionState};
use crossterm::event::KeyCode;

/// What a key press asks the play screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Action {
    Session(Command),
    Quit,
}

/// Maps a key to an action for the given session state.
///
/// Space is context dependent: it starts the first game, restarts after game
/// over, and hard-drops otherwise. Commands the session does not accept in
/// `state` are still returned; the session ignores them.
pub(super) fn action_for_key(state: SessionState, code: KeyCode) -> Option<Action> {
    let command = match code {
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Left => Command::MoveLeft,
        KeyCode::Right => Command::MoveRight,
        KeyCode::Down => Command::SoftDrop,
        KeyCode::Up => Command::Rotate,
        KeyCode::Char('z' | 'Z') => Command::RotateCounterClockwise,
        KeyCode::Char('p' | 'P') => Command::TogglePause,
        KeyCode::Char(' ') => match state {
            SessionState::NotStarted => Command::Start,
            SessionState::GameOver => Command::Restart,
            SessionState::Running | SessionState::Paused => Command::HardDrop,
        },
        _ => return None,
    };
    Some(Action::Session(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(state: SessionState, code: KeyCode) -> Option<Command> {
        match action_for_key(state, code)? {
            Action::Session(command) => Some(command),
            Action::Quit => None,
        }
    }

    #[test]
    fn test_movement_keys() {
        let state = SessionState::Running;
        assert_eq!(command(state, KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(command(state, KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(command(state, KeyCode::Down), Some(Command::SoftDrop));
        assert_eq!(command(state, KeyCode::Up), Some(Command::Rotate));
        assert_eq!(
            command(state, KeyCode::Char('z')),
            Some(Command::RotateCounterClockwise)
        );
        assert_eq!(command(state, KeyCode::Char(' ')), Some(Command::HardDrop));
    }

    #[test]
    fn test_space_depends_on_state() {
        assert_eq!(
            command(SessionState::NotStarted, KeyCode::Char(' ')),
            Some(Command::Start)
        );
        assert_eq!(
            command(SessionState::GameOver, KeyCode::Char(' ')),
            Some(Command::Restart)
        );
    }

    #[test]
    fn test_pause_key_is_accepted_while_running_and_paused() {
        for state in [SessionState::Running, SessionState::Paused] {
            let command = command(state, KeyCode::Char('p')).unwrap();
            assert!(state.accepts(command), "{state:?}");
        }
    }

    #[test]
    fn test_quit_keys() {
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(
                action_for_key(SessionState::Running, code),
                Some(Action::Quit)
            );
        }
    }

    #[test]
    fn test_unmapped_key() {
        assert_eq!(action_for_key(SessionState::Running, KeyCode::Char('k')), None);
        assert_eq!(action_for_key(SessionState::Running, KeyCode::Enter), None);
    }
}
