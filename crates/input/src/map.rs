//! Key mapping from terminal events to game actions.

use crate::types::{ControlScheme, GameAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions under the given control scheme.
pub fn handle_key_event(key: KeyEvent, scheme: ControlScheme) -> Option<GameAction> {
    if let Some(action) = common_action(key.code) {
        return Some(action);
    }
    match scheme {
        ControlScheme::Classic => match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::MoveUp),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::MoveDown),
            KeyCode::Char(' ') => Some(GameAction::Fire),
            _ => None,
        },
        ControlScheme::Vim => match key.code {
            KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::MoveUp),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::MoveDown),
            KeyCode::Char(' ') | KeyCode::Char('f') | KeyCode::Char('F') => Some(GameAction::Fire),
            _ => None,
        },
    }
}

/// Keys bound the same way in every scheme.
fn common_action(code: KeyCode) -> Option<GameAction> {
    match code {
        KeyCode::Char('p') | KeyCode::Char('P') => Some(GameAction::Pause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Tab => Some(GameAction::ToggleDebug),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Describe a key press for the debug readout: `'w'`, `' '[Space]`,
/// `'ArrowUp'`.
pub fn describe_key(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "' '[Space]".to_string(),
        KeyCode::Char(c) => format!("'{c}'"),
        KeyCode::Up => "'ArrowUp'".to_string(),
        KeyCode::Down => "'ArrowDown'".to_string(),
        KeyCode::Left => "'ArrowLeft'".to_string(),
        KeyCode::Right => "'ArrowRight'".to_string(),
        KeyCode::Enter => "'Enter'".to_string(),
        KeyCode::Esc => "'Escape'".to_string(),
        KeyCode::Tab => "'Tab'".to_string(),
        KeyCode::Backspace => "'Backspace'".to_string(),
        other => format!("'{other:?}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn classic(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code), ControlScheme::Classic)
    }

    fn vim(code: KeyCode) -> Option<GameAction> {
        handle_key_event(KeyEvent::from(code), ControlScheme::Vim)
    }

    #[test]
    fn test_classic_movement_keys() {
        assert_eq!(classic(KeyCode::Up), Some(GameAction::MoveUp));
        assert_eq!(classic(KeyCode::Down), Some(GameAction::MoveDown));
        assert_eq!(classic(KeyCode::Char('w')), Some(GameAction::MoveUp));
        assert_eq!(classic(KeyCode::Char('S')), Some(GameAction::MoveDown));
        assert_eq!(classic(KeyCode::Char('k')), None);
    }

    #[test]
    fn test_vim_movement_keys() {
        assert_eq!(vim(KeyCode::Up), Some(GameAction::MoveUp));
        assert_eq!(vim(KeyCode::Char('k')), Some(GameAction::MoveUp));
        assert_eq!(vim(KeyCode::Char('J')), Some(GameAction::MoveDown));
        assert_eq!(vim(KeyCode::Char('w')), None);
    }

    #[test]
    fn test_fire_keys() {
        assert_eq!(classic(KeyCode::Char(' ')), Some(GameAction::Fire));
        assert_eq!(classic(KeyCode::Char('f')), None);
        assert_eq!(vim(KeyCode::Char(' ')), Some(GameAction::Fire));
        assert_eq!(vim(KeyCode::Char('f')), Some(GameAction::Fire));
    }

    #[test]
    fn test_common_keys() {
        for scheme in [ControlScheme::Classic, ControlScheme::Vim] {
            let map = |code| handle_key_event(KeyEvent::from(code), scheme);
            assert_eq!(map(KeyCode::Char('p')), Some(GameAction::Pause));
            assert_eq!(map(KeyCode::Char('R')), Some(GameAction::Restart));
            assert_eq!(map(KeyCode::Tab), Some(GameAction::ToggleDebug));
        }
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }

    #[test]
    fn test_describe_key() {
        assert_eq!(describe_key(KeyCode::Char('w')), "'w'");
        assert_eq!(describe_key(KeyCode::Char(' ')), "' '[Space]");
        assert_eq!(describe_key(KeyCode::Up), "'ArrowUp'");
    }
}
