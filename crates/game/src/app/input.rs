use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use engine::Direction;

use super::commands::PlayerCommand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputAction {
    Command(PlayerCommand),
    RenameNeighborhood,
    ToggleHelp,
    Quit,
}

/// Key bindings shown in the help box, in display order.
pub(crate) const HELP_LINES: [(&str, &str); 10] = [
    ("arrows", "Move your character"),
    ("w", "Fire a projectile up"),
    ("s", "Fire a projectile down"),
    ("a", "Fire a projectile to the left"),
    ("d", "Fire a projectile to the right"),
    ("r", "Increase stamina to fire"),
    (".", "Wait a turn"),
    ("m", "Rename the neighborhood"),
    ("?", "Toggle this help menu"),
    ("q/Esc", "Quit"),
];

pub(crate) fn map_key(key: KeyEvent) -> Option<InputAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(InputAction::Quit);
    }
    let command = |command| Some(InputAction::Command(command));
    match key.code {
        KeyCode::Up => command(PlayerCommand::Move(Direction::Up)),
        KeyCode::Down => command(PlayerCommand::Move(Direction::Down)),
        KeyCode::Left => command(PlayerCommand::Move(Direction::Left)),
        KeyCode::Right => command(PlayerCommand::Move(Direction::Right)),
        KeyCode::Char('w') => command(PlayerCommand::Fire(Direction::Up)),
        KeyCode::Char('s') => command(PlayerCommand::Fire(Direction::Down)),
        KeyCode::Char('a') => command(PlayerCommand::Fire(Direction::Left)),
        KeyCode::Char('d') => command(PlayerCommand::Fire(Direction::Right)),
        KeyCode::Char('r') => command(PlayerCommand::Recharge),
        KeyCode::Char('.') => command(PlayerCommand::Wait),
        KeyCode::Char('m') => Some(InputAction::RenameNeighborhood),
        KeyCode::Char('?') => Some(InputAction::ToggleHelp),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;

    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_move_and_wasd_fire() {
        assert_eq!(
            map_key(press(KeyCode::Left)),
            Some(InputAction::Command(PlayerCommand::Move(Direction::Left)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('w'))),
            Some(InputAction::Command(PlayerCommand::Fire(Direction::Up)))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('d'))),
            Some(InputAction::Command(PlayerCommand::Fire(Direction::Right)))
        );
    }

    #[test]
    fn meta_keys_do_not_produce_commands() {
        assert_eq!(
            map_key(press(KeyCode::Char('m'))),
            Some(InputAction::RenameNeighborhood)
        );
        assert_eq!(map_key(press(KeyCode::Char('?'))), Some(InputAction::ToggleHelp));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(InputAction::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(InputAction::Quit)
        );
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let release = KeyEvent {
            code: KeyCode::Char('r'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(release), None);
    }
}
