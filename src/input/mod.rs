pub mod gesture;

use crossterm::event::KeyCode;

/// Canonical direction every input source normalizes into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Arrow keys map 1:1 onto directions; everything else is a no-op.
pub fn direction_for_key(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_map_to_directions() {
        assert_eq!(direction_for_key(KeyCode::Up), Some(Direction::Up));
        assert_eq!(direction_for_key(KeyCode::Down), Some(Direction::Down));
        assert_eq!(direction_for_key(KeyCode::Left), Some(Direction::Left));
        assert_eq!(direction_for_key(KeyCode::Right), Some(Direction::Right));
    }

    #[test]
    fn test_other_keys_are_noops() {
        assert_eq!(direction_for_key(KeyCode::Char('x')), None);
        assert_eq!(direction_for_key(KeyCode::Enter), None);
        assert_eq!(direction_for_key(KeyCode::Backspace), None);
        assert_eq!(direction_for_key(KeyCode::Tab), None);
    }
}
