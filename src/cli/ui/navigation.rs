use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A single key press as the views see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Backspace,
    Interrupt,
    Char(char),
    Unknown,
}

impl NavKey {
    /// Maps a terminal key event; releases and repeats yield `None`.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        if event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(match event.code {
                KeyCode::Char('c') | KeyCode::Char('C') => NavKey::Interrupt,
                _ => NavKey::Unknown,
            });
        }
        Some(match event.code {
            KeyCode::Up => NavKey::Up,
            KeyCode::Down => NavKey::Down,
            KeyCode::Left => NavKey::Left,
            KeyCode::Right => NavKey::Right,
            KeyCode::Enter => NavKey::Enter,
            KeyCode::Esc => NavKey::Esc,
            KeyCode::Backspace => NavKey::Backspace,
            KeyCode::Char(c) => NavKey::Char(c),
            _ => NavKey::Unknown,
        })
    }

    /// Parses a scripted key token such as `UP`, `ENTER`, `SPACE` or `q`.
    pub fn parse_token(token: &str) -> Option<Self> {
        if token.chars().count() == 1 {
            return token.chars().next().map(NavKey::Char);
        }
        match token.to_ascii_uppercase().as_str() {
            "UP" => Some(NavKey::Up),
            "DOWN" => Some(NavKey::Down),
            "LEFT" => Some(NavKey::Left),
            "RIGHT" => Some(NavKey::Right),
            "ENTER" | "RETURN" => Some(NavKey::Enter),
            "ESC" | "ESCAPE" => Some(NavKey::Esc),
            "BACKSPACE" => Some(NavKey::Backspace),
            "SPACE" => Some(NavKey::Char(' ')),
            _ => None,
        }
    }
}

impl fmt::Display for NavKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavKey::Char(c) => write!(f, "{c}"),
            NavKey::Up => f.write_str("Up"),
            NavKey::Down => f.write_str("Down"),
            NavKey::Left => f.write_str("Left"),
            NavKey::Right => f.write_str("Right"),
            NavKey::Enter => f.write_str("Enter"),
            NavKey::Esc => f.write_str("Esc"),
            NavKey::Backspace => f.write_str("Backspace"),
            NavKey::Interrupt => f.write_str("Ctrl-C"),
            NavKey::Unknown => f.write_str("?"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_cover_named_and_single_character_keys() {
        assert_eq!(NavKey::parse_token("down"), Some(NavKey::Down));
        assert_eq!(NavKey::parse_token("q"), Some(NavKey::Char('q')));
        assert_eq!(NavKey::parse_token("S"), Some(NavKey::Char('S')));
        assert_eq!(NavKey::parse_token("SPACE"), Some(NavKey::Char(' ')));
        assert_eq!(NavKey::parse_token("F13"), None);
    }

    #[test]
    fn key_releases_are_ignored() {
        let mut event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(NavKey::from_event(event), Some(NavKey::Char('x')));
        event.kind = KeyEventKind::Release;
        assert_eq!(NavKey::from_event(event), None);
    }

    #[test]
    fn ctrl_c_interrupts() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(NavKey::from_event(event), Some(NavKey::Interrupt));
    }
}
