//! Terminal-independent key events.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary so
//! the update function can be driven by tests without a terminal.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Regular character key
    Char(char),
    /// Character with Ctrl modifier (Ctrl+s, Ctrl+c, ...)
    CharCtrl(char),

    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,
    /// Shift+Tab
    BackTab,
    Backspace,
    Delete,
}

impl InputKey {
    /// The printable character carried by this key, if any
    pub fn printable(&self) -> Option<char> {
        match self {
            InputKey::Char(c) if !c.is_control() => Some(*c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_chars_are_distinct() {
        assert_ne!(InputKey::CharCtrl('s'), InputKey::Char('s'));
    }

    #[test]
    fn test_printable() {
        assert_eq!(InputKey::Char('{').printable(), Some('{'));
        assert_eq!(InputKey::CharCtrl('s').printable(), None);
        assert_eq!(InputKey::Enter.printable(), None);
        assert_eq!(InputKey::Char('\u{7}').printable(), None);
    }
}
