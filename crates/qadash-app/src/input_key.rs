//! Terminal-independent key events.
//!
//! The TUI converts crossterm key events into [`InputKey`] at its boundary,
//! so the app crate (and the headless runner) never depend on crossterm.

/// A key press as seen by the app layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character, shift already applied (`G`, `>`, `/`)
    Char(char),
    /// Character with Ctrl held
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
    /// Whether this is Ctrl+C.
    pub fn is_interrupt(self) -> bool {
        matches!(self, InputKey::CharCtrl('c'))
    }
}
